//! Best score tracking
//!
//! The best score is read once when a session starts and only ever goes up.

use crate::persistence::BestScoreStore;

/// Highest score reached across sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BestScore {
    value: u32,
}

impl BestScore {
    pub fn new(value: u32) -> Self {
        Self { value }
    }

    /// Read the stored best score
    pub fn load(store: &dyn BestScoreStore) -> Self {
        let best = Self::new(store.load_best());
        log::info!("Best score: {}", best.value);
        best
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// A score qualifies only if it strictly beats the current best
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.value
    }

    /// Record a score, returning true if it became the new best
    pub fn submit(&mut self, score: u32) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.value = score;
        true
    }
}
