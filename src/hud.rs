//! Score labels
//!
//! Keeps the three label strings up to date; a renderer only has to draw them.

use crate::sim::Scoreboard;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub score_text: String,
    pub best_score_text: String,
    pub pickup_score_text: String,
    /// Label updates received, for change detection by the renderer
    pub revision: u64,
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            score_text: format_score(0),
            best_score_text: format_best(0),
            pickup_score_text: format_pickup(0),
            revision: 0,
        }
    }
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    /// All three labels, top to bottom
    pub fn lines(&self) -> [&str; 3] {
        [
            &self.score_text,
            &self.best_score_text,
            &self.pickup_score_text,
        ]
    }
}

impl Scoreboard for Hud {
    fn update_score_text(&mut self, score: u32) {
        self.score_text = format_score(score);
        self.revision += 1;
    }

    fn update_best_score_text(&mut self, best: u32) {
        self.best_score_text = format_best(best);
        self.revision += 1;
    }

    fn update_pickup_score_text(&mut self, pickup_score: u32) {
        self.pickup_score_text = format_pickup(pickup_score);
        self.revision += 1;
    }
}

fn format_score(score: u32) -> String {
    format!("Score:{}", score)
}

fn format_best(best: u32) -> String {
    format!("Best Score:{}", best)
}

fn format_pickup(pickup_score: u32) -> String {
    format!("Item Score:{}", pickup_score)
}
