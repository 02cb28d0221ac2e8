//! Run state and events
//!
//! `RunState` is owned and mutated only by the scoring state machine.

use serde::{Deserialize, Serialize};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended, actor still rolling
    Dying,
    /// Actor frozen, waiting for a tap to restart
    Over,
}

/// Scores and run flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    /// Walls passed this run
    pub score: u32,
    /// Pickups collected this run
    pub pickup_score: u32,
    pub running: bool,
    pub actor_frozen: bool,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            score: 0,
            pickup_score: 0,
            running: true,
            actor_frozen: false,
        }
    }
}

impl RunState {
    pub fn phase(&self) -> GamePhase {
        match (self.running, self.actor_frozen) {
            (true, _) => GamePhase::Running,
            (false, false) => GamePhase::Dying,
            (false, true) => GamePhase::Over,
        }
    }
}

/// Something the host may want to react to (sound, effects, logging)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ObstacleSpawned { gap_center: f32 },
    PickupSpawned { y: f32 },
    Scored { score: u32 },
    NewBest { best: u32 },
    PickupCollected { pickup_score: u32 },
    RunEnded { score: u32 },
    ActorFrozen,
    Restarted,
}
