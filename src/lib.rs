//! Flap Run - a tap-to-flap arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (obstacle scheduling, contact scoring, reference stage)
//! - `persistence`: Best-score storage (memory, JSON file, LocalStorage)
//! - `platform`: Browser entry point
//! - `tuning`: Data-driven playfield geometry and game balance
//! - `hud`: Score label formatting

pub mod best_score;
pub mod hud;
pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use best_score::BestScore;
pub use hud::Hud;
pub use tuning::{Config, Layout, Tuning};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta accepted by the session driver (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Scroll speed multiplier while a run is live
    pub const SCROLL_RUNNING: f32 = 1.0;
    /// Scroll speed multiplier once the run has ended
    pub const SCROLL_STOPPED: f32 = 0.0;
}
