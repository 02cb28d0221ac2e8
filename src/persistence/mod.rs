//! Best score persistence
//!
//! Stores:
//! - `MemoryStore`: process lifetime only (tests, demos)
//! - `JsonFileStore`: versioned JSON envelope, tmp file → rename (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm32)
//!
//! Saving is best effort. Failures are logged, never surfaced to the game.

mod file;
mod memory;
#[cfg(target_arch = "wasm32")]
mod web;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

/// Key the best score is stored under
pub const BEST_SCORE_KEY: &str = "BEST";

/// Durable storage for a single best-score integer
pub trait BestScoreStore {
    /// Stored best score, 0 when nothing is stored or it cannot be read
    fn load_best(&self) -> u32;

    fn save_best(&mut self, best: u32);
}
