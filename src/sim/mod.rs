//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod category;
pub mod collision;
pub mod contact;
pub mod game;
pub mod scheduler;
pub mod session;
pub mod stage;
pub mod state;
pub mod tick;
pub mod world;

pub use category::{Body, Category, CategorySet};
pub use collision::{Aabb, circle_overlaps_aabb};
pub use contact::{Contact, ContactBody, ContactKind};
pub use game::{ContactOutcome, Game, TapOutcome};
pub use scheduler::{ObstaclePair, ObstacleScheduler, PickupSpawn, Spawn};
pub use session::Session;
pub use stage::{EntityId, Scoreboard, Stage};
pub use state::{GameEvent, GamePhase, RunState};
pub use tick::{TickInput, tick};
pub use world::{Entity, EntityKind, World};
