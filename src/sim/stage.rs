//! Collaborator traits the core drives
//!
//! The core never touches sprites or physics bodies directly. It talks to a
//! `Stage` (entities and the actor) and a `Scoreboard` (score labels).

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::category::CategorySet;
use super::scheduler::{ObstaclePair, PickupSpawn};

/// Stable handle for a stage entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Presentation/physics host
pub trait Stage {
    /// Materialize a wall pair and its score trigger in the obstacle container
    fn spawn_obstacle_pair(&mut self, pair: &ObstaclePair);

    /// Materialize a pickup and return its handle
    fn spawn_pickup(&mut self, pickup: &PickupSpawn) -> EntityId;

    /// Detach an entity; later `is_attached` calls return false
    fn remove_entity(&mut self, id: EntityId);

    fn is_attached(&self, id: EntityId) -> bool;

    /// Remove every wall pair and score trigger
    fn clear_obstacles(&mut self);

    /// Multiplier on obstacle motion (1 running, 0 stopped)
    fn set_scroll_speed(&mut self, speed: f32);

    fn actor_position(&self) -> Vec2;

    fn set_actor_velocity(&mut self, velocity: Vec2);

    fn apply_actor_impulse(&mut self, impulse: Vec2);

    fn set_actor_collides_with(&mut self, set: CategorySet);

    /// Rotate the actor by `angle` radians over `duration` seconds
    fn set_actor_rotation(&mut self, angle: f32, duration: f32);

    /// Stop all further actor position/velocity updates
    fn freeze_actor(&mut self);

    /// Put the actor back at `position`: zero velocity, zero rotation, unfrozen
    fn reset_actor(&mut self, position: Vec2);
}

/// Display host for the three score labels
pub trait Scoreboard {
    fn update_score_text(&mut self, score: u32);
    fn update_best_score_text(&mut self, best: u32);
    fn update_pickup_score_text(&mut self, pickup_score: u32);
}
