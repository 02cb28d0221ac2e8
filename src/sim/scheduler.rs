//! Procedural obstacle and pickup spawning
//!
//! Two independent countdown timers advanced by `tick(dt)`:
//! - walls spawn on a fixed period, the first one immediately
//! - pickups spawn on a randomized period, the first one after a full wait
//!
//! The scheduler keeps no reference to what it spawned.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Aabb;
use crate::tuning::Config;

/// A wall pair plus its score trigger, all moving as one group
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstaclePair {
    /// Horizontal spawn position of the group origin
    pub x: f32,
    /// Vertical centre of the opening
    pub gap_center: f32,
    /// Height of the opening
    pub gap_height: f32,
    /// Horizontal velocity (negative = leftward)
    pub velocity: f32,
    pub lower: Aabb,
    pub upper: Aabb,
    pub trigger: Aabb,
}

/// A bonus pickup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickupSpawn {
    pub x: f32,
    pub y: f32,
    pub velocity: f32,
    pub bounds: Aabb,
}

/// Something the scheduler asks the stage to materialize
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Spawn {
    ObstaclePair(ObstaclePair),
    Pickup(PickupSpawn),
}

/// Countdown-driven spawner
#[derive(Debug, Clone)]
pub struct ObstacleScheduler {
    config: Config,
    seed: u64,
    rng: Pcg32,
    /// Seconds until the next wall pair
    wall_timer: f32,
    /// Seconds until the next pickup
    pickup_timer: f32,
}

impl ObstacleScheduler {
    pub fn new(config: Config, seed: u64) -> Self {
        let mut scheduler = Self {
            config: config.sanitized(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            wall_timer: 0.0,
            pickup_timer: 0.0,
        };
        scheduler.pickup_timer = scheduler.next_pickup_interval();
        scheduler
    }

    /// Restore the initial timers and RNG stream
    pub fn reset(&mut self) {
        *self = Self::new(self.config, self.seed);
    }

    pub fn wall_timer(&self) -> f32 {
        self.wall_timer
    }

    pub fn pickup_timer(&self) -> f32 {
        self.pickup_timer
    }

    /// Advance both timers, handing every due spawn to `spawn` in time order
    pub fn tick(&mut self, dt: f32, mut spawn: impl FnMut(Spawn)) {
        let dt = dt.max(0.0);
        self.wall_timer -= dt;
        self.pickup_timer -= dt;

        // Interleave so a long step still emits in chronological order
        loop {
            let wall_due = self.wall_timer <= 0.0;
            let pickup_due = self.pickup_timer <= 0.0;
            match (wall_due, pickup_due) {
                (false, false) => break,
                (true, true) if self.pickup_timer < self.wall_timer => {
                    self.emit_pickup(&mut spawn)
                }
                (true, _) => self.emit_wall(&mut spawn),
                (false, true) => self.emit_pickup(&mut spawn),
            }
        }
    }

    fn emit_wall(&mut self, spawn: &mut impl FnMut(Spawn)) {
        let pair = self.make_obstacle_pair();
        log::debug!("Spawn wall pair, gap at {:.1}", pair.gap_center);
        spawn(Spawn::ObstaclePair(pair));
        self.wall_timer += self.config.tuning.wall_interval;
    }

    fn emit_pickup(&mut self, spawn: &mut impl FnMut(Spawn)) {
        let pickup = self.make_pickup();
        log::debug!("Spawn pickup at {:.1}", pickup.y);
        spawn(Spawn::Pickup(pickup));
        self.pickup_timer += self.next_pickup_interval();
    }

    /// Uniform draw in [-range, range]; ranges are non-negative after sanitizing
    fn offset(&mut self, range: f32) -> f32 {
        self.rng.random_range(-range..=range)
    }

    fn next_pickup_interval(&mut self) -> f32 {
        let t = &self.config.tuning;
        let (base, half) = (t.pickup_interval, t.pickup_interval_range / 2.0);
        base + self.offset(half)
    }

    fn make_obstacle_pair(&mut self) -> ObstaclePair {
        let layout = self.config.layout;
        let gap_center = layout.sky_center_y() + self.offset(self.config.tuning.gap_jitter);
        let gap_height = self.config.gap_height();
        let x = layout.width + layout.wall_size.x / 2.0;

        let wall_offset = gap_height / 2.0 + layout.wall_size.y / 2.0;
        let lower = Aabb::new(Vec2::new(x, gap_center - wall_offset), layout.wall_size);
        let upper = Aabb::new(Vec2::new(x, gap_center + wall_offset), layout.wall_size);
        let trigger = Aabb::new(
            Vec2::new(
                x + layout.wall_size.x + layout.actor_size.x / 2.0,
                layout.height / 2.0,
            ),
            Vec2::new(layout.wall_size.x, layout.height),
        );

        ObstaclePair {
            x,
            gap_center,
            gap_height,
            velocity: self.config.scroll_velocity(),
            lower,
            upper,
            trigger,
        }
    }

    fn make_pickup(&mut self) -> PickupSpawn {
        let layout = self.config.layout;
        let y = layout.sky_center_y() + self.offset(self.config.tuning.pickup_jitter);
        let x = layout.width + layout.pickup_size.x / 2.0;
        PickupSpawn {
            x,
            y,
            velocity: self.config.scroll_velocity(),
            bounds: Aabb::new(Vec2::new(x, y), layout.pickup_size),
        }
    }
}
