//! Data-driven playfield geometry and game balance
//!
//! Everything the scheduler and the state machine need to know about sizes and
//! timings lives here, so a JSON file can retune the game without a rebuild.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Playfield and sprite geometry (points, y up, origin bottom-left)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    /// Height of the ground strip at the bottom of the playfield
    pub ground_height: f32,
    pub actor_size: Vec2,
    pub wall_size: Vec2,
    pub pickup_size: Vec2,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: 375.0,
            height: 667.0,
            ground_height: 112.0,
            actor_size: Vec2::new(34.0, 24.0),
            wall_size: Vec2::new(52.0, 480.0),
            pickup_size: Vec2::new(32.0, 32.0),
        }
    }
}

impl Layout {
    /// Vertical centre of the open sky between ground and top edge
    pub fn sky_center_y(&self) -> f32 {
        self.ground_height + (self.height - self.ground_height) / 2.0
    }

    /// Where the actor starts every run
    pub fn actor_start(&self) -> Vec2 {
        Vec2::new(self.width * 0.2, self.height * 0.7)
    }

    /// Distance an obstacle travels from spawn until it is fully off-screen
    pub fn travel_distance(&self) -> f32 {
        self.width + self.wall_size.x
    }
}

/// Gameplay balance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Seconds between wall pair spawns
    pub wall_interval: f32,
    /// Seconds a wall pair takes to cross the playfield
    pub travel_time: f32,
    /// Maximum vertical offset of a gap centre from the sky centre
    pub gap_jitter: f32,
    /// Gap height as a multiple of the actor height
    pub gap_actor_multiple: f32,
    /// Mean seconds between pickup spawns
    pub pickup_interval: f32,
    /// Total width of the pickup interval window (interval ± range/2)
    pub pickup_interval_range: f32,
    /// Maximum vertical offset of a pickup from the sky centre
    pub pickup_jitter: f32,
    /// Upward impulse applied per tap
    pub flap_impulse: f32,
    /// Mass the reference stage divides impulses by
    pub actor_mass: f32,
    /// Vertical acceleration (negative is down)
    pub gravity: f32,
    /// Death roll angle per point of actor height, in multiples of π
    pub death_roll_factor: f32,
    /// Seconds the death roll takes before the actor freezes
    pub death_roll_duration: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            wall_interval: 2.0,
            travel_time: 4.0,
            gap_jitter: 60.0,
            gap_actor_multiple: 4.0,
            pickup_interval: 9.0,
            pickup_interval_range: 5.0,
            pickup_jitter: 120.0,
            flap_impulse: 15.0,
            actor_mass: 0.06,
            gravity: -600.0,
            death_roll_factor: 0.01,
            death_roll_duration: 1.0,
        }
    }
}

/// Smallest spawn interval the scheduler accepts
const MIN_INTERVAL: f32 = 0.05;
/// Longest interval or duration, in seconds
const MAX_INTERVAL: f32 = 3600.0;
/// Largest playfield or sprite dimension, in points
const MAX_EXTENT: f32 = 1.0e5;

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

fn interval(value: f32, fallback: f32) -> f32 {
    finite_or(value, fallback).clamp(MIN_INTERVAL, MAX_INTERVAL)
}

fn extent(value: Vec2, fallback: Vec2) -> Vec2 {
    let value = if value.is_finite() { value } else { fallback };
    value.abs().min(Vec2::splat(MAX_EXTENT))
}

/// Complete game configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout: Layout,
    pub tuning: Tuning,
}

impl Config {
    /// Parse a configuration, filling missing fields with defaults
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str::<Config>(json) {
            Ok(config) => Some(config.sanitized()),
            Err(e) => {
                log::warn!("Invalid config JSON: {}", e);
                None
            }
        }
    }

    /// Load configuration from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => {
                if let Some(config) = Self::from_json(&json) {
                    log::info!("Loaded config from {}", path.display());
                    return config;
                }
            }
            Err(e) => log::warn!("Could not read config {}: {}", path.display(), e),
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Clamp values so every derived interval and random range is valid
    ///
    /// Non-finite fields fall back to their defaults. Jitters are bounded by
    /// the playfield height so a random draw's span stays finite.
    pub fn sanitized(mut self) -> Self {
        let dl = Layout::default();
        let l = &mut self.layout;
        l.width = finite_or(l.width, dl.width).clamp(1.0, MAX_EXTENT);
        l.height = finite_or(l.height, dl.height).clamp(1.0, MAX_EXTENT);
        l.ground_height = finite_or(l.ground_height, dl.ground_height).clamp(0.0, l.height);
        l.actor_size = extent(l.actor_size, dl.actor_size);
        l.wall_size = extent(l.wall_size, dl.wall_size);
        l.pickup_size = extent(l.pickup_size, dl.pickup_size);
        let height = l.height;

        let dt = Tuning::default();
        let t = &mut self.tuning;
        t.wall_interval = interval(t.wall_interval, dt.wall_interval);
        t.travel_time = interval(t.travel_time, dt.travel_time);
        t.gap_jitter = finite_or(t.gap_jitter, dt.gap_jitter).abs().min(height);
        t.gap_actor_multiple = finite_or(t.gap_actor_multiple, dt.gap_actor_multiple)
            .clamp(0.0, height / l.actor_size.y.max(1.0));
        t.pickup_interval = interval(t.pickup_interval, dt.pickup_interval);
        // Keep the shortest possible pickup interval positive
        let max_range = 2.0 * (t.pickup_interval - MIN_INTERVAL);
        t.pickup_interval_range = finite_or(t.pickup_interval_range, dt.pickup_interval_range)
            .abs()
            .min(max_range);
        t.pickup_jitter = finite_or(t.pickup_jitter, dt.pickup_jitter).abs().min(height);
        t.flap_impulse = finite_or(t.flap_impulse, dt.flap_impulse);
        t.actor_mass = finite_or(t.actor_mass, dt.actor_mass);
        if t.actor_mass <= 0.0 {
            t.actor_mass = dt.actor_mass;
        }
        t.gravity = finite_or(t.gravity, dt.gravity);
        t.death_roll_factor = finite_or(t.death_roll_factor, dt.death_roll_factor);
        t.death_roll_duration =
            finite_or(t.death_roll_duration, dt.death_roll_duration).clamp(0.0, MAX_INTERVAL);
        self
    }

    /// Horizontal obstacle velocity (points/sec, leftward is negative)
    pub fn scroll_velocity(&self) -> f32 {
        -self.layout.travel_distance() / self.tuning.travel_time
    }

    /// Height of the opening between the two walls of a pair
    pub fn gap_height(&self) -> f32 {
        self.layout.actor_size.y * self.tuning.gap_actor_multiple
    }
}
