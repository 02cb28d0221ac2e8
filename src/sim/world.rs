//! Headless reference stage
//!
//! A deliberately small kinematic world that implements `Stage`:
//! - obstacles and pickups move at constant velocity, scaled by scroll speed
//! - the actor falls under gravity and takes impulses through its mass
//! - only the ground blocks the actor; walls and pickups just report contact
//! - contacts are reported once when an overlap begins
//!
//! Entities are kept sorted by id so contact order is deterministic.

use std::collections::HashSet;

use glam::Vec2;

use super::category::{Body, CategorySet};
use super::collision::{Aabb, circle_overlaps_aabb, rest_on_top};
use super::contact::{Contact, ContactBody};
use super::scheduler::{ObstaclePair, PickupSpawn};
use super::stage::{EntityId, Stage};
use crate::consts::SCROLL_RUNNING;
use crate::tuning::Config;

/// How far a resting actor sinks into the ground
const RESTING_SLOP: f32 = 0.01;

/// What an entity represents on the stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityKind {
    Ground,
    Wall,
    /// Invisible zone behind a wall pair; remembers the pair's gap
    ScoreZone { gap_center: f32 },
    Pickup,
}

/// A non-actor stage entity
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub body: Body,
    pub bounds: Aabb,
    /// Horizontal velocity before scroll scaling
    pub velocity: f32,
    /// Distance moved so far
    pub travelled: f32,
}

/// Rotation still to be played out
#[derive(Debug, Clone, Copy)]
struct Roll {
    rate: f32,
    remaining: f32,
}

/// The player's bird
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: EntityId,
    pub body: Body,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Radians, counter-clockwise
    pub rotation: f32,
    pub frozen: bool,
    roll: Option<Roll>,
}

impl Actor {
    fn new(id: EntityId, pos: Vec2, radius: f32) -> Self {
        Self {
            id,
            body: Body::actor(),
            pos,
            vel: Vec2::ZERO,
            radius,
            rotation: 0.0,
            frozen: false,
            roll: None,
        }
    }

    fn advance_roll(&mut self, dt: f32) {
        if let Some(roll) = self.roll.as_mut() {
            let step = dt.min(roll.remaining);
            self.rotation += roll.rate * step;
            roll.remaining -= step;
            if roll.remaining <= 0.0 {
                self.roll = None;
            }
        }
    }

    fn finish_roll(&mut self) {
        if let Some(roll) = self.roll.take() {
            self.rotation += roll.rate * roll.remaining;
        }
    }
}

/// Kinematic stage used by the session driver, the demo and the tests
#[derive(Debug, Clone)]
pub struct World {
    config: Config,
    pub actor: Actor,
    entities: Vec<Entity>,
    next_id: u32,
    scroll_speed: f32,
    /// Overlaps seen last step, keyed by the non-actor entity
    touching: HashSet<EntityId>,
}

impl World {
    pub fn new(config: Config) -> Self {
        let config = config.sanitized();
        let layout = config.layout;
        let mut world = Self {
            config,
            actor: Actor::new(EntityId(0), layout.actor_start(), layout.actor_size.y / 2.0),
            entities: Vec::new(),
            next_id: 0,
            scroll_speed: SCROLL_RUNNING,
            touching: HashSet::new(),
        };
        world.actor.id = world.next_entity_id();

        let ground = Aabb::new(
            Vec2::new(layout.width / 2.0, layout.ground_height / 2.0),
            Vec2::new(layout.width, layout.ground_height),
        );
        world.push(EntityKind::Ground, Body::ground(), ground, 0.0);
        world
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> EntityId {
        self.next_id += 1;
        EntityId(self.next_id)
    }

    fn push(&mut self, kind: EntityKind, body: Body, bounds: Aabb, velocity: f32) -> EntityId {
        let id = self.next_entity_id();
        self.entities.push(Entity {
            id,
            kind,
            body,
            bounds,
            velocity,
            travelled: 0.0,
        });
        id
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn scroll_speed(&self) -> f32 {
        self.scroll_speed
    }

    /// Gap centre of the nearest wall pair the actor has not yet passed
    pub fn next_gap_center(&self) -> Option<f32> {
        let x = self.actor.pos.x - self.actor.radius;
        self.entities
            .iter()
            .filter_map(|e| match e.kind {
                EntityKind::ScoreZone { gap_center } if e.bounds.min().x > x => {
                    Some((e.bounds.min().x, gap_center))
                }
                _ => None,
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, gap)| gap)
    }

    /// Advance one step and return the contacts that began during it
    pub fn step(&mut self, dt: f32) -> Vec<Contact> {
        let travel = self.config.layout.travel_distance();
        let scroll = self.scroll_speed;
        for entity in &mut self.entities {
            if entity.velocity != 0.0 && scroll != 0.0 {
                let dx = entity.velocity * scroll * dt;
                entity.bounds.translate(Vec2::new(dx, 0.0));
                entity.travelled += dx.abs();
            }
        }
        // Scrolled off the left edge
        self.entities.retain(|e| e.travelled < travel);

        if !self.actor.frozen {
            let actor = &mut self.actor;
            actor.vel.y += self.config.tuning.gravity * dt;
            actor.pos += actor.vel * dt;
            actor.advance_roll(dt);

            for entity in &self.entities {
                if entity.kind != EntityKind::Ground || !actor.body.is_blocked_by(&entity.body) {
                    continue;
                }
                if let Some(push) = rest_on_top(actor.pos, actor.radius, &entity.bounds) {
                    // Sink by a hair so a resting actor stays in contact
                    actor.pos.y += push - RESTING_SLOP;
                    actor.vel.y = actor.vel.y.max(0.0);
                }
            }
        }

        self.detect_contacts()
    }

    fn detect_contacts(&mut self) -> Vec<Contact> {
        let actor = &self.actor;
        let mut now_touching = HashSet::new();
        let mut contacts = Vec::new();

        for entity in &self.entities {
            if !actor.body.reports_with(&entity.body) {
                continue;
            }
            if !circle_overlaps_aabb(actor.pos, actor.radius, &entity.bounds) {
                continue;
            }
            now_touching.insert(entity.id);
            if !self.touching.contains(&entity.id) {
                contacts.push(Contact::new(
                    ContactBody::new(actor.id, actor.body.category),
                    ContactBody::new(entity.id, entity.body.category),
                ));
            }
        }

        self.touching = now_touching;
        contacts
    }
}

impl Stage for World {
    fn spawn_obstacle_pair(&mut self, pair: &ObstaclePair) {
        let v = pair.velocity;
        self.push(EntityKind::Wall, Body::obstacle(), pair.lower, v);
        self.push(EntityKind::Wall, Body::obstacle(), pair.upper, v);
        self.push(
            EntityKind::ScoreZone {
                gap_center: pair.gap_center,
            },
            Body::score_trigger(),
            pair.trigger,
            v,
        );
    }

    fn spawn_pickup(&mut self, pickup: &PickupSpawn) -> EntityId {
        self.push(EntityKind::Pickup, Body::pickup(), pickup.bounds, pickup.velocity)
    }

    fn remove_entity(&mut self, id: EntityId) {
        self.entities.retain(|e| e.id != id);
        self.touching.remove(&id);
    }

    fn is_attached(&self, id: EntityId) -> bool {
        id == self.actor.id || self.entities.iter().any(|e| e.id == id)
    }

    fn clear_obstacles(&mut self) {
        self.entities
            .retain(|e| !matches!(e.kind, EntityKind::Wall | EntityKind::ScoreZone { .. }));
        let entities = &self.entities;
        self.touching
            .retain(|id| entities.iter().any(|e| e.id == *id));
    }

    fn set_scroll_speed(&mut self, speed: f32) {
        self.scroll_speed = speed;
    }

    fn actor_position(&self) -> Vec2 {
        self.actor.pos
    }

    fn set_actor_velocity(&mut self, velocity: Vec2) {
        self.actor.vel = velocity;
    }

    fn apply_actor_impulse(&mut self, impulse: Vec2) {
        self.actor.vel += impulse / self.config.tuning.actor_mass;
    }

    fn set_actor_collides_with(&mut self, set: CategorySet) {
        self.actor.body.collides_with = set;
    }

    fn set_actor_rotation(&mut self, angle: f32, duration: f32) {
        if duration <= 0.0 {
            self.actor.rotation += angle;
            self.actor.roll = None;
        } else {
            self.actor.roll = Some(Roll {
                rate: angle / duration,
                remaining: duration,
            });
        }
    }

    fn freeze_actor(&mut self) {
        self.actor.finish_roll();
        self.actor.frozen = true;
    }

    fn reset_actor(&mut self, position: Vec2) {
        let actor = &mut self.actor;
        actor.pos = position;
        actor.vel = Vec2::ZERO;
        actor.rotation = 0.0;
        actor.roll = None;
        actor.frozen = false;
    }
}
