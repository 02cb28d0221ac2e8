//! Collision/scoring state machine
//!
//! `Running → Dying` on the first fatal contact, `Dying → Over` once the death
//! roll has played out, `Over → Running` only through `restart()`. Contacts are
//! ignored unless running. The scheduler keeps ticking regardless of the phase.

use std::f32::consts::PI;

use glam::Vec2;

use super::category::{Body, Category};
use super::contact::{Contact, ContactKind};
use super::scheduler::{ObstacleScheduler, Spawn};
use super::stage::{EntityId, Scoreboard, Stage};
use super::state::{GameEvent, GamePhase, RunState};
use crate::best_score::BestScore;
use crate::consts::{SCROLL_RUNNING, SCROLL_STOPPED};
use crate::persistence::BestScoreStore;
use crate::tuning::Config;

/// Result of feeding one contact to the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Run already over, stale body, or no matching rule
    Ignored,
    Scored { score: u32, new_best: bool },
    PickupCollected { pickup_score: u32 },
    RunEnded { score: u32 },
}

/// Result of a tap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    Flap,
    Restart,
    Ignored,
}

pub struct Game {
    config: Config,
    run: RunState,
    best: BestScore,
    store: Box<dyn BestScoreStore>,
    scheduler: ObstacleScheduler,
    /// Most recent pickup handed to the stage
    pickup: Option<EntityId>,
    /// Seconds left before the dying actor freezes
    death_roll: Option<f32>,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(config: Config, seed: u64, store: Box<dyn BestScoreStore>) -> Self {
        let config = config.sanitized();
        let best = BestScore::load(store.as_ref());
        Self {
            config,
            run: RunState::default(),
            best,
            store,
            scheduler: ObstacleScheduler::new(config, seed),
            pickup: None,
            death_roll: None,
            events: Vec::new(),
        }
    }

    /// Push the initial label values to the display
    pub fn start(&self, board: &mut impl Scoreboard) {
        board.update_score_text(self.run.score);
        board.update_best_score_text(self.best.value());
        board.update_pickup_score_text(self.run.pickup_score);
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn run_state(&self) -> &RunState {
        &self.run
    }

    pub fn phase(&self) -> GamePhase {
        self.run.phase()
    }

    pub fn best_score(&self) -> u32 {
        self.best.value()
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance the death roll and the spawn timers
    pub fn tick(&mut self, dt: f32, stage: &mut impl Stage) {
        if let Some(remaining) = self.death_roll.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.death_roll = None;
                self.run.actor_frozen = true;
                stage.freeze_actor();
                self.events.push(GameEvent::ActorFrozen);
                log::debug!("Actor frozen");
            }
        }

        let pickup = &mut self.pickup;
        let events = &mut self.events;
        self.scheduler.tick(dt, |spawn| match spawn {
            Spawn::ObstaclePair(pair) => {
                stage.spawn_obstacle_pair(&pair);
                events.push(GameEvent::ObstacleSpawned {
                    gap_center: pair.gap_center,
                });
            }
            Spawn::Pickup(spawn) => {
                *pickup = Some(stage.spawn_pickup(&spawn));
                events.push(GameEvent::PickupSpawned { y: spawn.y });
            }
        });
    }

    /// React to a contact begin reported by the stage
    pub fn on_contact(
        &mut self,
        contact: &Contact,
        stage: &mut impl Stage,
        board: &mut impl Scoreboard,
    ) -> ContactOutcome {
        if !self.run.running {
            return ContactOutcome::Ignored;
        }
        // One overlap can produce several reports; detached bodies are stale
        if !stage.is_attached(contact.a.entity) || !stage.is_attached(contact.b.entity) {
            return ContactOutcome::Ignored;
        }

        match contact.kind() {
            ContactKind::Score => self.score(board),
            ContactKind::Pickup => self.collect_pickup(contact, stage, board),
            ContactKind::Fatal => self.end_run(stage),
            ContactKind::Unrelated => ContactOutcome::Ignored,
        }
    }

    fn score(&mut self, board: &mut impl Scoreboard) -> ContactOutcome {
        self.run.score += 1;
        let score = self.run.score;
        log::debug!("Score up: {}", score);
        board.update_score_text(score);
        self.events.push(GameEvent::Scored { score });

        let new_best = self.best.submit(score);
        if new_best {
            board.update_best_score_text(score);
            self.store.save_best(score);
            self.events.push(GameEvent::NewBest { best: score });
        }

        ContactOutcome::Scored { score, new_best }
    }

    fn collect_pickup(
        &mut self,
        contact: &Contact,
        stage: &mut impl Stage,
        board: &mut impl Scoreboard,
    ) -> ContactOutcome {
        let live = self.pickup.is_some_and(|id| stage.is_attached(id));
        let Some(body) = contact.body(Category::Pickup) else {
            return ContactOutcome::Ignored;
        };
        if !live {
            return ContactOutcome::Ignored;
        }

        stage.remove_entity(body.entity);
        if self.pickup == Some(body.entity) {
            self.pickup = None;
        }

        self.run.pickup_score += 1;
        let pickup_score = self.run.pickup_score;
        log::debug!("Pickup collected: {}", pickup_score);
        board.update_pickup_score_text(pickup_score);
        self.events.push(GameEvent::PickupCollected { pickup_score });

        ContactOutcome::PickupCollected { pickup_score }
    }

    fn end_run(&mut self, stage: &mut impl Stage) -> ContactOutcome {
        let score = self.run.score;
        log::info!("Game over with score {}", score);

        self.run.running = false;
        stage.set_scroll_speed(SCROLL_STOPPED);
        // The falling actor may still land on the ground but passes through walls
        stage.set_actor_collides_with(Body::DYING_ACTOR_COLLISIONS);

        let tuning = &self.config.tuning;
        let angle = PI * stage.actor_position().y * tuning.death_roll_factor;
        stage.set_actor_rotation(angle, tuning.death_roll_duration);
        self.death_roll = Some(tuning.death_roll_duration);

        self.events.push(GameEvent::RunEnded { score });
        ContactOutcome::RunEnded { score }
    }

    /// Handle a tap: flap while running, restart once the actor has frozen
    pub fn tap(&mut self, stage: &mut impl Stage, board: &mut impl Scoreboard) -> TapOutcome {
        if self.run.running {
            stage.set_actor_velocity(Vec2::ZERO);
            stage.apply_actor_impulse(Vec2::new(0.0, self.config.tuning.flap_impulse));
            TapOutcome::Flap
        } else if self.run.actor_frozen {
            self.restart(stage, board);
            TapOutcome::Restart
        } else {
            TapOutcome::Ignored
        }
    }

    /// Start a fresh run
    pub fn restart(&mut self, stage: &mut impl Stage, board: &mut impl Scoreboard) {
        self.run = RunState::default();
        self.death_roll = None;
        board.update_score_text(0);
        board.update_pickup_score_text(0);

        stage.reset_actor(self.config.layout.actor_start());
        stage.set_actor_collides_with(Body::ACTOR_COLLISIONS);
        stage.clear_obstacles();
        stage.set_scroll_speed(SCROLL_RUNNING);

        self.events.push(GameEvent::Restarted);
        log::info!("Run restarted (best {})", self.best.value());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use proptest::prelude::*;

    use crate::hud::Hud;
    use crate::persistence::MemoryStore;
    use crate::sim::category::CategorySet;
    use crate::sim::contact::ContactBody;
    use crate::sim::scheduler::{ObstaclePair, PickupSpawn};

    /// Stage double that records what the core asked for
    #[derive(Debug)]
    struct RecordingStage {
        next_id: u32,
        /// Entities the core detached; anything else counts as on stage
        removed: HashSet<EntityId>,
        pairs: u32,
        actor_pos: Vec2,
        actor_vel: Vec2,
        collides_with: CategorySet,
        rotation: Option<(f32, f32)>,
        frozen: bool,
        scroll_speed: f32,
        cleared: u32,
    }

    impl RecordingStage {
        fn new() -> Self {
            Self {
                next_id: 100,
                removed: HashSet::new(),
                pairs: 0,
                actor_pos: Vec2::new(75.0, 200.0),
                actor_vel: Vec2::new(0.0, -250.0),
                collides_with: Body::ACTOR_COLLISIONS,
                rotation: None,
                frozen: false,
                scroll_speed: 1.0,
                cleared: 0,
            }
        }

        fn add_pickup(&mut self) -> EntityId {
            let id = EntityId(self.next_id);
            self.next_id += 1;
            id
        }
    }

    impl Stage for RecordingStage {
        fn spawn_obstacle_pair(&mut self, _pair: &ObstaclePair) {
            self.pairs += 1;
        }

        fn spawn_pickup(&mut self, _pickup: &PickupSpawn) -> EntityId {
            self.add_pickup()
        }

        fn remove_entity(&mut self, id: EntityId) {
            self.removed.insert(id);
        }

        fn is_attached(&self, id: EntityId) -> bool {
            !self.removed.contains(&id)
        }

        fn clear_obstacles(&mut self) {
            self.cleared += 1;
        }

        fn set_scroll_speed(&mut self, speed: f32) {
            self.scroll_speed = speed;
        }

        fn actor_position(&self) -> Vec2 {
            self.actor_pos
        }

        fn set_actor_velocity(&mut self, velocity: Vec2) {
            self.actor_vel = velocity;
        }

        fn apply_actor_impulse(&mut self, impulse: Vec2) {
            // Unit mass
            self.actor_vel += impulse;
        }

        fn set_actor_collides_with(&mut self, set: CategorySet) {
            self.collides_with = set;
        }

        fn set_actor_rotation(&mut self, angle: f32, duration: f32) {
            self.rotation = Some((angle, duration));
        }

        fn freeze_actor(&mut self) {
            self.frozen = true;
        }

        fn reset_actor(&mut self, position: Vec2) {
            self.actor_pos = position;
            self.actor_vel = Vec2::ZERO;
            self.rotation = None;
            self.frozen = false;
        }
    }

    const ACTOR: EntityId = EntityId(1);

    fn hit(category: Category, id: u32) -> Contact {
        Contact::new(
            ContactBody::new(EntityId(id), category),
            ContactBody::new(ACTOR, Category::Actor),
        )
    }

    fn game_with_best(best: u32) -> Game {
        game_with_store(best).0
    }

    /// Game plus a handle onto its store
    fn game_with_store(best: u32) -> (Game, MemoryStore) {
        let store = MemoryStore::new(best);
        let game = Game::new(Config::default(), 42, Box::new(store.clone()));
        (game, store)
    }

    #[test]
    fn test_score_beats_best() {
        let mut game = game_with_best(3);
        let mut stage = RecordingStage::new();
        let mut hud = Hud::new();
        game.start(&mut hud);
        game.run.score = 4;

        let outcome = game.on_contact(&hit(Category::ScoreTrigger, 7), &mut stage, &mut hud);
        assert_eq!(outcome, ContactOutcome::Scored { score: 5, new_best: true });
        assert_eq!(game.run_state().score, 5);
        assert_eq!(game.best_score(), 5);
        assert_eq!(hud.score_text, "Score:5");
        assert_eq!(hud.best_score_text, "Best Score:5");
    }

    #[test]
    fn test_score_below_best_keeps_best() {
        let (mut game, store) = game_with_store(10);
        let mut stage = RecordingStage::new();
        let mut hud = Hud::new();

        let outcome = game.on_contact(&hit(Category::ScoreTrigger, 7), &mut stage, &mut hud);
        assert_eq!(outcome, ContactOutcome::Scored { score: 1, new_best: false });
        assert_eq!(game.best_score(), 10);
        assert_eq!(store.writes(), 0);
        assert_eq!(store.load_best(), 10);
    }

    #[test]
    fn test_equal_score_not_written() {
        let (mut game, store) = game_with_store(2);
        let mut stage = RecordingStage::new();
        let mut hud = Hud::new();

        game.on_contact(&hit(Category::ScoreTrigger, 7), &mut stage, &mut hud);
        let outcome = game.on_contact(&hit(Category::ScoreTrigger, 8), &mut stage, &mut hud);
        assert_eq!(outcome, ContactOutcome::Scored { score: 2, new_best: false });
        assert_eq!(store.writes(), 0);

        game.on_contact(&hit(Category::ScoreTrigger, 9), &mut stage, &mut hud);
        assert_eq!(store.writes(), 1);
        assert_eq!(store.load_best(), 3);
    }

    #[test]
    fn test_one_write_per_new_best() {
        let (mut game, store) = game_with_store(0);
        let mut stage = RecordingStage::new();
        let mut hud = Hud::new();

        game.on_contact(&hit(Category::ScoreTrigger, 7), &mut stage, &mut hud);
        game.on_contact(&hit(Category::ScoreTrigger, 8), &mut stage, &mut hud);
        assert_eq!(store.writes(), 2);
        assert_eq!(store.load_best(), 2);

        // A second run that stays at or below the best never writes
        game.on_contact(&hit(Category::Ground, 3), &mut stage, &mut hud);
        game.tick(1.0, &mut stage);
        game.tap(&mut stage, &mut hud);
        game.on_contact(&hit(Category::ScoreTrigger, 20), &mut stage, &mut hud);
        game.on_contact(&hit(Category::ScoreTrigger, 21), &mut stage, &mut hud);
        assert_eq!(store.writes(), 2);

        game.on_contact(&hit(Category::ScoreTrigger, 22), &mut stage, &mut hud);
        assert_eq!(store.writes(), 3);
        assert_eq!(store.load_best(), 3);
    }

    #[test]
    fn test_ground_contact_ends_run() {
        let mut game = game_with_best(0);
        let mut stage = RecordingStage::new();
        let mut hud = Hud::new();

        let outcome = game.on_contact(&hit(Category::Ground, 3), &mut stage, &mut hud);
        assert_eq!(outcome, ContactOutcome::RunEnded { score: 0 });
        assert!(!game.run_state().running);
        assert_eq!(game.phase(), GamePhase::Dying);
        assert_eq!(stage.collides_with, CategorySet::of(&[Category::Ground]));
        assert_eq!(stage.scroll_speed, 0.0);

        let (angle, duration) = stage.rotation.unwrap();
        assert!((angle - PI * 200.0 * 0.01).abs() < 1e-4);
        assert_eq!(duration, 1.0);
        assert!(!stage.frozen);
    }

    #[test]
    fn test_roll_then_freeze() {
        let mut game = game_with_best(0);
        let mut stage = RecordingStage::new();
        let mut hud = Hud::new();

        game.on_contact(&hit(Category::Obstacle, 3), &mut stage, &mut hud);
        game.tick(0.5, &mut stage);
        assert!(!stage.frozen);
        assert!(!game.run_state().actor_frozen);

        game.tick(0.5, &mut stage);
        assert!(stage.frozen);
        assert_eq!(game.phase(), GamePhase::Over);
        assert!(game.drain_events().contains(&GameEvent::ActorFrozen));
    }

    #[test]
    fn test_terminal_state_ignores_contacts() {
        let mut game = game_with_best(0);
        let mut stage = RecordingStage::new();
        let mut hud = Hud::new();

        game.on_contact(&hit(Category::Ground, 3), &mut stage, &mut hud);
        let pickup = stage.add_pickup();
        game.pickup = Some(pickup);

        for category in [Category::ScoreTrigger, Category::Pickup, Category::Obstacle] {
            let outcome = game.on_contact(&hit(category, pickup.0), &mut stage, &mut hud);
            assert_eq!(outcome, ContactOutcome::Ignored);
        }
        assert_eq!(game.run_state().score, 0);
        assert_eq!(game.run_state().pickup_score, 0);
        assert!(stage.is_attached(pickup));
    }

    #[test]
    fn test_pickup_collected_once() {
        let mut game = game_with_best(0);
        let mut stage = RecordingStage::new();
        let mut hud = Hud::new();
        let pickup = stage.add_pickup();
        game.pickup = Some(pickup);

        let contact = hit(Category::Pickup, pickup.0);
        let outcome = game.on_contact(&contact, &mut stage, &mut hud);
        assert_eq!(outcome, ContactOutcome::PickupCollected { pickup_score: 1 });
        assert!(!stage.is_attached(pickup));
        assert_eq!(hud.pickup_score_text, "Item Score:1");

        // A second report of the same overlap finds no live pickup
        let outcome = game.on_contact(&contact, &mut stage, &mut hud);
        assert_eq!(outcome, ContactOutcome::Ignored);
        assert_eq!(game.run_state().pickup_score, 1);
        assert!(game.run_state().running);
    }

    #[test]
    fn test_pickup_without_live_pickup_is_noop() {
        let mut game = game_with_best(0);
        let mut stage = RecordingStage::new();
        let mut hud = Hud::new();

        let outcome = game.on_contact(&hit(Category::Pickup, 55), &mut stage, &mut hud);
        assert_eq!(outcome, ContactOutcome::Ignored);
        assert_eq!(game.run_state().pickup_score, 0);
        assert!(game.run_state().running);
    }

    #[test]
    fn test_detached_body_ignored() {
        let mut game = game_with_best(0);
        let mut stage = RecordingStage::new();
        let mut hud = Hud::new();

        stage.remove_entity(EntityId(9));
        let contact = hit(Category::ScoreTrigger, 9);
        assert_eq!(game.on_contact(&contact, &mut stage, &mut hud), ContactOutcome::Ignored);
        assert_eq!(game.run_state().score, 0);

        // Same for a fatal contact with a wall that has already left the stage
        stage.remove_entity(EntityId(10));
        let contact = hit(Category::Obstacle, 10);
        assert_eq!(game.on_contact(&contact, &mut stage, &mut hud), ContactOutcome::Ignored);
        assert!(game.run_state().running);
    }

    #[test]
    fn test_tap_resets_velocity_before_impulse() {
        let mut game = game_with_best(0);
        let mut stage = RecordingStage::new();
        let mut hud = Hud::new();
        stage.actor_vel = Vec2::new(0.0, -480.0);

        assert_eq!(game.tap(&mut stage, &mut hud), TapOutcome::Flap);
        assert_eq!(stage.actor_vel, Vec2::new(0.0, 15.0));

        stage.actor_vel = Vec2::new(0.0, 90.0);
        game.tap(&mut stage, &mut hud);
        assert_eq!(stage.actor_vel, Vec2::new(0.0, 15.0));
    }

    #[test]
    fn test_tap_while_rolling_is_ignored() {
        let mut game = game_with_best(0);
        let mut stage = RecordingStage::new();
        let mut hud = Hud::new();

        game.on_contact(&hit(Category::Ground, 3), &mut stage, &mut hud);
        let before = stage.actor_vel;
        assert_eq!(game.tap(&mut stage, &mut hud), TapOutcome::Ignored);
        assert_eq!(stage.actor_vel, before);
        assert!(!game.run_state().running);
    }

    #[test]
    fn test_tap_after_freeze_restarts() {
        let mut game = game_with_best(0);
        let mut stage = RecordingStage::new();
        let mut hud = Hud::new();

        game.on_contact(&hit(Category::ScoreTrigger, 7), &mut stage, &mut hud);
        game.on_contact(&hit(Category::Ground, 3), &mut stage, &mut hud);
        game.tick(1.0, &mut stage);

        assert_eq!(game.tap(&mut stage, &mut hud), TapOutcome::Restart);
        assert_eq!(*game.run_state(), RunState::default());
        assert_eq!(stage.actor_pos, Config::default().layout.actor_start());
        assert_eq!(stage.actor_vel, Vec2::ZERO);
        assert_eq!(stage.collides_with, Body::ACTOR_COLLISIONS);
        assert_eq!(stage.scroll_speed, 1.0);
        assert!(!stage.frozen);
        assert!(stage.rotation.is_none());
        assert_eq!(stage.cleared, 1);
        assert_eq!(hud.score_text, "Score:0");
        // Best survives the restart
        assert_eq!(hud.best_score_text, "Best Score:1");
    }

    #[test]
    fn test_tick_forwards_spawns() {
        let mut game = game_with_best(0);
        let mut stage = RecordingStage::new();

        // 12.9s: clear of both the 7th wall (12s) and the earliest second pickup (13s)
        for _ in 0..774 {
            game.tick(crate::consts::SIM_DT, &mut stage);
        }
        assert_eq!(stage.pairs, 7);
        let pickups = game
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::PickupSpawned { .. }))
            .count();
        assert_eq!(pickups, 1);
        assert!(game.pickup.is_some_and(|id| stage.is_attached(id)));
    }

    #[test]
    fn test_scheduler_keeps_running_after_game_over() {
        let mut game = game_with_best(0);
        let mut stage = RecordingStage::new();
        let mut hud = Hud::new();

        game.on_contact(&hit(Category::Ground, 3), &mut stage, &mut hud);
        game.tick(4.5, &mut stage);
        // 0, 2, 4
        assert_eq!(stage.pairs, 3);
    }

    #[derive(Debug, Clone)]
    enum Step {
        Contact(Category),
        Tap,
        Tick(f32),
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            prop::sample::select(Category::ALL.to_vec()).prop_map(Step::Contact),
            Just(Step::Tap),
            (0.0f32..1.5).prop_map(Step::Tick),
        ]
    }

    proptest! {
        #[test]
        fn prop_run_invariants(best in 0u32..5, steps in prop::collection::vec(step(), 1..80)) {
            let mut game = game_with_best(best);
            let mut stage = RecordingStage::new();
            let mut hud = Hud::new();
            let mut prev = *game.run_state();
            let mut prev_best = game.best_score();

            for step in steps {
                let restarted = match step {
                    Step::Contact(category) => {
                        let id = match category {
                            Category::Pickup => game.pickup.map(|id| id.0).unwrap_or(999),
                            _ => 5,
                        };
                        game.on_contact(&hit(category, id), &mut stage, &mut hud);
                        false
                    }
                    Step::Tap => game.tap(&mut stage, &mut hud) == TapOutcome::Restart,
                    Step::Tick(dt) => {
                        game.tick(dt, &mut stage);
                        false
                    }
                };
                let now = *game.run_state();

                prop_assert!(game.best_score() >= prev_best);
                prop_assert!(game.best_score() >= now.score);
                if restarted {
                    prop_assert_eq!(now, RunState::default());
                } else {
                    prop_assert!(now.score >= prev.score);
                    prop_assert!(now.pickup_score >= prev.pickup_score);
                    if !prev.running {
                        // Terminal until restart
                        prop_assert!(!now.running);
                        prop_assert_eq!(now.score, prev.score);
                        prop_assert_eq!(now.pickup_score, prev.pickup_score);
                    }
                }
                prev = now;
                prev_best = game.best_score();
            }
        }
    }
}
