//! Browser binding
//!
//! JS owns the render loop: it calls `frame(dt)` every animation frame, reads
//! the labels and actor/entity snapshot, and forwards taps.

use wasm_bindgen::prelude::*;

use crate::persistence::LocalStorageStore;
use crate::sim::{GameEvent, Session};
use crate::tuning::Config;

#[wasm_bindgen]
pub struct WebGame {
    session: Session,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game; `config_json` may be empty to use defaults
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> WebGame {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        let config = if config_json.is_empty() {
            Config::default()
        } else {
            Config::from_json(config_json).unwrap_or_default()
        };
        let seed = js_sys::Date::now() as u64;
        log::info!("Flap Run (web) starting with seed {}", seed);

        WebGame {
            session: Session::new(config, seed, Box::new(LocalStorageStore)),
        }
    }

    /// Advance by a frame delta in seconds; returns true if a pickup was collected
    pub fn frame(&mut self, dt: f32) -> bool {
        self.session.advance(dt);
        self.session
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::PickupCollected { .. }))
    }

    pub fn tap(&mut self) {
        self.session.queue_tap();
    }

    pub fn score_text(&self) -> String {
        self.session.hud.score_text.clone()
    }

    pub fn best_score_text(&self) -> String {
        self.session.hud.best_score_text.clone()
    }

    pub fn pickup_score_text(&self) -> String {
        self.session.hud.pickup_score_text.clone()
    }

    /// Bumped on every label update; redraw text only when it changes
    pub fn label_revision(&self) -> u64 {
        self.session.hud.revision
    }

    /// Actor as [x, y, rotation]
    pub fn actor(&self) -> Vec<f32> {
        let actor = &self.session.world.actor;
        vec![actor.pos.x, actor.pos.y, actor.rotation]
    }

    /// Entities flattened as [kind, cx, cy, half_w, half_h] per entity
    ///
    /// Kind codes: 0 ground, 1 wall, 2 score zone, 3 pickup.
    pub fn entities(&self) -> Vec<f32> {
        use crate::sim::EntityKind;

        let mut out = Vec::with_capacity(self.session.world.entities().len() * 5);
        for e in self.session.world.entities() {
            let kind = match e.kind {
                EntityKind::Ground => 0.0,
                EntityKind::Wall => 1.0,
                EntityKind::ScoreZone { .. } => 2.0,
                EntityKind::Pickup => 3.0,
            };
            let (center, half) = (e.bounds.center, e.bounds.half);
            out.extend_from_slice(&[kind, center.x, center.y, half.x, half.y]);
        }
        out
    }
}
