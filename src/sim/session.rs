//! Game session: state machine, reference stage and HUD driven together
//!
//! Frame deltas go through a fixed timestep accumulator so the simulation is
//! identical regardless of frame rate.

use super::game::{Game, TapOutcome};
use super::state::GameEvent;
use super::tick::{TickInput, tick};
use super::world::World;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::hud::Hud;
use crate::persistence::BestScoreStore;
use crate::tuning::Config;

pub struct Session {
    pub game: Game,
    pub world: World,
    pub hud: Hud,
    /// Input for the next fixed step; one-shot flags clear after use
    pub input: TickInput,
    accumulator: f32,
    /// Fixed steps simulated so far
    pub time_ticks: u64,
}

impl Session {
    pub fn new(config: Config, seed: u64, store: Box<dyn BestScoreStore>) -> Self {
        let game = Game::new(config, seed, store);
        let world = World::new(*game.config());
        let mut hud = Hud::new();
        game.start(&mut hud);
        log::info!("Session started with seed {}", seed);

        Self {
            game,
            world,
            hud,
            input: TickInput::default(),
            accumulator: 0.0,
            time_ticks: 0,
        }
    }

    /// Queue a tap for the next fixed step
    pub fn queue_tap(&mut self) {
        self.input.tap = true;
    }

    /// Deliver a tap immediately
    pub fn tap(&mut self) -> TapOutcome {
        self.game.tap(&mut self.world, &mut self.hud)
    }

    /// Run as many fixed steps as the frame delta covers; returns the count
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input.clone();
            tick(self, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.tap = false;
        }
        substeps
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.game.drain_events()
    }
}
