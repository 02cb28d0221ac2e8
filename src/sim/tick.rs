//! Fixed timestep simulation tick
//!
//! One step: input, stage physics, contact delivery, then timers and spawns.

use super::session::Session;
use super::state::GamePhase;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Tap/click/space
    pub tap: bool,
    /// Idle/demo mode - the autopilot taps
    pub autopilot: bool,
}

/// Advance the session by one fixed timestep
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) {
    session.time_ticks += 1;

    let tap = input.tap || (input.autopilot && autopilot_wants_tap(session));
    if tap {
        session.tap();
    }

    let contacts = session.world.step(dt);
    for contact in contacts {
        session
            .game
            .on_contact(&contact, &mut session.world, &mut session.hud);
    }

    session.game.tick(dt, &mut session.world);
}

/// Simple demo pilot: flap when falling below the next gap, restart when over
fn autopilot_wants_tap(session: &Session) -> bool {
    match session.game.phase() {
        GamePhase::Over => true,
        GamePhase::Dying => false,
        GamePhase::Running => {
            let config = session.game.config();
            let actor = &session.world.actor;
            let target = session
                .world
                .next_gap_center()
                .unwrap_or_else(|| config.layout.sky_center_y());
            // Flap low enough that the rise stays inside the gap
            let margin = config.gap_height() * 0.25;
            actor.vel.y <= 0.0 && actor.pos.y < target - margin
        }
    }
}
