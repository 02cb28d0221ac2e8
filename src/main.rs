//! Flap Run entry point
//!
//! Native: runs a seeded headless autopilot session and logs its progress.
//! The browser entry point is `platform::web::WebGame`.
//!
//! Usage: `flap-run [seconds] [seed] [config.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flap_run::Config;
    use flap_run::persistence::JsonFileStore;
    use flap_run::sim::{GameEvent, Session, TickInput};

    env_logger::init();
    log::info!("Flap Run (native) starting...");

    let mut args = std::env::args().skip(1);
    let seconds: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60.0);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(2022);
    let config = args.next().map(Config::load).unwrap_or_default();

    let store = JsonFileStore::new(std::env::temp_dir().join("flap-run").join("best.json"));
    log::info!("Best score file: {}", store.path().display());

    let mut session = Session::new(config, seed, Box::new(store));
    session.input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    // Feed 60 Hz frames like a display would
    let frame_dt = 1.0 / 60.0;
    let frames = (seconds / frame_dt) as u64;
    let mut runs = 1;
    for _ in 0..frames {
        session.advance(frame_dt);
        for event in session.drain_events() {
            match event {
                GameEvent::NewBest { best } => log::info!("New best score: {}", best),
                GameEvent::PickupCollected { pickup_score } => {
                    log::info!("Pickup collected ({})", pickup_score)
                }
                GameEvent::RunEnded { score } => log::info!("Run {} ended at {}", runs, score),
                GameEvent::Restarted => runs += 1,
                other => log::trace!("{:?}", other),
            }
        }
    }

    let [score, best, items] = session.hud.lines();
    println!("{} | {} | {} | runs: {}", score, best, items, runs);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is WebGame, this is just to satisfy the compiler
}
