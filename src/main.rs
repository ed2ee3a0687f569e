//! Skyhop native entry point
//!
//! Headless runner: plays sessions with the autopilot and keeps the best
//! score in a JSON file. Rendering lives in the browser build.

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;

/// Play Skyhop sessions with the demo autopilot
#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Built-in profile (classic, thrust, deluxe) or path to a JSON profile
    #[arg(default_value = "classic")]
    profile: String,

    /// Number of sessions to play
    #[arg(default_value_t = 3)]
    sessions: u32,

    /// Best-score file
    #[arg(long, env = "SKYHOP_BEST", default_value = "skyhop_best.json")]
    best_file: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use skyhop::Game;
    use skyhop::audio::SilentAudio;
    use skyhop::persistence::FileStore;
    use skyhop::platform::autopilot;
    use skyhop::sim::{GameEvent, GamePhase};
    use skyhop::tuning::Tuning;

    /// Hard cap per session (five minutes at 60 Hz)
    const MAX_FRAMES_PER_SESSION: u32 = 60 * 60 * 5;

    let args = Args::parse();
    env_logger::init();
    log::info!("Skyhop (native) starting...");

    let tuning = match Tuning::preset(&args.profile) {
        Some(tuning) => tuning,
        None => match std::fs::read_to_string(&args.profile)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Unknown profile '{}': {}", args.profile, e);
                std::process::exit(2);
            }
        },
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(1);
    let mut game = Game::new(seed, tuning, FileStore::new(args.best_file), SilentAudio);

    for session in 1..=args.sessions {
        game.start();
        let mut frames = 0;
        while game.state.phase == GamePhase::Playing && frames < MAX_FRAMES_PER_SESSION {
            let input = autopilot(&game.state);
            for event in game.frame(&input) {
                if let GameEvent::PowerUpCollected { kind } = event {
                    log::info!("Session {}: picked up {}", session, kind.label());
                }
            }
            frames += 1;
        }
        // Sessions that hit the cap end here so the best score still counts
        game.end_session();
        println!(
            "Session {}: score {} in {} frames (best {})",
            session, game.state.score, frames, game.state.best_score
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}
