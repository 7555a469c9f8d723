//! Cricket Brawl entry point
//!
//! Native builds run a scripted brawl in the terminal; the web build only
//! wires up logging and settings for the JS front end.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

    let settings = cricket_brawl::Settings::load();
    log::info!(
        "Cricket Brawl starting (sound: {}, haptics: {}, reduced motion: {})",
        settings.sound,
        settings.haptics,
        settings.reduced_motion
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Cricket Brawl (native) starting...");

    let region = std::env::args().nth(1).unwrap_or_else(|| "mumbai".to_string());
    let seed = std::env::args()
        .nth(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2024);

    if let Err(err) = demo::run(&region, seed) {
        log::error!("Error: {err}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted single match: random balls, then the reward reveal on a simulated clock
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use cricket_brawl::consts::BALLS_PER_MATCH;
    use cricket_brawl::reveal::{ManualClock, RevealEvent};
    use cricket_brawl::{App, AppError, Profile, Screen, Settings};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    /// Simulated milliseconds per update
    const FRAME_MS: u64 = 100;

    pub fn run(region: &str, seed: u64) -> Result<(), AppError> {
        let clock = ManualClock::new();
        let mut app = App::new(Profile::default(), Settings::default(), clock.clone(), seed);
        let mut bowler = Pcg32::seed_from_u64(seed ^ 0x5eed);

        let pending = app.find_match(region)?;
        log::info!("Opponent: {}", pending.opponent.name);
        app.start_match()?;

        for ball in 0..BALLS_PER_MATCH {
            let stadium = ball as usize % 3;
            let player_runs = bowler.random_range(0..=6);
            let opponent_runs = bowler.random_range(0..=6);
            log::info!("Ball {}: {player_runs} - {opponent_runs}", ball + 1);
            if let Some(outcome) = app.play_ball(stadium, player_runs, opponent_runs)? {
                log::info!("Result: {}", outcome.as_str());
            }
        }

        while app.screen() == Screen::Rewards {
            clock.advance(FRAME_MS);
            for event in app.update()? {
                if let RevealEvent::Disclosed { step, .. } = event {
                    if let Some(view) = app.reveal().and_then(|r| r.view()) {
                        log::info!(
                            "Step {}/{}: {:?} +{} ({} -> {})",
                            step + 1,
                            view.total,
                            view.kind,
                            view.amount,
                            view.counter_from,
                            view.counter_to
                        );
                    }
                }
            }
            // Continue as soon as the button unlocks
            let _ = app.continue_reveal();
        }

        let profile = app.profile();
        println!(
            "coins={} energy={} gems={} level={} wins={}/{}",
            profile.coins,
            profile.energy,
            profile.gems,
            profile.level,
            profile.wins,
            profile.matches_played
        );
        app.leave_stats()
    }
}
