//! Beast Arena entry point
//!
//! In the browser this mounts the game on `#canvas`. Natively there is no
//! window; the binary plays a headless game with the autopilot and logs the
//! outcome, which is handy for balancing a tuning file.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    beast_arena::platform::web::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Beast Arena (native) starting...");
    log::info!("Native mode runs headless - use `trunk serve` for the playable web version");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let tuning = match args.next() {
        Some(path) => beast_arena::Tuning::from_file(&path),
        None => beast_arena::Tuning::load(),
    };

    headless::run(seed, tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use beast_arena::Tuning;
    use beast_arena::platform::{Autopilot, Game};
    use glam::Vec2;

    /// Ten minutes at 60 ticks per second
    const MAX_TICKS: u64 = 36_000;
    const PLAYFIELD: Vec2 = Vec2::new(1280.0, 720.0);

    pub fn run(seed: u64, tuning: Tuning) {
        let mut game = Game::new(seed, PLAYFIELD, tuning);
        let pilot = Autopilot::default();

        loop {
            pilot.drive(&mut game.state);
            if !game.step() || game.state.time_ticks >= MAX_TICKS {
                break;
            }
            if let Some(hud) = game.take_hud_update() {
                log::debug!(
                    "tick {}: score {} wave {} health {:.1}",
                    game.state.time_ticks,
                    hud.score,
                    hud.wave,
                    hud.health
                );
            }
        }

        let hud = game.hud();
        if hud.game_over {
            log::info!(
                "Game over after {} ticks: score {}, wave {}",
                game.state.time_ticks,
                hud.score,
                hud.wave
            );
        } else {
            log::info!(
                "Stopped at tick limit: score {}, wave {}, health {:.1}",
                hud.score,
                hud.wave,
                hud.health
            );
        }
        println!("seed {} -> score {} wave {}", seed, hud.score, hud.wave);
    }
}
