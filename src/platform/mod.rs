//! Platform layer
//!
//! - `game`: tick driver and HUD change tracking shared by every front end
//! - `autopilot`: scripted input for headless runs
//! - `web`: browser session (listeners, animation frames, DOM overlay)

pub mod autopilot;
pub mod game;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use autopilot::Autopilot;
pub use game::Game;
