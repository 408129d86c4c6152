//! Beast Arena - a top-down arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, homing, collisions, waves)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser input and session lifecycle
//! - `hud`: Scalars the page overlay mirrors each frame
//! - `tuning`: Data-driven game balance

pub mod hud;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use hud::Hud;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Player avatar
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_MAX_HEALTH: f32 = 100.0;
    /// Radius of the aim ring drawn around the player
    pub const PLAYER_RING_RADIUS: f32 = 20.0;

    /// Beast size and speed are rolled per instance from [min, max)
    pub const BEAST_MIN_SIZE: f32 = 40.0;
    pub const BEAST_MAX_SIZE: f32 = 60.0;
    pub const BEAST_MIN_SPEED: f32 = 2.0;
    pub const BEAST_MAX_SPEED: f32 = 3.0;
    pub const BEAST_MAX_HEALTH: f32 = 50.0;

    /// Projectile travel per tick
    pub const PROJECTILE_SPEED: f32 = 8.0;
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    pub const PROJECTILE_DAMAGE: f32 = 25.0;
    /// How far outside the viewport a projectile may drift before removal
    pub const OFFSCREEN_MARGIN: f32 = 10.0;

    /// Health lost per tick while a beast overlaps the player
    pub const CONTACT_DAMAGE: f32 = 0.5;
    /// Score per beast killed
    pub const KILL_SCORE: u64 = 100;

    /// Minimum spawn distance from the player
    pub const SPAWN_EXCLUSION_RADIUS: f32 = 150.0;
    /// Rejection-sampling bound for spawn placement
    pub const SPAWN_MAX_ATTEMPTS: u32 = 100;

    /// Beasts in the opening wave
    pub const INITIAL_BEASTS: u32 = 3;
    /// Wave N (N >= 2) spawns WAVE_BASE_BEASTS + N beasts
    pub const WAVE_BASE_BEASTS: u32 = 2;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Unit vector pointing from `from` to `to`, or `None` when the points coincide
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Option<Vec2> {
    let delta = to - from;
    let len = delta.length();
    if len > 0.0 { Some(delta / len) } else { None }
}
