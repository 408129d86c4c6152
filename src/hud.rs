//! HUD snapshot
//!
//! The page overlay only ever sees these four values, read once per frame.

use serde::{Deserialize, Serialize};

use crate::sim::GameState;

/// Scalars mirrored into the DOM overlay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    /// Player health, clamped to [0, max]
    pub health: f32,
    pub max_health: f32,
    pub score: u64,
    pub wave: u32,
    pub game_over: bool,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        let max_health = state.player.max_health;
        Self {
            health: state.health().clamp(0.0, max_health.max(0.0)),
            max_health,
            score: state.score,
            wave: state.wave,
            game_over: state.is_over(),
        }
    }

    /// Width of the health bar fill, in percent
    pub fn health_percent(&self) -> f32 {
        if self.max_health > 0.0 {
            (self.health / self.max_health * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        }
    }
}
