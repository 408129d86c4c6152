//! Per-tick output: what to draw and what happened
//!
//! Sprites are recorded in draw order as entities are updated, so the renderer
//! never needs to look at the game state itself.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One drawable entity, in viewport pixels (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Sprite {
    /// Player body plus the aim ring around it
    Player {
        center: Vec2,
        size: Vec2,
        ring_radius: f32,
    },
    /// Beast body, eyes and health bar
    Beast {
        center: Vec2,
        size: Vec2,
        /// Remaining health as a fraction of max (0-1)
        health_fraction: f32,
    },
    Projectile { center: Vec2 },
}

/// Gameplay events emitted during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ProjectileFired { id: u32 },
    BeastHit { beast_id: u32, health: f32 },
    BeastKilled { beast_id: u32, score: u64 },
    PlayerHit { health: f32 },
    /// A new wave began with `spawned` beasts
    WaveCleared { wave: u32, spawned: u32 },
    GameOver { score: u64, wave: u32 },
}

/// Sprites and events produced by one tick
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub sprites: Vec<Sprite>,
    pub events: Vec<GameEvent>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset for reuse without giving back the allocations
    pub fn clear(&mut self) {
        self.sprites.clear();
        self.events.clear();
    }

    pub fn kills(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, GameEvent::BeastKilled { .. }))
            .count()
    }
}
