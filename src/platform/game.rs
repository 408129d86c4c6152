//! Session driver shared by the browser loop and the headless runner
//!
//! Owns the game state plus the per-tick frame, forwards input intents and
//! reports when the HUD needs repainting.

use glam::Vec2;

use crate::Tuning;
use crate::hud::Hud;
use crate::sim::{Frame, GameEvent, GameState, tick};

/// Game instance holding all state
pub struct Game {
    pub state: GameState,
    /// Output of the most recent tick
    pub frame: Frame,
    /// HUD last handed to the overlay
    last_hud: Option<Hud>,
}

impl Game {
    pub fn new(seed: u64, bounds: Vec2, tuning: Tuning) -> Self {
        Self {
            state: GameState::new(seed, bounds, tuning),
            frame: Frame::new(),
            last_hud: None,
        }
    }

    pub fn key_down(&mut self, key: &str) {
        self.state.input.key_down(key);
    }

    pub fn key_up(&mut self, key: &str) {
        self.state.input.key_up(key);
    }

    /// Queue a shot toward a click at (x, y); ignored once the game is over
    pub fn click(&mut self, x: f32, y: f32) {
        if !self.state.is_over() {
            self.state.input.fire_at(Vec2::new(x, y));
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
        log::debug!("Playfield resized to {}x{}", width, height);
    }

    /// Run one tick. Returns `true` while another tick should be scheduled.
    pub fn step(&mut self) -> bool {
        tick(&mut self.state, &mut self.frame);
        for event in &self.frame.events {
            if let GameEvent::BeastKilled { beast_id, score } = event {
                log::debug!("Beast {} down, score {}", beast_id, score);
            }
        }
        !self.state.is_over()
    }

    pub fn hud(&self) -> Hud {
        Hud::from_state(&self.state)
    }

    /// HUD to paint, or `None` if nothing changed since the last call
    pub fn take_hud_update(&mut self) -> Option<Hud> {
        let hud = self.hud();
        if self.last_hud == Some(hud) {
            return None;
        }
        self.last_hud = Some(hud);
        Some(hud)
    }
}
