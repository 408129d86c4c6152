//! Scripted player for headless runs
//!
//! Backs away from the nearest beast and shoots at it on a fixed cadence.
//! It only writes input intents, exactly like a keyboard and mouse would.

use crate::distance;
use crate::sim::GameState;

/// Ticks between shots
const DEFAULT_FIRE_INTERVAL: u64 = 10;
/// Start retreating when the nearest beast is closer than this
const DEFAULT_RETREAT_DISTANCE: f32 = 220.0;

#[derive(Debug, Clone)]
pub struct Autopilot {
    pub fire_interval: u64,
    pub retreat_distance: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            fire_interval: DEFAULT_FIRE_INTERVAL,
            retreat_distance: DEFAULT_RETREAT_DISTANCE,
        }
    }
}

impl Autopilot {
    /// Write this tick's intents into `state.input`
    pub fn drive(&self, state: &mut GameState) {
        state.input.release_all();

        let player = state.player.pos;
        let Some(target) = state
            .beasts
            .iter()
            .map(|b| b.pos)
            .min_by(|a, b| distance(player, *a).total_cmp(&distance(player, *b)))
        else {
            return;
        };

        if distance(player, target) < self.retreat_distance {
            let away = player - target;
            state.input.key_down(if away.x < 0.0 { "a" } else { "d" });
            state.input.key_down(if away.y < 0.0 { "w" } else { "s" });
        }

        if self.fire_interval > 0 && state.time_ticks % self.fire_interval == 0 {
            state.input.fire_at(target);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::Tuning;
    use crate::sim::{Frame, MoveKey, tick};

    #[test]
    fn test_retreats_from_close_beast() {
        let mut state = GameState::new(3, Vec2::new(800.0, 600.0), Tuning::default());
        state.beasts.truncate(1);
        state.beasts[0].pos = Vec2::new(450.0, 350.0);

        Autopilot::default().drive(&mut state);
        assert!(state.input.is_held(MoveKey::Left));
        assert!(state.input.is_held(MoveKey::Up));
        assert!(!state.input.is_held(MoveKey::Right));
        // Tick 0 is on the firing cadence
        assert_eq!(state.input.pending_shots(), 1);
    }

    #[test]
    fn test_autopilot_game_keeps_score_consistent() {
        let mut state = GameState::new(2024, Vec2::new(1024.0, 768.0), Tuning::default());
        let mut frame = Frame::new();
        let pilot = Autopilot::default();
        let mut kills = 0;

        for _ in 0..3_000 {
            if state.is_over() {
                break;
            }
            pilot.drive(&mut state);
            tick(&mut state, &mut frame);
            kills += frame.kills() as u64;
        }

        assert_eq!(state.score, kills * 100);
        assert!(state.wave >= 1);
    }
}
