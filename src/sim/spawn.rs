//! Beast placement
//!
//! Rejection sampling keeps new beasts away from the player. The retry count is
//! bounded so a viewport too small for the exclusion radius cannot stall a tick.

use glam::Vec2;
use rand::Rng;

use super::state::{Beast, GameState};
use crate::{Tuning, distance};

/// Uniform position in [0, bounds), collapsing empty axes to 0
fn sample_position(rng: &mut impl Rng, bounds: Vec2) -> Vec2 {
    let x = if bounds.x > 0.0 { rng.random_range(0.0..bounds.x) } else { 0.0 };
    let y = if bounds.y > 0.0 { rng.random_range(0.0..bounds.y) } else { 0.0 };
    Vec2::new(x, y)
}

/// Pick a spawn point at least `spawn_exclusion_radius` from `player_pos`
///
/// Returns the last sample if no candidate qualifies within
/// `spawn_max_attempts` draws.
pub fn pick_spawn_position(
    rng: &mut impl Rng,
    player_pos: Vec2,
    bounds: Vec2,
    tuning: &Tuning,
) -> Vec2 {
    let attempts = tuning.spawn_max_attempts.max(1);
    let mut candidate = sample_position(rng, bounds);
    for _ in 1..attempts {
        if distance(candidate, player_pos) >= tuning.spawn_exclusion_radius {
            return candidate;
        }
        candidate = sample_position(rng, bounds);
    }

    if distance(candidate, player_pos) < tuning.spawn_exclusion_radius {
        log::warn!(
            "No spawn point {} px from player within {} attempts; using ({:.0}, {:.0})",
            tuning.spawn_exclusion_radius,
            attempts,
            candidate.x,
            candidate.y
        );
    }
    candidate
}

/// Append `count` beasts to the live set around the current player position
pub fn spawn_beasts(state: &mut GameState, count: u32) {
    let player_pos = state.player.pos;
    let bounds = state.bounds;

    for _ in 0..count {
        let pos = pick_spawn_position(&mut state.rng, player_pos, bounds, &state.tuning);
        let id = state.next_entity_id();
        let beast = Beast::new(id, pos, &state.tuning, &mut state.rng);
        state.beasts.push(beast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_respects_exclusion_radius() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let player = Vec2::new(400.0, 300.0);
        for _ in 0..500 {
            let pos = pick_spawn_position(&mut rng, player, Vec2::new(800.0, 600.0), &tuning);
            assert!(distance(pos, player) >= 150.0);
            assert!(pos.x >= 0.0 && pos.x < 800.0);
            assert!(pos.y >= 0.0 && pos.y < 600.0);
        }
    }

    #[test]
    fn test_spawn_terminates_in_tiny_viewport() {
        // Nothing in a 100x100 viewport is 150 px from its center
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let bounds = Vec2::new(100.0, 100.0);
        let pos = pick_spawn_position(&mut rng, bounds * 0.5, bounds, &tuning);
        assert!(pos.x >= 0.0 && pos.x < 100.0);
        assert!(pos.y >= 0.0 && pos.y < 100.0);
    }

    #[test]
    fn test_spawn_zero_sized_viewport() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let pos = pick_spawn_position(&mut rng, Vec2::ZERO, Vec2::ZERO, &tuning);
        assert_eq!(pos, Vec2::ZERO);
    }

    #[test]
    fn test_spawn_beasts_appends_with_fresh_ids() {
        let mut state = GameState::new(9, Vec2::new(800.0, 600.0), Tuning::default());
        let before = state.beasts.len();
        spawn_beasts(&mut state, 5);
        assert_eq!(state.beasts.len(), before + 5);

        let mut ids: Vec<u32> = state.beasts.iter().map(|b| b.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), before + 5);
    }

    #[test]
    fn test_spawn_is_deterministic_per_seed() {
        let a = GameState::new(1234, Vec2::new(1024.0, 768.0), Tuning::default());
        let b = GameState::new(1234, Vec2::new(1024.0, 768.0), Tuning::default());
        let pa: Vec<Vec2> = a.beasts.iter().map(|b| b.pos).collect();
        let pb: Vec<Vec2> = b.beasts.iter().map(|b| b.pos).collect();
        assert_eq!(pa, pb);
    }
}
