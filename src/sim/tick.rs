//! One simulation step per display refresh
//!
//! Order matters and is fixed: queued shots, player movement, beasts (homing
//! then contact damage), projectiles (flight then hits), wave advance. Each
//! entity's sprite is recorded right after its own update.

use super::frame::{Frame, GameEvent};
use super::spawn::spawn_beasts;
use super::state::{GamePhase, GameState, Projectile};
use crate::direction_to;

/// Advance the game by one tick, recording sprites and events into `frame`
///
/// A finished game is frozen: the call is a no-op and `frame` stays empty.
pub fn tick(state: &mut GameState, frame: &mut Frame) {
    frame.clear();
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.time_ticks += 1;

    fire_queued_shots(state, frame);

    // Player
    state.player.move_with(&state.input, state.bounds);
    frame.sprites.push(state.player.sprite());

    update_beasts(state, frame);
    update_projectiles(state, frame);

    // Wave advance
    if state.beasts.is_empty() && state.phase == GamePhase::Playing {
        state.wave += 1;
        let count = state.tuning.beasts_for_wave(state.wave);
        spawn_beasts(state, count);
        frame.events.push(GameEvent::WaveCleared {
            wave: state.wave,
            spawned: count,
        });
        log::info!("Wave {} begins with {} beasts", state.wave, count);
    }
}

/// Turn clicks queued since the last tick into projectiles at the player
fn fire_queued_shots(state: &mut GameState, frame: &mut Frame) {
    for target in state.input.drain_fire_requests() {
        let Some(dir) = direction_to(state.player.pos, target) else {
            log::debug!("Dropped shot aimed at the player's own position");
            continue;
        };
        let id = state.next_entity_id();
        state
            .projectiles
            .push(Projectile::new(id, state.player.pos, dir, &state.tuning));
        frame.events.push(GameEvent::ProjectileFired { id });
    }
}

/// Home every beast toward the player and apply contact damage
fn update_beasts(state: &mut GameState, frame: &mut Frame) {
    let GameState {
        beasts,
        player,
        phase,
        tuning,
        score,
        wave,
        ..
    } = state;

    let target = player.pos;
    for beast in beasts.iter_mut() {
        beast.update(target);
        frame.sprites.push(beast.sprite());

        if beast.collides_with_player(player) {
            player.take_damage(tuning.contact_damage);
            frame.events.push(GameEvent::PlayerHit {
                health: player.health,
            });

            if player.is_dead() && *phase == GamePhase::Playing {
                *phase = GamePhase::GameOver;
                frame.events.push(GameEvent::GameOver {
                    score: *score,
                    wave: *wave,
                });
                log::info!("Game over: score {} on wave {}", score, wave);
            }
        }
    }
}

/// Fly every projectile and resolve its first beast hit
fn update_projectiles(state: &mut GameState, frame: &mut Frame) {
    let GameState {
        projectiles,
        beasts,
        score,
        tuning,
        bounds,
        ..
    } = state;

    projectiles.retain_mut(|projectile| {
        projectile.update();
        frame.sprites.push(projectile.sprite());

        // First match only: overlapping neighbours are spared
        if let Some(idx) = beasts
            .iter()
            .position(|beast| beast.collides_with_projectile(&*projectile))
        {
            let beast = &mut beasts[idx];
            beast.take_damage(tuning.projectile_damage);
            frame.events.push(GameEvent::BeastHit {
                beast_id: beast.id,
                health: beast.health,
            });

            if beast.is_dead() {
                let dead = beasts.remove(idx);
                *score += tuning.kill_score;
                frame.events.push(GameEvent::BeastKilled {
                    beast_id: dead.id,
                    score: *score,
                });
            }
            return false;
        }

        !projectile.is_off_screen(bounds.x, bounds.y, tuning.offscreen_margin)
    });
}
