//! Game state and entity types
//!
//! Entities are plain data with the few behaviors each one owns: the player
//! steers from held keys, beasts home in on the player, projectiles fly
//! straight.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{rect_point_collision, rect_rect_collision};
use super::frame::Sprite;
use super::input::{InputState, MoveKey};
use crate::Tuning;
use crate::consts::PLAYER_RING_RADIUS;
use crate::direction_to;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player health ran out (terminal)
    GameOver,
}

/// The keyboard-controlled avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Center position
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub health: f32,
    pub max_health: f32,
    /// Velocity applied on the last move
    pub vel: Vec2,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            size: Vec2::new(tuning.player_width, tuning.player_height),
            speed: tuning.player_speed,
            health: tuning.player_max_health,
            max_health: tuning.player_max_health,
            vel: Vec2::ZERO,
        }
    }

    /// Move from held keys, then clamp so the whole body stays in `bounds`
    ///
    /// Axes are independent: holding two directions moves diagonally at
    /// full speed on both axes.
    pub fn move_with(&mut self, input: &InputState, bounds: Vec2) {
        self.vel = Vec2::ZERO;
        if input.is_held(MoveKey::Up) {
            self.vel.y = -self.speed;
        }
        if input.is_held(MoveKey::Down) {
            self.vel.y = self.speed;
        }
        if input.is_held(MoveKey::Left) {
            self.vel.x = -self.speed;
        }
        if input.is_held(MoveKey::Right) {
            self.vel.x = self.speed;
        }

        self.pos += self.vel;
        self.clamp_to(bounds);
    }

    /// Keep the full extent inside [0, bounds]
    ///
    /// Uses max-then-min so a viewport narrower than the player pins it to
    /// the lower edge instead of panicking.
    pub fn clamp_to(&mut self, bounds: Vec2) {
        let half = self.size * 0.5;
        self.pos.x = self.pos.x.max(half.x).min(bounds.x - half.x);
        self.pos.y = self.pos.y.max(half.y).min(bounds.y - half.y);
    }

    /// Apply contact damage, never dropping below zero
    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    pub fn sprite(&self) -> Sprite {
        Sprite::Player {
            center: self.pos,
            size: self.size,
            ring_radius: PLAYER_RING_RADIUS,
        }
    }
}

/// A homing enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beast {
    pub id: u32,
    /// Center position
    pub pos: Vec2,
    pub size: Vec2,
    /// Distance covered per tick
    pub speed: f32,
    pub health: f32,
    pub max_health: f32,
}

impl Beast {
    /// Create a beast at `pos` with size and speed rolled from the tuning ranges
    pub fn new(id: u32, pos: Vec2, tuning: &Tuning, rng: &mut impl Rng) -> Self {
        let width = roll(rng, tuning.beast_min_size, tuning.beast_max_size);
        let height = roll(rng, tuning.beast_min_size, tuning.beast_max_size);
        let speed = roll(rng, tuning.beast_min_speed, tuning.beast_max_speed);
        Self {
            id,
            pos,
            size: Vec2::new(width, height),
            speed,
            health: tuning.beast_max_health,
            max_health: tuning.beast_max_health,
        }
    }

    /// Step `speed` units straight toward `target`; no-op when already there
    pub fn update(&mut self, target: Vec2) {
        if let Some(dir) = direction_to(self.pos, target) {
            self.pos += dir * self.speed;
        }
    }

    pub fn collides_with_projectile(&self, projectile: &Projectile) -> bool {
        rect_point_collision(self.pos, self.size, projectile.pos, projectile.radius)
    }

    pub fn collides_with_player(&self, player: &Player) -> bool {
        rect_rect_collision(self.pos, self.size, player.pos, player.size)
    }

    /// Apply projectile damage; health stays within [0, max_health]
    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).clamp(0.0, self.max_health);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health > 0.0 {
            (self.health / self.max_health).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn sprite(&self) -> Sprite {
        Sprite::Beast {
            center: self.pos,
            size: self.size,
            health_fraction: self.health_fraction(),
        }
    }
}

/// A straight-flying shot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    /// Travel direction; renormalized on every update
    pub dir: Vec2,
    pub radius: f32,
    pub speed: f32,
}

impl Projectile {
    pub fn new(id: u32, pos: Vec2, dir: Vec2, tuning: &Tuning) -> Self {
        Self {
            id,
            pos,
            dir,
            radius: tuning.projectile_radius,
            speed: tuning.projectile_speed,
        }
    }

    /// Advance `speed` units along the direction; a zero direction stays put
    pub fn update(&mut self) {
        let len = self.dir.length();
        if len > 0.0 {
            self.dir /= len;
            self.pos += self.dir * self.speed;
        }
    }

    /// True once the shot is more than `margin` outside [0, width] × [0, height]
    pub fn is_off_screen(&self, width: f32, height: f32, margin: f32) -> bool {
        self.pos.x < -margin
            || self.pos.x > width + margin
            || self.pos.y < -margin
            || self.pos.y > height + margin
    }

    pub fn sprite(&self) -> Sprite {
        Sprite::Projectile { center: self.pos }
    }
}

/// Uniform sample in [min, max), or `min` for an empty range
pub(crate) fn roll(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    if max > min { rng.random_range(min..max) } else { min }
}

/// Complete state of one game session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    /// Playfield size in pixels
    pub bounds: Vec2,
    pub phase: GamePhase,
    pub score: u64,
    /// Current wave (1-based)
    pub wave: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// Live beasts in spawn order
    pub beasts: Vec<Beast>,
    /// Live projectiles in fire order
    pub projectiles: Vec<Projectile>,
    /// Intents written by input handlers between ticks
    pub input: InputState,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Start a session: player centered, first wave spawned
    pub fn new(seed: u64, bounds: Vec2, tuning: Tuning) -> Self {
        let player = Player::new(bounds * 0.5, &tuning);
        let mut state = Self {
            seed,
            tuning,
            bounds,
            phase: GamePhase::Playing,
            score: 0,
            wave: 1,
            time_ticks: 0,
            player,
            beasts: Vec::new(),
            projectiles: Vec::new(),
            input: InputState::default(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };

        let count = state.tuning.beasts_for_wave(state.wave);
        super::spawn::spawn_beasts(&mut state, count);
        log::info!(
            "Session started: seed={} bounds={}x{} beasts={}",
            seed,
            bounds.x,
            bounds.y,
            count
        );

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Player health (the HUD clamps it for display)
    pub fn health(&self) -> f32 {
        self.player.health
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Adopt new playfield bounds; entities are left where they are
    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Vec2::new(width.max(0.0), height.max(0.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_at(x: f32, y: f32) -> Player {
        Player::new(Vec2::new(x, y), &Tuning::default())
    }

    fn beast_at(x: f32, y: f32, speed: f32) -> Beast {
        Beast {
            id: 1,
            pos: Vec2::new(x, y),
            size: Vec2::new(50.0, 50.0),
            speed,
            health: 50.0,
            max_health: 50.0,
        }
    }

    #[test]
    fn test_player_moves_on_each_axis() {
        let mut player = player_at(400.0, 300.0);
        let mut input = InputState::default();
        input.key_down("d");
        player.move_with(&input, Vec2::new(800.0, 600.0));
        assert_eq!(player.pos, Vec2::new(405.0, 300.0));
        assert_eq!(player.vel, Vec2::new(5.0, 0.0));

        input.key_up("d");
        input.key_down("ArrowUp");
        player.move_with(&input, Vec2::new(800.0, 600.0));
        assert_eq!(player.pos, Vec2::new(405.0, 295.0));
    }

    #[test]
    fn test_player_diagonal_is_not_normalized() {
        let mut player = player_at(400.0, 300.0);
        let mut input = InputState::default();
        input.key_down("s");
        input.key_down("d");
        player.move_with(&input, Vec2::new(800.0, 600.0));
        assert_eq!(player.vel, Vec2::new(5.0, 5.0));
        assert!(player.vel.length() > player.speed);
    }

    #[test]
    fn test_player_opposite_keys_down_and_right_win() {
        let mut player = player_at(400.0, 300.0);
        let mut input = InputState::default();
        for key in ["w", "s", "a", "d"] {
            input.key_down(key);
        }
        player.move_with(&input, Vec2::new(800.0, 600.0));
        assert_eq!(player.vel, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_player_clamped_to_bounds() {
        let mut player = player_at(16.0, 590.0);
        let mut input = InputState::default();
        input.key_down("a");
        input.key_down("s");
        player.move_with(&input, Vec2::new(800.0, 600.0));
        assert_eq!(player.pos, Vec2::new(15.0, 585.0));
    }

    #[test]
    fn test_player_reclamped_after_shrink() {
        let mut player = player_at(700.0, 500.0);
        player.move_with(&InputState::default(), Vec2::new(320.0, 240.0));
        assert_eq!(player.pos, Vec2::new(305.0, 225.0));
    }

    #[test]
    fn test_beast_homes_toward_player() {
        let mut beast = beast_at(400.0, 100.0, 2.0);
        beast.update(Vec2::new(400.0, 300.0));
        assert_eq!(beast.pos, Vec2::new(400.0, 102.0));
    }

    #[test]
    fn test_beast_on_target_stays_put() {
        let mut beast = beast_at(400.0, 300.0, 2.5);
        beast.update(Vec2::new(400.0, 300.0));
        assert_eq!(beast.pos, Vec2::new(400.0, 300.0));
        assert!(beast.pos.is_finite());
    }

    #[test]
    fn test_beast_rolls_within_ranges() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        for id in 0..200 {
            let beast = Beast::new(id, Vec2::ZERO, &tuning, &mut rng);
            assert!(beast.size.x >= 40.0 && beast.size.x < 60.0);
            assert!(beast.size.y >= 40.0 && beast.size.y < 60.0);
            assert!(beast.speed >= 2.0 && beast.speed < 3.0);
            assert_eq!(beast.health, 50.0);
        }
    }

    #[test]
    fn test_beast_damage_clamps_at_zero() {
        let mut beast = beast_at(0.0, 0.0, 2.0);
        beast.take_damage(25.0);
        assert_eq!(beast.health, 25.0);
        assert!(!beast.is_dead());
        beast.take_damage(40.0);
        assert_eq!(beast.health, 0.0);
        assert!(beast.is_dead());
        assert_eq!(beast.health_fraction(), 0.0);
    }

    #[test]
    fn test_projectile_renormalizes_direction() {
        let tuning = Tuning::default();
        let mut shot = Projectile::new(1, Vec2::ZERO, Vec2::new(3.0, 4.0), &tuning);
        shot.update();
        assert!((shot.pos - Vec2::new(4.8, 6.4)).length() < 1e-4);
        assert!((shot.dir.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_projectile_zero_direction_skips_movement() {
        let tuning = Tuning::default();
        let mut shot = Projectile::new(1, Vec2::new(5.0, 5.0), Vec2::ZERO, &tuning);
        shot.update();
        assert_eq!(shot.pos, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_projectile_off_screen_margin() {
        let tuning = Tuning::default();
        let mut shot = Projectile::new(1, Vec2::new(-10.0, 50.0), Vec2::X, &tuning);
        assert!(!shot.is_off_screen(800.0, 600.0, 10.0));
        shot.pos.x = -10.5;
        assert!(shot.is_off_screen(800.0, 600.0, 10.0));
        shot.pos = Vec2::new(400.0, 610.5);
        assert!(shot.is_off_screen(800.0, 600.0, 10.0));
    }

    #[test]
    fn test_new_state_starts_wave_one() {
        let state = GameState::new(42, Vec2::new(800.0, 600.0), Tuning::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.wave, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.health(), 100.0);
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.beasts.len(), 3);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_resize_keeps_entities() {
        let mut state = GameState::new(42, Vec2::new(800.0, 600.0), Tuning::default());
        let before: Vec<Vec2> = state.beasts.iter().map(|b| b.pos).collect();
        state.resize(200.0, 100.0);
        assert_eq!(state.bounds, Vec2::new(200.0, 100.0));
        let after: Vec<Vec2> = state.beasts.iter().map(|b| b.pos).collect();
        assert_eq!(before, after);
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
    }
}
