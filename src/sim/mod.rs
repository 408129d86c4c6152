//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per display refresh, fixed per-tick speeds
//! - Seeded RNG only
//! - Stable iteration order (spawn/fire order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod frame;
pub mod input;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, rect_point_collision, rect_rect_collision};
pub use frame::{Frame, GameEvent, Sprite};
pub use input::{InputState, MoveKey};
pub use spawn::{pick_spawn_position, spawn_beasts};
pub use state::{Beast, GamePhase, GameState, Player, Projectile};
pub use tick::tick;
