//! Sprite to vertex translation
//!
//! Sprites are drawn in the order the tick recorded them, with no retained
//! scene: every frame is rebuilt from scratch.

use glam::Vec2;

use super::shapes::{bar, centered_rect, ring};
use super::vertex::{Vertex, colors};
use crate::sim::Sprite;

/// Aim ring stroke width
const RING_THICKNESS: f32 = 2.0;
const RING_SEGMENTS: u32 = 32;

/// Beast eyes
const EYE_SIZE: f32 = 10.0;

/// Beast health bar, floating above the body
const HEALTH_BAR_HEIGHT: f32 = 8.0;
const HEALTH_BAR_GAP: f32 = 15.0;

/// Projectiles draw as small squares regardless of hitbox radius
const PROJECTILE_DRAW_SIZE: f32 = 4.0;

/// Build the triangle list for one frame
pub fn build_vertices(sprites: &[Sprite]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(sprites.len() * 24);
    for sprite in sprites {
        match *sprite {
            Sprite::Player {
                center,
                size,
                ring_radius,
            } => {
                vertices.extend(centered_rect(center, size, colors::PLAYER));
                vertices.extend(ring(
                    center,
                    ring_radius,
                    RING_THICKNESS,
                    colors::AIM_RING,
                    RING_SEGMENTS,
                ));
            }
            Sprite::Beast {
                center,
                size,
                health_fraction,
            } => push_beast(&mut vertices, center, size, health_fraction),
            Sprite::Projectile { center } => {
                vertices.extend(centered_rect(
                    center,
                    Vec2::splat(PROJECTILE_DRAW_SIZE),
                    colors::PROJECTILE,
                ));
            }
        }
    }
    vertices
}

fn push_beast(vertices: &mut Vec<Vertex>, center: Vec2, size: Vec2, health_fraction: f32) {
    vertices.extend(centered_rect(center, size, colors::BEAST));

    // Eyes sit a quarter-width either side of center
    let eye = Vec2::splat(EYE_SIZE);
    let offset = Vec2::new(size.x / 4.0, 0.0);
    vertices.extend(centered_rect(center - offset, eye, colors::BEAST_EYE));
    vertices.extend(centered_rect(center + offset, eye, colors::BEAST_EYE));

    let top_left = center - size * 0.5 - Vec2::new(0.0, HEALTH_BAR_GAP);
    vertices.extend(bar(
        top_left,
        Vec2::new(size.x, HEALTH_BAR_HEIGHT),
        health_fraction,
        colors::HEALTH_BAR_BACK,
        colors::HEALTH_BAR_FILL,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_frame() {
        assert!(build_vertices(&[]).is_empty());
    }

    #[test]
    fn test_beast_layers() {
        let full = build_vertices(&[Sprite::Beast {
            center: Vec2::new(200.0, 200.0),
            size: Vec2::new(40.0, 40.0),
            health_fraction: 1.0,
        }]);
        // Body, two eyes, bar backing, bar fill
        assert_eq!(full.len(), 5 * 6);
        assert_eq!(full[0].color, colors::BEAST);

        let dead = build_vertices(&[Sprite::Beast {
            center: Vec2::new(200.0, 200.0),
            size: Vec2::new(40.0, 40.0),
            health_fraction: 0.0,
        }]);
        assert_eq!(dead.len(), 4 * 6);
    }

    #[test]
    fn test_health_bar_floats_above_beast() {
        let v = build_vertices(&[Sprite::Beast {
            center: Vec2::new(200.0, 200.0),
            size: Vec2::new(40.0, 40.0),
            health_fraction: 1.0,
        }]);
        let bar_top = v[18..]
            .iter()
            .map(|v| v.position[1])
            .fold(f32::MAX, f32::min);
        assert_eq!(bar_top, 200.0 - 20.0 - 15.0);
    }

    #[test]
    fn test_player_includes_ring() {
        let v = build_vertices(&[Sprite::Player {
            center: Vec2::new(50.0, 50.0),
            size: Vec2::new(30.0, 30.0),
            ring_radius: 20.0,
        }]);
        assert_eq!(v.len(), 6 + RING_SEGMENTS as usize * 6);
    }

    #[test]
    fn test_projectile_square() {
        let v = build_vertices(&[Sprite::Projectile {
            center: Vec2::new(10.0, 10.0),
        }]);
        assert_eq!(v.len(), 6);
        assert!(v.iter().all(|v| v.color == colors::PROJECTILE));
        assert!(v.iter().all(|v| (8.0..=12.0).contains(&v.position[0])));
    }
}
