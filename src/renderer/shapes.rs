//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in viewport pixels.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// Filled axis-aligned rectangle from its top-left corner
pub fn rect(top_left: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    if size.x <= 0.0 || size.y <= 0.0 {
        return Vec::new();
    }
    let br = top_left + size;
    let (l, t, r, b) = (top_left.x, top_left.y, br.x, br.y);

    vec![
        Vertex::new(l, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, b, color),
    ]
}

/// Filled rectangle of `size` centered on `center`
pub fn centered_rect(center: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    rect(center - size * 0.5, size, color)
}

/// Stroked circle: a band of `thickness` straddling `radius`
pub fn ring(center: Vec2, radius: f32, thickness: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let inner_radius = (radius - thickness / 2.0).max(0.0);
    let outer_radius = radius + thickness / 2.0;
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;
        let (dir1, dir2) = (Vec2::from_angle(theta1), Vec2::from_angle(theta2));

        let inner1 = center + dir1 * inner_radius;
        let outer1 = center + dir1 * outer_radius;
        let inner2 = center + dir2 * inner_radius;
        let outer2 = center + dir2 * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Two-layer progress bar: full-width backing plus a fill of `fraction`
pub fn bar(
    top_left: Vec2,
    size: Vec2,
    fraction: f32,
    back: [f32; 4],
    fill: [f32; 4],
) -> Vec<Vertex> {
    let mut vertices = rect(top_left, size, back);
    let fill_size = Vec2::new(size.x * fraction.clamp(0.0, 1.0), size.y);
    vertices.extend(rect(top_left, fill_size, fill));
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    #[test]
    fn test_rect_covers_corners() {
        let v = rect(Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0), WHITE);
        assert_eq!(v.len(), 6);
        let xs: Vec<f32> = v.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = v.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_empty_rect_emits_nothing() {
        assert!(rect(Vec2::ZERO, Vec2::new(0.0, 8.0), WHITE).is_empty());
    }

    #[test]
    fn test_ring_radii() {
        let center = Vec2::new(100.0, 100.0);
        let v = ring(center, 20.0, 2.0, WHITE, 16);
        assert_eq!(v.len(), 16 * 6);
        for vert in v {
            let d = (Vec2::from(vert.position) - center).length();
            assert!((19.0 - 1e-3..=21.0 + 1e-3).contains(&d));
        }
    }

    #[test]
    fn test_bar_fill_width() {
        let v = bar(Vec2::ZERO, Vec2::new(50.0, 8.0), 0.5, WHITE, WHITE);
        assert_eq!(v.len(), 12);
        let fill_right = v[6..].iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        assert_eq!(fill_right, 25.0);

        // An empty bar only draws its backing
        assert_eq!(bar(Vec2::ZERO, Vec2::new(50.0, 8.0), 0.0, WHITE, WHITE).len(), 6);
    }
}
