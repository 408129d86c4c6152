//! Axis-aligned bounding-box collision
//!
//! Every entity is positioned by its center. Overlap is strict: boxes that only
//! share an edge do not collide.

use glam::Vec2;

/// Axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box of `size` centered on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Square of side 2 × `radius` centered on `center`
    pub fn around_point(center: Vec2, radius: f32) -> Self {
        Self::centered(center, Vec2::splat(radius * 2.0))
    }

    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Check a rectangle against a projectile treated as a small square
pub fn rect_point_collision(rect_center: Vec2, rect_size: Vec2, point: Vec2, radius: f32) -> bool {
    Aabb::centered(rect_center, rect_size).overlaps(&Aabb::around_point(point, radius))
}

/// Check two rectangles for overlap
pub fn rect_rect_collision(a_center: Vec2, a_size: Vec2, b_center: Vec2, b_size: Vec2) -> bool {
    Aabb::centered(a_center, a_size).overlaps(&Aabb::centered(b_center, b_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_rects() {
        assert!(rect_rect_collision(
            Vec2::new(100.0, 100.0),
            Vec2::new(40.0, 40.0),
            Vec2::new(120.0, 110.0),
            Vec2::new(30.0, 30.0),
        ));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        // Right edge of A at x=120, left edge of B at x=120
        assert!(!rect_rect_collision(
            Vec2::new(100.0, 100.0),
            Vec2::new(40.0, 40.0),
            Vec2::new(135.0, 100.0),
            Vec2::new(30.0, 30.0),
        ));
    }

    #[test]
    fn test_separated_on_one_axis() {
        // Same column, far apart vertically
        assert!(!rect_rect_collision(
            Vec2::new(100.0, 100.0),
            Vec2::new(40.0, 40.0),
            Vec2::new(100.0, 300.0),
            Vec2::new(40.0, 40.0),
        ));
    }

    #[test]
    fn test_projectile_box_uses_radius() {
        let beast = Vec2::new(200.0, 200.0);
        let size = Vec2::new(50.0, 50.0);
        // Beast spans x in [175, 225]; projectile box spans [x-5, x+5]
        assert!(rect_point_collision(beast, size, Vec2::new(229.0, 200.0), 5.0));
        assert!(!rect_point_collision(beast, size, Vec2::new(230.0, 200.0), 5.0));
    }
}
