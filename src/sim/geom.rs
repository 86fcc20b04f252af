//! Axis-aligned geometry primitives
//!
//! Screen coordinates throughout: origin at the top-left, y grows downward.
//! All hit tests use strict inequalities, so exact tangency never counts as
//! contact - that is the system's resting-contact tolerance.

use glam::Vec2;

/// Closed axis-aligned rectangle, addressed by its top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        assert!(w >= 0.0 && h >= 0.0, "rectangle extents must be non-negative");
        Self { x, y, w, h }
    }

    /// Nearest point inside the rectangle to `(x, y)`, via independent
    /// per-axis clamping
    pub fn clamp_point(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(
            x.clamp(self.x, self.x + self.w - 1.0),
            y.clamp(self.y, self.y + self.h - 1.0),
        )
    }
}

/// Stage boundary a ball can penetrate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

/// True iff the point lies strictly inside the circle
#[inline]
pub fn circle_contains(center: Vec2, radius: f32, p: Vec2) -> bool {
    center.distance_squared(p) < radius * radius
}

/// True iff the vertical extent `[cy - r, cy + r]` overlaps the half-open
/// band `[low, high)`
#[inline]
pub fn band_overlaps(cy: f32, radius: f32, low: f32, high: f32) -> bool {
    cy - radius < high && cy + radius > low
}

/// Which single stage boundary the circle currently penetrates, if any.
///
/// Checked in fixed priority order left, right, top, bottom; only one side
/// is ever reported even when a corner overlaps two.
pub fn bounds_side(center: Vec2, radius: f32, width: f32, height: f32) -> Option<Side> {
    if center.x - radius < 0.0 {
        Some(Side::Left)
    } else if center.x + radius > width {
        Some(Side::Right)
    } else if center.y - radius < 0.0 {
        Some(Side::Top)
    } else if center.y + radius > height {
        Some(Side::Bottom)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_point_inside_rect() {
        let rect = Rect::new(10.0, 20.0, 48.0, 24.0);
        // Already inside
        assert_eq!(rect.clamp_point(30.0, 30.0), Vec2::new(30.0, 30.0));
        // Each axis clamps independently to [edge, edge + extent - 1]
        assert_eq!(rect.clamp_point(0.0, 0.0), Vec2::new(10.0, 20.0));
        assert_eq!(rect.clamp_point(100.0, 100.0), Vec2::new(57.0, 43.0));
        assert_eq!(rect.clamp_point(30.0, 100.0), Vec2::new(30.0, 43.0));
    }

    #[test]
    fn test_circle_contains_is_strict() {
        let center = Vec2::new(0.0, 0.0);
        assert!(circle_contains(center, 10.0, Vec2::new(5.0, 5.0)));
        // Exact tangency does not count as a hit
        assert!(!circle_contains(center, 10.0, Vec2::new(10.0, 0.0)));
        assert!(!circle_contains(center, 10.0, Vec2::new(10.5, 0.0)));
    }

    #[test]
    fn test_band_overlaps_half_open() {
        // Ball spanning [40, 60]
        assert!(band_overlaps(50.0, 10.0, 0.0, 48.0));
        assert!(band_overlaps(50.0, 10.0, 48.0, 96.0));
        // Touching the low edge exactly is not an overlap
        assert!(!band_overlaps(70.0, 10.0, 0.0, 48.0));
        // Touching the high edge exactly is not an overlap
        assert!(!band_overlaps(58.0, 10.0, 68.0, 96.0));
    }

    #[test]
    fn test_bounds_side_priority() {
        let r = 8.0;
        assert_eq!(bounds_side(Vec2::new(4.0, 50.0), r, 200.0, 100.0), Some(Side::Left));
        assert_eq!(bounds_side(Vec2::new(198.0, 50.0), r, 200.0, 100.0), Some(Side::Right));
        assert_eq!(bounds_side(Vec2::new(50.0, 4.0), r, 200.0, 100.0), Some(Side::Top));
        assert_eq!(bounds_side(Vec2::new(50.0, 98.0), r, 200.0, 100.0), Some(Side::Bottom));
        // Corner overlap still reports only the first side in priority order
        assert_eq!(bounds_side(Vec2::new(4.0, 4.0), r, 200.0, 100.0), Some(Side::Left));
        assert_eq!(bounds_side(Vec2::new(100.0, 50.0), r, 200.0, 100.0), None);
    }

    #[test]
    fn test_bounds_side_tangent_is_none() {
        // Distance to the wall exactly equals the radius
        assert_eq!(bounds_side(Vec2::new(8.0, 50.0), 8.0, 200.0, 100.0), None);
        assert_eq!(bounds_side(Vec2::new(50.0, 92.0), 8.0, 200.0, 100.0), None);
    }
}
