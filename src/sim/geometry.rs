//! Closed-form geometry helpers
//!
//! Everything here is pure: easing, quadratic Bezier paths and
//! axis-aligned bounding box overlap.

use glam::Vec2;

/// Axis-aligned bounding box (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect covering `size` at `pos`
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    /// Shrink by `amount` on every side. Never produces a negative extent.
    pub fn inset(&self, amount: f32) -> Self {
        let width = (self.width - 2.0 * amount).max(0.0);
        let height = (self.height - 2.0 * amount).max(0.0);
        Self::new(self.x + amount, self.y + amount, width, height)
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Linear blend from `a` toward `b`.
///
/// `t` is not clamped: callers pass `dt * rate`, which gives frame-rate
/// dependent exponential smoothing rather than a true interpolation.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Quadratic Bezier through `p0` (t=0), pulled toward `p1`, ending at `p2` (t=1)
pub fn bezier(p0: Vec2, p1: Vec2, p2: Vec2, t: f32) -> Vec2 {
    // Endpoints are returned verbatim so path starts/ends are exact.
    if t <= 0.0 {
        return p0;
    }
    if t >= 1.0 {
        return p2;
    }
    let u = 1.0 - t;
    p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
}

/// True iff both axis projections overlap strictly (touching edges miss).
/// A rect with zero area never overlaps anything, even a rect around it.
pub fn rect_overlap(a: &Rect, b: &Rect) -> bool {
    if a.area() <= 0.0 || b.area() <= 0.0 {
        return false;
    }
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_lerp_is_unclamped() {
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(0.0, 10.0, 2.0), 20.0);
        assert_eq!(lerp(4.0, 4.0, 0.3), 4.0);
    }

    #[test]
    fn test_distance() {
        assert!((distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_bezier_midpoint() {
        let p = bezier(
            Vec2::new(0.0, 0.0),
            Vec2::new(50.0, 100.0),
            Vec2::new(100.0, 0.0),
            0.5,
        );
        assert!((p.x - 50.0).abs() < 1e-4);
        assert!((p.y - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_projectile_overlaps_enemy() {
        let bullet = Rect::new(100.0, 100.0, 4.0, 8.0);
        let enemy = Rect::new(98.0, 98.0, 24.0, 24.0);
        assert!(rect_overlap(&bullet, &enemy));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!rect_overlap(&a, &right));
        assert!(!rect_overlap(&a, &below));
    }

    #[test]
    fn test_inset_clamps_to_zero() {
        let r = Rect::new(0.0, 0.0, 6.0, 6.0).inset(4.0);
        assert_eq!(r.width, 0.0);
        assert_eq!(r.height, 0.0);
        assert_eq!(r.area(), 0.0);
    }

    fn arb_rect() -> impl Strategy<Value = Rect> {
        (-500.0f32..500.0, -500.0f32..500.0, 0.0f32..200.0, 0.0f32..200.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(a in arb_rect(), b in arb_rect()) {
            prop_assert_eq!(rect_overlap(&a, &b), rect_overlap(&b, &a));
        }

        #[test]
        fn prop_fully_inset_rect_never_overlaps(a in arb_rect(), b in arb_rect()) {
            let collapsed = a.inset(a.width.max(a.height));
            prop_assert_eq!(collapsed.area(), 0.0);
            prop_assert!(!rect_overlap(&collapsed, &b));
        }

        #[test]
        fn prop_bezier_endpoints_exact(
            x0 in -1000.0f32..1000.0, y0 in -1000.0f32..1000.0,
            x1 in -1000.0f32..1000.0, y1 in -1000.0f32..1000.0,
            x2 in -1000.0f32..1000.0, y2 in -1000.0f32..1000.0,
        ) {
            let (p0, p1, p2) = (Vec2::new(x0, y0), Vec2::new(x1, y1), Vec2::new(x2, y2));
            prop_assert_eq!(bezier(p0, p1, p2, 0.0), p0);
            prop_assert_eq!(bezier(p0, p1, p2, 1.0), p2);
        }
    }
}
