//! Overlap predicates and bounding shapes
//!
//! Everything here is pure: shapes in, bool out. The simulation decides what
//! an overlap *means* (damage, pickup); this module only answers whether two
//! regions intersect.

use glam::Vec2;

/// Axis-aligned rectangle, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size centered on a point
    pub fn centered(center: Vec2, w: f32, h: f32) -> Self {
        Self {
            x: center.x - w / 2.0,
            y: center.y - h / 2.0,
            w,
            h,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Circle by center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Smallest axis-aligned rectangle containing the circle
    pub fn bounding_rect(&self) -> Rect {
        Rect::centered(self.center, self.radius * 2.0, self.radius * 2.0)
    }
}

/// True iff two rectangles intersect.
///
/// Strict inequality on all four sides: rectangles that merely share an edge
/// do not overlap.
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// True iff two circles intersect (center distance < radius sum).
#[inline]
pub fn circles_overlap(a: &Circle, b: &Circle) -> bool {
    let r = a.radius + b.radius;
    a.center.distance_squared(b.center) < r * r
}

/// True iff a circle intersects a rectangle.
///
/// Clamps the circle center to the rectangle's extent to find the nearest
/// point, then compares squared distance against radius². This is the general
/// contact test for circle-modeled entities against a rectangular hitbox.
#[inline]
pub fn circle_rect_overlap(circle: &Circle, rect: &Rect) -> bool {
    let nearest = Vec2::new(
        circle.center.x.clamp(rect.x, rect.x + rect.w),
        circle.center.y.clamp(rect.y, rect.y + rect.h),
    );
    circle.center.distance_squared(nearest) < circle.radius * circle.radius
}

/// Collision capability for world entities.
///
/// Every entity can produce a bounding box; circle-modeled entities (the
/// asteroids) also expose a bounding circle so the ship test can use the
/// tighter circle-vs-rect predicate.
pub trait Collider {
    fn bounding_box(&self) -> Rect;

    fn bounding_circle(&self) -> Option<Circle> {
        None
    }
}

/// Test an entity against a rectangular hitbox, using the circle predicate
/// when the entity is circle-modeled.
pub fn collides_with_rect<C: Collider>(entity: &C, rect: &Rect) -> bool {
    match entity.bounding_circle() {
        Some(circle) => circle_rect_overlap(&circle, rect),
        None => rects_overlap(&entity.bounding_box(), rect),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rects_edge_touching_is_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!rects_overlap(&a, &b));
        assert!(!rects_overlap(&b, &a));
    }

    #[test]
    fn test_rects_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 0.0, 10.0, 10.0);
        assert!(rects_overlap(&a, &b));
        assert!(rects_overlap(&b, &a));
    }

    #[test]
    fn test_rects_disjoint_vertically() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(0.0, 20.0, 10.0, 10.0);
        assert!(!rects_overlap(&a, &b));
    }

    #[test]
    fn test_circles_overlap() {
        let a = Circle::new(Vec2::new(0.0, 0.0), 5.0);
        let b = Circle::new(Vec2::new(8.0, 0.0), 4.0);
        assert!(circles_overlap(&a, &b));

        // Exactly touching: distance == radius sum, not an overlap
        let c = Circle::new(Vec2::new(9.0, 0.0), 4.0);
        assert!(!circles_overlap(&a, &c));
    }

    #[test]
    fn test_circle_rect_overlap_corner() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);

        // Circle near the corner, close enough diagonally
        let near = Circle::new(Vec2::new(12.0, 12.0), 3.0);
        assert!(circle_rect_overlap(&near, &rect));

        // Same center, radius too small to reach the corner
        let far = Circle::new(Vec2::new(12.0, 12.0), 2.0);
        assert!(!circle_rect_overlap(&far, &rect));
    }

    #[test]
    fn test_circle_rect_center_inside() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let circle = Circle::new(Vec2::new(5.0, 5.0), 0.1);
        assert!(circle_rect_overlap(&circle, &rect));
    }

    proptest! {
        /// Translating both shapes by the same vector never changes the result.
        #[test]
        fn prop_circle_rect_translation_invariant(
            cx in -200.0f32..200.0, cy in -200.0f32..200.0, r in 0.1f32..50.0,
            rx in -200.0f32..200.0, ry in -200.0f32..200.0,
            w in 0.1f32..100.0, h in 0.1f32..100.0,
            dx in -500.0f32..500.0, dy in -500.0f32..500.0,
        ) {
            let circle = Circle::new(Vec2::new(cx, cy), r);
            let rect = Rect::new(rx, ry, w, h);
            let shift = Vec2::new(dx, dy);
            let moved_circle = Circle::new(circle.center + shift, r);
            let moved_rect = Rect::new(rx + dx, ry + dy, w, h);
            prop_assert_eq!(
                circle_rect_overlap(&circle, &rect),
                circle_rect_overlap(&moved_circle, &moved_rect)
            );
        }

        /// Overlap predicates are symmetric in their arguments.
        #[test]
        fn prop_rects_overlap_symmetric(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0,
            aw in 0.1f32..50.0, ah in 0.1f32..50.0,
            bx in -100.0f32..100.0, by in -100.0f32..100.0,
            bw in 0.1f32..50.0, bh in 0.1f32..50.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(rects_overlap(&a, &b), rects_overlap(&b, &a));
        }
    }
}
