//! Axis-aligned bounding boxes
//!
//! Every entity derives its box from its current position on demand, so a
//! box can never go stale across a move.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box described by its center and half extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half: Vec2) -> Self {
        Self { center, half }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    /// True when the two boxes overlap with non-zero area.
    ///
    /// Touching edges do not count, so entities sitting flush never
    /// register spurious hits. Symmetric and side-effect free.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        (self.center.x - other.center.x).abs() < self.half.x + other.half.x
            && (self.center.y - other.center.y).abs() < self.half.y + other.half.y
    }

    /// True when the point lies inside or on the boundary
    pub fn contains_point(&self, point: Vec2) -> bool {
        let min = self.min();
        let max = self.max();
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn aabb(cx: f32, cy: f32, hx: f32, hy: f32) -> Aabb {
        Aabb::new(Vec2::new(cx, cy), Vec2::new(hx, hy))
    }

    #[test]
    fn overlapping_boxes_intersect() {
        let a = aabb(0.0, 0.0, 10.0, 10.0);
        let b = aabb(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn distant_boxes_miss() {
        let a = aabb(0.0, 0.0, 10.0, 10.0);
        let b = aabb(100.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn touching_edges_do_not_count() {
        // Right edge of a flush against left edge of b
        let a = aabb(0.0, 0.0, 10.0, 10.0);
        let b = aabb(20.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        // Corner contact
        let c = aabb(20.0, 20.0, 10.0, 10.0);
        assert!(!a.intersects(&c));
    }

    #[test]
    fn overlap_on_one_axis_only_misses() {
        let a = aabb(0.0, 0.0, 10.0, 10.0);
        let b = aabb(5.0, 50.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn contains_point_includes_boundary() {
        let a = aabb(0.0, 0.0, 10.0, 10.0);
        assert!(a.contains_point(Vec2::new(10.0, 10.0)));
        assert!(a.contains_point(Vec2::ZERO));
        assert!(!a.contains_point(Vec2::new(10.1, 0.0)));
    }

    proptest! {
        #[test]
        fn intersects_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            ahx in 0.1f32..100.0, ahy in 0.1f32..100.0,
            bhx in 0.1f32..100.0, bhy in 0.1f32..100.0,
        ) {
            let a = aabb(ax, ay, ahx, ahy);
            let b = aabb(bx, by, bhx, bhy);
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        }

        #[test]
        fn box_never_misses_itself(
            x in -500.0f32..500.0, y in -500.0f32..500.0,
            hx in 0.1f32..100.0, hy in 0.1f32..100.0,
        ) {
            let a = aabb(x, y, hx, hy);
            prop_assert!(a.intersects(&a));
        }
    }
}
