//! Overlap tests and penetration resolution
//!
//! Everything here works on footprints: circles in the XZ plane for hull and
//! cube separation, and axis-aligned boxes for stone impacts.

use glam::Vec3;

use crate::flat;

/// Result of a footprint overlap check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the footprints overlap
    pub hit: bool,
    /// Unit separating axis in XZ, pointing from `a` toward `b`
    pub normal: Vec3,
    /// Overlap depth along `normal`
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec3::ZERO,
            penetration: 0.0,
        }
    }
}

/// Circle-vs-circle overlap in XZ.
///
/// Centers closer than `min_dist` are reported as a miss: there is no
/// separating axis to push along.
pub fn circle_overlap_xz(a: Vec3, radius_a: f32, b: Vec3, radius_b: f32, min_dist: f32) -> CollisionResult {
    let d = flat(b) - flat(a);
    let dist = d.length();
    let reach = radius_a + radius_b;
    if dist < min_dist || dist >= reach {
        return CollisionResult::miss();
    }
    CollisionResult {
        hit: true,
        normal: d / dist,
        penetration: reach - dist,
    }
}

/// Push `b` out of a static circle at `a` by the full penetration depth
pub fn push_out_static(a: Vec3, radius_a: f32, b: &mut Vec3, radius_b: f32) -> bool {
    let result = circle_overlap_xz(a, radius_a, *b, radius_b, 1e-4);
    if result.hit {
        b.x += result.normal.x * result.penetration;
        b.z += result.normal.z * result.penetration;
    }
    result.hit
}

/// Separate two equal-radius circles, splitting the penetration 50/50
pub fn separate_pair(a: &mut Vec3, b: &mut Vec3, radius: f32) -> bool {
    // 1e-3 distance == 1e-6 squared distance
    let result = circle_overlap_xz(*a, radius, *b, radius, 1e-3);
    if result.hit {
        let half = result.normal * (result.penetration * 0.5);
        *a -= half;
        *b += half;
    }
    result.hit
}

/// Axis-aligned box overlap of a point against a cube of `half` extent
#[inline]
pub fn point_in_box(p: Vec3, center: Vec3, half: f32) -> bool {
    let d = (p - center).abs();
    d.x < half && d.y < half && d.z < half
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_overlap_reports_axis_and_depth() {
        let r = circle_overlap_xz(Vec3::ZERO, 1.0, Vec3::new(1.5, 7.0, 0.0), 1.0, 1e-4);
        assert!(r.hit);
        assert!((r.normal - Vec3::X).length() < 1e-6);
        assert!((r.penetration - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_circle_overlap_miss_when_apart_or_coincident() {
        assert!(!circle_overlap_xz(Vec3::ZERO, 1.0, Vec3::new(2.5, 0.0, 0.0), 1.0, 1e-4).hit);
        assert!(!circle_overlap_xz(Vec3::ZERO, 1.0, Vec3::ZERO, 1.0, 1e-4).hit);
    }

    #[test]
    fn test_push_out_static_reaches_contact() {
        let mut b = Vec3::new(0.0, 0.3, 1.0);
        assert!(push_out_static(Vec3::ZERO, 1.5, &mut b, 1.0));
        assert!((b.z - 2.5).abs() < 1e-5);
        // Height untouched
        assert_eq!(b.y, 0.3);
    }

    #[test]
    fn test_separate_pair_splits_evenly() {
        let mut a = Vec3::new(0.0, 0.0, 0.0);
        let mut b = Vec3::new(1.0, 0.0, 0.0);
        assert!(separate_pair(&mut a, &mut b, 1.0));
        assert!((a.x - (-0.5)).abs() < 1e-5);
        assert!((b.x - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_point_in_box() {
        assert!(point_in_box(Vec3::new(0.5, -0.5, 0.1), Vec3::ZERO, 0.6));
        assert!(!point_in_box(Vec3::new(0.7, 0.0, 0.0), Vec3::ZERO, 0.6));
    }
}
