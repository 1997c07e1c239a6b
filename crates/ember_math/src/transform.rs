//! Rotation about the +Y axis with cached sine/cosine.
//!
//! Used by instancing wrappers that rotate rays into object space and
//! results back out, so both directions are provided.

use crate::{Aabb, Vec3};

/// Rotation by a fixed angle about +Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationY {
    sin_theta: f64,
    cos_theta: f64,
}

impl RotationY {
    /// Rotation by `degrees` (counter-clockwise looking down -Y).
    pub fn from_degrees(degrees: f64) -> Self {
        let radians = degrees.to_radians();
        Self {
            sin_theta: radians.sin(),
            cos_theta: radians.cos(),
        }
    }

    /// Object space to world space.
    #[inline]
    pub fn rotate(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            self.cos_theta * p.x + self.sin_theta * p.z,
            p.y,
            -self.sin_theta * p.x + self.cos_theta * p.z,
        )
    }

    /// World space to object space.
    #[inline]
    pub fn inverse_rotate(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            self.cos_theta * p.x - self.sin_theta * p.z,
            p.y,
            self.sin_theta * p.x + self.cos_theta * p.z,
        )
    }

    /// World-space box of a rotated object-space box.
    ///
    /// Computes the bounding box of all 8 rotated corners.
    pub fn transform_aabb(&self, aabb: &Aabb) -> Aabb {
        let corners = aabb.corners();
        let first = self.rotate(corners[0]);

        let (min, max) = corners[1..]
            .iter()
            .map(|&corner| self.rotate(corner))
            .fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));

        Aabb::new(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_quarter_turn() {
        let rot = RotationY::from_degrees(90.0);
        let p = rot.rotate(Vec3::X);
        assert!((p - Vec3::NEG_Z).length() < 1e-12);
    }

    #[test]
    fn test_rotation_inverse_round_trip() {
        let rot = RotationY::from_degrees(-18.0);
        let p = Vec3::new(165.0, 82.5, -12.25);
        assert!((rot.inverse_rotate(rot.rotate(p)) - p).length() < 1e-9);
        assert!((rot.rotate(rot.inverse_rotate(p)) - p).length() < 1e-9);
    }

    #[test]
    fn test_transform_aabb_bounds_rotated_corners() {
        let rot = RotationY::from_degrees(15.0);
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::new(165.0, 330.0, 165.0));
        let rotated = rot.transform_aabb(&aabb);

        for corner in aabb.corners() {
            let p = rot.rotate(corner);
            assert!(rotated.min.cmple(p + 1e-9).all());
            assert!(rotated.max.cmpge(p - 1e-9).all());
        }
        assert_eq!(rotated.min.y, 0.0);
        assert_eq!(rotated.max.y, 330.0);
    }
}
