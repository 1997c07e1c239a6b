//! Ember math - double-precision value types shared by the path tracer.
//!
//! Vectors come from glam's `DVec3`; this crate adds the ray, interval,
//! bounding box and frame types the renderer builds on.

pub use glam;
pub use glam::DVec3;

mod aabb;
mod interval;
mod onb;
mod ray;
mod transform;

pub use aabb::Aabb;
pub use interval::Interval;
pub use onb::Onb;
pub use ray::Ray;
pub use transform::RotationY;

/// 3D vector (double precision).
pub type Vec3 = DVec3;

/// A position in world or object space.
pub type Point3 = DVec3;

/// Linear RGB radiance or reflectance.
pub type Color = DVec3;
