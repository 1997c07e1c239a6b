//! Wrappers that reuse a child hittable under a transform.
//!
//! Each wrapper owns a shared handle to its child, moves the incoming ray
//! into the child's space, delegates, and carries the result back out.

use crate::hittable::{HitRecord, Hittable};
use ember_math::{Aabb, Interval, Ray, RotationY, Vec3};
use std::sync::Arc;

/// Child displaced by a fixed offset.
pub struct Translate {
    object: Arc<dyn Hittable>,
    offset: Vec3,
}

impl Translate {
    pub fn new(object: Arc<dyn Hittable>, offset: Vec3) -> Self {
        Self { object, offset }
    }
}

impl Hittable for Translate {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let moved = Ray::new(ray.origin() - self.offset, ray.direction(), ray.time());
        let mut rec = self.object.hit(&moved, ray_t)?;
        rec.p += self.offset;
        Some(rec)
    }

    fn bounding_box(&self, time0: f64, time1: f64) -> Aabb {
        self.object.bounding_box(time0, time1).translate(self.offset)
    }
}

/// Child rotated about the +Y axis.
pub struct RotateY {
    object: Arc<dyn Hittable>,
    rotation: RotationY,
}

impl RotateY {
    /// Rotate `object` by `degrees` about +Y.
    pub fn new(object: Arc<dyn Hittable>, degrees: f64) -> Self {
        Self {
            object,
            rotation: RotationY::from_degrees(degrees),
        }
    }
}

impl Hittable for RotateY {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let rotated = Ray::new(
            self.rotation.inverse_rotate(ray.origin()),
            self.rotation.inverse_rotate(ray.direction()),
            ray.time(),
        );

        // Rotation preserves dot products, so front_face carries over as is
        let mut rec = self.object.hit(&rotated, ray_t)?;
        rec.p = self.rotation.rotate(rec.p);
        rec.normal = self.rotation.rotate(rec.normal);
        Some(rec)
    }

    fn bounding_box(&self, time0: f64, time1: f64) -> Aabb {
        self.rotation
            .transform_aabb(&self.object.bounding_box(time0, time1))
    }
}

/// Child with its front and back faces swapped. Used to make one-sided
/// emitters face the other way.
pub struct FlipFace {
    object: Arc<dyn Hittable>,
}

impl FlipFace {
    pub fn new(object: Arc<dyn Hittable>) -> Self {
        Self { object }
    }
}

impl Hittable for FlipFace {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut rec = self.object.hit(ray, ray_t)?;
        rec.front_face = !rec.front_face;
        Some(rec)
    }

    fn bounding_box(&self, time0: f64, time1: f64) -> Aabb {
        self.object.bounding_box(time0, time1)
    }
}
