//! Axis-aligned box built from six rectangles.

use crate::{
    hittable::{HitRecord, Hittable, HittableList},
    rect::AxisAlignedRect,
    Material,
};
use ember_math::{Aabb, Interval, Point3, Ray};
use std::sync::Arc;

/// A closed box owning its six faces. All faces share one material.
pub struct Cuboid {
    min: Point3,
    max: Point3,
    sides: HittableList,
}

impl Cuboid {
    /// Box spanning the two corners `p0` and `p1`.
    pub fn new(p0: Point3, p1: Point3, material: Arc<dyn Material>) -> Self {
        let min = p0.min(p1);
        let max = p0.max(p1);

        let (x, y, z) = ((min.x, max.x), (min.y, max.y), (min.z, max.z));

        let mut sides = HittableList::new();
        sides.add(Arc::new(AxisAlignedRect::xy(x, y, max.z, material.clone())));
        sides.add(Arc::new(AxisAlignedRect::xy(x, y, min.z, material.clone())));
        sides.add(Arc::new(AxisAlignedRect::xz(x, z, max.y, material.clone())));
        sides.add(Arc::new(AxisAlignedRect::xz(x, z, min.y, material.clone())));
        sides.add(Arc::new(AxisAlignedRect::yz(y, z, max.x, material.clone())));
        sides.add(Arc::new(AxisAlignedRect::yz(y, z, min.x, material)));

        Self { min, max, sides }
    }
}

impl Hittable for Cuboid {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        self.sides.hit(ray, ray_t)
    }

    fn bounding_box(&self, _time0: f64, _time1: f64) -> Aabb {
        Aabb::new(self.min, self.max)
    }
}
