//! Hittable trait and HitRecord for ray-object intersection.

use crate::Material;
use ember_math::{Aabb, Interval, Point3, Ray, Vec3};
use std::sync::Arc;

/// Record of a ray-object intersection.
#[derive(Clone)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Point3,
    /// Surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a dyn Material,
    /// UV texture coordinates
    pub u: f64,
    pub v: f64,
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    /// Build a record, orienting `outward_normal` against the ray.
    pub fn new(
        ray: &Ray,
        t: f64,
        outward_normal: Vec3,
        (u, v): (f64, f64),
        material: &'a dyn Material,
    ) -> Self {
        let mut rec = Self {
            p: ray.at(t),
            normal: outward_normal,
            material,
            u,
            v,
            t,
            front_face: true,
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }

    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray, so we need to
    /// track whether we hit the front or back face.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.front_face = ray.direction().dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
///
/// Scene nodes are shared (`Arc<dyn Hittable>`) since the same geometry can
/// be reachable from a flat list and from the BVH built over it.
pub trait Hittable: Send + Sync {
    /// Closest intersection with parameter strictly inside `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;

    /// Box enclosing the object over the whole `[time0, time1]` interval.
    fn bounding_box(&self, time0: f64, time1: f64) -> Aabb;
}

/// An unordered list of hittable objects, tested by linear scan.
#[derive(Clone, Default)]
pub struct HittableList {
    objects: Vec<Arc<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Clear all objects from the list.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    pub fn objects(&self) -> &[Arc<dyn Hittable>] {
        &self.objects
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl From<Vec<Arc<dyn Hittable>>> for HittableList {
    fn from(objects: Vec<Arc<dyn Hittable>>) -> Self {
        Self { objects }
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;

        for object in &self.objects {
            let max = closest.as_ref().map_or(ray_t.max, |rec| rec.t);
            if let Some(rec) = object.hit(ray, Interval::new(ray_t.min, max)) {
                closest = Some(rec);
            }
        }

        closest
    }

    fn bounding_box(&self, time0: f64, time1: f64) -> Aabb {
        self.objects.iter().fold(Aabb::EMPTY, |acc, object| {
            Aabb::surrounding(&acc, &object.bounding_box(time0, time1))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, Sphere};
    use ember_math::Color;

    fn sphere_at(z: f64) -> Arc<dyn Hittable> {
        Arc::new(Sphere::new(
            Point3::new(0.0, 0.0, z),
            0.5,
            Arc::new(Lambertian::new(Color::splat(0.5))),
        ))
    }

    #[test]
    fn test_set_face_normal() {
        let mat = Lambertian::new(Color::ONE);
        let toward = Ray::new(Point3::ZERO, Vec3::NEG_Z, 0.0);
        let rec = HitRecord::new(&toward, 1.0, Vec3::Z, (0.0, 0.0), &mat);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);

        let away = Ray::new(Point3::ZERO, Vec3::Z, 0.0);
        let rec = HitRecord::new(&away, 1.0, Vec3::Z, (0.0, 0.0), &mat);
        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3::NEG_Z);
        assert_eq!(rec.p, Point3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_list_returns_closest_regardless_of_order() {
        let mut list = HittableList::new();
        list.add(sphere_at(-10.0));
        list.add(sphere_at(-3.0));
        list.add(sphere_at(-6.0));

        let ray = Ray::new(Point3::ZERO, Vec3::NEG_Z, 0.0);
        let rec = list.hit(&ray, Interval::new(0.001, f64::INFINITY)).expect("hit");
        assert!((rec.t - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_list_misses() {
        let list = HittableList::new();
        let ray = Ray::new(Point3::ZERO, Vec3::NEG_Z, 0.0);
        assert!(list.is_empty());
        assert!(list.hit(&ray, Interval::UNIVERSE).is_none());
        assert_eq!(list.bounding_box(0.0, 1.0), Aabb::EMPTY);
    }

    #[test]
    fn test_list_bounding_box_covers_children() {
        let list = HittableList::from(vec![sphere_at(-10.0), sphere_at(4.0)]);
        let bbox = list.bounding_box(0.0, 1.0);
        assert_eq!(bbox.min, Point3::new(-0.5, -0.5, -10.5));
        assert_eq!(bbox.max, Point3::new(0.5, 0.5, 4.5));
    }
}
