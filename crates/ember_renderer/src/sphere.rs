//! Sphere primitives, static and linearly moving.

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use ember_math::{Aabb, Interval, Point3, Ray, Vec3};
use std::f64::consts::PI;
use std::sync::Arc;

/// UV coordinates for a point on the unit sphere centered at the origin.
///
/// u: angle around the Y axis from X=-1, v: angle from Y=-1 to Y=+1.
fn get_sphere_uv(p: Vec3) -> (f64, f64) {
    let theta = (-p.y).acos();
    let phi = (-p.z).atan2(p.x) + PI;
    (phi / (2.0 * PI), theta / PI)
}

/// Nearest root of |origin + t*dir - center|^2 = r^2 strictly inside `ray_t`.
fn sphere_root(center: Point3, radius: f64, ray: &Ray, ray_t: Interval) -> Option<f64> {
    let oc = center - ray.origin();
    let a = ray.direction().length_squared();
    let h = ray.direction().dot(oc);
    let c = oc.length_squared() - radius * radius;

    let discriminant = h * h - a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();
    let mut root = (h - sqrtd) / a;
    if !ray_t.surrounds(root) {
        root = (h + sqrtd) / a;
        if !ray_t.surrounds(root) {
            return None;
        }
    }
    Some(root)
}

/// A sphere primitive.
pub struct Sphere {
    center: Point3,
    radius: f64,
    material: Arc<dyn Material>,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: Point3, radius: f64, material: Arc<dyn Material>) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let t = sphere_root(self.center, self.radius, ray, ray_t)?;
        let outward_normal = (ray.at(t) - self.center) / self.radius;
        Some(HitRecord::new(
            ray,
            t,
            outward_normal,
            get_sphere_uv(outward_normal),
            self.material.as_ref(),
        ))
    }

    fn bounding_box(&self, _time0: f64, _time1: f64) -> Aabb {
        let rvec = Vec3::splat(self.radius);
        Aabb::from_points(self.center - rvec, self.center + rvec)
    }
}

/// A sphere whose center moves linearly from `center0` at `time0` to
/// `center1` at `time1`.
pub struct MovingSphere {
    center0: Point3,
    center1: Point3,
    time0: f64,
    time1: f64,
    radius: f64,
    material: Arc<dyn Material>,
}

impl MovingSphere {
    pub fn new(
        (center0, time0): (Point3, f64),
        (center1, time1): (Point3, f64),
        radius: f64,
        material: Arc<dyn Material>,
    ) -> Self {
        Self {
            center0,
            center1,
            time0,
            time1,
            radius: radius.max(0.0),
            material,
        }
    }

    /// Center at `time`, extrapolated linearly outside the key times.
    pub fn center(&self, time: f64) -> Point3 {
        let span = self.time1 - self.time0;
        if span == 0.0 {
            return self.center0;
        }
        self.center0 + ((time - self.time0) / span) * (self.center1 - self.center0)
    }
}

impl Hittable for MovingSphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let center = self.center(ray.time());
        let t = sphere_root(center, self.radius, ray, ray_t)?;
        let outward_normal = (ray.at(t) - center) / self.radius;
        Some(HitRecord::new(
            ray,
            t,
            outward_normal,
            get_sphere_uv(outward_normal),
            self.material.as_ref(),
        ))
    }

    fn bounding_box(&self, time0: f64, time1: f64) -> Aabb {
        // Linear motion: the boxes at both ends bound every instant between
        let rvec = Vec3::splat(self.radius);
        let c0 = self.center(time0);
        let c1 = self.center(time1);
        Aabb::surrounding(
            &Aabb::from_points(c0 - rvec, c0 + rvec),
            &Aabb::from_points(c1 - rvec, c1 + rvec),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use ember_math::Color;

    fn gray() -> Arc<dyn Material> {
        Arc::new(Lambertian::new(Color::splat(0.5)))
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5, gray());
        let ray = Ray::new(Point3::ZERO, Vec3::new(0.0, 0.0, -1.0), 0.0);

        let rec = sphere.hit(&ray, Interval::new(0.001, f64::INFINITY)).expect("hit");
        assert!((rec.t - 0.5).abs() < 1e-9);
        assert!(rec.front_face);
        assert!((rec.normal - Vec3::Z).length() < 1e-9);
    }

    #[test]
    fn test_sphere_hit_from_inside_is_back_face() {
        let sphere = Sphere::new(Point3::ZERO, 2.0, gray());
        let ray = Ray::new(Point3::ZERO, Vec3::X, 0.0);

        let rec = sphere.hit(&ray, Interval::new(0.001, f64::INFINITY)).expect("hit");
        assert!((rec.t - 2.0).abs() < 1e-9);
        assert!(!rec.front_face);
        assert!((rec.normal - Vec3::NEG_X).length() < 1e-9);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5, gray());
        let ray = Ray::new(Point3::ZERO, Vec3::new(0.0, 1.0, 0.0), 0.0);
        assert!(sphere.hit(&ray, Interval::new(0.001, f64::INFINITY)).is_none());
    }

    #[test]
    fn test_sphere_uv_poles() {
        let (_, v_bottom) = get_sphere_uv(Vec3::NEG_Y);
        let (_, v_top) = get_sphere_uv(Vec3::Y);
        assert!(v_bottom.abs() < 1e-12);
        assert!((v_top - 1.0).abs() < 1e-12);

        let (u, v) = get_sphere_uv(Vec3::NEG_X);
        assert!(u.abs() < 1e-12);
        assert!((v - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_moving_sphere_follows_ray_time() {
        let sphere = MovingSphere::new(
            (Point3::new(0.0, 0.0, -5.0), 0.0),
            (Point3::new(0.0, 2.0, -5.0), 1.0),
            0.5,
            gray(),
        );
        let ray_t = Interval::new(0.001, f64::INFINITY);

        let early = Ray::new(Point3::ZERO, Vec3::NEG_Z, 0.0);
        assert!(sphere.hit(&early, ray_t).is_some());

        // At t=1 the sphere has moved up out of the ray's path
        let late = Ray::new(Point3::ZERO, Vec3::NEG_Z, 1.0);
        assert!(sphere.hit(&late, ray_t).is_none());

        let late_high = Ray::new(Point3::new(0.0, 2.0, 0.0), Vec3::NEG_Z, 1.0);
        assert!(sphere.hit(&late_high, ray_t).is_some());
    }

    #[test]
    fn test_moving_sphere_box_covers_motion() {
        let sphere = MovingSphere::new(
            (Point3::new(0.0, 0.0, 0.0), 0.0),
            (Point3::new(4.0, 0.0, 0.0), 1.0),
            1.0,
            gray(),
        );
        let bbox = sphere.bounding_box(0.0, 1.0);
        assert_eq!(bbox.min, Point3::new(-1.0, -1.0, -1.0));
        assert_eq!(bbox.max, Point3::new(5.0, 1.0, 1.0));

        for i in 0..=10 {
            let c = sphere.center(i as f64 / 10.0);
            assert!(bbox.contains_point(c + Vec3::X) && bbox.contains_point(c - Vec3::X));
        }
    }
}
