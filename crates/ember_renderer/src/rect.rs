//! Axis-aligned rectangles.
//!
//! [`Rect`] is the bare geometry (also used to describe the light region the
//! integrator samples); [`AxisAlignedRect`] attaches a material and makes it
//! hittable.

use crate::{
    hittable::{HitRecord, Hittable},
    sampling::random_range,
    Material,
};
use ember_math::{Aabb, Interval, Point3, Ray, Vec3};
use rand::RngCore;
use std::sync::Arc;

/// Half-thickness added along the normal so the box is never flat.
const RECT_PADDING: f64 = 0.0001;

/// Orientation of an axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plane {
    /// Spans x and y at fixed z; normal +Z.
    Xy,
    /// Spans x and z at fixed y; normal +Y.
    Xz,
    /// Spans y and z at fixed x; normal +X.
    Yz,
}

impl Plane {
    /// `(a_axis, b_axis, normal_axis)` indices.
    pub fn axes(self) -> (usize, usize, usize) {
        match self {
            Plane::Xy => (0, 1, 2),
            Plane::Xz => (0, 2, 1),
            Plane::Yz => (1, 2, 0),
        }
    }

    /// The fixed outward normal.
    pub fn normal(self) -> Vec3 {
        match self {
            Plane::Xy => Vec3::Z,
            Plane::Xz => Vec3::Y,
            Plane::Yz => Vec3::X,
        }
    }
}

/// Rectangle `[a0, a1] x [b0, b1]` lying in `plane` at coordinate `k`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub plane: Plane,
    pub a0: f64,
    pub a1: f64,
    pub b0: f64,
    pub b1: f64,
    pub k: f64,
}

impl Rect {
    pub fn new(plane: Plane, (a0, a1): (f64, f64), (b0, b1): (f64, f64), k: f64) -> Self {
        Self {
            plane,
            a0,
            a1,
            b0,
            b1,
            k,
        }
    }

    pub fn area(&self) -> f64 {
        (self.a1 - self.a0) * (self.b1 - self.b0)
    }

    pub fn normal(&self) -> Vec3 {
        self.plane.normal()
    }

    /// World point for in-plane coordinates `(a, b)`.
    pub fn point_at(&self, a: f64, b: f64) -> Point3 {
        let (ia, ib, ik) = self.plane.axes();
        let mut p = Point3::ZERO;
        p[ia] = a;
        p[ib] = b;
        p[ik] = self.k;
        p
    }

    /// True when in-plane coordinates `(a, b)` fall inside the bounds.
    pub fn contains(&self, a: f64, b: f64) -> bool {
        a >= self.a0 && a <= self.a1 && b >= self.b0 && b <= self.b1
    }

    /// Uniformly distributed point on the rectangle.
    pub fn sample_point(&self, rng: &mut dyn RngCore) -> Point3 {
        let a = random_range(rng, self.a0, self.a1);
        let b = random_range(rng, self.b0, self.b1);
        self.point_at(a, b)
    }

    /// Ray parameter and in-plane `(u, v)` where `ray` crosses the rectangle.
    pub fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<(f64, f64, f64)> {
        let (ia, ib, ik) = self.plane.axes();
        let dir_k = ray.direction[ik];
        if dir_k == 0.0 {
            return None;
        }

        let t = (self.k - ray.origin[ik]) / dir_k;
        if !ray_t.surrounds(t) {
            return None;
        }

        let a = ray.origin[ia] + t * ray.direction[ia];
        let b = ray.origin[ib] + t * ray.direction[ib];
        if !self.contains(a, b) {
            return None;
        }

        Some((
            t,
            (a - self.a0) / (self.a1 - self.a0),
            (b - self.b0) / (self.b1 - self.b0),
        ))
    }

    /// Bounding box padded along the normal axis.
    pub fn bounding_box(&self) -> Aabb {
        let (_, _, ik) = self.plane.axes();
        let mut pad = Vec3::ZERO;
        pad[ik] = RECT_PADDING;
        Aabb::from_points(
            self.point_at(self.a0, self.b0) - pad,
            self.point_at(self.a1, self.b1) + pad,
        )
    }
}

/// A rectangle with a material.
pub struct AxisAlignedRect {
    rect: Rect,
    material: Arc<dyn Material>,
}

impl AxisAlignedRect {
    pub fn new(rect: Rect, material: Arc<dyn Material>) -> Self {
        Self { rect, material }
    }

    /// Rectangle `[x0, x1] x [y0, y1]` at `z = k`.
    pub fn xy(x: (f64, f64), y: (f64, f64), k: f64, material: Arc<dyn Material>) -> Self {
        Self::new(Rect::new(Plane::Xy, x, y, k), material)
    }

    /// Rectangle `[x0, x1] x [z0, z1]` at `y = k`.
    pub fn xz(x: (f64, f64), z: (f64, f64), k: f64, material: Arc<dyn Material>) -> Self {
        Self::new(Rect::new(Plane::Xz, x, z, k), material)
    }

    /// Rectangle `[y0, y1] x [z0, z1]` at `x = k`.
    pub fn yz(y: (f64, f64), z: (f64, f64), k: f64, material: Arc<dyn Material>) -> Self {
        Self::new(Rect::new(Plane::Yz, y, z, k), material)
    }
}

impl Hittable for AxisAlignedRect {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let (t, u, v) = self.rect.intersect(ray, ray_t)?;
        Some(HitRecord::new(
            ray,
            t,
            self.rect.normal(),
            (u, v),
            self.material.as_ref(),
        ))
    }

    fn bounding_box(&self, _time0: f64, _time1: f64) -> Aabb {
        self.rect.bounding_box()
    }
}
