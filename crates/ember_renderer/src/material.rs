//! Material trait for surface scattering.
//!
//! A material answers three questions at a hit point: does the ray scatter
//! (and with what albedo, direction and density), how much light the surface
//! emits, and what density it assigns to an arbitrary outgoing direction.
//! The integrator keeps the last one separate because it may trace a
//! direction the material did not choose.

use crate::hittable::HitRecord;
use crate::sampling::random_cosine_direction;
use crate::texture::{SolidColor, Texture};
use ember_math::{Color, Onb, Point3, Ray};
use rand::RngCore;
use std::f64::consts::PI;
use std::sync::Arc;

/// Outcome of a successful scatter.
#[derive(Debug, Clone, Copy)]
pub struct ScatterRecord {
    /// Reflectance at the hit point
    pub albedo: Color,
    /// Direction sampled from the material's own distribution
    pub scattered: Ray,
    /// Density of `scattered` under that distribution
    pub pdf: f64,
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Sample an outgoing ray. `None` means the path ends here
    /// (absorption or an emitter).
    fn scatter(
        &self,
        _ray_in: &Ray,
        _rec: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterRecord> {
        None
    }

    /// Radiance leaving the surface on its own. Black by default.
    fn emitted(&self, _ray_in: &Ray, _rec: &HitRecord, _u: f64, _v: f64, _p: Point3) -> Color {
        Color::ZERO
    }

    /// Directional density this material gives `scattered`. Never negative.
    fn scattering_pdf(&self, _ray_in: &Ray, _rec: &HitRecord, _scattered: &Ray) -> f64 {
        0.0
    }
}

/// Lambertian (ideal diffuse) material.
pub struct Lambertian {
    albedo: Arc<dyn Texture>,
}

impl Lambertian {
    /// Diffuse surface with a constant albedo.
    pub fn new(albedo: Color) -> Self {
        Self::from_texture(Arc::new(SolidColor::new(albedo)))
    }

    pub fn from_texture(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterRecord> {
        let uvw = Onb::from_w(rec.normal);
        let direction = uvw.local(random_cosine_direction(rng)).normalize();
        let scattered = Ray::new(rec.p, direction, ray_in.time());

        Some(ScatterRecord {
            albedo: self.albedo.value(rec.u, rec.v, rec.p),
            scattered,
            pdf: uvw.w().dot(direction) / PI,
        })
    }

    fn scattering_pdf(&self, _ray_in: &Ray, rec: &HitRecord, scattered: &Ray) -> f64 {
        let cosine = rec.normal.dot(scattered.direction().normalize_or_zero());
        if cosine <= 0.0 {
            0.0
        } else {
            cosine / PI
        }
    }
}

/// Diffuse light emitter. Emits only from its front face.
pub struct DiffuseLight {
    emit: Arc<dyn Texture>,
}

impl DiffuseLight {
    /// Create a new diffuse light with the given emission color.
    pub fn new(emit: Color) -> Self {
        Self::from_texture(Arc::new(SolidColor::new(emit)))
    }

    pub fn from_texture(emit: Arc<dyn Texture>) -> Self {
        Self { emit }
    }
}

impl Material for DiffuseLight {
    fn emitted(&self, _ray_in: &Ray, rec: &HitRecord, u: f64, v: f64, p: Point3) -> Color {
        if rec.front_face {
            self.emit.value(u, v, p)
        } else {
            Color::ZERO
        }
    }
}
