//! Thin-lens camera for ray generation.

use crate::sampling::{random_in_unit_disk, random_range};
use ember_math::{Point3, Ray, Vec3};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Camera placement and lens parameters. Build a [`Camera`] with
/// [`CameraSettings::build`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub look_from: Point3,
    pub look_at: Point3,
    /// Up hint; only needs to be coplanar with the final up vector
    pub vup: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f64,
    /// Viewport width / height
    pub aspect_ratio: f64,
    /// Lens diameter; zero gives a pinhole camera
    pub aperture: f64,
    /// Distance to the plane of perfect focus
    pub focus_dist: f64,
    /// Shutter open time
    pub time0: f64,
    /// Shutter close time
    pub time1: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            look_from: Point3::new(278.0, 278.0, -800.0),
            look_at: Point3::new(278.0, 278.0, 0.0),
            vup: Vec3::Y,
            vfov: 40.0,
            aspect_ratio: 1.0,
            aperture: 0.0,
            focus_dist: 10.0,
            time0: 0.0,
            time1: 1.0,
        }
    }
}

impl CameraSettings {
    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f64, aperture: f64, focus_dist: f64) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set the shutter interval rays draw their time from.
    pub fn with_shutter(mut self, time0: f64, time1: f64) -> Self {
        self.time0 = time0;
        self.time1 = time1;
        self
    }

    /// Compute the camera frame and viewport.
    pub fn build(&self) -> Camera {
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = self.aspect_ratio * viewport_height;

        // Calculate camera basis vectors
        let w = (self.look_from - self.look_at).normalize();
        let u = self.vup.cross(w).normalize();
        let v = w.cross(u);

        let origin = self.look_from;
        let horizontal = self.focus_dist * viewport_width * u;
        let vertical = self.focus_dist * viewport_height * v;
        let lower_left_corner =
            origin - horizontal / 2.0 - vertical / 2.0 - self.focus_dist * w;

        Camera {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: self.aperture / 2.0,
            time0: self.time0,
            time1: self.time1,
        }
    }
}

/// Camera for generating rays into the scene. Immutable once built and
/// shared by every render worker.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    origin: Point3,
    lower_left_corner: Point3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f64,
    time0: f64,
    time1: f64,
}

impl Camera {
    /// Ray through normalized viewport coordinates `(s, t)`, with `(0, 0)`
    /// at the lower-left corner and `(1, 1)` at the upper-right.
    pub fn get_ray(&self, s: f64, t: f64, rng: &mut dyn RngCore) -> Ray {
        let rd = self.lens_radius * random_in_unit_disk(rng);
        let offset = self.u * rd.x + self.v * rd.y;
        let from = self.origin + offset;

        Ray::new(
            from,
            self.lower_left_corner + s * self.horizontal + t * self.vertical - from,
            random_range(rng, self.time0, self.time1),
        )
    }

    /// Camera frame `(u, v, w)`; `w` points away from the view direction.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }
}

impl Default for Camera {
    fn default() -> Self {
        CameraSettings::default().build()
    }
}
