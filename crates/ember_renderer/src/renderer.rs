//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with configurable depth
//! - Light importance sampling toward a known emissive rectangle
//! - Row-band parallel rendering on a dedicated rayon pool

use crate::{
    band::{generate_bands, render_band, BandRemainder},
    camera::Camera,
    error::{RenderError, RenderResult},
    framebuffer::Framebuffer,
    hittable::{HitRecord, Hittable},
    rect::Rect,
};
use ember_math::{Color, Interval, Ray};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Closest hit distance accepted, to keep scattered rays off their own
/// surface.
pub const T_MIN: f64 = 0.001;

/// Light cosines below this are treated as the light being seen edge-on.
const MIN_LIGHT_COSINE: f64 = 1e-6;

/// Everything the integrator reads while rendering. Shared read-only by all
/// workers.
#[derive(Clone)]
pub struct Scene {
    /// Root of the scene graph
    pub world: Arc<dyn Hittable>,
    /// Radiance returned by rays that escape the scene
    pub background: Color,
    /// Emissive region sampled directly at every scatter. Without one the
    /// integrator follows the material's own samples.
    pub light: Option<Rect>,
}

impl Scene {
    pub fn new(world: Arc<dyn Hittable>, background: Color) -> Self {
        Self {
            world,
            background,
            light: None,
        }
    }

    /// Sample `light` directly at every scatter event.
    pub fn with_light(mut self, light: Rect) -> Self {
        self.light = Some(light);
        self
    }
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub image_width: u32,
    pub image_height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Number of row bands, one worker thread each
    pub bands: usize,
    /// Base seed for the per-band generators; `None` draws one from entropy
    pub seed: Option<u64>,
    pub remainder: BandRemainder,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 300,
            image_height: 300,
            samples_per_pixel: 10,
            max_depth: 50,
            bands: 20,
            seed: None,
            remainder: BandRemainder::Drop,
        }
    }
}

impl RenderConfig {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples;
        self.max_depth = max_depth;
        self
    }

    /// Set the band count and what happens to leftover rows.
    pub fn with_bands(mut self, bands: usize, remainder: BandRemainder) -> Self {
        self.bands = bands;
        self.remainder = remainder;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Image width / height.
    pub fn aspect_ratio(&self) -> f64 {
        self.image_width as f64 / self.image_height.max(1) as f64
    }

    /// Reject configurations that cannot produce an image.
    pub fn validate(&self) -> RenderResult<()> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "image must be at least 1x1, got {}x{}",
                self.image_width, self.image_height
            )));
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidConfig(
                "samples_per_pixel must be at least 1".into(),
            ));
        }
        if self.bands == 0 {
            return Err(RenderError::InvalidConfig("bands must be at least 1".into()));
        }
        if self.bands > self.image_height as usize {
            return Err(RenderError::InvalidConfig(format!(
                "{} bands for {} rows leaves bands without rows",
                self.bands, self.image_height
            )));
        }
        Ok(())
    }
}

/// Compute the color seen by a ray.
///
/// With a light region in the scene every scatter is redirected toward a
/// uniformly sampled point on it and weighted by the material's density in
/// that direction over the area-to-solid-angle density of the sample.
/// Without one the material's own sample is traced.
pub fn ray_color(ray: &Ray, scene: &Scene, depth: u32, rng: &mut dyn RngCore) -> Color {
    // If we've exceeded max depth, return black (no light)
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = scene.world.hit(ray, Interval::new(T_MIN, f64::INFINITY)) else {
        return scene.background;
    };

    let emitted = rec.material.emitted(ray, &rec, rec.u, rec.v, rec.p);

    let Some(srec) = rec.material.scatter(ray, &rec, rng) else {
        return emitted;
    };

    let (scattered, pdf) = match &scene.light {
        Some(light) => match sample_light(light, &rec, ray.time(), rng) {
            Some(sample) => sample,
            None => return emitted,
        },
        None => (srec.scattered, srec.pdf),
    };
    if pdf.is_nan() || pdf <= 0.0 {
        return emitted;
    }

    emitted
        + srec.albedo
            * rec.material.scattering_pdf(ray, &rec, &scattered)
            * ray_color(&scattered, scene, depth - 1, rng)
            / pdf
}

/// Ray from the hit point toward a random point on `light`, with its
/// solid-angle density. `None` when the light is behind the surface or seen
/// edge-on.
fn sample_light(
    light: &Rect,
    rec: &HitRecord,
    time: f64,
    rng: &mut dyn RngCore,
) -> Option<(Ray, f64)> {
    let on_light = light.sample_point(rng);
    let to_light = on_light - rec.p;
    if to_light.dot(rec.normal) <= 0.0 {
        return None;
    }

    let distance_squared = to_light.length_squared();
    let to_light = to_light.normalize();
    let light_cosine = to_light.dot(light.normal()).abs();
    if light_cosine < MIN_LIGHT_COSINE {
        return None;
    }

    let pdf = distance_squared / (light_cosine * light.area());
    Some((Ray::new(rec.p, to_light, time), pdf))
}

/// Mix the base seed with a band index so every band draws an independent
/// stream.
fn band_seed(base: u64, index: usize) -> u64 {
    base ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Render the scene into a framebuffer of unnormalized sample sums.
///
/// Rows are split into `config.bands` bands, each rendered on its own
/// worker with its own generator. Output is reproducible for a fixed seed
/// and band count; different band counts agree only statistically.
pub fn render(camera: &Camera, scene: &Scene, config: &RenderConfig) -> RenderResult<Framebuffer> {
    config.validate()?;

    let width = config.image_width as usize;
    let height = config.image_height as usize;
    let bands = generate_bands(height, config.bands, config.remainder);

    let covered: usize = bands.iter().map(|band| band.len()).sum();
    if covered < height {
        log::warn!(
            "{} of {} rows are not covered by {} bands and stay black",
            height - covered,
            height,
            bands.len()
        );
    }

    let base_seed = config.seed.unwrap_or_else(rand::random);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.bands)
        .thread_name(|i| format!("ember-band-{i}"))
        .build()?;

    log::info!(
        "Rendering {}x{} at {} spp, depth {}, {} bands",
        config.image_width,
        config.image_height,
        config.samples_per_pixel,
        config.max_depth,
        bands.len()
    );
    let start = Instant::now();

    let mut framebuffer = Framebuffer::new(
        config.image_width,
        config.image_height,
        config.samples_per_pixel,
    );

    // Hand each band the slice holding exactly its rows
    let mut rest = framebuffer.pixels_mut();
    let mut work = Vec::with_capacity(bands.len());
    for band in &bands {
        let (slice, tail) = std::mem::take(&mut rest).split_at_mut(band.len() * width);
        work.push((band, slice));
        rest = tail;
    }

    pool.scope(|s| {
        for (band, slice) in work {
            s.spawn(move |_| {
                let band_start = Instant::now();
                let mut rng = StdRng::seed_from_u64(band_seed(base_seed, band.index));
                render_band(band, slice, camera, scene, config, &mut rng);
                log::debug!(
                    "Band {} (rows {}..{}) done in {:.2?}",
                    band.index,
                    band.rows.start,
                    band.rows.end,
                    band_start.elapsed()
                );
            });
        }
    });

    log::info!("Render finished in {:.2?}", start.elapsed());
    Ok(framebuffer)
}
