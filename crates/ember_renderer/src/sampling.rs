//! Random sampling helpers.
//!
//! Every function draws from the generator it is handed; the renderer keeps
//! one generator per worker so no state is shared between threads.

use ember_math::Vec3;
use rand::{Rng, RngCore};
use std::f64::consts::PI;

/// Uniform double in [0, 1).
#[inline]
pub fn random_double(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Uniform double in [lo, hi). Returns `lo` when the range is empty.
#[inline]
pub fn random_range(rng: &mut dyn RngCore, lo: f64, hi: f64) -> f64 {
    lo + (hi - lo) * random_double(rng)
}

/// Uniform point in the unit disk on the z = 0 plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            random_range(rng, -1.0, 1.0),
            random_range(rng, -1.0, 1.0),
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Uniform direction on the unit sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    // Rejection sampling keeps the distribution uniform
    loop {
        let v = Vec3::new(
            random_range(rng, -1.0, 1.0),
            random_range(rng, -1.0, 1.0),
            random_range(rng, -1.0, 1.0),
        );
        let len_sq = v.length_squared();
        if len_sq > 1e-12 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}

/// Cosine-weighted direction on the +z hemisphere (density cos(theta)/pi).
pub fn random_cosine_direction(rng: &mut dyn RngCore) -> Vec3 {
    let r1 = random_double(rng);
    let r2 = random_double(rng);

    let phi = 2.0 * PI * r1;
    let sqrt_r2 = r2.sqrt();
    Vec3::new(phi.cos() * sqrt_r2, phi.sin() * sqrt_r2, (1.0 - r2).sqrt())
}
