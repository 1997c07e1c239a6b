//! Row-band partitioning of the image.
//!
//! The image is cut into contiguous horizontal bands that are rendered
//! independently. Bands never share a row, so each worker writes a disjoint
//! slice of the framebuffer.

use crate::{
    camera::Camera,
    renderer::{ray_color, RenderConfig, Scene},
    sampling::random_double,
};
use ember_math::Color;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// What to do with the rows left over when the image height is not a
/// multiple of the band count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandRemainder {
    /// Every band gets `height / bands` rows; the leftover top rows are
    /// never rendered and stay black.
    #[default]
    Drop,
    /// The leading bands take one extra row each so every row is rendered.
    Distribute,
}

/// A contiguous range of image rows rendered by one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowBand {
    /// Position of this band, bottom band first
    pub index: usize,
    /// Rows covered, counted from the bottom of the image
    pub rows: Range<usize>,
}

impl RowBand {
    /// Number of rows in the band.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Split `[0, height)` into `bands` contiguous bands, in row order.
pub fn generate_bands(height: usize, bands: usize, remainder: BandRemainder) -> Vec<RowBand> {
    if bands == 0 {
        return Vec::new();
    }

    let base = height / bands;
    let extra = match remainder {
        BandRemainder::Drop => 0,
        BandRemainder::Distribute => height % bands,
    };

    let mut start = 0;
    (0..bands)
        .map(|index| {
            let len = base + usize::from(index < extra);
            let band = RowBand {
                index,
                rows: start..start + len,
            };
            start += len;
            band
        })
        .collect()
}

/// Render every pixel of `band` into `pixels`, which holds exactly the band's
/// rows. Sample results are added to whatever the slice already holds.
pub fn render_band(
    band: &RowBand,
    pixels: &mut [Color],
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) {
    let width = config.image_width as usize;
    let u_span = (config.image_width.max(2) - 1) as f64;
    let v_span = (config.image_height.max(2) - 1) as f64;

    for (row, j) in band.rows.clone().enumerate() {
        for i in 0..width {
            let pixel = &mut pixels[row * width + i];
            for _ in 0..config.samples_per_pixel {
                let u = (i as f64 + random_double(rng)) / u_span;
                let v = (j as f64 + random_double(rng)) / v_span;
                let ray = camera.get_ray(u, v, rng);
                *pixel += ray_color(&ray, scene, config.max_depth, rng);
            }
        }
    }
}
