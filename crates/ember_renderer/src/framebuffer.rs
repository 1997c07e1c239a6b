//! Accumulation framebuffer and the output resolve stage.

use ember_math::Color;
use image::{Rgb, RgbImage};

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Turn an accumulated sample sum into 8-bit sRGB-ish output: average over
/// `samples`, replace NaN with zero, gamma correct and clamp.
pub fn resolve_color(sum: Color, samples: u32) -> [u8; 3] {
    let scale = 1.0 / samples.max(1) as f64;
    let channel = |c: f64| {
        let c = if c.is_nan() { 0.0 } else { c };
        let g = linear_to_gamma(c * scale);
        (256.0 * g.clamp(0.0, 0.999)) as u8
    };
    [channel(sum.x), channel(sum.y), channel(sum.z)]
}

/// Unnormalized per-pixel color sums, row-major with row 0 at the bottom of
/// the image.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    samples_per_pixel: u32,
    pixels: Vec<Color>,
}

impl Framebuffer {
    /// Create a new framebuffer filled with black.
    pub fn new(width: u32, height: u32, samples_per_pixel: u32) -> Self {
        Self {
            width,
            height,
            samples_per_pixel,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Samples each pixel sum was accumulated from.
    pub fn samples_per_pixel(&self) -> u32 {
        self.samples_per_pixel
    }

    /// Accumulated sum at `(x, y)`, `y` counted from the bottom row.
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Mean radiance at `(x, y)`.
    pub fn mean(&self, x: u32, y: u32) -> Color {
        self.get(x, y) / self.samples_per_pixel.max(1) as f64
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    /// RGB bytes, top row first.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let width = self.width as usize;
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for row in self.pixels.chunks(width.max(1)).rev() {
            for &color in row {
                bytes.extend_from_slice(&resolve_color(color, self.samples_per_pixel));
            }
        }
        bytes
    }

    /// Resolved image, ready to save.
    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            Rgb(resolve_color(
                self.get(x, self.height - 1 - y),
                self.samples_per_pixel,
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-1.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 1e-12);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_resolve_color_averages_and_clamps() {
        // 4 samples summing to 1.0 -> mean 0.25 -> gamma 0.5 -> 128
        assert_eq!(resolve_color(Color::new(1.0, 0.0, 400.0), 4), [128, 0, 255]);
    }

    #[test]
    fn test_resolve_color_replaces_nan() {
        assert_eq!(resolve_color(Color::new(f64::NAN, 4.0, -2.0), 4), [0, 255, 0]);
    }

    #[test]
    fn test_to_rgb8_writes_top_row_first() {
        let mut fb = Framebuffer::new(2, 2, 1);
        // Bottom-left white, top-right gray
        fb.pixels_mut()[0] = Color::ONE;
        fb.pixels_mut()[3] = Color::splat(0.25);

        let bytes = fb.to_rgb8();
        assert_eq!(bytes.len(), 12);
        assert_eq!(&bytes[0..6], &[0, 0, 0, 128, 128, 128]);
        assert_eq!(&bytes[6..12], &[255, 255, 255, 0, 0, 0]);
    }

    #[test]
    fn test_to_image_matches_rgb8() {
        let mut fb = Framebuffer::new(3, 2, 2);
        for (i, p) in fb.pixels_mut().iter_mut().enumerate() {
            *p = Color::splat(i as f64 * 0.3);
        }
        let image = fb.to_image();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.into_raw(), fb.to_rgb8());
    }

    #[test]
    fn test_mean_divides_by_samples() {
        let mut fb = Framebuffer::new(1, 1, 8);
        fb.pixels_mut()[0] = Color::splat(4.0);
        assert_eq!(fb.mean(0, 0), Color::splat(0.5));
        assert_eq!(fb.get(0, 0), Color::splat(4.0));
    }
}
