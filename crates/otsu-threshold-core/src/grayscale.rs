//! RGB to luminance conversion.
//!
//! Uses the ITU-R BT.601 luma weights `0.299 R + 0.587 G + 0.114 B`, evaluated
//! in double precision and clamped to `[0, 255]` before the integer cast.

use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::image::{GrayImage, RgbImageView};

pub const LUMA_R: f64 = 0.299;
pub const LUMA_G: f64 = 0.587;
pub const LUMA_B: f64 = 0.114;

/// How the fractional luminance is turned into an 8-bit value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Round half away from zero: `(100, 150, 200)` gives 141.
    #[default]
    Nearest,
    /// Drop the fractional part: `(100, 150, 200)` gives 140.
    ///
    /// Note that with truncation some neutral grays map one level down,
    /// e.g. `(1, 1, 1)` gives 0 because the weighted sum lands just below 1.
    Truncate,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrayscaleParams {
    pub rounding: RoundingMode,
}

/// Weighted luminance of a single pixel.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8, rounding: RoundingMode) -> u8 {
    let y = LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64;
    let y = match rounding {
        RoundingMode::Nearest => y.round(),
        RoundingMode::Truncate => y.trunc(),
    };
    y.clamp(0.0, 255.0) as u8
}

/// Convert an RGB image to a grayscale image of the same size.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(src, params), fields(width = src.width, height = src.height))
)]
pub fn rgb_to_gray(src: &RgbImageView<'_>, params: &GrayscaleParams) -> GrayImage {
    let mut data = vec![0u8; src.pixel_count()];
    convert_pixels(src.data, &mut data, params.rounding);
    GrayImage {
        width: src.width,
        height: src.height,
        data,
    }
}

#[cfg(not(feature = "rayon"))]
fn convert_pixels(rgb: &[u8], out: &mut [u8], rounding: RoundingMode) {
    for (g, px) in out.iter_mut().zip(rgb.chunks_exact(3)) {
        *g = luminance(px[0], px[1], px[2], rounding);
    }
}

#[cfg(feature = "rayon")]
fn convert_pixels(rgb: &[u8], out: &mut [u8], rounding: RoundingMode) {
    use rayon::prelude::*;

    out.par_iter_mut()
        .zip(rgb.par_chunks_exact(3))
        .for_each(|(g, px)| *g = luminance(px[0], px[1], px[2], rounding));
}
