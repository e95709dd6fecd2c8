use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::image::{BinaryImage, GrayImage, GrayImageView};

/// Map every pixel strictly above `threshold` to 255 and everything else to 0.
///
/// A pixel equal to the threshold is background.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(src), fields(width = src.width, height = src.height))
)]
pub fn binarize(src: &GrayImageView<'_>, threshold: u8) -> BinaryImage {
    let mut data = vec![0u8; src.pixel_count()];
    apply_threshold(src.data, &mut data, threshold);
    BinaryImage::from_gray_unchecked(GrayImage {
        width: src.width,
        height: src.height,
        data,
    })
}

#[inline]
fn level(v: u8, threshold: u8) -> u8 {
    if v > threshold {
        BinaryImage::FOREGROUND
    } else {
        BinaryImage::BACKGROUND
    }
}

#[cfg(not(feature = "rayon"))]
fn apply_threshold(src: &[u8], out: &mut [u8], threshold: u8) {
    for (o, &v) in out.iter_mut().zip(src) {
        *o = level(v, threshold);
    }
}

#[cfg(feature = "rayon")]
fn apply_threshold(src: &[u8], out: &mut [u8], threshold: u8) {
    use rayon::prelude::*;

    out.par_iter_mut()
        .zip(src.par_iter())
        .for_each(|(o, &v)| *o = level(v, threshold));
}

/// White/black pixel counts of a binary image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryStats {
    pub white: u64,
    pub black: u64,
}

impl BinaryStats {
    pub fn from_binary(img: &BinaryImage) -> Self {
        let white = img
            .data()
            .iter()
            .filter(|&&v| v == BinaryImage::FOREGROUND)
            .count() as u64;
        Self {
            white,
            black: img.data().len() as u64 - white,
        }
    }

    pub fn total(&self) -> u64 {
        self.white + self.black
    }

    /// Share of white pixels in `[0, 1]`; `0.0` for an empty image.
    pub fn white_fraction(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            n => self.white as f64 / n as f64,
        }
    }

    pub fn black_fraction(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            n => self.black as f64 / n as f64,
        }
    }
}
