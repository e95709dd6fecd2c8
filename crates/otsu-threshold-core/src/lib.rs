//! Global image binarization with Otsu's method.
//!
//! The crate works on plain row-major byte buffers and has no image codec
//! dependency. Data flows strictly one way:
//!
//! RGB image -> [`rgb_to_gray`] -> [`Histogram::from_gray`] ->
//! [`otsu_threshold`] -> [`binarize`] -> [`BinaryImage`]
//!
//! ## Quickstart
//!
//! ```
//! use otsu_threshold_core::{binarize_rgb, synthetic, BinarizeParams};
//!
//! let rgb = synthetic::demo_scene(120, 80);
//! let res = binarize_rgb(&rgb.view(), &BinarizeParams::default());
//! assert_eq!(res.histogram.total(), 120 * 80);
//! assert!(res.binary.data().iter().all(|&v| v == 0 || v == 255));
//! ```

mod binarize;
mod error;
mod grayscale;
mod histogram;
mod image;
mod logger;
mod otsu;
mod pipeline;
pub mod synthetic;

pub use binarize::{binarize, BinaryStats};
pub use error::{HistogramError, ImageBufferError};
pub use grayscale::{
    luminance, rgb_to_gray, GrayscaleParams, RoundingMode, LUMA_B, LUMA_G, LUMA_R,
};
pub use histogram::{Histogram, BINS};
pub use image::{BinaryImage, GrayImage, GrayImageView, RgbImage, RgbImageView};
pub use otsu::{
    between_class_scores, otsu_threshold, otsu_threshold_detailed, ClassSplit, OtsuThreshold,
    ThresholdScore,
};
pub use pipeline::{binarize_gray, binarize_rgb, Binarization, BinarizeParams, ThresholdMode};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_level, level_from_verbosity};
