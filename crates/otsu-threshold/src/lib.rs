//! Facade crate for Otsu binarization.
//!
//! This crate provides:
//! - re-exports of the codec-free algorithms in `otsu-threshold-core`,
//! - JSON config/report types ([`io`]),
//! - (feature `image`) file decode/encode helpers and [`run_config`], a
//!   load -> binarize -> save driver,
//! - (feature `cli`) the `otsu-threshold` command-line tool.
//!
//! ## Quickstart
//!
//! ```no_run
//! use otsu_threshold::{files, binarize_rgb, BinarizeParams};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let rgb = files::load_rgb("page.jpg")?;
//! let res = binarize_rgb(&rgb.view(), &BinarizeParams::default());
//! println!("threshold: {}", res.threshold);
//! files::save_binary("page_binary.png", &res.binary)?;
//! # Ok(())
//! # }
//! ```

pub use otsu_threshold_core as core;

pub use otsu_threshold_core::{
    binarize, binarize_gray, binarize_rgb, otsu_threshold, otsu_threshold_detailed, rgb_to_gray,
    synthetic, Binarization, BinarizeParams, BinaryImage, BinaryStats, GrayImage, GrayscaleParams,
    Histogram, OtsuThreshold, RgbImage, RoundingMode, ThresholdMode,
};

pub mod io;

#[cfg(feature = "image")]
pub mod files;
#[cfg(feature = "image")]
mod run;

#[cfg(feature = "image")]
pub use run::{run_config, RunOutput};
