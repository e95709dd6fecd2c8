//! End-to-end flow: RGB -> grayscale -> histogram -> threshold -> binary.

use log::{debug, info};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::binarize::{binarize, BinaryStats};
use crate::grayscale::{rgb_to_gray, GrayscaleParams};
use crate::histogram::Histogram;
use crate::image::{BinaryImage, GrayImage, RgbImageView};
use crate::otsu::{otsu_threshold_detailed, OtsuThreshold};

/// Where the global threshold comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdMode {
    #[default]
    Otsu,
    /// Skip selection and use this value.
    Fixed(u8),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinarizeParams {
    pub grayscale: GrayscaleParams,
    pub threshold: ThresholdMode,
}

/// Every intermediate product of one run.
#[derive(Clone, Debug)]
pub struct Binarization {
    pub gray: GrayImage,
    pub histogram: Histogram,
    /// Threshold actually applied.
    pub threshold: u8,
    /// Selection details, `None` when the threshold was fixed.
    pub otsu: Option<OtsuThreshold>,
    pub binary: BinaryImage,
    pub stats: BinaryStats,
}

/// Run the full pipeline on an RGB image.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(src, params), fields(width = src.width, height = src.height))
)]
pub fn binarize_rgb(src: &RgbImageView<'_>, params: &BinarizeParams) -> Binarization {
    let gray = rgb_to_gray(src, &params.grayscale);
    if let Some((lo, hi)) = gray.view().min_max() {
        debug!(
            "grayscale {}x{} ({:?} rounding): min={lo}, max={hi}",
            gray.width, gray.height, params.grayscale.rounding
        );
    }
    binarize_gray(gray, params)
}

/// Run histogram, threshold selection and binarization on a grayscale image.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(gray, params), fields(width = gray.width, height = gray.height))
)]
pub fn binarize_gray(gray: GrayImage, params: &BinarizeParams) -> Binarization {
    let histogram = Histogram::from_gray(&gray.view());
    debug!("histogram: {} pixels", histogram.total());

    let (threshold, otsu) = match params.threshold {
        ThresholdMode::Otsu => {
            let otsu = otsu_threshold_detailed(&histogram);
            info!("otsu threshold: {}", otsu.threshold);
            (otsu.threshold, Some(otsu))
        }
        ThresholdMode::Fixed(t) => {
            info!("fixed threshold: {t}");
            (t, None)
        }
    };

    let binary = binarize(&gray.view(), threshold);
    let stats = BinaryStats::from_binary(&binary);
    info!(
        "binarized: white={} ({:.1}%), black={} ({:.1}%)",
        stats.white,
        stats.white_fraction() * 100.0,
        stats.black,
        stats.black_fraction() * 100.0
    );

    Binarization {
        gray,
        histogram,
        threshold,
        otsu,
        binary,
        stats,
    }
}
