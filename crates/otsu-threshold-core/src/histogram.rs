//! 256-bin intensity histogram.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::error::HistogramError;
use crate::image::GrayImageView;

pub const BINS: usize = 256;

/// Pixel counts per 8-bit intensity; `bins()[i]` is the number of pixels
/// with value exactly `i`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Histogram {
    counts: [u64; BINS],
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            counts: [0; BINS],
        }
    }
}

impl Histogram {
    pub fn from_counts(counts: [u64; BINS]) -> Self {
        Self { counts }
    }

    pub fn try_from_slice(counts: &[u64]) -> Result<Self, HistogramError> {
        let counts: [u64; BINS] = counts
            .try_into()
            .map_err(|_| HistogramError::LengthMismatch { got: counts.len() })?;
        Ok(Self { counts })
    }

    /// Count every pixel of `img`.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(img), fields(width = img.width, height = img.height))
    )]
    pub fn from_gray(img: &GrayImageView<'_>) -> Self {
        Self {
            counts: count_values(img.data),
        }
    }

    #[inline]
    pub fn bins(&self) -> &[u64; BINS] {
        &self.counts
    }

    #[inline]
    pub fn count(&self, intensity: u8) -> u64 {
        self.counts[intensity as usize]
    }

    /// Total number of pixels counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// `sum(i * count[i])` over all bins.
    pub fn intensity_sum(&self) -> u64 {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, &c)| i as u64 * c)
            .sum()
    }

    pub fn nonzero_bins(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn min_intensity(&self) -> Option<u8> {
        self.counts.iter().position(|&c| c > 0).map(|i| i as u8)
    }

    pub fn max_intensity(&self) -> Option<u8> {
        self.counts.iter().rposition(|&c| c > 0).map(|i| i as u8)
    }

    /// Mean intensity, `None` for an empty histogram.
    pub fn mean(&self) -> Option<f64> {
        let total = self.total();
        (total > 0).then(|| self.intensity_sum() as f64 / total as f64)
    }
}

#[cfg(not(feature = "rayon"))]
fn count_values(data: &[u8]) -> [u64; BINS] {
    let mut counts = [0u64; BINS];
    for &v in data {
        counts[v as usize] += 1;
    }
    counts
}

#[cfg(feature = "rayon")]
fn count_values(data: &[u8]) -> [u64; BINS] {
    use rayon::prelude::*;

    const CHUNK: usize = 64 * 1024;

    data.par_chunks(CHUNK)
        .fold(
            || [0u64; BINS],
            |mut acc, chunk| {
                for &v in chunk {
                    acc[v as usize] += 1;
                }
                acc
            },
        )
        .reduce(
            || [0u64; BINS],
            |mut a, b| {
                for (x, y) in a.iter_mut().zip(b.iter()) {
                    *x += *y;
                }
                a
            },
        )
}

impl Serialize for Histogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.counts.as_slice().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Histogram {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let counts = Vec::<u64>::deserialize(deserializer)?;
        Histogram::try_from_slice(&counts).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::GrayImage;

    fn lcg_image(width: usize, height: usize, seed: u32) -> GrayImage {
        let mut state = seed;
        let data = (0..width * height)
            .map(|_| {
                state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                (state >> 24) as u8
            })
            .collect();
        GrayImage::new(width, height, data).expect("valid")
    }

    #[test]
    fn counts_sum_to_pixel_count() {
        for (w, h, seed) in [(1, 1, 1), (17, 9, 2), (64, 48, 3), (0, 10, 4), (300, 201, 5)] {
            let img = lcg_image(w, h, seed);
            let hist = Histogram::from_gray(&img.view());
            assert_eq!(hist.total(), (w * h) as u64, "{w}x{h}");
        }
    }

    #[test]
    fn each_bin_counts_exact_value() {
        let img = GrayImage::new(3, 2, vec![0, 5, 5, 255, 5, 0]).expect("valid");
        let hist = Histogram::from_gray(&img.view());
        assert_eq!(hist.count(0), 2);
        assert_eq!(hist.count(5), 3);
        assert_eq!(hist.count(255), 1);
        assert_eq!(hist.nonzero_bins(), 3);
        assert_eq!(hist.intensity_sum(), 5 * 3 + 255);
    }

    #[test]
    fn two_level_image_fills_two_bins() {
        let mut data = vec![50u8; 4800];
        data.extend(std::iter::repeat(200u8).take(4800));
        let img = GrayImage::new(120, 80, data).expect("valid");
        let hist = Histogram::from_gray(&img.view());

        assert_eq!(hist.count(50), 4800);
        assert_eq!(hist.count(200), 4800);
        for i in (0..=255u8).filter(|&i| i != 50 && i != 200) {
            assert_eq!(hist.count(i), 0, "bin {i}");
        }
        assert_eq!(hist.min_intensity(), Some(50));
        assert_eq!(hist.max_intensity(), Some(200));
        assert_eq!(hist.mean(), Some(125.0));
    }

    #[test]
    fn empty_histogram_has_no_range() {
        let hist = Histogram::default();
        assert_eq!(hist.total(), 0);
        assert_eq!(hist.min_intensity(), None);
        assert_eq!(hist.max_intensity(), None);
        assert_eq!(hist.mean(), None);
    }

    #[test]
    fn try_from_slice_requires_256_bins() {
        let err = Histogram::try_from_slice(&[1, 2, 3]).unwrap_err();
        assert_eq!(err, HistogramError::LengthMismatch { got: 3 });
        assert!(Histogram::try_from_slice(&[0; BINS]).is_ok());
    }

    #[test]
    fn serializes_as_flat_count_list() {
        let mut counts = [0u64; BINS];
        counts[7] = 3;
        let hist = Histogram::from_counts(counts);
        let json = serde_json::to_string(&hist).expect("serialize");
        assert!(json.starts_with("[0,0,0,0,0,0,0,3,0"));

        let back: Histogram = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, hist);
        assert!(serde_json::from_str::<Histogram>("[1,2]").is_err());
    }
}
