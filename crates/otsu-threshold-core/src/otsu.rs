//! Otsu's global threshold selection.
//!
//! A candidate threshold `t` splits the histogram into a background class
//! (`0..=t`) and a foreground class (`t+1..=255`). The selected threshold is
//! the lowest `t` maximizing the between-class variance
//! `w_bg * w_fg * (mean_bg - mean_fg)^2`.
//!
//! Candidates are scanned in increasing order with running background
//! weight and intensity sums:
//! - candidates with an empty background are skipped,
//! - the scan stops at the first candidate with an empty foreground,
//! - only a strictly greater score replaces the current best, so ties keep
//!   the lowest threshold. The best starts at `(t = 0, score = 0.0)`, hence a
//!   histogram with a single populated bin selects `0`.

use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::histogram::Histogram;

/// Between-class variance of one valid candidate threshold.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThresholdScore {
    pub threshold: u8,
    pub score: f64,
}

/// Class statistics of the background/foreground partition at a threshold.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassSplit {
    /// Pixels with intensity `<= threshold`.
    pub background_weight: u64,
    /// Pixels with intensity `> threshold`.
    pub foreground_weight: u64,
    pub background_mean: Option<f64>,
    pub foreground_mean: Option<f64>,
}

impl ClassSplit {
    pub fn at(hist: &Histogram, threshold: u8) -> Self {
        let t = threshold as usize;
        let (mut w_bg, mut s_bg) = (0u64, 0u64);
        for (i, &c) in hist.bins()[..=t].iter().enumerate() {
            w_bg += c;
            s_bg += i as u64 * c;
        }
        let w_fg = hist.total() - w_bg;
        let s_fg = hist.intensity_sum() - s_bg;
        Self {
            background_weight: w_bg,
            foreground_weight: w_fg,
            background_mean: (w_bg > 0).then(|| s_bg as f64 / w_bg as f64),
            foreground_mean: (w_fg > 0).then(|| s_fg as f64 / w_fg as f64),
        }
    }
}

/// Selected threshold together with its score and class statistics.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OtsuThreshold {
    pub threshold: u8,
    /// Score of the selected threshold; `0.0` when no candidate separated
    /// the histogram.
    pub between_class_variance: f64,
    pub split: ClassSplit,
}

/// Select the Otsu threshold of `hist`.
pub fn otsu_threshold(hist: &Histogram) -> u8 {
    best_candidate(hist).threshold
}

/// Like [`otsu_threshold`], also reporting the score and class statistics.
#[cfg_attr(feature = "tracing", instrument(level = "debug", skip(hist)))]
pub fn otsu_threshold_detailed(hist: &Histogram) -> OtsuThreshold {
    let best = best_candidate(hist);
    log::debug!(
        "otsu: threshold={} score={:.3} over {} populated bins",
        best.threshold,
        best.score,
        hist.nonzero_bins()
    );
    OtsuThreshold {
        threshold: best.threshold,
        between_class_variance: best.score,
        split: ClassSplit::at(hist, best.threshold),
    }
}

/// Score of every candidate threshold the scan evaluates, in increasing
/// threshold order.
pub fn between_class_scores(hist: &Histogram) -> Vec<ThresholdScore> {
    let mut out = Vec::new();
    scan(hist, |s| out.push(s));
    out
}

fn best_candidate(hist: &Histogram) -> ThresholdScore {
    let mut best = ThresholdScore {
        threshold: 0,
        score: 0.0,
    };
    scan(hist, |s| {
        if s.score > best.score {
            best = s;
        }
    });
    best
}

fn scan(hist: &Histogram, mut visit: impl FnMut(ThresholdScore)) {
    let total = hist.total();
    let sum_total = hist.intensity_sum() as f64;

    let mut w_bg = 0u64;
    let mut s_bg = 0f64;

    for (t, &h) in hist.bins().iter().enumerate() {
        w_bg += h;
        if w_bg == 0 {
            continue;
        }
        let w_fg = total - w_bg;
        if w_fg == 0 {
            break;
        }

        s_bg += t as f64 * h as f64;
        let m_bg = s_bg / w_bg as f64;
        let m_fg = (sum_total - s_bg) / w_fg as f64;
        let d = m_bg - m_fg;

        visit(ThresholdScore {
            threshold: t as u8,
            score: w_bg as f64 * w_fg as f64 * d * d,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::histogram::BINS;

    fn hist_from(pairs: &[(u8, u64)]) -> Histogram {
        let mut counts = [0u64; BINS];
        for &(i, c) in pairs {
            counts[i as usize] += c;
        }
        Histogram::from_counts(counts)
    }

    #[test]
    fn single_populated_bin_selects_zero() {
        for k in [0u8, 1, 77, 128, 254, 255] {
            let hist = hist_from(&[(k, 1000)]);
            assert_eq!(otsu_threshold(&hist), 0, "bin {k}");
            assert!(between_class_scores(&hist).is_empty());
        }
    }

    #[test]
    fn empty_histogram_selects_zero() {
        let hist = Histogram::default();
        let res = otsu_threshold_detailed(&hist);
        assert_eq!(res.threshold, 0);
        assert_eq!(res.between_class_variance, 0.0);
        assert_eq!(res.split.background_weight, 0);
        assert_eq!(res.split.background_mean, None);
    }

    #[test]
    fn two_levels_select_lower_level() {
        let hist = hist_from(&[(50, 4800), (200, 4800)]);
        let scores = between_class_scores(&hist);

        // Every candidate in 50..200 scores the same.
        assert_eq!(scores.len(), 150);
        assert_eq!(scores.first().map(|s| s.threshold), Some(50));
        assert_eq!(scores.last().map(|s| s.threshold), Some(199));
        assert!(scores.iter().all(|s| s.score == scores[0].score));

        let res = otsu_threshold_detailed(&hist);
        assert_eq!(res.threshold, 50);
        assert_eq!(res.between_class_variance, 4800.0 * 4800.0 * 150.0 * 150.0);
        assert_eq!(res.split.background_weight, 4800);
        assert_eq!(res.split.foreground_weight, 4800);
        assert_eq!(res.split.background_mean, Some(50.0));
        assert_eq!(res.split.foreground_mean, Some(200.0));
    }

    #[test]
    fn equal_scores_keep_lowest_threshold() {
        // Symmetric three-level histogram: t=0 and t=15 score the same.
        let hist = hist_from(&[(0, 100), (15, 50), (30, 100)]);
        let scores = between_class_scores(&hist);
        let at = |t: u8| {
            scores
                .iter()
                .find(|s| s.threshold == t)
                .map(|s| s.score)
                .expect("candidate")
        };
        assert_eq!(at(0), at(15));
        assert_eq!(otsu_threshold(&hist), 0);
    }

    #[test]
    fn selected_score_is_maximal() {
        let hist = hist_from(&[(10, 30), (12, 50), (40, 5), (180, 70), (190, 20), (250, 3)]);
        let scores = between_class_scores(&hist);
        let res = otsu_threshold_detailed(&hist);
        let max = scores.iter().map(|s| s.score).fold(0.0, f64::max);
        assert_eq!(res.between_class_variance, max);
        let first_max = scores.iter().find(|s| s.score == max).expect("max");
        assert_eq!(res.threshold, first_max.threshold);
        assert!(res.threshold >= 12 && res.threshold < 180);
    }

    #[test]
    fn scan_stops_once_foreground_is_empty() {
        let hist = hist_from(&[(3, 1), (9, 1)]);
        let scores = between_class_scores(&hist);
        let thresholds: Vec<u8> = scores.iter().map(|s| s.threshold).collect();
        assert_eq!(thresholds, (3..9).collect::<Vec<u8>>());
    }

    #[test]
    fn class_split_partitions_all_pixels() {
        let hist = hist_from(&[(0, 4), (100, 6), (255, 10)]);
        for t in [0u8, 99, 100, 254, 255] {
            let split = ClassSplit::at(&hist, t);
            assert_eq!(split.background_weight + split.foreground_weight, 20);
        }
        let split = ClassSplit::at(&hist, 100);
        assert_eq!(split.background_weight, 10);
        assert_eq!(split.background_mean, Some(60.0));
        assert_eq!(split.foreground_mean, Some(255.0));
        assert_eq!(ClassSplit::at(&hist, 255).foreground_mean, None);
    }
}
