//! JSON configuration and report types for binarization runs.

use std::{
    fs,
    path::{Path, PathBuf},
};

use otsu_threshold_core::{
    Binarization, BinarizeParams, BinaryStats, Histogram, ImageBufferError, OtsuThreshold,
};
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum IoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[cfg(feature = "image")]
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Buffer(#[from] ImageBufferError),
}

/// One binarization job, usually loaded from a JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BinarizeConfig {
    pub input_path: String,
    /// Binary image output; defaults to `<input stem>_binary.png` next to the input.
    #[serde(default)]
    pub output_path: Option<String>,
    /// Optional grayscale intermediate output.
    #[serde(default)]
    pub gray_path: Option<String>,
    #[serde(default)]
    pub report_path: Option<String>,
    #[serde(default)]
    pub params: BinarizeParams,
}

impl BinarizeConfig {
    pub fn new(input_path: impl Into<String>) -> Self {
        Self {
            input_path: input_path.into(),
            ..Self::default()
        }
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the binary image output path.
    pub fn output_path(&self) -> PathBuf {
        if let Some(p) = &self.output_path {
            return PathBuf::from(p);
        }
        let input = Path::new(&self.input_path);
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        input.with_file_name(format!("{stem}_binary.png"))
    }

    pub fn gray_path(&self) -> Option<PathBuf> {
        self.gray_path.as_ref().map(PathBuf::from)
    }

    pub fn report_path(&self) -> Option<PathBuf> {
        self.report_path.as_ref().map(PathBuf::from)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingsMs {
    pub load_image: u64,
    pub binarize: u64,
    pub save: u64,
    pub total: u64,
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinarizeReport {
    pub input_path: String,
    pub output_path: String,
    pub width: usize,
    pub height: usize,
    pub params: BinarizeParams,
    pub threshold: u8,
    #[serde(default)]
    pub otsu: Option<OtsuThreshold>,
    pub histogram: Histogram,
    pub stats: BinaryStats,
    pub timings_ms: TimingsMs,
}

impl BinarizeReport {
    pub fn new(cfg: &BinarizeConfig, res: &Binarization, timings_ms: TimingsMs) -> Self {
        Self {
            input_path: cfg.input_path.clone(),
            output_path: cfg.output_path().to_string_lossy().into_owned(),
            width: res.gray.width,
            height: res.gray.height,
            params: cfg.params,
            threshold: res.threshold,
            otsu: res.otsu,
            histogram: res.histogram.clone(),
            stats: res.stats,
            timings_ms,
        }
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
