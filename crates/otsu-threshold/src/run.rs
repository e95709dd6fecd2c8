use std::time::Instant;

use log::{info, warn};
use otsu_threshold_core::{binarize_rgb, Binarization};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::files::{load_rgb, save_binary, save_gray};
use crate::io::{BinarizeConfig, BinarizeReport, IoError, TimingsMs};

/// Output of [`run_config`]: the in-memory result plus its report.
pub struct RunOutput {
    pub result: Binarization,
    pub report: BinarizeReport,
}

/// Load, binarize and save according to `cfg`, writing the JSON report if
/// a report path is configured.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(cfg), fields(input = %cfg.input_path))
)]
pub fn run_config(cfg: &BinarizeConfig) -> Result<RunOutput, IoError> {
    let t_total = Instant::now();

    let (rgb, load_image) = timed(|| load_rgb(&cfg.input_path));
    let rgb = rgb?;
    info!("loaded {} ({}x{})", cfg.input_path, rgb.width, rgb.height);

    let (result, binarize) = timed(|| binarize_rgb(&rgb.view(), &cfg.params));

    let t_save = Instant::now();
    let output_path = cfg.output_path();
    save_binary(&output_path, &result.binary)?;
    info!("wrote binary image to {}", output_path.display());
    if let Some(gray_path) = cfg.gray_path() {
        save_gray(&gray_path, &result.gray)?;
        info!("wrote grayscale image to {}", gray_path.display());
    }
    let save = t_save.elapsed().as_millis() as u64;

    let timings = TimingsMs {
        load_image,
        binarize,
        save,
        total: t_total.elapsed().as_millis() as u64,
    };
    let report = BinarizeReport::new(cfg, &result, timings);

    if let Some(report_path) = cfg.report_path() {
        report.write_json(&report_path)?;
        info!("wrote report JSON to {}", report_path.display());
    }
    if result.stats.white == 0 || result.stats.black == 0 {
        warn!(
            "output of {} is a single level (threshold {})",
            cfg.input_path, result.threshold
        );
    }

    Ok(RunOutput { result, report })
}

fn timed<T, F: FnOnce() -> T>(f: F) -> (T, u64) {
    let start = Instant::now();
    let value = f();
    (value, start.elapsed().as_millis() as u64)
}
