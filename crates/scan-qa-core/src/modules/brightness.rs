//! Brightness analysis module.
//!
//! Measures mean luminance and the fractions of near-black and near-white
//! samples on the bounded working copy, then applies the configured bounds in
//! a fixed priority order so that at most one brightness finding fires.

use tracing::debug;

use crate::domain::{
    BrightnessMetrics, BrightnessOptions, Finding, GrayRaster, Outcome, QualityCheck,
};

/// 256-bin histogram of luminance values.
#[derive(Debug, Clone)]
pub struct Histogram {
    bins: [u64; 256],
    total: u64,
}

impl Histogram {
    /// Compute histogram from raw luminance samples.
    #[must_use]
    pub fn from_samples(samples: &[u8]) -> Self {
        let mut bins = [0u64; 256];
        for &value in samples {
            bins[usize::from(value)] += 1;
        }
        let total = bins.iter().sum();
        Self { bins, total }
    }

    /// Returns the total sample count.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Calculate mean luminance.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let sum: u64 = self
            .bins
            .iter()
            .enumerate()
            .map(|(i, &count)| (i as u64) * count)
            .sum();
        sum as f64 / self.total as f64
    }

    /// Fraction of samples at or below a cut-off.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn fraction_at_or_below(&self, threshold: u8) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let count: u64 = self.bins[..=usize::from(threshold)].iter().sum();
        count as f64 / self.total as f64
    }

    /// Fraction of samples at or above a cut-off.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn fraction_at_or_above(&self, threshold: u8) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let count: u64 = self.bins[usize::from(threshold)..].iter().sum();
        count as f64 / self.total as f64
    }
}

/// Picks the first violated bound: low mean, high mean, dark pixels, bright pixels.
fn first_violation(metrics: &BrightnessMetrics, options: &BrightnessOptions) -> Option<Finding> {
    let below = |bound: Option<f64>, value: f64| bound.is_some_and(|b| value < b);
    let above = |bound: Option<f64>, value: f64| bound.is_some_and(|b| value > b);

    if below(options.min_mean, metrics.mean) {
        Some(Finding::BrightnessMeanLow(metrics.mean))
    } else if above(options.max_mean, metrics.mean) {
        Some(Finding::BrightnessMeanHigh(metrics.mean))
    } else if above(options.max_dark_fraction, metrics.dark_fraction) {
        Some(Finding::BrightnessTooDarkPixels(metrics.dark_fraction))
    } else if above(options.max_bright_fraction, metrics.bright_fraction) {
        Some(Finding::BrightnessTooBrightPixels(metrics.bright_fraction))
    } else {
        None
    }
}

/// Brightness QA module.
#[derive(Debug, Clone, Default)]
pub struct BrightnessCheck {
    options: BrightnessOptions,
}

impl BrightnessCheck {
    /// Creates a new brightness check with the given bounds.
    #[must_use]
    pub const fn new(options: BrightnessOptions) -> Self {
        Self { options }
    }

    /// Returns the check configuration.
    #[must_use]
    pub const fn options(&self) -> &BrightnessOptions {
        &self.options
    }
}

impl QualityCheck for BrightnessCheck {
    type Metrics = BrightnessMetrics;

    fn name(&self) -> &'static str {
        "brightness"
    }

    fn analyze(&self, raster: &GrayRaster<'_>) -> Outcome<BrightnessMetrics> {
        if !raster.is_well_formed() {
            return Outcome::unavailable(Finding::BrightnessUnavailable);
        }

        let histogram = Histogram::from_samples(raster.samples());
        let metrics = BrightnessMetrics {
            mean: histogram.mean(),
            dark_fraction: histogram.fraction_at_or_below(self.options.dark_threshold),
            bright_fraction: histogram.fraction_at_or_above(self.options.bright_threshold),
        };
        debug!(
            mean = metrics.mean,
            dark = metrics.dark_fraction,
            bright = metrics.bright_fraction,
            "brightness measured"
        );

        let finding = first_violation(&metrics, &self.options);
        let outcome = Outcome::measured(metrics);
        if self.options.as_warning {
            outcome.with_warning(finding)
        } else {
            outcome.with_reason(finding)
        }
    }
}
