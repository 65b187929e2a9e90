//! Quality evaluation: runs every enabled check over one raster and folds
//! their outcomes into a single [`AssessmentReport`].
//!
//! Analyzers never consult each other. The one cross-check policy, the blur
//! guard, is applied here after framing has produced its metrics: blank or
//! nearly empty frames score near zero on the Laplacian regardless of focus,
//! so their blur score is reported but not thresholded.

use tracing::{debug, trace};

use crate::domain::{
    AssessmentReport, BlurGuardOptions, DocumentMetrics, Finding, GrayRaster, Outcome,
    QualityCheck, QualityMetrics, QualityOptions,
};
use crate::modules::{bounded_copy, BlurCheck, BrightnessCheck, FramingCheck, SizeTierCheck};

/// Collects findings in evaluation order.
#[derive(Debug, Default)]
struct Findings {
    reasons: Vec<Finding>,
    warnings: Vec<Finding>,
}

impl Findings {
    fn absorb<M>(&mut self, check: &str, outcome: Outcome<M>) -> Option<M> {
        if let Some(reason) = outcome.reason {
            trace!(check, %reason, "reason");
            self.reasons.push(reason);
        }
        if let Some(warning) = outcome.warning {
            trace!(check, %warning, "warning");
            self.warnings.push(warning);
        }
        outcome.metrics
    }
}

/// Whether the blur threshold applies given the framing result. Missing
/// framing metrics never suppress the check.
fn blur_check_allowed(guard: &BlurGuardOptions, document: Option<&DocumentMetrics>) -> bool {
    let Some(document) = document else {
        return true;
    };
    let too_few_edges = guard
        .min_edge_pixel_ratio
        .is_some_and(|min| document.edge_pixel_ratio < min);
    let too_little_coverage = guard
        .min_coverage
        .zip(document.coverage_ratio)
        .is_some_and(|(min, coverage)| coverage < min);
    !(too_few_edges || too_little_coverage)
}

/// Evaluates rasters against a fixed option set.
///
/// Holds no mutable state, so one evaluator can be shared across threads.
#[derive(Debug, Clone)]
pub struct QualityEvaluator {
    options: QualityOptions,
    size: SizeTierCheck,
    blur: Option<BlurCheck>,
    brightness: Option<BrightnessCheck>,
    framing: Option<FramingCheck>,
}

impl Default for QualityEvaluator {
    fn default() -> Self {
        Self::new(QualityOptions::default())
    }
}

impl QualityEvaluator {
    /// Builds the enabled checks from `options`.
    #[must_use]
    pub fn new(options: QualityOptions) -> Self {
        Self {
            size: SizeTierCheck::new(options.size_tiers),
            blur: options.blur.enabled.then(BlurCheck::new),
            brightness: options
                .brightness
                .enabled
                .then(|| BrightnessCheck::new(options.brightness)),
            framing: options
                .document
                .enabled
                .then(|| FramingCheck::new(options.document)),
            options,
        }
    }

    /// Returns the options this evaluator was built from.
    #[must_use]
    pub const fn options(&self) -> &QualityOptions {
        &self.options
    }

    /// Names of the checks that will run, in evaluation order.
    #[must_use]
    pub fn enabled_checks(&self) -> Vec<&'static str> {
        let mut names = vec![self.size.name()];
        names.extend(self.blur.as_ref().map(QualityCheck::name));
        names.extend(self.brightness.as_ref().map(QualityCheck::name));
        names.extend(self.framing.as_ref().map(QualityCheck::name));
        names
    }

    /// Evaluates one raster.
    ///
    /// Size is graded from the declared dimensions and blur is scored on the
    /// full raster. Brightness and framing run on a working copy bounded by
    /// `analysis_max_dimension`.
    #[must_use]
    pub fn evaluate(&self, raster: &GrayRaster<'_>) -> AssessmentReport {
        let mut findings = Findings::default();

        let size_tier = findings
            .absorb(self.size.name(), self.size.analyze(raster))
            .unwrap_or_default();

        let blur_score = self
            .blur
            .as_ref()
            .and_then(|check| check.analyze(raster).metrics);

        let working = bounded_copy(raster, self.options.analysis_max_dimension);

        let brightness = self
            .brightness
            .as_ref()
            .and_then(|check| findings.absorb(check.name(), check.analyze(&working)));

        let document = self
            .framing
            .as_ref()
            .and_then(|check| findings.absorb(check.name(), check.analyze(&working)));

        if let (Some(score), Some(threshold)) = (blur_score, self.options.blur.threshold) {
            if !blur_check_allowed(&self.options.blur.guard, document.as_ref()) {
                debug!(score, "blur check suppressed by guard");
            } else if score < threshold {
                findings.reasons.push(Finding::BlurScoreBelowThreshold(score));
            }
        }

        let metrics = QualityMetrics {
            width: raster.width(),
            height: raster.height(),
            short_edge: raster.short_edge(),
            size_tier,
            blur_score,
            brightness,
            document,
        };

        debug!(
            width = metrics.width,
            height = metrics.height,
            reasons = findings.reasons.len(),
            warnings = findings.warnings.len(),
            "evaluation complete"
        );

        AssessmentReport::new(findings.reasons, findings.warnings, metrics)
    }
}

/// Evaluates `raster` with a one-off evaluator built from `options`.
#[must_use]
pub fn evaluate_quality(raster: &GrayRaster<'_>, options: &QualityOptions) -> AssessmentReport {
    QualityEvaluator::new(options.clone()).evaluate(raster)
}
