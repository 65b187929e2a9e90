//! Quality check trait shared by all analyzers.

use super::{Finding, GrayRaster};

/// What one analyzer contributes to a report.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<M> {
    /// Rejection reason, if any.
    pub reason: Option<Finding>,
    /// Non-fatal warning, if any.
    pub warning: Option<Finding>,
    /// Analyzer metrics; `None` when the input could not be measured.
    pub metrics: Option<M>,
}

impl<M> Outcome<M> {
    /// An outcome carrying only metrics.
    #[must_use]
    pub const fn measured(metrics: M) -> Self {
        Self {
            reason: None,
            warning: None,
            metrics: Some(metrics),
        }
    }

    /// An outcome for input the analyzer could not measure.
    #[must_use]
    pub const fn unavailable(reason: Finding) -> Self {
        Self {
            reason: Some(reason),
            warning: None,
            metrics: None,
        }
    }

    /// Sets the rejection reason.
    #[must_use]
    pub fn with_reason(mut self, reason: Option<Finding>) -> Self {
        self.reason = reason;
        self
    }

    /// Sets the warning.
    #[must_use]
    pub fn with_warning(mut self, warning: Option<Finding>) -> Self {
        self.warning = warning;
        self
    }
}

/// Trait for implementing pixel-level quality checks.
///
/// Each check is a pure function of its configuration and the raster it is
/// given, so checks can be run and tested in isolation. Cross-check policy
/// (such as the blur guard) lives in the evaluator.
pub trait QualityCheck: Send + Sync {
    /// Metrics produced by this check.
    type Metrics;

    /// Returns the name of this check.
    fn name(&self) -> &'static str;

    /// Analyzes a raster.
    fn analyze(&self, raster: &GrayRaster<'_>) -> Outcome<Self::Metrics>;
}
