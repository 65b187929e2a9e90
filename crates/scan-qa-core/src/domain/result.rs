//! Per-image and batch results.

use serde::{Deserialize, Serialize};

use super::AssessmentReport;

/// Assessment of a single input image or PDF page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAssessment {
    /// Path of the analyzed image.
    pub path: String,
    /// Evaluation report.
    #[serde(flatten)]
    pub report: AssessmentReport,
}

/// An input that could not be turned into a raster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedImage {
    /// Path or position of the input.
    pub path: String,
    /// Why it was skipped.
    pub reason: String,
}

/// Outcome of a preflight batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreflightReport {
    /// True iff every image was evaluated and every report is ok.
    pub ok: bool,
    /// Paths whose report is ok, in input order.
    pub accepted_paths: Vec<String>,
    /// Every evaluated image, in input order.
    pub images: Vec<ImageAssessment>,
    /// Inputs that failed to load.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedImage>,
}

impl PreflightReport {
    /// Builds a batch report from its parts.
    #[must_use]
    pub fn new(images: Vec<ImageAssessment>, skipped: Vec<SkippedImage>) -> Self {
        let accepted_paths = images
            .iter()
            .filter(|a| a.report.ok)
            .map(|a| a.path.clone())
            .collect();
        let ok = skipped.is_empty() && images.iter().all(|a| a.report.ok);
        Self {
            ok,
            accepted_paths,
            images,
            skipped,
        }
    }

    /// Number of images with at least one rejection reason.
    #[must_use]
    pub fn rejected_count(&self) -> usize {
        self.images.iter().filter(|a| !a.report.ok).count()
    }
}
