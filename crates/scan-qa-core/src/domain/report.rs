//! Assessment report types.

use serde::{Deserialize, Serialize};

use super::Finding;

/// The result of evaluating one raster.
///
/// `ok` is true exactly when `reasons` is empty; warnings never affect it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReport {
    /// True iff no rejection reason fired.
    pub ok: bool,
    /// Rejection reasons, in analyzer order.
    pub reasons: Vec<Finding>,
    /// Non-fatal warnings, in analyzer order.
    pub warnings: Vec<Finding>,
    /// Diagnostic metrics from every enabled analyzer.
    pub metrics: QualityMetrics,
}

impl AssessmentReport {
    /// Builds a report, deriving `ok` from `reasons`.
    #[must_use]
    pub fn new(reasons: Vec<Finding>, warnings: Vec<Finding>, metrics: QualityMetrics) -> Self {
        Self {
            ok: reasons.is_empty(),
            reasons,
            warnings,
            metrics,
        }
    }

    /// Returns true if the finding is among the reasons.
    #[must_use]
    pub fn has_reason(&self, tag: &str) -> bool {
        self.reasons.iter().any(|r| r.tag() == tag)
    }

    /// Returns true if the finding is among the warnings.
    #[must_use]
    pub fn has_warning(&self, tag: &str) -> bool {
        self.warnings.iter().any(|w| w.tag() == tag)
    }
}

/// Metrics tree. Disabled analyzers leave their entry `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityMetrics {
    pub width: u32,
    pub height: u32,
    pub short_edge: u32,
    pub size_tier: SizeTier,
    pub blur_score: Option<f64>,
    pub brightness: Option<BrightnessMetrics>,
    pub document: Option<DocumentMetrics>,
}

/// Size grade of the short edge. Ordered from worst to best.
#[non_exhaustive]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SizeTier {
    /// Dimensions missing or zero.
    #[default]
    Unknown,
    /// Too small for recognition.
    Reject,
    /// Usable but marginal.
    Warn,
    /// Adequate.
    Pass,
    /// Comfortably large.
    Excellent,
}

/// Luminance statistics of the working copy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrightnessMetrics {
    /// Mean sample value (0-255).
    pub mean: f64,
    /// Fraction of samples at or below the dark cut-off.
    pub dark_fraction: f64,
    /// Fraction of samples at or above the bright cut-off.
    pub bright_fraction: f64,
}

/// Document framing diagnostics.
///
/// Geometry fields are `None` when framing stopped before the bounding box was
/// measured (no edges, or multiple documents detected).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetrics {
    /// Edge bounding box area over frame area.
    pub coverage_ratio: Option<f64>,
    pub insets: Option<Insets>,
    /// Smallest of the four insets.
    pub inset_ratio: Option<f64>,
    /// Edge bounding box width over height.
    pub aspect_ratio: Option<f64>,
    /// Edge pixels over frame pixels.
    pub edge_pixel_ratio: f64,
    /// Diagnostic only; never gates `ok`.
    pub cropped: Option<bool>,
    pub tight_framing: Option<bool>,
    pub side_strip: Option<SideStripMetrics>,
    pub multiple: Option<MultipleMetrics>,
}

impl DocumentMetrics {
    /// Metrics for a frame whose geometry was not measured.
    #[must_use]
    pub const fn edges_only(edge_pixel_ratio: f64, multiple: Option<MultipleMetrics>) -> Self {
        Self {
            coverage_ratio: None,
            insets: None,
            inset_ratio: None,
            aspect_ratio: None,
            edge_pixel_ratio,
            cropped: None,
            tight_framing: None,
            side_strip: None,
            multiple,
        }
    }
}

/// Gap between the edge bounding box and each frame side, normalized by the
/// matching frame dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Insets {
    /// Smallest inset.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.left.min(self.top).min(self.right).min(self.bottom)
    }

    /// Largest inset.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.left.max(self.top).max(self.right).max(self.bottom)
    }
}

/// Side-strip detector diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideStripMetrics {
    pub detected: bool,
    /// First qualifying boundary column, if any.
    pub boundary_column: Option<u32>,
    pub boundary_density: f64,
    pub left_mean: f64,
    pub right_mean: f64,
    pub right_to_left_ratio: f64,
    /// Comparison band width in pixels.
    pub band_width: u32,
}

/// Multiple-document detector diagnostics. Both signals are always reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleMetrics {
    pub gutter_detected: bool,
    /// Lowest column edge density inside the center band.
    pub min_center_density: f64,
    pub left_mean: f64,
    pub right_mean: f64,
    /// Components clearing the pixel-count and box-area minimums.
    pub component_count: usize,
    pub component_detected: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> QualityMetrics {
        QualityMetrics {
            width: 10,
            height: 20,
            short_edge: 10,
            size_tier: SizeTier::Reject,
            blur_score: Some(0.0),
            brightness: None,
            document: None,
        }
    }

    #[test]
    fn test_ok_follows_reasons() {
        let report = AssessmentReport::new(vec![], vec![Finding::SizeLow(1200)], metrics());
        assert!(report.ok);
        assert!(report.has_warning("size_low"));

        let report = AssessmentReport::new(vec![Finding::SizeTooSmall(10)], vec![], metrics());
        assert!(!report.ok);
        assert!(report.has_reason("size_too_small"));
    }

    #[test]
    fn test_size_tier_ordering() {
        assert!(SizeTier::Unknown < SizeTier::Reject);
        assert!(SizeTier::Reject < SizeTier::Warn);
        assert!(SizeTier::Warn < SizeTier::Pass);
        assert!(SizeTier::Pass < SizeTier::Excellent);
    }

    #[test]
    fn test_metrics_use_camel_case_keys() {
        let report = AssessmentReport::new(vec![], vec![], metrics());
        let value = serde_json::to_value(&report).unwrap_or_default();
        assert_eq!(value["metrics"]["shortEdge"], 10);
        assert_eq!(value["metrics"]["sizeTier"], "reject");
        assert!(value["metrics"]["document"].is_null());
    }

    #[test]
    fn test_inset_extremes() {
        let insets = Insets {
            left: 0.1,
            top: 0.02,
            right: 0.3,
            bottom: 0.05,
        };
        assert!((insets.min() - 0.02).abs() < f64::EPSILON);
        assert!((insets.max() - 0.3).abs() < f64::EPSILON);
    }
}
