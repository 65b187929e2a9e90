//! Document framing module.
//!
//! Builds a Sobel edge mask, then judges the document's placement in the
//! frame from the edge bounding box: coverage, margins, and aspect ratio.
//! Two sub-detectors look for capture mistakes the bounding box alone cannot
//! see: a second page sharing the frame, and a strip of an adjacent page
//! along the right margin.

mod components;
mod edges;
mod multiple;
mod side_strip;

pub use components::{Component, ReducedGrid};
pub use edges::{EdgeBounds, EdgeMap};
pub use multiple::{detect_multiple, MultipleDetection};
pub use side_strip::detect_side_strip;

use tracing::debug;

use crate::domain::{
    DocumentMetrics, DocumentOptions, Finding, GrayRaster, Insets, Outcome, QualityCheck,
};

/// Bounding-box geometry relative to the frame.
#[derive(Debug, Clone, Copy)]
struct Geometry {
    coverage: f64,
    insets: Insets,
    aspect: f64,
}

impl Geometry {
    #[allow(clippy::cast_precision_loss)]
    fn measure(bounds: EdgeBounds, width: usize, height: usize) -> Self {
        let (w, h) = (width as f64, height as f64);
        let box_w = bounds.width() as f64;
        let box_h = bounds.height() as f64;
        Self {
            coverage: box_w * box_h / (w * h),
            insets: Insets {
                left: bounds.min_x as f64 / w,
                top: bounds.min_y as f64 / h,
                right: (width - 1 - bounds.max_x) as f64 / w,
                bottom: (height - 1 - bounds.max_y) as f64 / h,
            },
            aspect: box_w / box_h,
        }
    }
}

/// Document framing QA module.
#[derive(Debug, Clone, Default)]
pub struct FramingCheck {
    options: DocumentOptions,
}

impl FramingCheck {
    /// Creates a new framing check.
    #[must_use]
    pub const fn new(options: DocumentOptions) -> Self {
        Self { options }
    }

    /// Returns the check configuration.
    #[must_use]
    pub const fn options(&self) -> &DocumentOptions {
        &self.options
    }

    fn aspect_out_of_range(&self, aspect: f64) -> bool {
        self.options.min_aspect_ratio.is_some_and(|min| aspect < min)
            || self.options.max_aspect_ratio.is_some_and(|max| aspect > max)
    }
}

impl QualityCheck for FramingCheck {
    type Metrics = DocumentMetrics;

    fn name(&self) -> &'static str {
        "document"
    }

    fn analyze(&self, raster: &GrayRaster<'_>) -> Outcome<DocumentMetrics> {
        if !raster.is_well_formed() || raster.width() < 3 || raster.height() < 3 {
            return Outcome::unavailable(Finding::DocumentUnavailable);
        }

        let edges = EdgeMap::detect(raster, self.options.edge_threshold);
        let Some(bounds) = edges.bounds() else {
            debug!("no edge pixels found");
            return Outcome::measured(DocumentMetrics::edges_only(0.0, None))
                .with_reason(Some(Finding::DocumentEdgesNotFound));
        };
        let edge_pixel_ratio = edges.edge_pixel_ratio();

        let multiple = detect_multiple(&edges, &self.options.multiple);
        if let Some(MultipleDetection {
            signal: Some(signal),
            metrics,
        }) = multiple
        {
            debug!(%signal, "multiple documents in frame");
            return Outcome::measured(DocumentMetrics::edges_only(edge_pixel_ratio, Some(metrics)))
                .with_reason(Some(Finding::MultipleDocumentsDetected(signal)));
        }

        let geometry = Geometry::measure(bounds, edges.width(), edges.height());
        let inset_ratio = geometry.insets.min();
        let aspect_out_of_range = self.aspect_out_of_range(geometry.aspect);
        let coverage_low = geometry.coverage < self.options.min_coverage;

        let mut reason = None;
        let mut warning = None;
        if coverage_low {
            warning = Some(Finding::DocumentCoverageLow(geometry.coverage));
        } else if aspect_out_of_range {
            reason = Some(Finding::DocumentAspectRatioOutOfRange(geometry.aspect));
        }

        let side_strip = detect_side_strip(&edges, &self.options.side_strip);
        let strip_detected = side_strip.is_some_and(|s| s.detected);
        if strip_detected && reason.is_none() {
            reason = Some(Finding::DocumentSideStripDetected);
        }

        let asymmetric = inset_ratio < self.options.min_inset_ratio
            && geometry.insets.max() >= self.options.min_opposite_inset_ratio;
        let cropped = coverage_low || asymmetric || aspect_out_of_range || strip_detected;
        let tight_framing = geometry.coverage > self.options.max_coverage
            && inset_ratio < self.options.min_inset_ratio;
        if tight_framing {
            warning = Some(Finding::DocumentTightFraming);
        }

        debug!(
            coverage = geometry.coverage,
            inset_ratio,
            aspect = geometry.aspect,
            edge_pixel_ratio,
            cropped,
            tight_framing,
            "document framing measured"
        );

        Outcome::measured(DocumentMetrics {
            coverage_ratio: Some(geometry.coverage),
            insets: Some(geometry.insets),
            inset_ratio: Some(inset_ratio),
            aspect_ratio: Some(geometry.aspect),
            edge_pixel_ratio,
            cropped: Some(cropped),
            tight_framing: Some(tight_framing),
            side_strip,
            multiple: multiple.map(|m| m.metrics),
        })
        .with_reason(reason)
        .with_warning(warning)
    }
}
