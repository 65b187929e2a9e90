//! Batch preflight over a raster source.

use tracing::{debug, info, warn};

use crate::domain::{ImageAssessment, PreflightReport, SkippedImage};
use crate::evaluator::QualityEvaluator;
use crate::ports::{ProgressEvent, ProgressSink, RasterSource};

/// Evaluates every raster the source yields, in order.
///
/// Inputs that fail to load are recorded as skipped (their error message
/// carries the path via context) and make the batch not ok. The batch is ok
/// only when nothing was skipped and every evaluated image is ok.
pub fn preflight(
    source: &dyn RasterSource,
    evaluator: &QualityEvaluator,
    progress: &dyn ProgressSink,
) -> PreflightReport {
    let total = source.count_hint();
    let mut images = Vec::new();
    let mut skipped = Vec::new();

    for (index, item) in source.rasters().enumerate() {
        let input = match item {
            Ok(input) => input,
            Err(e) => {
                let reason = format!("{e:#}");
                warn!("Skipping input {index}: {reason}");
                let path = format!("image {index}");
                progress.on_event(ProgressEvent::Skipped {
                    path: path.clone(),
                    reason: reason.clone(),
                });
                skipped.push(SkippedImage { path, reason });
                continue;
            }
        };

        progress.on_event(ProgressEvent::Started {
            path: input.path.clone(),
            index,
            total,
        });

        let report = evaluator.evaluate(&input.raster);
        debug!(path = %input.path, ok = report.ok, "image evaluated");

        let assessment = ImageAssessment {
            path: input.path,
            report,
        };
        progress.on_event(ProgressEvent::Completed {
            assessment: assessment.clone(),
        });
        images.push(assessment);
    }

    let report = PreflightReport::new(images, skipped);
    let rejected = report.rejected_count();
    info!(
        "Preflight finished: {} evaluated, {} rejected, {} skipped",
        report.images.len(),
        rejected,
        report.skipped.len()
    );
    progress.on_event(ProgressEvent::Finished {
        processed: report.images.len(),
        rejected,
        skipped: report.skipped.len(),
    });

    report
}
