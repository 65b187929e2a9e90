//! Progress reporting port for UI integration.

use crate::domain::ImageAssessment;

/// Events emitted during a preflight batch.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Evaluation started for an image.
    Started {
        /// Path to the image.
        path: String,
        /// Index in the batch (0-based).
        index: usize,
        /// Total images in batch, if known.
        total: Option<usize>,
    },
    /// Evaluation completed for an image.
    Completed {
        /// The assessment.
        assessment: ImageAssessment,
    },
    /// An input was skipped because it could not be loaded.
    Skipped {
        /// Path or position of the input.
        path: String,
        /// Reason for skipping.
        reason: String,
    },
    /// All inputs have been processed.
    Finished {
        /// Images evaluated.
        processed: usize,
        /// Images evaluated with `ok == false`.
        rejected: usize,
        /// Inputs skipped.
        skipped: usize,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}

/// A sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_event(&self, _event: ProgressEvent) {}
}
