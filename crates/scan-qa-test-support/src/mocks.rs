//! Mock implementations of core port traits.

use std::sync::{Arc, Mutex, PoisonError};

use scan_qa_core::domain::ImageAssessment;
use scan_qa_core::ports::{ProgressEvent, ProgressSink, RasterSource, ReportOutput, SourceRaster};

/// Mock implementation of `RasterSource` for testing.
///
/// Yields pre-built rasters (or load failures) in order and tracks iteration
/// for assertions.
pub struct MockRasterSource {
    items: Vec<Result<SourceRaster, String>>,
    iteration_count: Arc<Mutex<usize>>,
}

impl MockRasterSource {
    /// Creates a new mock source with the given rasters.
    #[must_use]
    pub fn new(rasters: Vec<SourceRaster>) -> Self {
        Self {
            items: rasters.into_iter().map(Ok).collect(),
            iteration_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Creates an empty mock source.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Appends an item that fails to load with `message`.
    #[must_use]
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.items.push(Err(message.into()));
        self
    }

    /// Appends a raster.
    #[must_use]
    pub fn with_raster(mut self, raster: SourceRaster) -> Self {
        self.items.push(Ok(raster));
        self
    }

    /// Returns the number of times the source has been iterated.
    #[must_use]
    pub fn iteration_count(&self) -> usize {
        *self
            .iteration_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl RasterSource for MockRasterSource {
    fn rasters(&self) -> Box<dyn Iterator<Item = anyhow::Result<SourceRaster>> + Send + '_> {
        if let Ok(mut c) = self.iteration_count.lock() {
            *c += 1;
        }
        Box::new(
            self.items
                .iter()
                .map(|item| item.clone().map_err(anyhow::Error::msg)),
        )
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.items.len())
    }
}

/// Mock implementation of `ReportOutput` for testing.
///
/// Captures assessments for later assertions.
pub struct MockReportOutput {
    assessments: Arc<Mutex<Vec<ImageAssessment>>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockReportOutput {
    /// Creates a new mock output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            assessments: Arc::new(Mutex::new(Vec::new())),
            flush_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns all captured assessments.
    #[must_use]
    pub fn assessments(&self) -> Vec<ImageAssessment> {
        self.assessments
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockReportOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportOutput for MockReportOutput {
    fn write(&self, assessment: &ImageAssessment) -> anyhow::Result<()> {
        self.assessments
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(assessment.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        if let Ok(mut c) = self.flush_count.lock() {
            *c += 1;
        }
        Ok(())
    }
}

/// Mock implementation of `ProgressSink` for testing.
///
/// Captures events for later assertions.
pub struct MockProgressSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressSink {
    /// Creates a new mock progress sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of `Started` events.
    #[must_use]
    pub fn started_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Started { .. }))
            .count()
    }

    /// Returns the number of `Completed` events.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Completed { .. }))
            .count()
    }

    /// Returns the number of `Skipped` events.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Skipped { .. }))
            .count()
    }

    /// Returns the `(processed, rejected, skipped)` counts from the
    /// `Finished` event, if any.
    #[must_use]
    pub fn finished_counts(&self) -> Option<(usize, usize, usize)> {
        self.events().iter().find_map(|e| match e {
            ProgressEvent::Finished {
                processed,
                rejected,
                skipped,
            } => Some((*processed, *rejected, *skipped)),
            _ => None,
        })
    }
}

impl Default for MockProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
