//! Report output port for writing assessments.

use crate::domain::ImageAssessment;

/// Port for outputting assessment results.
pub trait ReportOutput: Send + Sync {
    /// Writes a single assessment.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write(&self, assessment: &ImageAssessment) -> anyhow::Result<()>;

    /// Flushes any buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    fn flush(&self) -> anyhow::Result<()>;
}
