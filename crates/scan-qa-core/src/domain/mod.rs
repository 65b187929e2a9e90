//! Core domain types for scan quality assessment.

mod check;
mod finding;
mod options;
mod raster;
mod report;
mod result;

pub use check::{Outcome, QualityCheck};
pub use finding::{Finding, ParseFindingError, SplitSignal};
pub use options::{
    BlurGuardOptions, BlurOptions, BrightnessOptions, DocumentOptions, MultipleDocumentOptions,
    QualityOptions, SideStripOptions, SizeTierOptions,
};
pub use raster::GrayRaster;
pub use report::{
    AssessmentReport, BrightnessMetrics, DocumentMetrics, Insets, MultipleMetrics,
    QualityMetrics, SideStripMetrics, SizeTier,
};
pub use result::{ImageAssessment, PreflightReport, SkippedImage};
