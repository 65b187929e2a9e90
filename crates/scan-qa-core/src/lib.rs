//! Scan QA Core - Image quality evaluation engine for scanned documents.
//!
//! This crate contains the domain types, the `QualityCheck` trait and the
//! pixel-level analyzers (size tier, Laplacian blur, brightness, document
//! framing) that decide whether a capture is fit for OCR. Evaluation is a pure
//! function from a grayscale raster plus [`QualityOptions`] to an
//! [`AssessmentReport`].

pub mod domain;
pub mod evaluator;
pub mod modules;
pub mod ports;
pub mod preflight;

pub use domain::{
    AssessmentReport, BlurGuardOptions, BlurOptions, BrightnessMetrics, BrightnessOptions,
    DocumentMetrics, DocumentOptions, Finding, GrayRaster, ImageAssessment, Insets,
    MultipleDocumentOptions, MultipleMetrics, Outcome, ParseFindingError, PreflightReport,
    QualityCheck, QualityMetrics, QualityOptions, SideStripMetrics, SideStripOptions,
    SizeTier, SizeTierOptions, SkippedImage, SplitSignal,
};
pub use evaluator::{evaluate_quality, QualityEvaluator};
pub use ports::{
    NoProgress, ProgressEvent, ProgressSink, RasterSource, ReportOutput, SourceRaster,
};
pub use preflight::preflight;
