//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the evaluation engine and
//! external adapters (decoders, rasterizers, output sinks).

mod progress;
mod raster_source;
mod report_output;

pub use progress::{NoProgress, ProgressEvent, ProgressSink};
pub use raster_source::{RasterSource, SourceRaster};
pub use report_output::ReportOutput;
