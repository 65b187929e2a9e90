//! Test support utilities for scan-qa.
//!
//! Provides mocks and synthetic capture builders for testing the evaluation
//! engine and the preflight pipeline.
//!
//! # Example
//!
//! ```
//! use scan_qa_test_support::{MockRasterSource, SyntheticRasterBuilder};
//!
//! let page = SyntheticRasterBuilder::framed_document(300, 400);
//! let blank = SyntheticRasterBuilder::uniform(300, 400, 128);
//!
//! let source = MockRasterSource::new(vec![
//!     SyntheticRasterBuilder::source("page.png", page),
//!     SyntheticRasterBuilder::source("blank.png", blank),
//! ]);
//! ```

mod builders;
mod mocks;

pub use builders::{SyntheticRasterBuilder, BACKGROUND};
pub use mocks::{MockProgressSink, MockRasterSource, MockReportOutput};
