//! Scan QA Adapters - External adapters for scan-qa.
//!
//! This crate provides adapters for:
//! - Filesystem raster source (images and PDFs)
//! - PDF page rasterization through poppler's `pdftoppm`

pub mod fs;
pub mod pdf;

pub use fs::FsRasterSource;
pub use pdf::{PdfRasterizer, RenderedPdf, DEFAULT_DPI};
