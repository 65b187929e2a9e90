//! Filesystem adapter for loading scans and PDF pages.

use anyhow::{Context, Result};
use scan_qa_core::{GrayRaster, RasterSource, SourceRaster};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::pdf::PdfRasterizer;

/// Supported image extensions.
const RASTER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tiff", "tif", "webp", "bmp", "gif"];
const PDF_EXTENSION: &str = "pdf";

/// Filesystem raster source adapter.
///
/// Images are decoded to 8-bit grayscale. PDFs are rendered page by page
/// through a [`PdfRasterizer`] and each page is yielded as its own raster.
pub struct FsRasterSource {
    paths: Vec<PathBuf>,
    recursive: bool,
    pdf: PdfRasterizer,
}

impl FsRasterSource {
    /// Creates a new filesystem raster source.
    ///
    /// # Arguments
    ///
    /// * `paths` - Files or directories to scan
    /// * `recursive` - Whether to recurse into subdirectories
    #[must_use]
    pub fn new(paths: Vec<PathBuf>, recursive: bool) -> Self {
        Self {
            paths,
            recursive,
            pdf: PdfRasterizer::default(),
        }
    }

    /// Replaces the PDF rasterizer.
    #[must_use]
    pub fn with_pdf_rasterizer(mut self, pdf: PdfRasterizer) -> Self {
        self.pdf = pdf;
        self
    }

    /// Collects all supported files from the configured paths, in order.
    /// Directory listings are sorted by name.
    fn collect_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for path in &self.paths {
            if path.is_file() {
                if is_supported(path) {
                    files.push(path.clone());
                } else {
                    warn!("Unsupported file type: {}", path.display());
                }
            } else if path.is_dir() {
                self.collect_from_dir(path, &mut files);
            } else {
                warn!("Path does not exist: {}", path.display());
            }
        }

        files
    }

    fn collect_from_dir(&self, dir: &Path, files: &mut Vec<PathBuf>) {
        let entries = match std::fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) => {
                warn!("Failed to read directory {}: {e}", dir.display());
                return;
            }
        };

        let mut paths: Vec<PathBuf> = entries.flatten().map(|entry| entry.path()).collect();
        paths.sort();

        for path in paths {
            if path.is_file() && is_supported(&path) {
                files.push(path);
            } else if path.is_dir() && self.recursive {
                self.collect_from_dir(&path, files);
            }
        }
    }

    /// Yields the page rasters of one PDF, or a single error if it cannot
    /// be rendered.
    fn pdf_pages(&self, pdf: PathBuf) -> Box<dyn Iterator<Item = Result<SourceRaster>> + Send> {
        match self.pdf.rasterize(&pdf) {
            Ok(rendered) => {
                let pages = rendered.pages().to_vec();
                // `rendered` moves into the closure so its directory outlives
                // the last page.
                Box::new(pages.into_iter().enumerate().map(move |(index, page)| {
                    let label = format!("{}#page={}", rendered.source().display(), index + 1);
                    let raster = load_raster(&page, label);
                    if let Err(e) = std::fs::remove_file(&page) {
                        debug!("Failed to remove page image {}: {e}", page.display());
                    }
                    raster
                }))
            }
            Err(e) => Box::new(std::iter::once(Err(
                e.context(format!("Failed to rasterize PDF: {}", pdf.display()))
            ))),
        }
    }
}

impl RasterSource for FsRasterSource {
    fn rasters(&self) -> Box<dyn Iterator<Item = Result<SourceRaster>> + Send + '_> {
        let files = self.collect_files();
        debug!("Found {} input files", files.len());

        Box::new(files.into_iter().flat_map(
            move |path| -> Box<dyn Iterator<Item = Result<SourceRaster>> + Send> {
                if is_pdf(&path) {
                    self.pdf_pages(path)
                } else {
                    let label = path.to_string_lossy().into_owned();
                    Box::new(std::iter::once(load_raster(&path, label)))
                }
            },
        ))
    }

    /// Unknown when any input is a PDF, since its page count is only known
    /// after rendering.
    fn count_hint(&self) -> Option<usize> {
        let files = self.collect_files();
        if files.iter().any(|f| is_pdf(f)) {
            None
        } else {
            Some(files.len())
        }
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
}

fn is_pdf(path: &Path) -> bool {
    extension(path).is_some_and(|e| e == PDF_EXTENSION)
}

/// Checks if a path has a supported image or PDF extension.
fn is_supported(path: &Path) -> bool {
    extension(path).is_some_and(|e| RASTER_EXTENSIONS.contains(&e.as_str()) || e == PDF_EXTENSION)
}

/// Decodes an image file to a grayscale raster.
fn load_raster(path: &Path, label: String) -> Result<SourceRaster> {
    let image =
        image::open(path).with_context(|| format!("Failed to open image: {}", path.display()))?;
    Ok(SourceRaster::new(label, GrayRaster::from(image.to_luma8())))
}
