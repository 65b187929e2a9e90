//! PDF page rasterization via poppler's `pdftoppm`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use tempfile::TempDir;
use tracing::debug;

/// Default rendering resolution in dots per inch.
pub const DEFAULT_DPI: u32 = 300;

/// File name prefix handed to `pdftoppm` inside each render directory.
const PAGE_PREFIX: &str = "page";

/// Renders PDF pages to PNG files with an external `pdftoppm` binary.
#[derive(Debug, Clone)]
pub struct PdfRasterizer {
    program: PathBuf,
    dpi: u32,
    output_dir: Option<PathBuf>,
}

impl Default for PdfRasterizer {
    fn default() -> Self {
        Self {
            program: PathBuf::from("pdftoppm"),
            dpi: DEFAULT_DPI,
            output_dir: None,
        }
    }
}

/// Page images of one rendered PDF.
///
/// The pages live in a private temporary directory that is removed when
/// this value is dropped.
#[derive(Debug)]
pub struct RenderedPdf {
    source: PathBuf,
    pages: Vec<PathBuf>,
    _dir: TempDir,
}

impl RenderedPdf {
    /// The PDF these pages were rendered from.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Page images ordered by page number.
    #[must_use]
    pub fn pages(&self) -> &[PathBuf] {
        &self.pages
    }
}

impl PdfRasterizer {
    /// Creates a rasterizer with default program and resolution, rendering
    /// under the system temporary directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rendering resolution.
    #[must_use]
    pub const fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Sets the parent directory for per-document render directories.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Uses a different `pdftoppm`-compatible executable.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Returns the rendering resolution.
    #[must_use]
    pub const fn dpi(&self) -> u32 {
        self.dpi
    }

    fn render_dir(&self) -> Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("scan-qa-pdf-");
        match &self.output_dir {
            Some(parent) => {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create page directory: {}", parent.display())
                })?;
                builder.tempdir_in(parent).with_context(|| {
                    format!("Failed to create page directory in {}", parent.display())
                })
            }
            None => builder
                .tempdir()
                .context("Failed to create temporary page directory"),
        }
    }

    /// Renders every page of `pdf` into a fresh temporary directory.
    ///
    /// Nothing is left on disk when rendering fails, and the pages are
    /// removed once the returned [`RenderedPdf`] is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the PDF is missing, the render directory cannot be
    /// created, `pdftoppm` is not installed, or it exits unsuccessfully.
    pub fn rasterize(&self, pdf: &Path) -> Result<RenderedPdf> {
        std::fs::metadata(pdf).with_context(|| format!("PDF not found: {}", pdf.display()))?;
        let dir = self.render_dir()?;
        debug!(
            "Rasterizing {} at {} dpi into {}",
            pdf.display(),
            self.dpi,
            dir.path().display()
        );

        let output = match Command::new(&self.program)
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg("-png")
            .arg(pdf)
            .arg(dir.path().join(PAGE_PREFIX))
            .output()
        {
            Ok(output) => output,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                bail!("pdftoppm not found; install poppler-utils (or poppler) to enable PDF conversion")
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to run {}", self.program.display()))
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            if stderr.is_empty() {
                match output.status.code() {
                    Some(code) => bail!("pdftoppm failed with exit code {code}"),
                    None => bail!("pdftoppm was terminated by a signal"),
                }
            }
            bail!("{stderr}");
        }

        let mut pages: Vec<(u32, PathBuf)> = std::fs::read_dir(dir.path())
            .with_context(|| format!("Failed to list {}", dir.path().display()))?
            .flatten()
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                let page = page_number(&name, PAGE_PREFIX)?;
                Some((page, entry.path()))
            })
            .collect();
        pages.sort_by_key(|(page, _)| *page);

        debug!("Rendered {} pages from {}", pages.len(), pdf.display());
        Ok(RenderedPdf {
            source: pdf.to_path_buf(),
            pages: pages.into_iter().map(|(_, path)| path).collect(),
            _dir: dir,
        })
    }
}

/// Page number of a `pdftoppm` output name `<prefix>-<digits>.png`.
fn page_number(file_name: &str, prefix: &str) -> Option<u32> {
    let digits = file_name
        .strip_prefix(prefix)?
        .strip_prefix('-')?
        .strip_suffix(".png")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
