//! Check command - evaluate scans for OCR readiness.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use scan_qa_adapters::{FsRasterSource, PdfRasterizer, DEFAULT_DPI};
use scan_qa_core::{preflight, QualityEvaluator, QualityOptions, RasterSource, ReportOutput};
use tracing::{debug, info};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonOutput, ProgressBar};

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one assessment per line)
    #[default]
    Jsonl,
    /// Single batch report object
    Json,
}

/// Parse and validate a fraction (0.0-1.0).
fn parse_fraction(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0.0..=1.0"))
    }
}

/// Parse a non-negative Laplacian variance threshold.
fn parse_variance(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("{value} must be a non-negative number"))
    }
}

/// Shared arguments for scan evaluation.
#[derive(Args, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct CheckArgs {
    /// Image files, PDFs or directories to check
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Disable brightness analysis
    #[arg(long)]
    pub no_brightness: bool,

    /// Disable document framing analysis
    #[arg(long)]
    pub no_document: bool,

    /// Disable blur detection
    #[arg(long)]
    pub no_blur: bool,

    /// Enable adjacent-page strip detection
    #[arg(long)]
    pub side_strip: bool,

    /// Laplacian variance below which a scan is rejected as blurry
    #[arg(long, value_parser = parse_variance)]
    pub blur_threshold: Option<f64>,

    /// Minimum document coverage of the frame (0.0-1.0)
    #[arg(long, value_parser = parse_fraction)]
    pub min_coverage: Option<f64>,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,

    /// Resolution for rendering PDF pages
    #[arg(long, value_name = "DPI", value_parser = clap::value_parser!(u32).range(1..))]
    pub pdf_dpi: Option<u32>,

    /// Merged config (populated by `with_config`, not from CLI).
    #[arg(skip)]
    config: Option<AppConfig>,
}

impl CheckArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Built-in defaults
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    ///
    /// CLI `--no-*` flags always disable; config can only decide analyzers
    /// the command line left alone.
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        if !args.recursive {
            args.recursive = config.general.recursive.unwrap_or(false);
        }

        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_ref()
                .and_then(|s| match s.as_str() {
                    "json" => Some(OutputFormat::Json),
                    "jsonl" => Some(OutputFormat::Jsonl),
                    _ => None,
                });
        }

        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        args.pdf_dpi = args.pdf_dpi.or(config.pdf.dpi.filter(|&dpi| dpi > 0));

        args.config = Some(config.clone());

        args
    }

    /// Effective engine options: config values with CLI overrides applied.
    #[must_use]
    pub fn quality_options(&self) -> QualityOptions {
        let mut options = self
            .config
            .as_ref()
            .map(|c| c.quality.clone())
            .unwrap_or_default();

        if self.no_brightness {
            options.brightness.enabled = false;
        }
        if self.no_document {
            options.document.enabled = false;
        }
        if self.no_blur {
            options.blur.enabled = false;
        }
        if self.side_strip {
            options.document.side_strip.enabled = true;
        }
        if let Some(threshold) = self.blur_threshold {
            options.blur.threshold = Some(threshold);
        }
        if let Some(coverage) = self.min_coverage {
            options.document.min_coverage = coverage;
        }

        options
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    /// Get PDF resolution with fallback to the rasterizer default.
    fn pdf_dpi(&self) -> u32 {
        self.pdf_dpi.unwrap_or(DEFAULT_DPI)
    }
}

/// Result of running the check command.
#[allow(dead_code)] // Counts exposed for programmatic use
pub struct CheckResult {
    /// Number of images evaluated.
    pub processed: usize,
    /// Number of evaluated images that were rejected.
    pub rejected: usize,
    /// Number of inputs skipped.
    pub skipped: usize,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the check command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &CheckArgs) -> Result<CheckResult> {
    info!("Running check command on {} paths", args.paths.len());

    if args.paths.is_empty() {
        anyhow::bail!("No paths specified");
    }

    let evaluator = QualityEvaluator::new(args.quality_options());
    debug!("Enabled checks: {:?}", evaluator.enabled_checks());

    let rasterizer = PdfRasterizer::new().with_dpi(args.pdf_dpi());
    let source = FsRasterSource::new(args.paths.clone(), args.recursive)
        .with_pdf_rasterizer(rasterizer);
    let total = source.count_hint();

    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress_bar = ProgressBar::new(total.map(|t| t as u64), args.quiet, show_progress);

    let report = preflight(&source, &evaluator, &progress_bar);

    let output = JsonOutput::stdout();
    match args.format() {
        OutputFormat::Jsonl => {
            for assessment in &report.images {
                output.write(assessment)?;
            }
        }
        OutputFormat::Json => output.write_report(&report, args.pretty)?,
    }
    output.flush()?;

    let exit_code = if report.ok {
        ExitCode::Success
    } else {
        ExitCode::IssuesFound
    };

    Ok(CheckResult {
        processed: report.images.len(),
        rejected: report.rejected_count(),
        skipped: report.skipped.len(),
        exit_code,
    })
}
