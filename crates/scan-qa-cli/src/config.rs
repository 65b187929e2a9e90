//! Configuration file support for scan-qa.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/scan-qa/config.toml` (lowest priority)
//! - Project-local: `.scan-qa.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)
//!
//! Files are merged table by table before deserialization, so a project file
//! that sets `[quality.document] min_coverage` keeps every other document
//! option from the XDG file.

use std::path::{Path, PathBuf};

use scan_qa_core::QualityOptions;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

const CONFIG_DIR: &str = "scan-qa";
const PROJECT_FILE: &str = ".scan-qa.toml";

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Evaluation engine options.
    pub quality: QualityOptions,
    /// Output formatting settings.
    pub output: OutputConfig,
    /// PDF rendering settings.
    pub pdf: PdfConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

/// PDF rendering configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Rendering resolution passed to `pdftoppm`.
    pub dpi: Option<u32>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Missing files are silently ignored. Unreadable files and invalid
    /// values are logged as warnings.
    pub fn load() -> Self {
        let mut files = Vec::new();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                files.push(xdg_path);
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            files.push(project_path);
        }

        Self::from_files(&files)
    }

    /// Merges the given files in order (later files win) and deserializes
    /// the result.
    pub fn from_files(paths: &[PathBuf]) -> Self {
        let mut merged = toml::Table::new();
        for path in paths {
            if let Some(table) = load_table(path) {
                merge_tables(&mut merged, table);
            }
        }

        let config = match toml::Value::Table(merged).try_into::<Self>() {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring configuration files: {e}");
                Self::default()
            }
        };

        for problem in config.validate() {
            warn!("{problem}");
        }

        config
    }

    /// Lists values outside their acceptable ranges.
    fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let q = &self.quality;
        let d = &q.document;

        let fractions = [
            ("quality.blur.guard.min_edge_pixel_ratio", q.blur.guard.min_edge_pixel_ratio),
            ("quality.blur.guard.min_coverage", q.blur.guard.min_coverage),
            ("quality.brightness.max_dark_fraction", q.brightness.max_dark_fraction),
            ("quality.brightness.max_bright_fraction", q.brightness.max_bright_fraction),
            ("quality.document.min_coverage", Some(d.min_coverage)),
            ("quality.document.max_coverage", Some(d.max_coverage)),
            ("quality.document.min_inset_ratio", Some(d.min_inset_ratio)),
            ("quality.document.min_opposite_inset_ratio", Some(d.min_opposite_inset_ratio)),
            ("quality.document.side_strip.band_ratio", Some(d.side_strip.band_ratio)),
            ("quality.document.side_strip.boundary_threshold", Some(d.side_strip.boundary_threshold)),
            ("quality.document.side_strip.content_threshold", Some(d.side_strip.content_threshold)),
            (
                "quality.document.side_strip.min_boundary_offset_ratio",
                Some(d.side_strip.min_boundary_offset_ratio),
            ),
            ("quality.document.multiple.center_band_ratio", Some(d.multiple.center_band_ratio)),
            ("quality.document.multiple.gutter_max_density", Some(d.multiple.gutter_max_density)),
            ("quality.document.multiple.min_side_density", Some(d.multiple.min_side_density)),
        ];
        for (key, value) in fractions {
            if let Some(v) = value {
                if !(0.0..=1.0).contains(&v) {
                    problems.push(format!("{key} must be 0.0-1.0, got {v}"));
                }
            }
        }

        if let (Some(min), Some(max)) = (q.brightness.min_mean, q.brightness.max_mean) {
            if min > max {
                problems.push(format!(
                    "quality.brightness.min_mean ({min}) exceeds max_mean ({max})"
                ));
            }
        }

        let tiers = &q.size_tiers;
        if tiers.reject_below >= tiers.warn_below || tiers.warn_below > tiers.excellent_at {
            problems.push(format!(
                "quality.size_tiers must satisfy reject_below < warn_below <= excellent_at, got {} / {} / {}",
                tiers.reject_below, tiers.warn_below, tiers.excellent_at
            ));
        }

        if let Some(ref f) = self.output.format {
            if f != "json" && f != "jsonl" {
                problems.push(format!(
                    "output.format must be 'json' or 'jsonl', got '{f}'"
                ));
            }
        }

        if self.pdf.dpi == Some(0) {
            problems.push("pdf.dpi must be positive".to_string());
        }

        problems
    }
}

/// Deep-merges `overlay` into `base`. Nested tables merge key by key; any
/// other value in `overlay` replaces the one in `base`.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(nested)) => {
                merge_tables(existing, nested);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR).join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.scan-qa.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PROJECT_FILE))
        .find(|path| path.exists())
}

/// Read a TOML file into an untyped table.
fn load_table(path: &Path) -> Option<toml::Table> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(table) => Some(table),
        Err(e) => {
            warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn table(text: &str) -> toml::Table {
        toml::from_str(text).expect("parse table")
    }

    fn write(dir: &Path, name: &str, text: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.general.recursive.is_none());
        assert!(config.output.format.is_none());
        assert!(config.pdf.dpi.is_none());
        assert_eq!(config.quality, QualityOptions::default());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r"
[general]
recursive = true

[quality]
analysis_max_dimension = 768

[quality.blur]
threshold = 90.0

[quality.brightness]
as_warning = true

[quality.document.side_strip]
enabled = true

[output]
format = 'json'
pretty = true
progress = false

[pdf]
dpi = 200
";
        let config: AppConfig = toml::from_str(toml).expect("parse full config");

        assert_eq!(config.general.recursive, Some(true));
        assert_eq!(config.quality.analysis_max_dimension, 768);
        assert_eq!(config.quality.blur.threshold, Some(90.0));
        assert!(config.quality.blur.enabled);
        assert!(config.quality.brightness.as_warning);
        assert!(config.quality.document.side_strip.enabled);
        assert_eq!(config.output.format.as_deref(), Some("json"));
        assert_eq!(config.output.pretty, Some(true));
        assert_eq!(config.pdf.dpi, Some(200));
    }

    #[test]
    fn test_merge_tables_is_deep() {
        let mut base = table(
            r"
[quality.document]
min_coverage = 0.4
edge_threshold = 60

[output]
format = 'json'
",
        );
        merge_tables(
            &mut base,
            table(
                r"
[quality.document]
min_coverage = 0.7

[pdf]
dpi = 150
",
            ),
        );

        let config: AppConfig = toml::Value::Table(base).try_into().expect("merged config");
        assert_eq!(config.quality.document.min_coverage, 0.7);
        assert_eq!(config.quality.document.edge_threshold, 60);
        assert_eq!(config.output.format.as_deref(), Some("json"));
        assert_eq!(config.pdf.dpi, Some(150));
    }

    #[test]
    fn test_merge_scalar_replaces_table() {
        let mut base = table("[a]\nb = 1\n");
        merge_tables(&mut base, table("a = 2\n"));
        assert_eq!(base.get("a").and_then(toml::Value::as_integer), Some(2));
    }

    #[test]
    fn test_from_files_later_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let xdg = write(
            dir.path(),
            "xdg.toml",
            "[quality.blur]\nthreshold = 50.0\n\n[general]\nrecursive = true\n",
        );
        let project = write(dir.path(), "project.toml", "[quality.blur]\nthreshold = 80.0\n");

        let config = AppConfig::from_files(&[xdg, project]);
        assert_eq!(config.quality.blur.threshold, Some(80.0));
        assert_eq!(config.general.recursive, Some(true));
    }

    #[test]
    fn test_from_files_skips_unparseable_file() {
        let dir = tempfile::tempdir().unwrap();
        let good = write(dir.path(), "good.toml", "[pdf]\ndpi = 120\n");
        let broken = write(dir.path(), "broken.toml", "[pdf\ndpi = 1\n");

        let config = AppConfig::from_files(&[good, broken]);
        assert_eq!(config.pdf.dpi, Some(120));
    }

    #[test]
    fn test_from_files_type_mismatch_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "typed.toml",
            "[quality.blur]\nthreshold = \"not a number\"\n",
        );
        assert_eq!(AppConfig::from_files(&[path]), AppConfig::default());
    }

    #[test]
    fn test_missing_file_ignored() {
        let config = AppConfig::from_files(&[PathBuf::from("/definitely/not/here.toml")]);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_find_config_in_parents() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        let config = write(dir.path(), PROJECT_FILE, "");

        assert_eq!(find_config_in_parents(&nested), Some(config));
    }

    #[test]
    fn test_validate_default_config_passes() {
        assert!(AppConfig::default().validate().is_empty());
    }

    #[test]
    fn test_validate_fraction_out_of_range() {
        let mut config = AppConfig::default();
        config.quality.document.min_coverage = 1.5;
        config.quality.brightness.max_dark_fraction = Some(-0.1);

        let problems = config.validate();
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("quality.brightness.max_dark_fraction"));
        assert!(problems[1].contains("quality.document.min_coverage"));
    }

    #[test]
    fn test_validate_disabled_bound_is_not_checked() {
        let mut config = AppConfig::default();
        config.quality.blur.guard.min_coverage = None;
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_size_tier_order() {
        let mut config = AppConfig::default();
        config.quality.size_tiers.warn_below = 900;
        let problems = config.validate();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("quality.size_tiers"));
    }

    #[test]
    fn test_validate_output_format_invalid() {
        let mut config = AppConfig::default();
        config.output.format = Some("xml".to_string());

        let problems = config.validate();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("output.format"));
    }

    #[test]
    fn test_validate_zero_dpi() {
        let mut config = AppConfig::default();
        config.pdf.dpi = Some(0);
        assert_eq!(config.validate(), vec!["pdf.dpi must be positive".to_string()]);
    }
}
