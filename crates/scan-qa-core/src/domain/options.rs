//! Configuration values consumed by one evaluation.
//!
//! Every struct fills omitted fields from its `Default`, so a partial TOML or
//! JSON document overrides only what it names. Bounds typed `Option` can be
//! switched off individually by setting them to `false`; analyzers with an
//! `enabled` flag contribute neither findings nor metrics when it is false.

use serde::{Deserialize, Serialize};

/// Complete option set for the evaluation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityOptions {
    /// Long-edge bound of the working copy used for brightness and framing.
    /// Rasters already inside this square are analyzed as-is; `0` disables
    /// downsampling. Blur always runs on the full raster.
    pub analysis_max_dimension: u32,
    /// Short-edge size tiers.
    pub size_tiers: SizeTierOptions,
    /// Laplacian blur check.
    pub blur: BlurOptions,
    /// Brightness analysis.
    pub brightness: BrightnessOptions,
    /// Document framing analysis.
    pub document: DocumentOptions,
}

impl Default for QualityOptions {
    fn default() -> Self {
        Self {
            analysis_max_dimension: 512,
            size_tiers: SizeTierOptions::default(),
            blur: BlurOptions::default(),
            brightness: BrightnessOptions::default(),
            document: DocumentOptions::default(),
        }
    }
}

/// Short-edge cut-offs in pixels. Expected `reject_below < warn_below <= excellent_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeTierOptions {
    pub reject_below: u32,
    pub warn_below: u32,
    pub excellent_at: u32,
}

impl Default for SizeTierOptions {
    fn default() -> Self {
        Self {
            reject_below: 1000,
            warn_below: 1500,
            excellent_at: 2500,
        }
    }
}

/// Blur thresholding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlurOptions {
    /// Compute the blur score at all.
    pub enabled: bool,
    /// Laplacian variance below which the image is rejected. `None` reports
    /// the score without thresholding.
    #[serde(with = "bound")]
    pub threshold: Option<f64>,
    /// Conditions under which the threshold is not applied.
    pub guard: BlurGuardOptions,
}

impl Default for BlurOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: Some(120.0),
            guard: BlurGuardOptions::default(),
        }
    }
}

/// Framing signals too weak for the blur score to be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlurGuardOptions {
    /// Skip the blur check when the framing edge-pixel ratio is below this.
    #[serde(with = "bound")]
    pub min_edge_pixel_ratio: Option<f64>,
    /// Skip the blur check when the framing coverage ratio is below this.
    #[serde(with = "bound")]
    pub min_coverage: Option<f64>,
}

impl Default for BlurGuardOptions {
    fn default() -> Self {
        Self {
            min_edge_pixel_ratio: Some(0.01),
            min_coverage: Some(0.1),
        }
    }
}

/// Brightness bounds on the working copy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrightnessOptions {
    pub enabled: bool,
    /// Report the brightness finding as a warning instead of a rejection.
    pub as_warning: bool,
    #[serde(with = "bound")]
    pub min_mean: Option<f64>,
    #[serde(with = "bound")]
    pub max_mean: Option<f64>,
    /// Maximum fraction of samples at or below `dark_threshold`.
    #[serde(with = "bound")]
    pub max_dark_fraction: Option<f64>,
    /// Maximum fraction of samples at or above `bright_threshold`.
    #[serde(with = "bound")]
    pub max_bright_fraction: Option<f64>,
    pub dark_threshold: u8,
    pub bright_threshold: u8,
}

impl Default for BrightnessOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            as_warning: false,
            min_mean: Some(60.0),
            max_mean: Some(200.0),
            max_dark_fraction: Some(0.25),
            max_bright_fraction: Some(0.2),
            dark_threshold: 30,
            bright_threshold: 225,
        }
    }
}

/// Document framing bounds. All ratios are relative to the working copy, so
/// they hold regardless of input resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentOptions {
    pub enabled: bool,
    /// Minimum `|gx| + |gy|` Sobel magnitude for an edge pixel.
    pub edge_threshold: u32,
    pub min_coverage: f64,
    pub max_coverage: f64,
    pub min_inset_ratio: f64,
    pub min_opposite_inset_ratio: f64,
    #[serde(with = "bound")]
    pub min_aspect_ratio: Option<f64>,
    #[serde(with = "bound")]
    pub max_aspect_ratio: Option<f64>,
    pub side_strip: SideStripOptions,
    pub multiple: MultipleDocumentOptions,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            edge_threshold: 80,
            min_coverage: 0.55,
            max_coverage: 0.995,
            min_inset_ratio: 0.001,
            min_opposite_inset_ratio: 0.08,
            min_aspect_ratio: Some(0.6),
            max_aspect_ratio: Some(0.9),
            side_strip: SideStripOptions::default(),
            multiple: MultipleDocumentOptions::default(),
        }
    }
}

/// Adjacent-page strip along the right edge. Off unless enabled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SideStripOptions {
    pub enabled: bool,
    /// Comparison band width as a fraction of frame width.
    pub band_ratio: f64,
    /// Minimum column density for a boundary candidate.
    pub boundary_threshold: f64,
    /// Minimum mean density on both sides of the boundary.
    pub content_threshold: f64,
    /// Inward offset of the scanned range from the right edge.
    pub min_boundary_offset_ratio: f64,
    pub min_right_to_left_ratio: f64,
}

impl Default for SideStripOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            band_ratio: 0.06,
            boundary_threshold: 0.22,
            content_threshold: 0.12,
            min_boundary_offset_ratio: 0.12,
            min_right_to_left_ratio: 0.9,
        }
    }
}

/// Gutter and connected-component split detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultipleDocumentOptions {
    pub enabled: bool,
    /// Width of the centered gutter search band as a fraction of frame width.
    pub center_band_ratio: f64,
    pub gutter_max_density: f64,
    pub min_side_density: f64,
    /// Block size used to coarsen the edge mask before labeling.
    pub component_step: u32,
    pub min_component_pixel_ratio: f64,
    pub min_component_box_ratio: f64,
    pub min_component_count: usize,
    pub min_component_width_ratio: f64,
    pub min_component_height_ratio: f64,
    pub min_component_center_gap_ratio: f64,
}

impl Default for MultipleDocumentOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            center_band_ratio: 0.2,
            gutter_max_density: 0.012,
            min_side_density: 0.05,
            component_step: 4,
            min_component_pixel_ratio: 0.004,
            min_component_box_ratio: 0.2,
            min_component_count: 2,
            min_component_width_ratio: 0.25,
            min_component_height_ratio: 0.5,
            min_component_center_gap_ratio: 0.35,
        }
    }
}

/// Optional bounds in config files: a number sets the bound and `false`
/// switches it off. TOML has no null, so `None` is written as `false`.
mod bound {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Value(f64),
        Flag(bool),
    }

    #[allow(clippy::ref_option, clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(bound) => serializer.serialize_f64(*bound),
            None => serializer.serialize_bool(false),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Value(bound) => Ok(Some(bound)),
            Raw::Flag(false) => Ok(None),
            Raw::Flag(true) => Err(D::Error::custom(
                "expected a number, or false to disable the bound",
            )),
        }
    }
}
