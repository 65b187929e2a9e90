//! Stable reason and warning tags emitted by the analyzers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which signal triggered multiple-document detection.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitSignal {
    /// A content-free vertical channel flanked by content.
    Gutter,
    /// Two large, horizontally separated edge components.
    Components,
}

impl SplitSignal {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Gutter => "gutter",
            Self::Components => "components",
        }
    }
}

impl fmt::Display for SplitSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rejection reason or warning.
///
/// Serializes as its stable string tag, e.g. `size_too_small:800` or
/// `document_edges_not_found`.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Finding {
    /// Image dimensions are zero or unknown.
    SizeUnavailable,
    /// Short edge below the reject tier.
    SizeTooSmall(u32),
    /// Short edge below the warn tier.
    SizeLow(u32),
    /// Laplacian variance below the configured threshold.
    BlurScoreBelowThreshold(f64),
    /// No samples to measure brightness on.
    BrightnessUnavailable,
    /// Mean luminance below the minimum.
    BrightnessMeanLow(f64),
    /// Mean luminance above the maximum.
    BrightnessMeanHigh(f64),
    /// Too many samples at or below the dark cut-off.
    BrightnessTooDarkPixels(f64),
    /// Too many samples at or above the bright cut-off.
    BrightnessTooBrightPixels(f64),
    /// Raster too small or malformed for framing analysis.
    DocumentUnavailable,
    /// No gradient exceeded the edge threshold.
    DocumentEdgesNotFound,
    /// Two pages captured in one frame.
    MultipleDocumentsDetected(SplitSignal),
    /// Edge bounding box covers too little of the frame.
    DocumentCoverageLow(f64),
    /// Edge bounding box aspect ratio outside the configured bounds.
    DocumentAspectRatioOutOfRange(f64),
    /// A sliver of an adjacent page bleeds in along the right edge.
    DocumentSideStripDetected,
    /// Document fills the frame with no margin.
    DocumentTightFraming,
}

impl Finding {
    /// The tag without its numeric suffix.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::SizeUnavailable => "size_unavailable",
            Self::SizeTooSmall(_) => "size_too_small",
            Self::SizeLow(_) => "size_low",
            Self::BlurScoreBelowThreshold(_) => "blur_score_below_threshold",
            Self::BrightnessUnavailable => "brightness_unavailable",
            Self::BrightnessMeanLow(_) => "brightness_mean_low",
            Self::BrightnessMeanHigh(_) => "brightness_mean_high",
            Self::BrightnessTooDarkPixels(_) => "brightness_too_dark_pixels",
            Self::BrightnessTooBrightPixels(_) => "brightness_too_bright_pixels",
            Self::DocumentUnavailable => "document_unavailable",
            Self::DocumentEdgesNotFound => "document_edges_not_found",
            Self::MultipleDocumentsDetected(_) => "multiple_documents_detected",
            Self::DocumentCoverageLow(_) => "document_coverage_low",
            Self::DocumentAspectRatioOutOfRange(_) => "document_aspect_ratio_out_of_range",
            Self::DocumentSideStripDetected => "document_side_strip_detected",
            Self::DocumentTightFraming => "document_tight_framing",
        }
    }

    /// True for findings produced by the brightness analyzer.
    #[must_use]
    pub const fn is_brightness(&self) -> bool {
        matches!(
            self,
            Self::BrightnessUnavailable
                | Self::BrightnessMeanLow(_)
                | Self::BrightnessMeanHigh(_)
                | Self::BrightnessTooDarkPixels(_)
                | Self::BrightnessTooBrightPixels(_)
        )
    }

    /// True for findings produced by the document framing analyzer.
    #[must_use]
    pub const fn is_document(&self) -> bool {
        matches!(
            self,
            Self::DocumentUnavailable
                | Self::DocumentEdgesNotFound
                | Self::MultipleDocumentsDetected(_)
                | Self::DocumentCoverageLow(_)
                | Self::DocumentAspectRatioOutOfRange(_)
                | Self::DocumentSideStripDetected
                | Self::DocumentTightFraming
        )
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self.tag();
        match self {
            Self::SizeTooSmall(v) | Self::SizeLow(v) => write!(f, "{tag}:{v}"),
            Self::BlurScoreBelowThreshold(v)
            | Self::BrightnessMeanLow(v)
            | Self::BrightnessMeanHigh(v) => write!(f, "{tag}:{v:.2}"),
            Self::BrightnessTooDarkPixels(v)
            | Self::BrightnessTooBrightPixels(v)
            | Self::DocumentCoverageLow(v)
            | Self::DocumentAspectRatioOutOfRange(v) => write!(f, "{tag}:{v:.3}"),
            Self::MultipleDocumentsDetected(signal) => write!(f, "{tag}:{signal}"),
            Self::SizeUnavailable
            | Self::BrightnessUnavailable
            | Self::DocumentUnavailable
            | Self::DocumentEdgesNotFound
            | Self::DocumentSideStripDetected
            | Self::DocumentTightFraming => f.write_str(tag),
        }
    }
}

/// Error returned when a string is not a recognised finding tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseFindingError {
    /// The tag part is not known.
    #[error("unknown finding tag '{0}'")]
    UnknownTag(String),
    /// The tag needs a `:<value>` suffix but none was given.
    #[error("finding '{0}' requires a value")]
    MissingValue(String),
    /// The tag takes no suffix but one was given.
    #[error("finding '{0}' takes no value")]
    UnexpectedValue(String),
    /// The suffix could not be parsed.
    #[error("invalid value '{value}' for finding '{tag}'")]
    InvalidValue {
        /// Tag the value belongs to.
        tag: String,
        /// The offending suffix.
        value: String,
    },
}

fn parse_value<T: FromStr>(tag: &str, value: Option<&str>) -> Result<T, ParseFindingError> {
    let raw = value.ok_or_else(|| ParseFindingError::MissingValue(tag.to_string()))?;
    raw.parse().map_err(|_| ParseFindingError::InvalidValue {
        tag: tag.to_string(),
        value: raw.to_string(),
    })
}

fn no_value(tag: &str, value: Option<&str>, finding: Finding) -> Result<Finding, ParseFindingError> {
    match value {
        None => Ok(finding),
        Some(_) => Err(ParseFindingError::UnexpectedValue(tag.to_string())),
    }
}

impl FromStr for Finding {
    type Err = ParseFindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tag, value) = match s.split_once(':') {
            Some((tag, value)) => (tag, Some(value)),
            None => (s, None),
        };

        match tag {
            "size_unavailable" => no_value(tag, value, Self::SizeUnavailable),
            "size_too_small" => parse_value(tag, value).map(Self::SizeTooSmall),
            "size_low" => parse_value(tag, value).map(Self::SizeLow),
            "blur_score_below_threshold" => {
                parse_value(tag, value).map(Self::BlurScoreBelowThreshold)
            }
            "brightness_unavailable" => no_value(tag, value, Self::BrightnessUnavailable),
            "brightness_mean_low" => parse_value(tag, value).map(Self::BrightnessMeanLow),
            "brightness_mean_high" => parse_value(tag, value).map(Self::BrightnessMeanHigh),
            "brightness_too_dark_pixels" => {
                parse_value(tag, value).map(Self::BrightnessTooDarkPixels)
            }
            "brightness_too_bright_pixels" => {
                parse_value(tag, value).map(Self::BrightnessTooBrightPixels)
            }
            "document_unavailable" => no_value(tag, value, Self::DocumentUnavailable),
            "document_edges_not_found" => no_value(tag, value, Self::DocumentEdgesNotFound),
            "multiple_documents_detected" => match value {
                Some("gutter") => Ok(Self::MultipleDocumentsDetected(SplitSignal::Gutter)),
                Some("components") => Ok(Self::MultipleDocumentsDetected(SplitSignal::Components)),
                Some(other) => Err(ParseFindingError::InvalidValue {
                    tag: tag.to_string(),
                    value: other.to_string(),
                }),
                None => Err(ParseFindingError::MissingValue(tag.to_string())),
            },
            "document_coverage_low" => parse_value(tag, value).map(Self::DocumentCoverageLow),
            "document_aspect_ratio_out_of_range" => {
                parse_value(tag, value).map(Self::DocumentAspectRatioOutOfRange)
            }
            "document_side_strip_detected" => {
                no_value(tag, value, Self::DocumentSideStripDetected)
            }
            "document_tight_framing" => no_value(tag, value, Self::DocumentTightFraming),
            other => Err(ParseFindingError::UnknownTag(other.to_string())),
        }
    }
}

impl From<Finding> for String {
    fn from(finding: Finding) -> Self {
        finding.to_string()
    }
}

impl TryFrom<String> for Finding {
    type Error = ParseFindingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formats_suffixes() {
        assert_eq!(Finding::SizeTooSmall(800).to_string(), "size_too_small:800");
        assert_eq!(
            Finding::BlurScoreBelowThreshold(12.345).to_string(),
            "blur_score_below_threshold:12.35"
        );
        assert_eq!(
            Finding::BrightnessTooDarkPixels(0.5).to_string(),
            "brightness_too_dark_pixels:0.500"
        );
        assert_eq!(
            Finding::MultipleDocumentsDetected(SplitSignal::Gutter).to_string(),
            "multiple_documents_detected:gutter"
        );
        assert_eq!(
            Finding::DocumentEdgesNotFound.to_string(),
            "document_edges_not_found"
        );
    }

    #[test]
    fn test_parse_tagged_values() {
        let finding: Finding = "size_low:1200".parse().expect("valid tag");
        assert_eq!(finding, Finding::SizeLow(1200));

        let finding: Finding = "multiple_documents_detected:components"
            .parse()
            .expect("valid tag");
        assert_eq!(
            finding,
            Finding::MultipleDocumentsDetected(SplitSignal::Components)
        );
    }

    #[test]
    fn test_parse_rejects_malformed_tags() {
        assert_eq!(
            "size_too_small".parse::<Finding>(),
            Err(ParseFindingError::MissingValue("size_too_small".into()))
        );
        assert_eq!(
            "document_edges_not_found:1".parse::<Finding>(),
            Err(ParseFindingError::UnexpectedValue(
                "document_edges_not_found".into()
            ))
        );
        assert!(matches!(
            "size_low:big".parse::<Finding>(),
            Err(ParseFindingError::InvalidValue { .. })
        ));
        assert!(matches!(
            "lens_cap_on".parse::<Finding>(),
            Err(ParseFindingError::UnknownTag(_))
        ));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&vec![
            Finding::SizeUnavailable,
            Finding::DocumentCoverageLow(0.25),
        ])
        .expect("serialize");
        assert_eq!(json, r#"["size_unavailable","document_coverage_low:0.250"]"#);
    }

    #[test]
    fn test_analyzer_families() {
        assert!(Finding::BrightnessMeanHigh(230.0).is_brightness());
        assert!(!Finding::BrightnessMeanHigh(230.0).is_document());
        assert!(Finding::DocumentTightFraming.is_document());
        assert!(!Finding::SizeLow(1200).is_document());
    }
}
