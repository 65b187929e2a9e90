//! Adjacent-page strip detection along the right margin.

use tracing::trace;

use crate::domain::{SideStripMetrics, SideStripOptions};

use super::edges::EdgeMap;

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn scaled_width(width: usize, ratio: f64) -> usize {
    ((width as f64 * ratio).round() as usize).max(1)
}

/// Scans candidate boundary columns left to right, stopping at the first one
/// that is itself edge-dense and has content on both sides of comparable
/// density. Returns `None` when the detector is disabled.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn detect_side_strip(edges: &EdgeMap, options: &SideStripOptions) -> Option<SideStripMetrics> {
    if !options.enabled {
        return None;
    }

    let width = edges.width();
    let band = scaled_width(width, options.band_ratio);
    let offset = scaled_width(width, options.min_boundary_offset_ratio);
    let start = width.saturating_sub(band + offset);
    let end = width.saturating_sub(offset);
    let last = width.saturating_sub(1);

    let mut metrics = SideStripMetrics {
        detected: false,
        boundary_column: None,
        boundary_density: 0.0,
        left_mean: 0.0,
        right_mean: 0.0,
        right_to_left_ratio: 0.0,
        band_width: band as u32,
    };

    for x in start..end {
        let density = edges.column_density(x);
        if density < options.boundary_threshold {
            continue;
        }

        let left_mean = edges.mean_density(x.saturating_sub(band), x.saturating_sub(1));
        let right_mean = edges.mean_density((x + 1).min(last), (x + band).min(last));
        let ratio = if left_mean > 0.0 {
            right_mean / left_mean
        } else {
            0.0
        };
        trace!(x, density, left_mean, right_mean, ratio, "side strip candidate");

        if left_mean >= options.content_threshold
            && right_mean >= options.content_threshold
            && ratio >= options.min_right_to_left_ratio
        {
            metrics = SideStripMetrics {
                detected: true,
                boundary_column: Some(x as u32),
                boundary_density: density,
                left_mean,
                right_mean,
                right_to_left_ratio: ratio,
                band_width: band as u32,
            };
            break;
        }
    }

    Some(metrics)
}

#[cfg(test)]
#[allow(clippy::cast_possible_truncation)]
mod tests {
    use super::*;
    use crate::domain::GrayRaster;

    fn enabled() -> SideStripOptions {
        SideStripOptions {
            enabled: true,
            ..SideStripOptions::default()
        }
    }

    /// 4px checkerboard wherever `content(x)` holds, mid-gray elsewhere.
    fn columns(width: u32, height: u32, content: impl Fn(u32) -> bool) -> EdgeMap {
        let mut samples = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                samples.push(if content(x) {
                    if (x / 4 + y / 4) % 2 == 0 { 0 } else { 255 }
                } else {
                    128
                });
            }
        }
        EdgeMap::detect(&GrayRaster::new(width, height, samples), 80)
    }

    #[test]
    fn test_disabled_returns_none() {
        let edges = columns(300, 400, |_| true);
        assert!(detect_side_strip(&edges, &SideStripOptions::default()).is_none());
    }

    #[test]
    fn test_strip_past_blank_gap_is_detected() {
        // Main page to column 186, blank channel, then a strip from 234.
        let edges = columns(300, 400, |x| x <= 186 || x >= 234);
        let metrics = detect_side_strip(&edges, &enabled()).unwrap_or_default();
        assert!(metrics.detected);
        assert_eq!(metrics.band_width, 18);
        let column = metrics.boundary_column.unwrap_or(0);
        assert!((246..264).contains(&column), "boundary at {column}");
        assert!(metrics.right_to_left_ratio >= 0.9);
    }

    #[test]
    fn test_blank_right_margin_is_clean() {
        let edges = columns(300, 400, |x| x < 200);
        let metrics = detect_side_strip(&edges, &enabled()).unwrap_or_default();
        assert!(!metrics.detected);
        assert!(metrics.boundary_column.is_none());
    }

    #[test]
    fn test_blank_frame_is_clean() {
        let edges = columns(100, 100, |_| false);
        let metrics = detect_side_strip(&edges, &enabled()).unwrap_or_default();
        assert!(!metrics.detected);
        assert!(metrics.right_to_left_ratio.abs() < f64::EPSILON);
    }
}
