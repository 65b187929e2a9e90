//! Two-page spread detection: a clean center gutter, or two large edge
//! components whose centers sit far apart horizontally.

use std::cmp::Reverse;

use tracing::trace;

use crate::domain::{MultipleDocumentOptions, MultipleMetrics, SplitSignal};

use super::components::{Component, ReducedGrid};
use super::edges::EdgeMap;

/// Result of the multiple-document detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultipleDetection {
    /// Which test fired; the gutter wins when both do.
    pub signal: Option<SplitSignal>,
    pub metrics: MultipleMetrics,
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn gutter(edges: &EdgeMap, options: &MultipleDocumentOptions) -> (bool, f64, f64, f64) {
    let width = edges.width();
    let band = ((width as f64 * options.center_band_ratio).round() as usize).max(1);
    let center_start = width.saturating_sub(band) / 2;
    let center_end = (center_start + band - 1).min(width.saturating_sub(1));

    let min_center_density = (center_start..=center_end)
        .map(|x| edges.column_density(x))
        .fold(1.0_f64, f64::min);

    // Side ranges stop short of the band; a band touching the frame edge
    // leaves that side empty.
    let left_mean = match center_start.checked_sub(1) {
        Some(end) => edges.mean_density(0, end),
        None => 0.0,
    };
    let right_mean = edges.mean_density(center_end + 1, width.saturating_sub(1));

    let detected = min_center_density <= options.gutter_max_density
        && left_mean >= options.min_side_density
        && right_mean >= options.min_side_density;
    trace!(
        center_start,
        center_end,
        min_center_density,
        left_mean,
        right_mean,
        detected,
        "gutter densities"
    );
    (detected, min_center_density, left_mean, right_mean)
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn significant_components(edges: &EdgeMap, options: &MultipleDocumentOptions) -> Vec<Component> {
    let grid = ReducedGrid::from_edges(edges, options.component_step);
    let min_pixels = (options.min_component_pixel_ratio * grid.area() as f64).round() as usize;
    grid.components()
        .into_iter()
        .filter(|c| c.pixels >= min_pixels && c.box_ratio >= options.min_component_box_ratio)
        .collect()
}

fn component_split(components: &[Component], options: &MultipleDocumentOptions) -> bool {
    if components.len() < options.min_component_count {
        return false;
    }

    let mut large: Vec<&Component> = components
        .iter()
        .filter(|c| {
            c.width_ratio >= options.min_component_width_ratio
                && c.height_ratio >= options.min_component_height_ratio
        })
        .collect();
    if large.len() < options.min_component_count {
        return false;
    }

    large.sort_by_key(|c| Reverse(c.pixels));
    let Some((primary, rest)) = large.split_first() else {
        return false;
    };
    rest.iter()
        .any(|c| (c.center_x - primary.center_x).abs() >= options.min_component_center_gap_ratio)
}

/// Runs both split tests. Returns `None` when the detector is disabled.
#[must_use]
pub fn detect_multiple(
    edges: &EdgeMap,
    options: &MultipleDocumentOptions,
) -> Option<MultipleDetection> {
    if !options.enabled {
        return None;
    }

    let (gutter_detected, min_center_density, left_mean, right_mean) = gutter(edges, options);
    let components = significant_components(edges, options);
    let component_detected = component_split(&components, options);

    let signal = if gutter_detected {
        Some(SplitSignal::Gutter)
    } else if component_detected {
        Some(SplitSignal::Components)
    } else {
        None
    };

    Some(MultipleDetection {
        signal,
        metrics: MultipleMetrics {
            gutter_detected,
            min_center_density,
            left_mean,
            right_mean,
            component_count: components.len(),
            component_detected,
        },
    })
}
