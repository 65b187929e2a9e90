//! Blur detection module.
//!
//! Scores focus sharpness as the population variance of the 4-neighbour
//! discrete Laplacian over all interior pixels. Flat or defocused content
//! scores near zero, crisp text and edges score high. Thresholding happens in
//! the evaluator because the score is unreliable on frames with little
//! content.

use tracing::trace;

use crate::domain::{GrayRaster, Outcome, QualityCheck};

/// Variance of `-4·c + up + down + left + right` over the interior pixels.
///
/// Rasters narrower or shorter than 3 pixels, and malformed rasters, score 0.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn laplacian_variance(raster: &GrayRaster<'_>) -> f64 {
    if !raster.is_well_formed() || raster.width() < 3 || raster.height() < 3 {
        return 0.0;
    }

    let width = raster.width() as usize;
    let height = raster.height() as usize;
    let data = raster.samples();

    let mut sum: i64 = 0;
    let mut sum_sq: u64 = 0;

    for y in 1..height - 1 {
        let above = &data[(y - 1) * width..y * width];
        let row = &data[y * width..(y + 1) * width];
        let below = &data[(y + 1) * width..(y + 2) * width];

        for x in 1..width - 1 {
            let lap = -4 * i32::from(row[x])
                + i32::from(row[x - 1])
                + i32::from(row[x + 1])
                + i32::from(above[x])
                + i32::from(below[x]);
            sum += i64::from(lap);
            sum_sq += u64::from(lap.unsigned_abs()).pow(2);
        }
    }

    let count = ((width - 2) * (height - 2)) as f64;
    let mean = sum as f64 / count;
    let variance = sum_sq as f64 / count - mean * mean;
    trace!(mean, variance, "laplacian statistics");
    // Rounding can leave a tiny negative on perfectly flat input.
    variance.max(0.0)
}

/// Blur scoring QA module.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlurCheck;

impl BlurCheck {
    /// Creates a new blur check.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl QualityCheck for BlurCheck {
    type Metrics = f64;

    fn name(&self) -> &'static str {
        "blur"
    }

    fn analyze(&self, raster: &GrayRaster<'_>) -> Outcome<f64> {
        Outcome::measured(laplacian_variance(raster))
    }
}

#[cfg(test)]
#[allow(clippy::cast_possible_truncation)]
mod tests {
    use super::*;

    fn raster_from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> GrayRaster<'static> {
        let mut samples = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                samples.push(f(x, y));
            }
        }
        GrayRaster::new(width, height, samples)
    }

    #[test]
    fn test_module_name() {
        assert_eq!(BlurCheck::new().name(), "blur");
    }

    #[test]
    fn test_uniform_raster_scores_zero() {
        for value in [0u8, 128, 255] {
            let raster = raster_from_fn(64, 48, |_, _| value);
            assert!(laplacian_variance(&raster).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_tiny_rasters_score_zero() {
        for (w, h) in [(0, 0), (1, 1), (2, 2), (2, 10), (10, 2)] {
            let raster = raster_from_fn(w, h, |x, y| ((x + y) * 100) as u8);
            assert!(laplacian_variance(&raster).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_truncated_buffer_scores_zero() {
        let raster = GrayRaster::new(10, 10, vec![255u8; 50]);
        assert!(laplacian_variance(&raster).abs() < f64::EPSILON);
    }

    #[test]
    fn test_single_spike_matches_hand_computation() {
        // 3x3 has one interior pixel, so variance of a single sample is 0.
        let raster = raster_from_fn(3, 3, |x, y| if x == 1 && y == 1 { 100 } else { 0 });
        assert!(laplacian_variance(&raster).abs() < f64::EPSILON);

        // 4x3: interior (1,1) and (2,1). Spike at (1,1) gives -400 and +100.
        let raster = raster_from_fn(4, 3, |x, y| if x == 1 && y == 1 { 100 } else { 0 });
        let mean = (-400.0 + 100.0) / 2.0;
        let expected = (160_000.0 + 10_000.0) / 2.0 - mean * mean;
        assert!((laplacian_variance(&raster) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_sharp_beats_smooth() {
        let checker = raster_from_fn(64, 64, |x, y| if (x / 4 + y / 4) % 2 == 0 { 255 } else { 0 });
        let gradient = raster_from_fn(64, 64, |x, _| (x * 4) as u8);

        let sharp = laplacian_variance(&checker);
        let smooth = laplacian_variance(&gradient);
        assert!(sharp > 1000.0, "checkerboard should be sharp, got {sharp}");
        assert!(smooth < 1.0, "linear gradient has no curvature, got {smooth}");
    }

    #[test]
    fn test_check_reports_score_without_findings() {
        let raster = raster_from_fn(16, 16, |_, _| 42);
        let outcome = BlurCheck::new().analyze(&raster);
        assert!(outcome.reason.is_none());
        assert!(outcome.warning.is_none());
        assert_eq!(outcome.metrics, Some(0.0));
    }
}
