//! Bounded-resolution working copy for brightness and framing analysis.

use image::imageops::{self, FilterType};
use tracing::trace;

use crate::domain::GrayRaster;

/// Target size that fits `width x height` inside a `max_dimension` square,
/// preserving aspect ratio and never enlarging.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn fit_inside(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    if max_dimension == 0 || (width <= max_dimension && height <= max_dimension) {
        return (width, height);
    }
    let scale = f64::from(max_dimension) / f64::from(width.max(height));
    let scaled = |v: u32| ((f64::from(v) * scale).round() as u32).clamp(1, max_dimension);
    (scaled(width), scaled(height))
}

/// Returns the raster itself when it already fits, otherwise a downsampled
/// copy. Malformed rasters are passed through for the analyzers to reject.
#[must_use]
pub fn bounded_copy<'r>(raster: &'r GrayRaster<'_>, max_dimension: u32) -> GrayRaster<'r> {
    let (width, height) = fit_inside(raster.width(), raster.height(), max_dimension);
    if (width, height) == (raster.width(), raster.height()) {
        return raster.view();
    }

    let Some(source) = raster.as_image() else {
        return raster.view();
    };

    trace!(
        from_width = raster.width(),
        from_height = raster.height(),
        width,
        height,
        "downsampling working copy"
    );
    GrayRaster::from(imageops::resize(&source, width, height, FilterType::Triangle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_raster_is_not_enlarged() {
        assert_eq!(fit_inside(300, 200, 512), (300, 200));
        assert_eq!(fit_inside(512, 512, 512), (512, 512));
    }

    #[test]
    fn test_fit_preserves_aspect() {
        assert_eq!(fit_inside(3000, 4000, 512), (384, 512));
        assert_eq!(fit_inside(4000, 1000, 512), (512, 128));
    }

    #[test]
    fn test_zero_bound_disables_downsampling() {
        assert_eq!(fit_inside(5000, 5000, 0), (5000, 5000));
    }

    #[test]
    fn test_extreme_aspect_keeps_one_pixel() {
        assert_eq!(fit_inside(10_000, 2, 512), (512, 1));
    }

    #[test]
    fn test_bounded_copy_borrows_when_fitting() {
        let raster = GrayRaster::new(10, 10, vec![7u8; 100]);
        let copy = bounded_copy(&raster, 512);
        assert_eq!(copy, raster);
    }

    #[test]
    fn test_bounded_copy_downsamples_uniform() {
        let raster = GrayRaster::new(1024, 768, vec![128u8; 1024 * 768]);
        let copy = bounded_copy(&raster, 512);
        assert_eq!((copy.width(), copy.height()), (512, 384));
        assert!(copy.samples().iter().all(|&v| v == 128));
    }
}
