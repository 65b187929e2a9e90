//! Grayscale raster input for the evaluation engine.

use std::borrow::Cow;

use image::{GrayImage, ImageBuffer, Luma};

/// A single-channel 8-bit luminance raster in row-major order.
///
/// The engine only ever reads the samples. A raster whose sample count does
/// not match `width * height` is still accepted; analyzers that need the
/// pixels report a degraded outcome for it instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayRaster<'a> {
    width: u32,
    height: u32,
    samples: Cow<'a, [u8]>,
}

impl<'a> GrayRaster<'a> {
    /// Creates a raster from its dimensions and samples.
    #[must_use]
    pub fn new(width: u32, height: u32, samples: impl Into<Cow<'a, [u8]>>) -> Self {
        Self {
            width,
            height,
            samples: samples.into(),
        }
    }

    /// Creates a raster borrowing an existing sample buffer.
    #[must_use]
    pub const fn borrowed(width: u32, height: u32, samples: &'a [u8]) -> Self {
        Self {
            width,
            height,
            samples: Cow::Borrowed(samples),
        }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// `min(width, height)`, the size-quality proxy.
    #[must_use]
    pub fn short_edge(&self) -> u32 {
        self.width.min(self.height)
    }

    /// Raw luminance samples.
    #[must_use]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Number of pixels implied by the dimensions.
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// True when both dimensions are non-zero and the buffer holds exactly
    /// `width * height` samples.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.width > 0 && self.height > 0 && self.samples.len() == self.pixel_count()
    }

    /// Borrows the samples as an `image` buffer, if the raster is well formed.
    #[must_use]
    pub fn as_image(&self) -> Option<ImageBuffer<Luma<u8>, &[u8]>> {
        if !self.is_well_formed() {
            return None;
        }
        ImageBuffer::from_raw(self.width, self.height, self.samples())
    }

    /// Re-borrows this raster without copying the samples.
    #[must_use]
    pub fn view(&self) -> GrayRaster<'_> {
        GrayRaster::borrowed(self.width, self.height, self.samples())
    }

    /// Converts into a raster that owns its samples.
    #[must_use]
    pub fn into_owned(self) -> GrayRaster<'static> {
        GrayRaster {
            width: self.width,
            height: self.height,
            samples: Cow::Owned(self.samples.into_owned()),
        }
    }
}

impl From<GrayImage> for GrayRaster<'static> {
    fn from(image: GrayImage) -> Self {
        let (width, height) = image.dimensions();
        Self::new(width, height, image.into_raw())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_raster() {
        let raster = GrayRaster::new(4, 3, vec![0u8; 12]);
        assert!(raster.is_well_formed());
        assert_eq!(raster.short_edge(), 3);
        assert_eq!(raster.pixel_count(), 12);
    }

    #[test]
    fn test_truncated_buffer_is_not_well_formed() {
        let raster = GrayRaster::new(4, 3, vec![0u8; 11]);
        assert!(!raster.is_well_formed());
        assert!(raster.as_image().is_none());
    }

    #[test]
    fn test_zero_dimensions_are_not_well_formed() {
        let raster = GrayRaster::new(0, 10, Vec::new());
        assert!(!raster.is_well_formed());
        assert_eq!(raster.short_edge(), 0);
    }

    #[test]
    fn test_from_gray_image_keeps_layout() {
        let img = GrayImage::from_fn(3, 2, |x, y| Luma([u8::try_from(x + 10 * y).unwrap_or(0)]));
        let raster = GrayRaster::from(img);
        assert_eq!(raster.width(), 3);
        assert_eq!(raster.height(), 2);
        assert_eq!(raster.samples(), &[0, 1, 2, 10, 11, 12]);
    }

    #[test]
    fn test_as_image_reads_pixels() {
        let samples = [1u8, 2, 3, 4];
        let raster = GrayRaster::borrowed(2, 2, &samples);
        let view = raster.as_image().expect("well formed");
        assert_eq!(view.get_pixel(1, 1).0[0], 4);
    }
}
