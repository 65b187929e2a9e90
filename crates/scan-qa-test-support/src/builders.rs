//! Synthetic capture builders for testing.

use image::{imageops, GrayImage, Luma};
use scan_qa_core::domain::GrayRaster;
use scan_qa_core::ports::SourceRaster;

/// Page background tone used by the document builders.
pub const BACKGROUND: u8 = 140;

/// Builder for synthetic grayscale captures.
///
/// Document builders draw "text" as a mid-tone checkerboard (60/200) so that
/// pages are sharp and have strong edges without tripping the dark or bright
/// pixel bounds. The cell size grows with the frame so edges survive
/// downsampling to the working resolution.
pub struct SyntheticRasterBuilder;

impl SyntheticRasterBuilder {
    /// Checkerboard cell size for a frame, roughly 1/48 of the long edge.
    #[must_use]
    pub fn cell_size(width: u32, height: u32) -> u32 {
        (width.max(height) / 48).max(4)
    }

    fn text(x: u32, y: u32, cell: u32) -> Luma<u8> {
        if (x / cell + y / cell) % 2 == 0 {
            Luma([60u8])
        } else {
            Luma([200u8])
        }
    }

    /// Draws text wherever `content(x, y)` holds, background elsewhere.
    #[must_use]
    pub fn page_with(
        width: u32,
        height: u32,
        content: impl Fn(u32, u32) -> bool,
    ) -> GrayImage {
        let cell = Self::cell_size(width, height);
        GrayImage::from_fn(width, height, |x, y| {
            if content(x, y) {
                Self::text(x, y, cell)
            } else {
                Luma([BACKGROUND])
            }
        })
    }

    // === Plain patterns ===

    /// Creates a uniform image.
    #[must_use]
    pub fn uniform(width: u32, height: u32, value: u8) -> GrayImage {
        GrayImage::from_pixel(width, height, Luma([value]))
    }

    /// Creates a full-contrast checkerboard with 8px cells.
    #[must_use]
    pub fn checkerboard(width: u32, height: u32) -> GrayImage {
        Self::checkerboard_with_cell_size(width, height, 8)
    }

    /// Creates a full-contrast checkerboard with custom cell size.
    #[must_use]
    pub fn checkerboard_with_cell_size(width: u32, height: u32, cell_size: u32) -> GrayImage {
        let cell = cell_size.max(1);
        GrayImage::from_fn(width, height, |x, y| {
            if (x / cell + y / cell) % 2 == 0 {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        })
    }

    /// Creates a smooth horizontal gradient (no curvature, no strong edges).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn horizontal_gradient(width: u32, height: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, _| {
            Luma([((u32::from(u8::MAX) * x) / width.max(1)) as u8])
        })
    }

    // === Document captures ===

    /// A single portrait page with margins on every side.
    #[must_use]
    pub fn framed_document(width: u32, height: u32) -> GrayImage {
        let (mx, my) = (width / 20, height / 40);
        Self::page_with(width, height, |x, y| {
            x >= mx && x < width - mx && y >= my && y < height - my
        })
    }

    /// A framed page smoothed with a Gaussian blur of `sigma` pixels.
    #[must_use]
    pub fn blurred_document(width: u32, height: u32, sigma: f32) -> GrayImage {
        imageops::blur(&Self::framed_document(width, height), sigma)
    }

    /// Two pages in the left and right thirds with a clean center gutter.
    #[must_use]
    pub fn two_page_spread(width: u32, height: u32) -> GrayImage {
        let third = width / 3;
        Self::page_with(width, height, |x, _| x < third || x >= width - third)
    }

    /// A page covering the left 62% of the frame, a blank channel, and a
    /// strip of the next page from 78% to the right edge.
    #[must_use]
    pub fn side_strip_capture(width: u32, height: u32) -> GrayImage {
        let page_end = width * 62 / 100;
        let strip_start = width * 78 / 100;
        Self::page_with(width, height, |x, _| x <= page_end || x >= strip_start)
    }

    /// A framed page with every tone scaled down to `max_level`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn dark_document(width: u32, height: u32, max_level: u8) -> GrayImage {
        let mut img = Self::framed_document(width, height);
        for pixel in img.pixels_mut() {
            pixel.0[0] = (u32::from(pixel.0[0]) * u32::from(max_level) / 255) as u8;
        }
        img
    }

    // === Conversions ===

    /// Wraps an image as an owned raster.
    #[must_use]
    pub fn raster(img: GrayImage) -> GrayRaster<'static> {
        GrayRaster::from(img)
    }

    /// Wraps an image as a source item with the given path.
    #[must_use]
    pub fn source(path: &str, img: GrayImage) -> SourceRaster {
        SourceRaster::new(path, GrayRaster::from(img))
    }
}
