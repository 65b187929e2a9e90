//! Raster source port for supplying decoded grayscale images.

use crate::domain::GrayRaster;

/// A decoded input ready for evaluation.
#[derive(Debug, Clone)]
pub struct SourceRaster {
    /// Path of the image (or rasterized PDF page) the raster came from.
    pub path: String,
    /// Full-resolution grayscale samples.
    pub raster: GrayRaster<'static>,
}

impl SourceRaster {
    /// Creates a new source raster.
    #[must_use]
    pub fn new(path: impl Into<String>, raster: GrayRaster<'static>) -> Self {
        Self {
            path: path.into(),
            raster,
        }
    }
}

/// Port for loading rasters from a source.
pub trait RasterSource: Send + Sync {
    /// Returns an iterator over rasters from this source.
    ///
    /// # Errors
    ///
    /// Individual items may be errors if an input fails to decode.
    fn rasters(&self) -> Box<dyn Iterator<Item = anyhow::Result<SourceRaster>> + Send + '_>;

    /// Returns the total number of rasters, if known.
    fn count_hint(&self) -> Option<usize>;
}
