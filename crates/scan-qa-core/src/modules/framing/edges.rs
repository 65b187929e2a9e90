//! Sobel edge mask with per-column edge counts.

use crate::domain::GrayRaster;

/// Tight bounding box of all edge pixels, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeBounds {
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
}

impl EdgeBounds {
    #[must_use]
    pub const fn width(&self) -> usize {
        self.max_x - self.min_x + 1
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.max_y - self.min_y + 1
    }
}

/// Boolean edge mask over one raster, plus the statistics framing needs.
#[derive(Debug, Clone)]
pub struct EdgeMap {
    width: usize,
    height: usize,
    mask: Vec<bool>,
    column_counts: Vec<u32>,
    edge_count: usize,
    bounds: Option<EdgeBounds>,
}

impl EdgeMap {
    /// Marks every interior pixel whose Sobel magnitude `|gx| + |gy|` reaches
    /// `threshold`. Border pixels are never marked.
    ///
    /// The raster must be well formed.
    #[must_use]
    pub fn detect(raster: &GrayRaster<'_>, threshold: u32) -> Self {
        let width = raster.width() as usize;
        let height = raster.height() as usize;
        let data = raster.samples();

        let mut mask = vec![false; width * height];
        let mut column_counts = vec![0u32; width];
        let mut edge_count = 0usize;
        let mut bounds: Option<EdgeBounds> = None;

        let px = |idx: usize| i32::from(data[idx]);

        for y in 1..height.saturating_sub(1) {
            for x in 1..width.saturating_sub(1) {
                let idx = y * width + x;
                let (up, down) = (idx - width, idx + width);

                let gx = px(up + 1) + 2 * px(idx + 1) + px(down + 1)
                    - px(up - 1)
                    - 2 * px(idx - 1)
                    - px(down - 1);
                let gy = px(down - 1) + 2 * px(down) + px(down + 1)
                    - px(up - 1)
                    - 2 * px(up)
                    - px(up + 1);

                if gx.unsigned_abs() + gy.unsigned_abs() < threshold {
                    continue;
                }

                mask[idx] = true;
                column_counts[x] += 1;
                edge_count += 1;
                bounds = Some(match bounds {
                    None => EdgeBounds {
                        min_x: x,
                        min_y: y,
                        max_x: x,
                        max_y: y,
                    },
                    Some(b) => EdgeBounds {
                        min_x: b.min_x.min(x),
                        min_y: b.min_y.min(y),
                        max_x: b.max_x.max(x),
                        max_y: b.max_y.max(y),
                    },
                });
            }
        }

        Self {
            width,
            height,
            mask,
            column_counts,
            edge_count,
            bounds,
        }
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    #[must_use]
    pub const fn bounds(&self) -> Option<EdgeBounds> {
        self.bounds
    }

    /// Whether the pixel at `(x, y)` is an edge.
    #[must_use]
    pub fn is_edge(&self, x: usize, y: usize) -> bool {
        self.mask[y * self.width + x]
    }

    /// Edge pixels over all frame pixels.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn edge_pixel_ratio(&self) -> f64 {
        self.edge_count as f64 / (self.width * self.height) as f64
    }

    /// Edge pixels in column `x` over frame height.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn column_density(&self, x: usize) -> f64 {
        f64::from(self.column_counts[x]) / self.height as f64
    }

    /// Mean column density over the inclusive range `start..=end`.
    /// Empty ranges have density 0.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean_density(&self, start: usize, end: usize) -> f64 {
        if start > end || end >= self.width {
            return 0.0;
        }
        let sum: f64 = (start..=end).map(|x| self.column_density(x)).sum();
        sum / (end - start + 1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_raster(width: u32, height: u32, split_x: u32) -> GrayRaster<'static> {
        let mut samples = Vec::new();
        for _ in 0..height {
            for x in 0..width {
                samples.push(if x < split_x { 0 } else { 255 });
            }
        }
        GrayRaster::new(width, height, samples)
    }

    #[test]
    fn test_flat_raster_has_no_edges() {
        let raster = GrayRaster::new(20, 20, vec![90u8; 400]);
        let edges = EdgeMap::detect(&raster, 80);
        assert_eq!(edges.edge_count(), 0);
        assert!(edges.bounds().is_none());
        assert!(edges.edge_pixel_ratio().abs() < f64::EPSILON);
    }

    #[test]
    fn test_vertical_step_marks_two_columns() {
        let raster = split_raster(20, 10, 10);
        let edges = EdgeMap::detect(&raster, 80);

        // Columns 9 and 10 straddle the step; border rows are excluded.
        assert_eq!(edges.edge_count(), 2 * 8);
        assert!(edges.is_edge(9, 5));
        assert!(edges.is_edge(10, 5));
        assert!(!edges.is_edge(8, 5));
        assert!(!edges.is_edge(9, 0));

        let bounds = edges.bounds().unwrap_or(EdgeBounds {
            min_x: 0,
            min_y: 0,
            max_x: 0,
            max_y: 0,
        });
        assert_eq!((bounds.min_x, bounds.max_x), (9, 10));
        assert_eq!((bounds.min_y, bounds.max_y), (1, 8));
        assert_eq!(bounds.width(), 2);
        assert_eq!(bounds.height(), 8);
    }

    #[test]
    fn test_column_density_divides_by_full_height() {
        let raster = split_raster(20, 10, 10);
        let edges = EdgeMap::detect(&raster, 80);
        assert!((edges.column_density(9) - 0.8).abs() < 1e-12);
        assert!(edges.column_density(3).abs() < f64::EPSILON);
        assert!((edges.mean_density(8, 11) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_threshold_above_magnitude_suppresses_edges() {
        // Step of 255 gives |gx| = 4 * 255 = 1020.
        let raster = split_raster(20, 10, 10);
        assert_eq!(EdgeMap::detect(&raster, 1021).edge_count(), 0);
        assert_eq!(EdgeMap::detect(&raster, 1020).edge_count(), 16);
    }

    #[test]
    fn test_empty_density_range() {
        let raster = split_raster(20, 10, 10);
        let edges = EdgeMap::detect(&raster, 80);
        assert!(edges.mean_density(5, 4).abs() < f64::EPSILON);
        assert!(edges.mean_density(0, 20).abs() < f64::EPSILON);
    }
}
