//! Connected-component labeling over a coarsened edge mask.

use super::edges::EdgeMap;

/// Edge mask coarsened into `step x step` blocks; a cell is set when any
/// pixel inside its block is an edge. Partial blocks at the right and bottom
/// margins are dropped.
#[derive(Debug, Clone)]
pub struct ReducedGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl ReducedGrid {
    /// Block-samples the edge mask at `step` (clamped to at least 1).
    #[must_use]
    pub fn from_edges(edges: &EdgeMap, step: u32) -> Self {
        let step = step.max(1) as usize;
        let width = (edges.width() / step).max(1);
        let height = (edges.height() / step).max(1);
        let mut cells = vec![false; width * height];

        for y in 0..edges.height() {
            let ry = y / step;
            if ry >= height {
                continue;
            }
            for x in 0..edges.width() {
                let rx = x / step;
                if rx < width && edges.is_edge(x, y) {
                    cells[ry * width + rx] = true;
                }
            }
        }

        Self {
            width,
            height,
            cells,
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
    pub const fn area(&self) -> usize {
        self.width * self.height
    }

    /// Labels 4-connected regions of set cells with an explicit stack.
    #[must_use]
    pub fn components(&self) -> Vec<Component> {
        let mut visited = vec![false; self.cells.len()];
        let mut stack = Vec::new();
        let mut found = Vec::new();

        for start in 0..self.cells.len() {
            if !self.cells[start] || visited[start] {
                continue;
            }

            visited[start] = true;
            stack.push(start);
            let (sx, sy) = (start % self.width, start / self.width);
            let mut pixels = 0usize;
            let (mut min_x, mut min_y, mut max_x, mut max_y) = (sx, sy, sx, sy);

            while let Some(current) = stack.pop() {
                let (cx, cy) = (current % self.width, current / self.width);
                pixels += 1;
                min_x = min_x.min(cx);
                min_y = min_y.min(cy);
                max_x = max_x.max(cx);
                max_y = max_y.max(cy);

                let neighbors = [
                    (cx > 0).then(|| current - 1),
                    (cx + 1 < self.width).then(|| current + 1),
                    (cy > 0).then(|| current - self.width),
                    (cy + 1 < self.height).then(|| current + self.width),
                ];
                for next in neighbors.into_iter().flatten() {
                    if self.cells[next] && !visited[next] {
                        visited[next] = true;
                        stack.push(next);
                    }
                }
            }

            found.push(Component::new(pixels, (min_x, min_y, max_x, max_y), self));
        }

        found
    }
}

/// A maximal 4-connected region of the reduced grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Component {
    /// Number of cells in the region.
    pub pixels: usize,
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
    /// Bounding box area over grid area.
    pub box_ratio: f64,
    pub width_ratio: f64,
    pub height_ratio: f64,
    /// Horizontal box center, normalized to grid width.
    pub center_x: f64,
    /// Vertical box center, normalized to grid height.
    pub center_y: f64,
}

impl Component {
    #[allow(clippy::cast_precision_loss)]
    fn new(
        pixels: usize,
        (min_x, min_y, max_x, max_y): (usize, usize, usize, usize),
        grid: &ReducedGrid,
    ) -> Self {
        let grid_w = grid.width() as f64;
        let grid_h = grid.height() as f64;
        let box_w = (max_x - min_x + 1) as f64;
        let box_h = (max_y - min_y + 1) as f64;
        Self {
            pixels,
            min_x,
            min_y,
            max_x,
            max_y,
            box_ratio: box_w * box_h / grid.area() as f64,
            width_ratio: box_w / grid_w,
            height_ratio: box_h / grid_h,
            center_x: (min_x + max_x + 1) as f64 / (2.0 * grid_w),
            center_y: (min_y + max_y + 1) as f64 / (2.0 * grid_h),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(width: usize, height: usize, set: &[(usize, usize)]) -> ReducedGrid {
        let mut cells = vec![false; width * height];
        for &(x, y) in set {
            cells[y * width + x] = true;
        }
        ReducedGrid {
            width,
            height,
            cells,
        }
    }

    #[test]
    fn test_separate_regions_are_distinct() {
        let g = grid(6, 3, &[(0, 0), (0, 1), (4, 0), (5, 0), (5, 1)]);
        let components = g.components();
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].pixels, 2);
        assert_eq!(components[1].pixels, 3);
    }

    #[test]
    fn test_diagonal_cells_are_not_connected() {
        let g = grid(3, 3, &[(0, 0), (1, 1), (2, 2)]);
        assert_eq!(g.components().len(), 3);
    }

    #[test]
    fn test_row_end_does_not_wrap_to_next_row() {
        // (3, 0) and (0, 1) are adjacent in the flat index but not in the grid.
        let g = grid(4, 2, &[(3, 0), (0, 1)]);
        assert_eq!(g.components().len(), 2);
    }

    #[test]
    fn test_component_geometry() {
        let g = grid(10, 4, &[(2, 0), (2, 1), (2, 2), (3, 2)]);
        let components = g.components();
        assert_eq!(components.len(), 1);
        let c = components[0];
        assert_eq!((c.min_x, c.max_x, c.min_y, c.max_y), (2, 3, 0, 2));
        assert!((c.width_ratio - 0.2).abs() < 1e-12);
        assert!((c.height_ratio - 0.75).abs() < 1e-12);
        assert!((c.box_ratio - 6.0 / 40.0).abs() < 1e-12);
        assert!((c.center_x - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_large_region_does_not_overflow_stack() {
        let width = 600;
        let height = 600;
        let all: Vec<(usize, usize)> = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .collect();
        let g = grid(width, height, &all);
        let components = g.components();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].pixels, width * height);
    }
}
