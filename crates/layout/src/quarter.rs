//! Side-by-side code and test quarters on a shared ground plane.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::spiral::GridCoord;

/// World extents of one quarter for a `grid_size` grid.
pub fn quarter_size(grid_size: usize, spacing: f32, margin: f32) -> f32 {
    grid_size as f32 * spacing + margin
}

/// Geometry of the two quarters. The code quarter sits on -X, the test quarter
/// on +X, separated by `gap`; both are centered on Z = 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuarterLayout {
    pub code_quarter_size: f32,
    pub test_quarter_size: f32,
    pub ground_width: f32,
    pub ground_height: f32,
    /// World X of the code quarter's center.
    pub code_offset_x: f32,
    /// World X of the test quarter's center.
    pub test_offset_x: f32,
}

impl QuarterLayout {
    pub fn partition(code_grid_size: usize, test_grid_size: usize, config: &LayoutConfig) -> Self {
        let code_quarter_size = quarter_size(code_grid_size, config.spacing, config.margin);
        let test_quarter_size = quarter_size(test_grid_size, config.spacing, config.margin);
        let ground_width = code_quarter_size + test_quarter_size + config.gap;
        let ground_height = code_quarter_size.max(test_quarter_size);

        Self {
            code_quarter_size,
            test_quarter_size,
            ground_width,
            ground_height,
            code_offset_x: -ground_width / 2.0 + code_quarter_size / 2.0,
            test_offset_x: ground_width / 2.0 - test_quarter_size / 2.0,
        }
    }

    /// Right edge of the code quarter.
    pub fn code_max_x(&self) -> f32 {
        self.code_offset_x + self.code_quarter_size / 2.0
    }

    /// Left edge of the test quarter.
    pub fn test_min_x(&self) -> f32 {
        self.test_offset_x - self.test_quarter_size / 2.0
    }
}

/// World (x, z) of a grid cell in a quarter centered on `offset_x`.
pub fn cell_to_world(cell: GridCoord, grid_size: usize, offset_x: f32, spacing: f32) -> Vec2 {
    let half = grid_size as f32 / 2.0;
    Vec2::new(
        offset_x + (cell.col as f32 - half) * spacing,
        (cell.row as f32 - half) * spacing,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_geometry() {
        let layout = QuarterLayout::partition(3, 1, &LayoutConfig::default());
        assert_eq!(layout.code_quarter_size, 8.5);
        assert_eq!(layout.test_quarter_size, 5.5);
        assert_eq!(layout.ground_width, 17.0);
        assert_eq!(layout.ground_height, 8.5);
        assert_eq!(layout.code_offset_x, -4.25);
        assert_eq!(layout.test_offset_x, 5.75);
    }

    #[test]
    fn quarters_are_separated_by_gap() {
        let config = LayoutConfig::default();
        for (code, test) in [(1, 1), (1, 30), (23, 2), (16, 16)] {
            let layout = QuarterLayout::partition(code, test, &config);
            assert!(layout.test_min_x() >= layout.code_max_x());
            assert!((layout.test_min_x() - layout.code_max_x() - config.gap).abs() < 1e-4);
        }
    }

    #[test]
    fn ground_is_positive_for_minimal_grids() {
        let layout = QuarterLayout::partition(1, 1, &LayoutConfig::default());
        assert!(layout.ground_width > 0.0);
        assert!(layout.ground_height > 0.0);
    }

    #[test]
    fn cell_to_world_centers_grid_on_offset() {
        let p = cell_to_world(GridCoord::new(1, 1), 3, -4.25, 1.5);
        assert_eq!(p, Vec2::new(-5.0, -0.75));
        let p = cell_to_world(GridCoord::new(0, 0), 1, 5.75, 1.5);
        assert_eq!(p, Vec2::new(5.0, -0.75));
    }
}
