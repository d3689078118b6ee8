//! Square spiral traversal of grid cells, used to pack buildings around a quarter's center.

use serde::{Deserialize, Serialize};

/// Grid cell relative to a quarter's grid. `row` runs along world Z, `col` along world X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoord {
    pub row: i32,
    pub col: i32,
}

impl GridCoord {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

/// Side length of the square grid that fits `count` cells: `ceil(sqrt(count))`, at least 1.
pub fn grid_size_for(count: usize) -> usize {
    if count <= 1 {
        return 1;
    }
    let mut side = (count as f64).sqrt() as usize;
    // Float sqrt can be off by one for large counts.
    while side * side < count {
        side += 1;
    }
    while side > 1 && (side - 1) * (side - 1) >= count {
        side -= 1;
    }
    side
}

/// Endless outward square spiral starting at the center cell of a `grid_size` grid.
///
/// Arms turn right-handed (north, east, south, west when viewed from above)
/// and grow by one cell every second turn, so no cell is ever visited twice.
#[derive(Debug, Clone)]
pub struct SpiralWalk {
    x: i32,
    z: i32,
    dx: i32,
    dz: i32,
    run_length: u32,
    steps_taken: u32,
    turns: u32,
}

impl SpiralWalk {
    pub fn new(grid_size: usize) -> Self {
        let center = (grid_size / 2) as i32;
        Self {
            x: center,
            z: center,
            dx: 0,
            dz: -1,
            run_length: 1,
            steps_taken: 0,
            turns: 0,
        }
    }
}

impl Iterator for SpiralWalk {
    type Item = GridCoord;

    fn next(&mut self) -> Option<GridCoord> {
        let cell = GridCoord::new(self.z, self.x);

        self.steps_taken += 1;
        if self.steps_taken == self.run_length {
            self.steps_taken = 0;
            (self.dx, self.dz) = (-self.dz, self.dx);
            self.turns += 1;
            if self.turns % 2 == 0 {
                self.run_length += 1;
            }
        }
        self.x += self.dx;
        self.z += self.dz;

        Some(cell)
    }
}

/// The first `count` cells of the spiral for a `grid_size` grid.
///
/// Cells are not clipped to `0..grid_size`; the size only fixes the center.
pub fn spiral_positions(count: usize, grid_size: usize) -> Vec<GridCoord> {
    SpiralWalk::new(grid_size).take(count).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn five_cells_on_three_grid() {
        let cells = spiral_positions(5, 3);
        assert_eq!(
            cells,
            vec![
                GridCoord::new(1, 1),
                GridCoord::new(1, 2),
                GridCoord::new(2, 2),
                GridCoord::new(3, 2),
                GridCoord::new(3, 1),
            ]
        );
    }

    #[test]
    fn zero_count_is_empty() {
        for size in 1..8 {
            assert!(spiral_positions(0, size).is_empty());
        }
    }

    #[test]
    fn starts_at_center() {
        assert_eq!(spiral_positions(1, 4), vec![GridCoord::new(2, 2)]);
        assert_eq!(spiral_positions(1, 1), vec![GridCoord::new(0, 0)]);
    }

    #[test]
    fn never_revisits_a_cell() {
        let cells = spiral_positions(2_500, 50);
        let unique: HashSet<_> = cells.iter().copied().collect();
        assert_eq!(unique.len(), cells.len());
    }

    #[test]
    fn consecutive_cells_are_neighbours() {
        let cells = spiral_positions(200, 15);
        for pair in cells.windows(2) {
            let d = (pair[0].row - pair[1].row).abs() + (pair[0].col - pair[1].col).abs();
            assert_eq!(d, 1);
        }
    }

    #[test]
    fn may_leave_a_small_grid() {
        let cells = spiral_positions(9, 1);
        assert!(cells.iter().any(|c| c.row < 0 || c.col < 0 || c.row >= 1 || c.col >= 1));
    }

    #[test]
    fn grid_size_is_ceil_sqrt() {
        assert_eq!(grid_size_for(0), 1);
        assert_eq!(grid_size_for(1), 1);
        assert_eq!(grid_size_for(2), 2);
        assert_eq!(grid_size_for(4), 2);
        assert_eq!(grid_size_for(5), 3);
        assert_eq!(grid_size_for(250), 16);
        assert_eq!(grid_size_for(256), 16);
    }
}
