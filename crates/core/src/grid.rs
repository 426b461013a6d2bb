//! Grid module - the fixed board that accumulates locked cells
//!
//! The grid is 10x20 where each cell is either empty or holds a color tag.
//! Storage is a flat array indexed `row * WIDTH + col`, so "no such row" states
//! cannot be represented.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)
//!
//! The grid is only written by [`Grid::lock_piece`] and [`Grid::clear_lines`];
//! every placement must first pass [`Grid::valid_position`].

use crate::types::{Cell, Color, ShapeCoords, GRID_HEIGHT, GRID_SIZE, GRID_WIDTH};

/// The game grid - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= GRID_WIDTH as i8 || y < 0 || y >= GRID_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (GRID_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Check if position is within bounds and empty
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Collision check for a piece at an absolute offset.
    ///
    /// True only if all four cells `(x + offset_x, y + offset_y)` lie inside
    /// `[0, WIDTH) x [0, HEIGHT)` and are empty. No side effects.
    pub fn valid_position(&self, shape: &ShapeCoords, offset_x: i8, offset_y: i8) -> bool {
        shape.iter().all(|&(x, y)| {
            match (x.checked_add(offset_x), y.checked_add(offset_y)) {
                (Some(gx), Some(gy)) => self.is_free(gx, gy),
                _ => false,
            }
        })
    }

    /// Merge a piece into the grid.
    ///
    /// The caller guarantees the position passed [`Grid::valid_position`] for the
    /// current grid; nothing is re-validated here. Out-of-range cells are never
    /// written.
    pub fn lock_piece(&mut self, shape: &ShapeCoords, offset_x: i8, offset_y: i8, color: Color) {
        debug_assert!(self.valid_position(shape, offset_x, offset_y));
        for &(x, y) in shape {
            let (Some(gx), Some(gy)) = (x.checked_add(offset_x), y.checked_add(offset_y)) else {
                continue;
            };
            if let Some(idx) = Self::index(gx, gy) {
                self.cells[idx] = Some(color);
            }
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y).is_some_and(|row| row.iter().all(Option::is_some))
    }

    /// Borrow one row, top row first
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= GRID_HEIGHT as usize {
            return None;
        }
        let start = y * GRID_WIDTH as usize;
        Some(&self.cells[start..start + GRID_WIDTH as usize])
    }

    /// Remove every full row and return how many were removed.
    ///
    /// Surviving rows keep their relative order and settle to the bottom; the
    /// same number of empty rows is inserted at the top. Non-adjacent full rows
    /// are handled in the same pass.
    pub fn clear_lines(&mut self) -> usize {
        let width = GRID_WIDTH as usize;
        let mut write_y = GRID_HEIGHT as usize;

        // Scan from bottom to top, compacting survivors downwards.
        for read_y in (0..GRID_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src_start = read_y * width;
                self.cells
                    .copy_within(src_start..src_start + width, write_y * width);
            }
        }

        // write_y now equals the number of removed rows.
        self.cells[..write_y * width].fill(None);
        write_y
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell; GRID_SIZE] {
        &self.cells
    }

    /// Set a single cell, for building fixtures in tests
    #[cfg(test)]
    pub(crate) fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Build a grid from rows of `'.'` (empty) and any other char (filled).
    ///
    /// Rows are aligned to the bottom of the grid; missing top rows are empty.
    /// Intended for fixtures; panics on malformed input.
    pub fn from_ascii(rows: &[&str], color: Color) -> Self {
        assert!(rows.len() <= GRID_HEIGHT as usize, "too many rows");
        let mut grid = Self::new();
        let top = GRID_HEIGHT as usize - rows.len();
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.chars().count(), GRID_WIDTH as usize, "row {} has wrong width", i);
            for (x, ch) in row.chars().enumerate() {
                if ch != '.' {
                    grid.cells[(top + i) * GRID_WIDTH as usize + x] = Some(color);
                }
            }
        }
        grid
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: ShapeCoords = [(0, 0), (1, 0), (0, 1), (1, 1)];

    #[test]
    fn test_grid_index_calculation() {
        assert_eq!(Grid::index(0, 0), Some(0));
        assert_eq!(Grid::index(9, 0), Some(9));
        assert_eq!(Grid::index(0, 1), Some(10));
        assert_eq!(Grid::index(9, 19), Some(199));
        assert_eq!(Grid::index(-1, 0), None);
        assert_eq!(Grid::index(10, 0), None);
        assert_eq!(Grid::index(0, 20), None);
    }

    #[test]
    fn test_valid_position_rejects_each_edge() {
        let grid = Grid::new();
        assert!(grid.valid_position(&SQUARE, 0, 0));
        assert!(grid.valid_position(&SQUARE, 8, 18));
        assert!(!grid.valid_position(&SQUARE, -1, 0));
        assert!(!grid.valid_position(&SQUARE, 0, -1));
        assert!(!grid.valid_position(&SQUARE, 9, 0));
        assert!(!grid.valid_position(&SQUARE, 0, 19));
    }

    #[test]
    fn test_valid_position_survives_extreme_offsets() {
        let grid = Grid::new();
        assert!(!grid.valid_position(&SQUARE, i8::MAX, 0));
        assert!(!grid.valid_position(&SQUARE, 0, i8::MAX));
        assert!(!grid.valid_position(&SQUARE, i8::MIN, i8::MIN));
    }

    #[test]
    fn test_valid_position_rejects_overlap() {
        let mut grid = Grid::new();
        grid.set(4, 6, Some(Color::Red));
        assert!(!grid.valid_position(&SQUARE, 3, 5));
        assert!(grid.valid_position(&SQUARE, 5, 5));
    }

    #[test]
    fn test_lock_piece_writes_exactly_four_cells() {
        let mut grid = Grid::new();
        grid.lock_piece(&SQUARE, 3, 5, Color::Yellow);
        assert_eq!(grid.occupied_count(), 4);
        assert_eq!(grid.get(3, 5), Some(Some(Color::Yellow)));
        assert_eq!(grid.get(4, 6), Some(Some(Color::Yellow)));
    }

    #[test]
    fn test_clear_lines_keeps_gaps_between_survivors() {
        let mut grid = Grid::from_ascii(
            &[
                "#.........",
                "##########",
                ".#........",
                "##########",
            ],
            Color::Blue,
        );
        assert_eq!(grid.clear_lines(), 2);
        assert_eq!(grid.get(0, 18), Some(Some(Color::Blue)));
        assert_eq!(grid.get(1, 19), Some(Some(Color::Blue)));
        assert_eq!(grid.occupied_count(), 2);
    }

    #[test]
    fn test_from_ascii_bottom_aligned() {
        let grid = Grid::from_ascii(&["#........#"], Color::Green);
        assert!(grid.is_occupied(0, 19));
        assert!(grid.is_occupied(9, 19));
        assert!(!grid.is_occupied(0, 18));
    }
}
