//! Grid module - the fixed-size playfield
//!
//! The grid is a 10x20 matrix of [`Cell`] values stored as a flat row-major
//! array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right) and y ranges 0..19.
//! Row 0 is the lock edge, row 19 the spawn edge.

use arrayvec::ArrayVec;

use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH, EMPTY};

/// Total number of cells on the grid
const GRID_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Indices of complete rows, ascending.
pub type CompletedRows = ArrayVec<u8, HEIGHT>;

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
            cells: [EMPTY; GRID_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty
    pub fn is_vacant(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(EMPTY))
    }

    /// In bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(c) if c != EMPTY)
    }

    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_none()
    }

    /// Cells of row `y`, or an empty slice when out of range.
    pub fn row(&self, y: usize) -> &[Cell] {
        if y >= HEIGHT {
            return &[];
        }
        &self.cells[y * WIDTH..(y + 1) * WIDTH]
    }

    /// Check if every cell of a row is filled
    pub fn is_row_complete(&self, y: usize) -> bool {
        y < HEIGHT && self.row(y).iter().all(|&cell| cell != EMPTY)
    }

    /// Complete rows scanned from the lock edge outward
    pub fn completed_rows(&self) -> CompletedRows {
        let mut rows = CompletedRows::new();
        for y in 0..HEIGHT {
            if self.is_row_complete(y) {
                rows.push(y as u8);
            }
        }
        rows
    }

    /// Delete row `y`; every row past it moves one index toward the lock
    /// edge and an empty row is appended at the spawn edge.
    ///
    /// Returns false if `y` is out of range.
    pub fn remove_row(&mut self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }

        // copy_within handles the overlapping ranges
        let start = y * WIDTH;
        self.cells.copy_within(start + WIDTH..GRID_SIZE, start);
        self.cells[GRID_SIZE - WIDTH..].fill(EMPTY);

        true
    }

    /// Overwrite a whole row with `cell`.
    pub fn fill_row(&mut self, y: usize, cell: Cell) -> bool {
        if y >= HEIGHT {
            return false;
        }
        self.cells[y * WIDTH..(y + 1) * WIDTH].fill(cell);
        true
    }

    /// Number of filled cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != EMPTY).count()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Export as a 2D array (row-major, y first).
    pub fn write_u8_grid(&self, out: &mut [[u8; WIDTH]; HEIGHT]) {
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(self.row(y));
        }
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Build a grid from textual rows, lock edge first.
    ///
    /// `.` is empty, a digit is that colour id. Rows past the given ones stay
    /// empty. Used by tests and benches.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut grid = Self::new();
        for (y, line) in rows.iter().enumerate().take(HEIGHT) {
            for (x, ch) in line.chars().enumerate().take(WIDTH) {
                let cell = ch.to_digit(10).map(|d| d as Cell).unwrap_or(EMPTY);
                grid.cells[y * WIDTH + x] = cell;
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
    fn test_remove_row_shifts_toward_lock_edge() {
        let mut grid = Grid::from_rows(&[
            "1111111111",
            "2222222222",
            "3.........",
        ]);

        assert!(grid.remove_row(1));

        assert_eq!(grid.row(0), &[1; 10]);
        assert_eq!(grid.get(0, 1), Some(3));
        assert_eq!(grid.occupied_count(), 11);
        assert!(grid.row(19).iter().all(|&c| c == EMPTY));
    }

    #[test]
    fn test_remove_last_row_leaves_empty_spawn_edge() {
        let mut grid = Grid::new();
        grid.fill_row(19, 4);

        assert!(grid.remove_row(19));
        assert_eq!(grid.occupied_count(), 0);
        assert!(!grid.remove_row(20));
    }

    #[test]
    fn test_completed_rows_ascending() {
        let mut grid = Grid::new();
        grid.fill_row(7, 1);
        grid.fill_row(2, 5);
        grid.set(0, 4, 3);

        let rows = grid.completed_rows();
        assert_eq!(rows.as_slice(), &[2, 7]);
    }

    #[test]
    fn test_write_u8_grid() {
        let mut grid = Grid::new();
        grid.set(3, 5, 6);

        let mut out = [[0u8; WIDTH]; HEIGHT];
        grid.write_u8_grid(&mut out);
        assert_eq!(out[5][3], 6);
        assert_eq!(out.iter().flatten().filter(|&&c| c != 0).count(), 1);
    }
}
