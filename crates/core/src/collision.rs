//! Placement validation against the grid
//!
//! Local shape rows map onto the grid inverted: a cell at local (row, col)
//! of a shape anchored at (x, y) lands on `(x + col, y - row)`. Every
//! placement check, the lock merge and the renderer go through
//! [`absolute_cells`], so the inversion lives in exactly one place.

use crate::grid::Grid;
use crate::pieces::Shape;

/// Absolute (x, y) of every occupied shape cell at the given anchor
pub fn absolute_cells(shape: &Shape, x: i8, y: i8) -> impl Iterator<Item = (i8, i8)> + '_ {
    shape
        .occupied()
        .map(move |(row, col)| (x + col as i8, y - row as i8))
}

/// True only if every occupied cell is in bounds and lands on an empty cell
pub fn is_valid_placement(grid: &Grid, shape: &Shape, x: i8, y: i8) -> bool {
    absolute_cells(shape, x, y).all(|(cx, cy)| grid.is_vacant(cx, cy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::get_shape;
    use crate::types::PieceKind;

    #[test]
    fn test_empty_grid_accepts_spawn() {
        let grid = Grid::new();
        let shape = get_shape(PieceKind::L);
        assert!(is_valid_placement(&grid, &shape, 4, 19));
    }

    #[test]
    fn test_rejects_past_lock_edge() {
        let grid = Grid::new();
        let shape = get_shape(PieceKind::T);
        // Row 1 of the shape lands on y - 1.
        assert!(is_valid_placement(&grid, &shape, 4, 1));
        assert!(!is_valid_placement(&grid, &shape, 4, 0));
    }

    #[test]
    fn test_rejects_past_spawn_edge() {
        let grid = Grid::new();
        let shape = get_shape(PieceKind::O);
        assert!(!is_valid_placement(&grid, &shape, 4, 20));
    }

    #[test]
    fn test_empty_matrix_rows_do_not_collide() {
        // The I piece's first matrix row is empty, so anchoring it one past
        // the spawn edge is still legal.
        let grid = Grid::new();
        let shape = get_shape(PieceKind::I);
        assert!(is_valid_placement(&grid, &shape, 3, 20));
    }

    #[test]
    fn test_rejects_horizontal_overflow() {
        let grid = Grid::new();
        let shape = get_shape(PieceKind::I);
        assert!(is_valid_placement(&grid, &shape, 6, 10));
        assert!(!is_valid_placement(&grid, &shape, 7, 10));
        assert!(!is_valid_placement(&grid, &shape, -1, 10));
    }

    #[test]
    fn test_rejects_occupied_cell() {
        let mut grid = Grid::new();
        grid.set(5, 18, 1);
        let shape = get_shape(PieceKind::T);
        assert!(!is_valid_placement(&grid, &shape, 4, 19));
        assert!(is_valid_placement(&grid, &shape, 6, 19));
    }
}
