//! Piece shapes - the seven canonical matrices and their rotation
//!
//! Shapes are square matrices (side 2, 3 or 4) stored in a fixed 4x4 buffer.
//! A nonzero entry is an occupied cell and carries the piece's colour id.
//! Rotation is transpose-and-reverse: `rotated[col][n-1-row] = original[row][col]`.

use crate::collision::{absolute_cells, is_valid_placement};
use crate::grid::Grid;
use crate::types::{Cell, PieceKind, BOARD_WIDTH, EMPTY, SPAWN_EDGE_ROW};

/// Largest shape side (the I piece).
pub const MAX_SHAPE_SIZE: usize = 4;

/// Square shape matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    cells: [[Cell; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from the top-left `size` x `size` block of `cells`.
    ///
    /// Entries outside that block are ignored.
    pub const fn new(size: u8, cells: [[Cell; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE]) -> Self {
        let mut masked = [[EMPTY; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut row = 0;
        while row < size as usize {
            let mut col = 0;
            while col < size as usize {
                masked[row][col] = cells[row][col];
                col += 1;
            }
            row += 1;
        }
        Self {
            size,
            cells: masked,
        }
    }

    /// Side length of the matrix
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Value at local (row, col), `EMPTY` outside the matrix.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        if row >= self.size as usize || col >= self.size as usize {
            return EMPTY;
        }
        self.cells[row][col]
    }

    /// Matrix rows (each `size` long)
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells[..self.size as usize]
            .iter()
            .map(move |r| &r[..self.size as usize])
    }

    /// Local (row, col) of every occupied cell
    pub fn occupied(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        let n = self.size as usize;
        (0..n).flat_map(move |row| {
            (0..n)
                .filter(move |&col| self.cells[row][col] != EMPTY)
                .map(move |col| (row as u8, col as u8))
        })
    }

    /// 90° clockwise rotation
    pub fn rotated(&self) -> Self {
        let n = self.size as usize;
        let mut out = [[EMPTY; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (row, line) in self.cells.iter().enumerate().take(n) {
            for (col, &cell) in line.iter().enumerate().take(n) {
                out[col][n - 1 - row] = cell;
            }
        }
        Self {
            size: self.size,
            cells: out,
        }
    }
}

const I_SHAPE: Shape = Shape::new(4, [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]);
const O_SHAPE: Shape = Shape::new(2, [[2, 2, 0, 0], [2, 2, 0, 0], [0; 4], [0; 4]]);
const T_SHAPE: Shape = Shape::new(3, [[0, 3, 0, 0], [3, 3, 3, 0], [0; 4], [0; 4]]);
const S_SHAPE: Shape = Shape::new(3, [[0, 4, 4, 0], [4, 4, 0, 0], [0; 4], [0; 4]]);
const Z_SHAPE: Shape = Shape::new(3, [[5, 5, 0, 0], [0, 5, 5, 0], [0; 4], [0; 4]]);
const J_SHAPE: Shape = Shape::new(3, [[6, 0, 0, 0], [6, 6, 6, 0], [0; 4], [0; 4]]);
const L_SHAPE: Shape = Shape::new(3, [[0, 0, 7, 0], [7, 7, 7, 0], [0; 4], [0; 4]]);

/// Spawn orientation of a piece kind
pub fn get_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::Z => Z_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
    }
}

/// A piece in play: shape, anchor and kind
///
/// The anchor is the grid position of the shape's local (0, 0). Local rows
/// count toward the lock edge: `abs_y = y - row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece at its spawn position: horizontally centred, anchored
    /// on the spawn edge
    pub fn new(kind: PieceKind) -> Self {
        let shape = get_shape(kind);
        Self {
            kind,
            shape,
            x: (BOARD_WIDTH / 2) as i8 - (shape.size() / 2) as i8,
            y: SPAWN_EDGE_ROW,
        }
    }

    pub fn color(&self) -> Cell {
        self.kind.color()
    }

    /// Absolute grid coordinates of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        absolute_cells(&self.shape, self.x, self.y)
    }

    /// Check if the piece sits at a legal placement
    pub fn is_valid(&self, grid: &Grid) -> bool {
        is_valid_placement(grid, &self.shape, self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_position_is_centred_on_spawn_edge() {
        let i = Piece::new(PieceKind::I);
        assert_eq!((i.x, i.y), (3, 19));

        let o = Piece::new(PieceKind::O);
        assert_eq!((o.x, o.y), (4, 19));

        let t = Piece::new(PieceKind::T);
        assert_eq!((t.x, t.y), (4, 19));
        assert!(t.is_valid(&Grid::new()));
    }

    #[test]
    fn test_piece_cells_use_inverted_rows() {
        let t = Piece::new(PieceKind::T);
        let mut cells: Vec<(i8, i8)> = t.cells().collect();
        cells.sort();
        assert_eq!(cells, vec![(4, 18), (5, 18), (5, 19), (6, 18)]);
    }

    #[test]
    fn test_every_shape_has_four_cells_of_its_color() {
        for kind in PieceKind::ALL {
            let shape = get_shape(kind);
            assert_eq!(shape.occupied().count(), 4, "{:?}", kind);
            for (row, col) in shape.occupied() {
                assert_eq!(shape.get(row as usize, col as usize), kind.color());
            }
        }
    }

    #[test]
    fn test_rotate_t_clockwise() {
        let rotated = get_shape(PieceKind::T).rotated();
        let rows: Vec<&[Cell]> = rotated.rows().collect();
        assert_eq!(rows, vec![&[0, 3, 0][..], &[0, 3, 3][..], &[0, 3, 0][..]]);
    }

    #[test]
    fn test_rotate_i_is_vertical() {
        let rotated = get_shape(PieceKind::I).rotated();
        let cells: Vec<(u8, u8)> = rotated.occupied().collect();
        assert_eq!(cells, vec![(0, 2), (1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn test_o_rotation_is_identity() {
        let o = get_shape(PieceKind::O);
        assert_eq!(o.rotated(), o);
    }

    #[test]
    fn test_new_masks_outside_size() {
        let shape = Shape::new(2, [[1, 1, 1, 1], [1, 1, 1, 1], [1; 4], [1; 4]]);
        assert_eq!(shape.occupied().count(), 4);
        assert_eq!(shape.get(2, 2), EMPTY);
    }
}
