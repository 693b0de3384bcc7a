//! Piece controller - owns the current and next piece
//!
//! Every request is validated through [`is_valid_placement`] and either
//! committed or rejected; a rejected request leaves the piece untouched.

use crate::collision::is_valid_placement;
use crate::grid::Grid;
use crate::pieces::Piece;
use crate::rng::PieceFactory;
use crate::types::BOARD_HEIGHT;

/// Row step toward the lock edge.
pub const TOWARD_LOCK: i8 = -1;

#[derive(Debug, Clone)]
pub struct PieceController {
    current: Piece,
    next: Piece,
    factory: PieceFactory,
}

impl PieceController {
    /// Create a controller with two freshly generated pieces
    pub fn new(mut factory: PieceFactory) -> Self {
        let current = factory.next_piece();
        let next = factory.next_piece();
        Self {
            current,
            next,
            factory,
        }
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn next(&self) -> &Piece {
        &self.next
    }

    pub fn factory_mut(&mut self) -> &mut PieceFactory {
        &mut self.factory
    }

    pub fn seed(&self) -> u32 {
        self.factory.seed()
    }

    /// Try to shift the current piece
    pub fn try_move(&mut self, grid: &Grid, dx: i8, dy: i8) -> bool {
        let (x, y) = (self.current.x + dx, self.current.y + dy);
        if !is_valid_placement(grid, &self.current.shape, x, y) {
            return false;
        }
        self.current.x = x;
        self.current.y = y;
        true
    }

    /// Rotate clockwise in place; no kicks are attempted
    pub fn try_rotate(&mut self, grid: &Grid) -> bool {
        let rotated = self.current.shape.rotated();
        if !is_valid_placement(grid, &rotated, self.current.x, self.current.y) {
            return false;
        }
        self.current.shape = rotated;
        true
    }

    /// Move toward the lock edge until blocked
    ///
    /// Returns the number of rows travelled. Locking is left to the caller.
    pub fn hard_drop(&mut self, grid: &Grid) -> u32 {
        let mut rows = 0;
        while self.try_move(grid, 0, TOWARD_LOCK) {
            rows += 1;
        }
        rows
    }

    /// Write the current piece's cells into the grid
    ///
    /// Cells outside the grid's rows are dropped. Returns the number of cells
    /// written.
    pub fn merge_into(&self, grid: &mut Grid) -> usize {
        let color = self.current.color();
        let mut written = 0;
        for (x, y) in self.current.cells() {
            if (0..BOARD_HEIGHT as i8).contains(&y) && grid.set(x, y, color) {
                written += 1;
            }
        }
        written
    }

    /// Promote the next piece and generate a new one
    pub fn advance(&mut self) -> &Piece {
        self.current = self.next;
        self.next = self.factory.next_piece();
        &self.current
    }

    /// Replace both pieces with fresh ones
    pub fn reset(&mut self) {
        self.current = self.factory.next_piece();
        self.next = self.factory.next_piece();
    }

    /// Whether the current piece's placement is legal
    pub fn current_fits(&self, grid: &Grid) -> bool {
        self.current.is_valid(grid)
    }

    #[cfg(test)]
    pub(crate) fn set_current(&mut self, piece: Piece) {
        self.current = piece;
    }
}
