//! Active falling piece

use crate::board::BOARD_WIDTH;
use crate::tetromino::{PieceKind, Shape, filled_cells, shape_width};

/// A tetromino on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    /// The type of tetromino
    pub kind: PieceKind,
    /// Index into `kind.shapes()`
    rotation: usize,
    /// Column of the shape's top-left corner
    pub x: i32,
    /// Row of the shape's top-left corner, row 0 is the top of the board
    pub y: i32,
}

impl Piece {
    /// Create a piece at spawn position: horizontally centered, top row
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = kind.shapes()[0];
        Self {
            kind,
            rotation: 0,
            x: BOARD_WIDTH as i32 / 2 - shape_width(shape) / 2,
            y: 0,
        }
    }

    pub fn rotation(&self) -> usize {
        self.rotation
    }

    /// The shape for the current rotation
    pub fn shape(&self) -> Shape {
        self.kind.shapes()[self.rotation]
    }

    /// Advance to the next rotation, wrapping around
    pub fn rotate(&mut self) {
        self.rotation = (self.rotation + 1) % self.kind.rotation_count();
    }

    /// Exact inverse of `rotate`
    pub fn undo_rotate(&mut self) {
        let count = self.kind.rotation_count();
        self.rotation = (self.rotation + count - 1) % count;
    }

    /// Board coordinates (x, y) of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells_offset(0, 0)
    }

    /// Board coordinates of every filled cell, shifted by (dx, dy)
    pub fn cells_offset(&self, dx: i32, dy: i32) -> impl Iterator<Item = (i32, i32)> + '_ {
        filled_cells(self.shape()).map(move |(c, r)| (self.x + c + dx, self.y + r + dy))
    }
}
