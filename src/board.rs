//! Game board representation and collision detection

use crate::piece::Piece;
use crate::tetromino::PieceKind;

/// Board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// A cell on the board - either empty or filled by a locked piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(PieceKind),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

/// The game board
#[derive(Debug, Clone)]
pub struct Board {
    /// Grid stored as [row][col], row 0 is the top
    cells: [[Cell; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    /// Get the cell at (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if !Self::in_bounds(x, y) {
            return None;
        }
        Some(self.cells[y as usize][x as usize])
    }

    /// Set the cell at (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        if !Self::in_bounds(x, y) {
            return false;
        }
        self.cells[y as usize][x as usize] = cell;
        true
    }

    fn in_bounds(x: i32, y: i32) -> bool {
        (0..BOARD_WIDTH as i32).contains(&x) && (0..BOARD_HEIGHT as i32).contains(&y)
    }

    /// Would `piece`, shifted by (dx, dy), hit a wall, the floor or a locked cell?
    ///
    /// Cells above the top row (y < 0) never collide, so a piece may overhang
    /// the top edge.
    pub fn collides(&self, piece: &Piece, dx: i32, dy: i32) -> bool {
        piece.cells_offset(dx, dy).any(|(x, y)| {
            if x < 0 || x >= BOARD_WIDTH as i32 || y >= BOARD_HEIGHT as i32 {
                return true;
            }
            y >= 0 && self.cells[y as usize][x as usize].is_filled()
        })
    }

    /// Lock a piece onto the board; cells outside the grid are dropped
    pub fn lock(&mut self, piece: &Piece) {
        for (x, y) in piece.cells() {
            self.set(x, y, Cell::Filled(piece.kind));
        }
    }

    /// Remove full rows, let the rows above fall, and return the number cleared
    pub fn clear_lines(&mut self) -> usize {
        let mut lines_cleared = 0;
        let mut write_row = BOARD_HEIGHT;

        for read_row in (0..BOARD_HEIGHT).rev() {
            if self.is_line_full(read_row) {
                lines_cleared += 1;
            } else {
                write_row -= 1;
                if write_row != read_row {
                    self.cells[write_row] = self.cells[read_row];
                }
            }
        }

        // Pad the top with empty rows
        for row in 0..write_row {
            self.cells[row] = [Cell::Empty; BOARD_WIDTH];
        }

        lines_cleared
    }

    /// Check if a line is completely filled
    fn is_line_full(&self, row: usize) -> bool {
        self.cells[row].iter().all(|cell| cell.is_filled())
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty()))
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> &[[Cell; BOARD_WIDTH]; BOARD_HEIGHT] {
        &self.cells
    }

    /// Plain occupancy grid, [row][col]
    pub fn occupancy(&self) -> [[bool; BOARD_WIDTH]; BOARD_HEIGHT] {
        self.cells.map(|row| row.map(|cell| cell.is_filled()))
    }
}
