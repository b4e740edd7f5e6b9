//! Tetromino kinds and their precomputed rotation shapes
//!
//! Every shape is a small row-major matrix anchored at its top-left corner.
//! Row index grows downward, matching the board.

use ratatui::style::Color;

/// One rotation of a piece: rows of cells, `1` is filled
pub type Shape = &'static [&'static [u8]];

const I_SHAPES: &[Shape] = &[&[&[1, 1, 1, 1]], &[&[1], &[1], &[1], &[1]]];

const O_SHAPES: &[Shape] = &[&[&[1, 1], &[1, 1]]];

const T_SHAPES: &[Shape] = &[
    &[&[0, 1, 0], &[1, 1, 1]],
    &[&[1, 0], &[1, 1], &[1, 0]],
    &[&[1, 1, 1], &[0, 1, 0]],
    &[&[0, 1], &[1, 1], &[0, 1]],
];

const S_SHAPES: &[Shape] = &[&[&[0, 1, 1], &[1, 1, 0]], &[&[1, 0], &[1, 1], &[0, 1]]];

const Z_SHAPES: &[Shape] = &[&[&[1, 1, 0], &[0, 1, 1]], &[&[0, 1], &[1, 1], &[1, 0]]];

const J_SHAPES: &[Shape] = &[
    &[&[1, 0, 0], &[1, 1, 1]],
    &[&[1, 1], &[1, 0], &[1, 0]],
    &[&[1, 1, 1], &[0, 0, 1]],
    &[&[0, 1], &[0, 1], &[1, 1]],
];

const L_SHAPES: &[Shape] = &[
    &[&[0, 0, 1], &[1, 1, 1]],
    &[&[1, 0], &[1, 0], &[1, 1]],
    &[&[1, 1, 1], &[1, 0, 0]],
    &[&[1, 1], &[0, 1], &[0, 1]],
];

/// The 7 tetromino kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in a fixed order (used to fill the bag)
    pub fn all() -> [PieceKind; 7] {
        [
            PieceKind::I,
            PieceKind::O,
            PieceKind::T,
            PieceKind::S,
            PieceKind::Z,
            PieceKind::J,
            PieceKind::L,
        ]
    }

    /// Ordered rotation shapes for this kind
    pub fn shapes(&self) -> &'static [Shape] {
        match self {
            PieceKind::I => I_SHAPES,
            PieceKind::O => O_SHAPES,
            PieceKind::T => T_SHAPES,
            PieceKind::S => S_SHAPES,
            PieceKind::Z => Z_SHAPES,
            PieceKind::J => J_SHAPES,
            PieceKind::L => L_SHAPES,
        }
    }

    pub fn rotation_count(&self) -> usize {
        self.shapes().len()
    }

    pub fn color(&self) -> Color {
        match self {
            PieceKind::I => Color::Cyan,
            PieceKind::O => Color::Yellow,
            PieceKind::T => Color::Magenta,
            PieceKind::S => Color::Green,
            PieceKind::Z => Color::Red,
            PieceKind::J => Color::Blue,
            PieceKind::L => Color::Rgb(255, 165, 0), // Orange
        }
    }
}

/// Width of a shape in cells
pub fn shape_width(shape: Shape) -> i32 {
    shape.first().map_or(0, |row| row.len() as i32)
}

/// Filled cells of a shape as (col, row) offsets from its top-left corner
pub fn filled_cells(shape: Shape) -> impl Iterator<Item = (i32, i32)> {
    shape.iter().enumerate().flat_map(|(r, row)| {
        row.iter()
            .enumerate()
            .filter(|&(_, &val)| val != 0)
            .map(move |(c, _)| (c as i32, r as i32))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_shape_has_four_cells() {
        for kind in PieceKind::all() {
            for &shape in kind.shapes() {
                assert_eq!(filled_cells(shape).count(), 4, "{:?}", kind);
            }
        }
    }

    #[test]
    fn test_shapes_are_rectangular() {
        for kind in PieceKind::all() {
            for &shape in kind.shapes() {
                let width = shape_width(shape) as usize;
                assert!(shape.iter().all(|row| row.len() == width));
            }
        }
    }

    #[test]
    fn test_rotation_counts() {
        assert_eq!(PieceKind::I.rotation_count(), 2);
        assert_eq!(PieceKind::O.rotation_count(), 1);
        assert_eq!(PieceKind::T.rotation_count(), 4);
        assert_eq!(PieceKind::S.rotation_count(), 2);
        assert_eq!(PieceKind::Z.rotation_count(), 2);
        assert_eq!(PieceKind::J.rotation_count(), 4);
        assert_eq!(PieceKind::L.rotation_count(), 4);
    }

    #[test]
    fn test_filled_cells_offsets() {
        let cells: Vec<_> = filled_cells(PieceKind::T.shapes()[0]).collect();
        assert_eq!(cells, vec![(1, 0), (0, 1), (1, 1), (2, 1)]);
    }
}
