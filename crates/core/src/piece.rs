//! The active falling piece.

use crate::board::Board;
use crate::pieces::{shape_of, PieceCells, Shape};
use crate::rules::is_valid_placement;
use crate::types::{Rotation, ShapeKind};

/// Rotation direction for [`Piece::rotate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateDirection {
    Clockwise,
    CounterClockwise,
}

impl RotateDirection {
    fn apply(self, rotation: Rotation) -> Rotation {
        match self {
            RotateDirection::Clockwise => rotation.rotate_cw(),
            RotateDirection::CounterClockwise => rotation.rotate_ccw(),
        }
    }
}

/// A shape placed on the board: origin of its bounding box plus a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    shape: &'static Shape,
    rotation: Rotation,
    x: i16,
    y: i16,
}

impl Piece {
    /// Piece at an explicit position
    pub fn new(kind: ShapeKind, rotation: Rotation, x: i16, y: i16) -> Self {
        Self {
            shape: shape_of(kind),
            rotation,
            x,
            y,
        }
    }

    /// Rotation-0 piece centered horizontally on the top row
    pub fn spawn(kind: ShapeKind, board_cols: u16) -> Self {
        let size = shape_of(kind).size() as i16;
        let x = (board_cols as i16 - size) / 2;
        Self::new(kind, Rotation::North, x, 0)
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn x(&self) -> i16 {
        self.x
    }

    pub fn y(&self) -> i16 {
        self.y
    }

    /// Absolute cells if the piece were moved by (dx, dy) and set to `rotation`.
    pub fn cells_at(&self, dx: i16, dy: i16, rotation: Rotation) -> PieceCells {
        let mut cells = self.shape.cells(rotation);
        for (cx, cy) in cells.iter_mut() {
            *cx += self.x + dx;
            *cy += self.y + dy;
        }
        cells
    }

    /// Absolute cells at the current position and rotation
    pub fn cells(&self) -> PieceCells {
        self.cells_at(0, 0, self.rotation)
    }

    /// Whether the current placement is legal on `board`
    pub fn fits(&self, board: &Board) -> bool {
        is_valid_placement(board, &self.cells())
    }

    /// Move by (dx, dy) if the target placement is legal.
    /// Returns false (and leaves the piece alone) when blocked.
    pub fn translate(&mut self, dx: i16, dy: i16, board: &Board) -> bool {
        if !is_valid_placement(board, &self.cells_at(dx, dy, self.rotation)) {
            return false;
        }
        self.x += dx;
        self.y += dy;
        true
    }

    /// Rotate in place if the rotated cells fit. No kicks are attempted.
    pub fn rotate(&mut self, direction: RotateDirection, board: &Board) -> bool {
        let target = direction.apply(self.rotation);
        if !is_valid_placement(board, &self.cells_at(0, 0, target)) {
            return false;
        }
        self.rotation = target;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_is_top_center() {
        let t = Piece::spawn(ShapeKind::T, 10);
        assert_eq!((t.x(), t.y()), (3, 0));
        assert_eq!(t.rotation(), Rotation::North);

        let o = Piece::spawn(ShapeKind::O, 10);
        assert_eq!(o.x(), 4);
        assert_eq!(o.cells().as_slice(), &[(4, 0), (5, 0), (4, 1), (5, 1)]);

        let i = Piece::spawn(ShapeKind::I, 10);
        assert_eq!(i.x(), 3);
    }

    #[test]
    fn test_cells_at_does_not_mutate() {
        let piece = Piece::spawn(ShapeKind::L, 10);
        let moved = piece.cells_at(2, 5, Rotation::South);
        assert_eq!(piece.cells(), Piece::spawn(ShapeKind::L, 10).cells());
        assert!(moved.iter().all(|&(_, y)| y >= 5));
    }

    #[test]
    fn test_translate_rejected_at_wall() {
        let board = Board::new(10, 20);
        let mut piece = Piece::new(ShapeKind::O, Rotation::North, 0, 0);
        assert!(!piece.translate(-1, 0, &board));
        assert_eq!(piece.x(), 0);
        assert!(piece.translate(1, 0, &board));
        assert_eq!(piece.x(), 1);
    }

    #[test]
    fn test_rotate_rejected_when_blocked() {
        let mut board = Board::new(10, 20);
        let mut piece = Piece::new(ShapeKind::I, Rotation::North, 3, 0);
        // East rotation occupies column 5, rows 0..4
        board.set(5, 3, Some(ShapeKind::O));
        assert!(!piece.rotate(RotateDirection::Clockwise, &board));
        assert_eq!(piece.rotation(), Rotation::North);

        board.clear();
        assert!(piece.rotate(RotateDirection::Clockwise, &board));
        assert_eq!(piece.rotation(), Rotation::East);
    }
}
