//! Collision and placement rules.
//!
//! [`is_valid_placement`] is the only gate between a requested move and the
//! piece state; every mutating piece operation and every spawn goes through it.

use crate::board::Board;
use crate::piece::Piece;
use crate::pieces::MinoOffset;

/// True iff every cell is inside the board and not occupied.
pub fn is_valid_placement(board: &Board, cells: &[MinoOffset]) -> bool {
    cells
        .iter()
        .all(|&(x, y)| board.is_inside_bounds(x, y) && board.is_occupied(x, y) == Ok(false))
}

/// True if the piece cannot move one row down
pub fn is_grounded(board: &Board, piece: &Piece) -> bool {
    !is_valid_placement(board, &piece.cells_at(0, 1, piece.rotation()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Rotation, ShapeKind};

    #[test]
    fn test_empty_board_accepts_inside_cells() {
        let board = Board::new(10, 20);
        assert!(is_valid_placement(&board, &[(0, 0), (9, 19), (5, 10)]));
        assert!(is_valid_placement(&board, &[]));
    }

    #[test]
    fn test_rejects_out_of_bounds_and_overlap() {
        let mut board = Board::new(10, 20);
        assert!(!is_valid_placement(&board, &[(0, 0), (-1, 0)]));
        assert!(!is_valid_placement(&board, &[(10, 0)]));
        assert!(!is_valid_placement(&board, &[(0, 20)]));
        assert!(!is_valid_placement(&board, &[(0, -1)]));

        board.set(4, 4, Some(ShapeKind::S));
        assert!(!is_valid_placement(&board, &[(3, 4), (4, 4)]));
    }

    #[test]
    fn test_grounded_on_floor_and_stack() {
        let mut board = Board::new(10, 20);
        let floor = Piece::new(ShapeKind::O, Rotation::North, 0, 18);
        assert!(is_grounded(&board, &floor));

        let air = Piece::new(ShapeKind::O, Rotation::North, 0, 10);
        assert!(!is_grounded(&board, &air));

        board.set(1, 12, Some(ShapeKind::J));
        assert!(is_grounded(&board, &air));
    }
}
