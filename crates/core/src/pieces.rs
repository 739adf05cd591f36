//! Pieces module - the shape catalog
//!
//! Each tetromino is stored once, as its rotation-0 matrix inside a square
//! bounding box. Other rotations are derived on demand by turning the matrix
//! clockwise inside that box, so four turns always land back on the original
//! cell set. There is no wall-kick table: a rotation either fits in place or
//! is rejected.

use arrayvec::ArrayVec;

use crate::error::CoreError;
use crate::types::{Rotation, ShapeKind};

/// Offset of a single mino, either relative to the shape box or absolute on the board
pub type MinoOffset = (i16, i16);

/// The occupied cells of one piece (always four for the tetromino catalog)
pub type PieceCells = ArrayVec<MinoOffset, 4>;

/// Immutable rotation-0 shape matrix.
#[derive(Debug, PartialEq, Eq)]
pub struct Shape {
    kind: ShapeKind,
    /// Side of the square bounding box
    size: u8,
    /// Row-major matrix; only the top-left `size x size` part is meaningful
    matrix: [[u8; 4]; 4],
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Side length of the bounding box
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Whether the rotation-0 matrix is filled at (x, y)
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        x < self.size as usize && y < self.size as usize && self.matrix[y][x] != 0
    }

    /// Relative cells for `rotation`, sorted row-major (by y, then x).
    pub fn cells(&self, rotation: Rotation) -> PieceCells {
        let n = self.size as i16;
        let turns = rotation.index();
        let mut out = PieceCells::new();

        for y in 0..n {
            for x in 0..n {
                if !self.is_filled(x as usize, y as usize) {
                    continue;
                }
                let (mut rx, mut ry) = (x, y);
                for _ in 0..turns {
                    // Clockwise quarter turn inside the n x n box.
                    (rx, ry) = (n - 1 - ry, rx);
                }
                out.push((rx, ry));
            }
        }

        out.sort_unstable_by_key(|&(x, y)| (y, x));
        out
    }
}

static I_SHAPE: Shape = Shape {
    kind: ShapeKind::I,
    size: 4,
    matrix: [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
};

static O_SHAPE: Shape = Shape {
    kind: ShapeKind::O,
    size: 2,
    matrix: [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]],
};

static T_SHAPE: Shape = Shape {
    kind: ShapeKind::T,
    size: 3,
    matrix: [[0, 1, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]],
};

static S_SHAPE: Shape = Shape {
    kind: ShapeKind::S,
    size: 3,
    matrix: [[0, 1, 1, 0], [1, 1, 0, 0], [0; 4], [0; 4]],
};

static Z_SHAPE: Shape = Shape {
    kind: ShapeKind::Z,
    size: 3,
    matrix: [[1, 1, 0, 0], [0, 1, 1, 0], [0; 4], [0; 4]],
};

static J_SHAPE: Shape = Shape {
    kind: ShapeKind::J,
    size: 3,
    matrix: [[1, 0, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]],
};

static L_SHAPE: Shape = Shape {
    kind: ShapeKind::L,
    size: 3,
    matrix: [[0, 0, 1, 0], [1, 1, 1, 0], [0; 4], [0; 4]],
};

/// Rotation-0 shape for a kind
pub fn shape_of(kind: ShapeKind) -> &'static Shape {
    match kind {
        ShapeKind::I => &I_SHAPE,
        ShapeKind::O => &O_SHAPE,
        ShapeKind::T => &T_SHAPE,
        ShapeKind::S => &S_SHAPE,
        ShapeKind::Z => &Z_SHAPE,
        ShapeKind::J => &J_SHAPE,
        ShapeKind::L => &L_SHAPE,
    }
}

/// Look a shape up by its letter id (case-insensitive)
pub fn shape_by_id(id: &str) -> Result<&'static Shape, CoreError> {
    ShapeKind::from_str(id)
        .map(shape_of)
        .ok_or_else(|| CoreError::UnknownShape(id.to_string()))
}

/// Relative cells of `kind` at `rotation`
pub fn get_shape(kind: ShapeKind, rotation: Rotation) -> PieceCells {
    shape_of(kind).cells(rotation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_t_rotations() {
        assert_eq!(
            get_shape(ShapeKind::T, Rotation::North).as_slice(),
            &[(1, 0), (0, 1), (1, 1), (2, 1)]
        );
        assert_eq!(
            get_shape(ShapeKind::T, Rotation::East).as_slice(),
            &[(1, 0), (1, 1), (2, 1), (1, 2)]
        );
        assert_eq!(
            get_shape(ShapeKind::T, Rotation::South).as_slice(),
            &[(0, 1), (1, 1), (2, 1), (1, 2)]
        );
        assert_eq!(
            get_shape(ShapeKind::T, Rotation::West).as_slice(),
            &[(1, 0), (0, 1), (1, 1), (1, 2)]
        );
    }

    #[test]
    fn test_i_vertical() {
        assert_eq!(
            get_shape(ShapeKind::I, Rotation::East).as_slice(),
            &[(2, 0), (2, 1), (2, 2), (2, 3)]
        );
    }

    #[test]
    fn test_o_is_rotation_invariant() {
        let north = get_shape(ShapeKind::O, Rotation::North);
        for rotation in [Rotation::East, Rotation::South, Rotation::West] {
            assert_eq!(get_shape(ShapeKind::O, rotation), north);
        }
    }

    #[test]
    fn test_shape_by_id() {
        assert_eq!(shape_by_id("z").unwrap().kind(), ShapeKind::Z);
        assert_eq!(
            shape_by_id("X"),
            Err(CoreError::UnknownShape("X".to_string()))
        );
    }
}
