//! Board module - manages the game grid
//!
//! The board is a `cols x rows` grid where each cell is empty or filled with a
//! shape kind (its color tag). Uses a flat row-major vector for cache locality.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.

use crate::error::CoreError;
use crate::piece::Piece;
use crate::types::Cell;

/// The game board - flat row-major storage (y * cols + x)
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![None; cols as usize * rows as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if !self.is_inside_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.cols as usize) + (x as usize))
    }

    /// Width of the board in cells
    pub fn width(&self) -> u16 {
        self.cols
    }

    /// Height of the board in cells
    pub fn height(&self) -> u16 {
        self.rows
    }

    /// True iff `0 <= x < cols` and `0 <= y < rows`
    #[inline]
    pub fn is_inside_bounds(&self, x: i16, y: i16) -> bool {
        x >= 0 && y >= 0 && (x as u16) < self.cols && (y as u16) < self.rows
    }

    /// Whether the cell at (x, y) is filled.
    ///
    /// Out-of-bounds coordinates are a caller bug and yield
    /// [`CoreError::OutOfBounds`]; check [`Board::is_inside_bounds`] first.
    pub fn is_occupied(&self, x: i16, y: i16) -> Result<bool, CoreError> {
        match self.index(x, y) {
            Some(idx) => Ok(self.cells[idx].is_some()),
            None => Err(CoreError::OutOfBounds {
                x,
                y,
                cols: self.cols,
                rows: self.rows,
            }),
        }
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i16, y: i16) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i16, y: i16, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Cells of row `y`, left to right
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.rows as usize {
            return None;
        }
        let start = y * self.cols as usize;
        Some(&self.cells[start..start + self.cols as usize])
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.cols as usize)
    }

    /// Write the piece's cells into the board, tagged with its shape kind.
    ///
    /// The placement must already have passed
    /// [`is_valid_placement`](crate::rules::is_valid_placement). A piece that is
    /// out of bounds or overlapping yields [`CoreError::InvalidLock`] and the
    /// board is left untouched.
    pub fn lock(&mut self, piece: &Piece) -> Result<(), CoreError> {
        let cells = piece.cells();

        for &(x, y) in &cells {
            if !matches!(self.get(x, y), Some(None)) {
                return Err(CoreError::InvalidLock { x, y });
            }
        }

        let kind = piece.kind();
        for &(x, y) in &cells {
            self.set(x, y, Some(kind));
        }
        Ok(())
    }

    /// Clear all full rows in one pass and return how many were removed.
    ///
    /// Two-pointer compaction from the bottom up: every kept row moves down by
    /// the number of full rows below it, then the vacated top rows are emptied.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = self.cols as usize;
        let height = self.rows as usize;
        let mut write_y = height;
        let mut cleared = 0;

        for read_y in (0..height).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        self.cells[..write_y * width].fill(None);
        cleared
    }

    /// Number of filled cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build a board from text rows: `.` is empty, a shape letter is filled.
    ///
    /// Handy for fixtures; unknown characters count as empty.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let height = rows.len() as u16;
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u16;
        let mut board = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let cell = crate::types::ShapeKind::from_str(&ch.to_string());
                board.set(x as i16, y as i16, cell);
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_COLS, crate::types::DEFAULT_ROWS)
    }
}
