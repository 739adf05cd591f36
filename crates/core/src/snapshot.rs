use crate::game_state::Phase;
use crate::pieces::PieceCells;
use crate::types::{Cell, ShapeKind};

/// The falling piece as renderers see it: absolute cells plus color tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub cells: PieceCells,
    /// The piece rests on the stack or floor and locks on the next gravity step
    pub grounded: bool,
}

/// Read-only view of a game, safe to hand to any renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub width: u16,
    pub height: u16,
    /// Row-major board cells (`y * width + x`)
    pub board: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub next: Option<ShapeKind>,
    pub phase: Phase,
    pub game_over: bool,
    pub lines: u32,
    pub pieces: u32,
}

impl GameSnapshot {
    /// Board cell at (x, y); `None` when out of range
    pub fn cell(&self, x: u16, y: u16) -> Option<Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.board
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            board: Vec::new(),
            active: None,
            next: None,
            phase: Phase::Spawning,
            game_over: false,
            lines: 0,
            pieces: 0,
        }
    }
}
