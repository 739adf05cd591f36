//! Errors raised by the core.
//!
//! Every variant is a programming error: a caller broke a precondition. Expected
//! rejections (a blocked move, a blocked spawn) are plain `bool`/phase results,
//! never a `CoreError`.

#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum CoreError {
    #[error("unknown shape id {0:?}")]
    UnknownShape(String),

    #[error("cell ({x}, {y}) is outside the {cols}x{rows} board")]
    OutOfBounds { x: i16, y: i16, cols: u16, rows: u16 },

    #[error("cannot lock piece: cell ({x}, {y}) is outside the board or already occupied")]
    InvalidLock { x: i16, y: i16 },

    #[error("lock requested with no piece in play")]
    NoActivePiece,

    #[error("game halted after an earlier fault")]
    Halted,
}
