//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the game rules and the session state machine. It has
//! no dependencies on terminals, input devices or clocks: time comes in as an
//! elapsed-milliseconds argument and input as abstract [`Command`]s.
//!
//! # Module Structure
//!
//! - [`board`]: settled cells, bounds checks, locking and row clearing
//! - [`pieces`]: the shape catalog and on-demand matrix rotation
//! - [`piece`]: the active piece with gated translate/rotate
//! - [`rules`]: the placement gate used by every move and every spawn
//! - [`game_state`]: spawn, gravity, lock, clear and game-over sequencing
//! - [`rng`]: seeded uniform or 7-bag piece selection
//! - [`snapshot`]: read-only view handed to renderers
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameState, Phase};
//! use blockfall_types::{Command, GameConfig};
//!
//! let mut game = GameState::new(GameConfig::default());
//! game.start();
//!
//! game.apply_command(Command::MoveRight);
//! game.apply_command(Command::Rotate);
//!
//! // One second of gravity moves the piece down one row.
//! let y = game.active().unwrap().y();
//! assert_eq!(game.tick(1000), Ok(Phase::Falling));
//! assert_eq!(game.active().unwrap().y(), y + 1);
//! ```
//!
//! [`Command`]: blockfall_types::Command

pub mod board;
pub mod error;
pub mod game_state;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod rules;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use error::CoreError;
pub use game_state::{GameState, LockEvent, Phase};
pub use piece::{Piece, RotateDirection};
pub use pieces::{get_shape, shape_by_id, shape_of, PieceCells, Shape};
pub use rng::{PieceQueue, SimpleRng};
pub use rules::{is_grounded, is_valid_placement};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
