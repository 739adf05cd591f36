//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into the closed [`crate::types::Command`] set
//! and drains pending terminal events without blocking past the frame
//! deadline. The core never sees a key code.

pub mod map;
pub mod poll;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_restart};
pub use poll::{poll_input, InputBatch, MAX_COMMANDS_PER_FRAME};
