//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: [`GameView`] turns a
//! [`GameSnapshot`](crate::core::GameSnapshot) into a framebuffer of styled
//! characters, and [`TerminalRenderer`] flushes that framebuffer to the real
//! terminal, sending only the cells that changed since the previous frame.
//!
//! The view is pure and unit-tested; only the renderer touches I/O.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
