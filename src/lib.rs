//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates as `blockfall::{core,input,term,types}` and
//! hosts the pieces only the binary needs: environment configuration, the
//! file logger and the frame pacer.

pub mod config;
pub mod logger;
pub mod pacing;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
