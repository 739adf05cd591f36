//! Non-blocking event draining.
//!
//! Waits at most until the frame deadline for the first event, then takes
//! everything else already queued without waiting.

use std::time::Duration;

use anyhow::Result;
use arrayvec::ArrayVec;
use crossterm::event::{self, Event, KeyEvent};

use crate::map::{handle_key_event, should_restart};
use crate::types::Command;

/// Commands kept per frame; anything beyond is dropped
pub const MAX_COMMANDS_PER_FRAME: usize = 16;

/// Everything the terminal reported during one poll.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBatch {
    pub commands: ArrayVec<Command, MAX_COMMANDS_PER_FRAME>,
    pub restart: bool,
    pub resized: bool,
}

impl InputBatch {
    /// Fold one key event into the batch
    pub fn push_key(&mut self, key: KeyEvent) {
        if should_restart(key) {
            self.restart = true;
        } else if let Some(command) = handle_key_event(key) {
            // Quit must survive a full buffer.
            if command == Command::Quit && self.commands.is_full() {
                self.commands.pop();
            }
            let _ = self.commands.try_push(command);
        }
    }

    pub fn quit(&self) -> bool {
        self.commands.contains(&Command::Quit)
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && !self.restart && !self.resized
    }
}

/// Collect pending terminal events, waiting no longer than `timeout`.
pub fn poll_input(timeout: Duration) -> Result<InputBatch> {
    let mut batch = InputBatch::default();
    let mut wait = timeout;

    while event::poll(wait)? {
        match event::read()? {
            Event::Key(key) => batch.push_key(key),
            Event::Resize(_, _) => batch.resized = true,
            _ => {}
        }
        wait = Duration::ZERO;
    }

    Ok(batch)
}
