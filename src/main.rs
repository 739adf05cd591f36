//! Terminal blockfall runner (default binary).
//!
//! Single-threaded loop: render, poll input until the frame deadline, apply
//! commands, then advance the game clock by the frame's elapsed time.

use std::time::Instant;

use anyhow::Result;
use log::{error, info};

use blockfall::config::AppConfig;
use blockfall::core::{GameSnapshot, GameState};
use blockfall::input::poll_input;
use blockfall::logger;
use blockfall::pacing::FramePacer;
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    if let Some(path) = &config.log_path {
        logger::init(path)?;
    }
    info!("starting with {:?}", config);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        error!("exiting with error: {e:#}");
    }
    result
}

fn run(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let mut game = GameState::new(config.game);
    game.start();

    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut pacer = FramePacer::new(config.frame_ms, Instant::now());

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let batch = poll_input(pacer.time_until_deadline(Instant::now()))?;
        if batch.resized {
            term.invalidate();
        }
        for &command in &batch.commands {
            game.apply_command(command);
        }
        if game.quit_requested() {
            info!("quit after {} lines", game.lines());
            return Ok(());
        }
        if batch.restart {
            game.reset();
        }

        if let Some(elapsed_ms) = pacer.frame_elapsed(Instant::now()) {
            game.tick(elapsed_ms)?;
            if let Some(event) = game.take_last_event() {
                if event.lines_cleared > 0 {
                    info!("{:?} cleared {} line(s)", event.kind, event.lines_cleared);
                }
            }
        }
    }
}
