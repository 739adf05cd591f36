//! Game state module - the state machine that drives one game session
//!
//! Ties together the board, the active piece, the piece queue and the gravity
//! clock. The session moves through
//! `Spawning -> Falling -> Locking -> Clearing -> (Spawning | GameOver)`.
//!
//! [`GameState::tick`] is called once per frame with the elapsed time. Gravity
//! accumulates that time and moves the piece one row per full interval, so the
//! game runs at the same speed whatever the frame rate. The transient phases
//! (`Locking`, `Clearing`, `Spawning`) complete inside the same call, which
//! means callers only ever observe `Falling` with a piece in play, or
//! `GameOver`.

use log::{debug, error, info};

use crate::board::Board;
use crate::error::CoreError;
use crate::piece::{Piece, RotateDirection};
use crate::rng::PieceQueue;
use crate::rules::is_grounded;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Command, GameConfig, ShapeKind};

/// State machine phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Spawning,
    Falling,
    Locking,
    Clearing,
    GameOver,
}

/// What the most recent lock did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: ShapeKind,
    pub lines_cleared: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    active: Option<Piece>,
    phase: Phase,
    piece_queue: PieceQueue,
    /// Elapsed time not yet spent on gravity steps
    gravity_timer_ms: u32,
    soft_drop: bool,
    quit_requested: bool,
    /// Monotonic episode id (increments on reset)
    episode_id: u32,
    lines: u32,
    pieces: u32,
    last_event: Option<LockEvent>,
    /// Set once a broken invariant is detected; the game refuses to advance after that
    fault: Option<CoreError>,
}

impl GameState {
    /// Create a new game on an empty board. No piece is in play until
    /// [`start`](Self::start) or the first [`tick`](Self::tick).
    pub fn new(config: GameConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid config: {config:?}");
        let board = Board::new(config.cols, config.rows);
        Self::with_board(config, board)
    }

    /// Create a game on a prepared board. The board's dimensions win over the
    /// ones in `config`.
    pub fn with_board(config: GameConfig, board: Board) -> Self {
        let config = GameConfig {
            cols: board.width(),
            rows: board.height(),
            ..config
        };
        Self {
            config,
            board,
            active: None,
            phase: Phase::Spawning,
            piece_queue: PieceQueue::new(config.randomizer, config.seed),
            gravity_timer_ms: 0,
            soft_drop: false,
            quit_requested: false,
            episode_id: 0,
            lines: 0,
            pieces: 0,
            last_event: None,
            fault: None,
        }
    }

    /// Spawn the first piece
    pub fn start(&mut self) {
        if self.phase == Phase::Spawning && self.fault.is_none() {
            self.spawn_piece();
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn is_soft_dropping(&self) -> bool {
        self.soft_drop
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    /// Total rows cleared this game
    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Total pieces locked this game
    pub fn pieces(&self) -> u32 {
        self.pieces
    }

    pub fn fault(&self) -> Option<&CoreError> {
        self.fault.as_ref()
    }

    /// Shape the next spawn will use
    pub fn next_kind(&self) -> ShapeKind {
        self.piece_queue.peek()
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Gravity interval in effect right now
    pub fn gravity_interval_ms(&self) -> u32 {
        self.config.gravity_interval_ms(self.soft_drop)
    }

    /// Put `piece` in play, replacing any current piece.
    ///
    /// Goes through the placement gate like every other move: returns false and
    /// changes nothing if the piece does not fit or the game is over.
    pub fn place_active(&mut self, piece: Piece) -> bool {
        if self.game_over() || self.fault.is_some() || !piece.fits(&self.board) {
            return false;
        }
        self.active = Some(piece);
        self.phase = Phase::Falling;
        self.gravity_timer_ms = 0;
        true
    }

    /// Apply an abstract input command.
    ///
    /// Returns true when the command changed the state. Blocked moves and
    /// commands outside the `Falling` phase are silently rejected.
    pub fn apply_command(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.with_active(|piece, board| piece.translate(-1, 0, board)),
            Command::MoveRight => self.with_active(|piece, board| piece.translate(1, 0, board)),
            Command::Rotate => {
                self.with_active(|piece, board| piece.rotate(RotateDirection::Clockwise, board))
            }
            Command::SoftDropToggle => {
                if !self.in_play() {
                    return false;
                }
                self.soft_drop = !self.soft_drop;
                // Keep accumulated time, capped at one step of the new interval.
                self.gravity_timer_ms = self.gravity_timer_ms.min(self.gravity_interval_ms());
                true
            }
            Command::Quit => {
                self.quit_requested = true;
                true
            }
        }
    }

    fn in_play(&self) -> bool {
        self.phase == Phase::Falling && self.active.is_some() && self.fault.is_none()
    }

    fn with_active(&mut self, f: impl FnOnce(&mut Piece, &Board) -> bool) -> bool {
        if !self.in_play() {
            return false;
        }
        match self.active.as_mut() {
            Some(piece) => f(piece, &self.board),
            None => false,
        }
    }

    /// Advance the simulation by `elapsed_ms`.
    ///
    /// Returns the resting phase after the step (`Falling` or `GameOver`). An
    /// `Err` means an invariant was broken; the game is halted from then on.
    pub fn tick(&mut self, elapsed_ms: u32) -> Result<Phase, CoreError> {
        if self.fault.is_some() {
            return Err(CoreError::Halted);
        }

        if self.phase == Phase::Falling {
            let interval = self.gravity_interval_ms();
            self.gravity_timer_ms = self.gravity_timer_ms.saturating_add(elapsed_ms);

            while self.gravity_timer_ms >= interval {
                self.gravity_timer_ms -= interval;
                if !self.step_down() {
                    self.gravity_timer_ms = 0;
                    self.phase = Phase::Locking;
                    break;
                }
            }
        }

        self.advance()
    }

    /// Run transient phases until the machine rests in `Falling` or `GameOver`.
    fn advance(&mut self) -> Result<Phase, CoreError> {
        loop {
            match self.phase {
                Phase::Spawning => self.spawn_piece(),
                Phase::Locking => {
                    if let Err(e) = self.lock_active() {
                        error!("halting game: {e}");
                        self.fault = Some(e.clone());
                        return Err(e);
                    }
                }
                Phase::Clearing => self.clear_rows(),
                Phase::Falling | Phase::GameOver => return Ok(self.phase),
            }
        }
    }

    fn step_down(&mut self) -> bool {
        match self.active.as_mut() {
            Some(piece) => piece.translate(0, 1, &self.board),
            None => false,
        }
    }

    fn spawn_piece(&mut self) {
        let kind = self.piece_queue.draw();
        let piece = Piece::spawn(kind, self.board.width());

        self.gravity_timer_ms = 0;
        self.soft_drop = false;

        if !piece.fits(&self.board) {
            info!(
                "spawn of {:?} blocked, game over after {} pieces and {} lines",
                kind, self.pieces, self.lines
            );
            self.active = None;
            self.phase = Phase::GameOver;
            return;
        }

        debug!("spawned {:?} at ({}, {})", kind, piece.x(), piece.y());
        self.active = Some(piece);
        self.phase = Phase::Falling;
    }

    fn lock_active(&mut self) -> Result<(), CoreError> {
        let piece = self.active.take().ok_or(CoreError::NoActivePiece)?;
        self.board.lock(&piece)?;
        self.pieces = self.pieces.wrapping_add(1);
        self.last_event = Some(LockEvent {
            kind: piece.kind(),
            lines_cleared: 0,
        });
        debug!("locked {:?} at ({}, {})", piece.kind(), piece.x(), piece.y());
        self.phase = Phase::Clearing;
        Ok(())
    }

    fn clear_rows(&mut self) {
        let cleared = self.board.clear_full_rows() as u32;
        if cleared > 0 {
            self.lines = self.lines.wrapping_add(cleared);
            debug!("cleared {} rows ({} total)", cleared, self.lines);
        }
        if let Some(event) = self.last_event.as_mut() {
            event.lines_cleared = cleared;
        }
        self.phase = Phase::Spawning;
    }

    /// Start a new game with the same configuration, continuing the random stream.
    pub fn reset(&mut self) {
        let queue = PieceQueue::new(self.config.randomizer, self.piece_queue.seed());
        let next_episode = self.episode_id.wrapping_add(1);
        info!("new game (episode {next_episode})");

        // Same dimensions as the current board, which may come from a fixture.
        let board = Board::new(self.board.width(), self.board.height());
        *self = Self::with_board(self.config, board);
        self.piece_queue = queue;
        self.episode_id = next_episode;
        self.start();
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        out.board.clear();
        out.board.extend_from_slice(self.board.cells());
        out.active = self.active.map(|piece| ActiveSnapshot {
            kind: piece.kind(),
            cells: piece.cells(),
            grounded: is_grounded(&self.board, &piece),
        });
        out.next = (!self.game_over()).then(|| self.piece_queue.peek());
        out.phase = self.phase;
        out.game_over = self.game_over();
        out.lines = self.lines;
        out.pieces = self.pieces;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Randomizer, Rotation};

    fn started(seed: u32) -> GameState {
        let mut state = GameState::new(GameConfig {
            seed,
            ..GameConfig::default()
        });
        state.start();
        state
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(GameConfig::default());
        assert_eq!(state.phase(), Phase::Spawning);
        assert!(state.active().is_none());
        assert!(!state.game_over());
        assert_eq!(state.lines(), 0);
        assert_eq!(state.board().occupied_count(), 0);
    }

    #[test]
    fn test_start_spawns_top_center() {
        let state = started(12345);
        assert_eq!(state.phase(), Phase::Falling);
        let piece = state.active().unwrap();
        assert_eq!(piece.y(), 0);
        assert_eq!(piece.rotation(), Rotation::North);
        assert_eq!(*piece, Piece::spawn(piece.kind(), 10));
    }

    #[test]
    fn test_tick_spawns_when_not_started() {
        let mut state = GameState::default();
        assert_eq!(state.tick(0), Ok(Phase::Falling));
        assert!(state.active().is_some());
    }

    #[test]
    fn test_gravity_accumulates_elapsed_time() {
        let mut state = started(1);
        let y0 = state.active().unwrap().y();

        for _ in 0..62 {
            state.tick(16).unwrap();
        }
        // 992ms: not a full interval yet
        assert_eq!(state.active().unwrap().y(), y0);

        state.tick(16).unwrap();
        assert_eq!(state.active().unwrap().y(), y0 + 1);
    }

    #[test]
    fn test_large_elapsed_falls_several_rows() {
        let mut state = started(1);
        let y0 = state.active().unwrap().y();
        state.tick(3000).unwrap();
        assert_eq!(state.active().unwrap().y(), y0 + 3);
    }

    #[test]
    fn test_soft_drop_toggle_speeds_gravity() {
        let mut state = started(1);
        assert!(state.apply_command(Command::SoftDropToggle));
        assert!(state.is_soft_dropping());
        assert_eq!(state.gravity_interval_ms(), 100);

        let y0 = state.active().unwrap().y();
        state.tick(100).unwrap();
        assert_eq!(state.active().unwrap().y(), y0 + 1);

        assert!(state.apply_command(Command::SoftDropToggle));
        assert_eq!(state.gravity_interval_ms(), 1000);
    }

    #[test]
    fn test_move_commands_stop_at_walls() {
        let mut state = started(12345);
        let mut moved = 0;
        for _ in 0..12 {
            if state.apply_command(Command::MoveLeft) {
                moved += 1;
            }
        }
        assert!(moved <= 4);
        assert!(!state.apply_command(Command::MoveLeft));
        let min_x = state.active().unwrap().cells().iter().map(|c| c.0).min();
        assert_eq!(min_x, Some(0));
    }

    #[test]
    fn test_blocked_piece_locks_on_next_gravity_step() {
        let mut state = GameState::default();
        assert!(state.place_active(Piece::new(ShapeKind::O, Rotation::North, 0, 18)));

        assert_eq!(state.tick(1000), Ok(Phase::Falling));
        assert_eq!(state.board().get(0, 18), Some(Some(ShapeKind::O)));
        assert_eq!(state.board().get(1, 19), Some(Some(ShapeKind::O)));
        assert_eq!(state.pieces(), 1);
        assert_eq!(
            state.take_last_event(),
            Some(LockEvent {
                kind: ShapeKind::O,
                lines_cleared: 0
            })
        );
        // A fresh piece is already in play
        assert_eq!(state.active().unwrap().y(), 0);
    }

    #[test]
    fn test_lock_clears_completed_row() {
        let mut rows = vec!["..........".to_string(); 20];
        rows[19] = "JJJJJJJJ..".to_string();
        let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
        let mut state = GameState::with_board(GameConfig::default(), Board::from_ascii(&refs));

        assert!(state.place_active(Piece::new(ShapeKind::O, Rotation::North, 8, 18)));
        state.tick(1000).unwrap();

        assert_eq!(state.lines(), 1);
        assert_eq!(state.take_last_event().unwrap().lines_cleared, 1);
        // The O's top half dropped into the bottom row
        assert_eq!(state.board().get(8, 19), Some(Some(ShapeKind::O)));
        assert_eq!(state.board().get(0, 19), Some(None));
        assert_eq!(state.board().occupied_count(), 2);
    }

    #[test]
    fn test_blocked_spawn_is_game_over() {
        let mut board = Board::new(10, 20);
        for x in 0..10 {
            board.set(x, 0, Some(ShapeKind::Z));
            board.set(x, 1, Some(ShapeKind::Z));
        }
        board.set(0, 1, None);
        let mut state = GameState::with_board(GameConfig::default(), board.clone());

        assert_eq!(state.tick(16), Ok(Phase::GameOver));
        assert!(state.game_over());
        assert!(state.active().is_none());

        for cmd in [Command::MoveLeft, Command::MoveRight, Command::Rotate, Command::SoftDropToggle] {
            assert!(!state.apply_command(cmd));
        }
        assert_eq!(state.tick(10_000), Ok(Phase::GameOver));
        assert!(!state.place_active(Piece::new(ShapeKind::O, Rotation::North, 4, 10)));
        assert_eq!(state.board(), &board);
    }

    #[test]
    fn test_quit_is_accepted_in_any_phase() {
        let mut state = GameState::default();
        assert!(state.apply_command(Command::Quit));
        assert!(state.quit_requested());
    }

    #[test]
    fn test_reset_starts_new_episode() {
        let mut state = started(7);
        state.tick(5000).unwrap();
        state.reset();
        assert_eq!(state.episode_id(), 1);
        assert_eq!(state.phase(), Phase::Falling);
        assert_eq!(state.board().occupied_count(), 0);
        assert_eq!(state.pieces(), 0);
    }

    #[test]
    fn test_next_kind_matches_spawn() {
        let mut state = GameState::new(GameConfig {
            randomizer: Randomizer::Uniform,
            seed: 3,
            ..GameConfig::default()
        });
        let mut expected = state.next_kind();
        state.start();

        for _ in 0..10 {
            assert_eq!(state.active().unwrap().kind(), expected);
            expected = state.next_kind();
            // Let the piece fall until it locks; the next spawn happens in the same tick
            while state.take_last_event().is_none() {
                state.tick(1000).unwrap();
            }
            if state.game_over() {
                break;
            }
        }
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let state = started(12345);
        let snap = state.snapshot();
        assert_eq!((snap.width, snap.height), (10, 20));
        assert_eq!(snap.board.len(), 200);
        assert_eq!(snap.phase, Phase::Falling);
        let active = snap.active.as_ref().unwrap();
        assert_eq!(active.kind, state.active().unwrap().kind());
        assert_eq!(active.cells, state.active().unwrap().cells());
        assert_eq!(snap.next, Some(state.next_kind()));
        assert!(!active.grounded);
    }

    #[test]
    fn test_snapshot_marks_grounded_piece() {
        let mut state = started(12345);
        // Every spawn shape bottoms out on row 1, so 18 steps reach the floor.
        for _ in 0..18 {
            state.tick(1000).unwrap();
        }
        assert_eq!(state.pieces(), 0);
        assert!(state.snapshot().active.unwrap().grounded);
    }

    #[test]
    fn test_broken_invariant_halts_game() {
        let mut state = started(1);
        let (x, y) = state.active().unwrap().cells()[0];
        // Corrupt the board under the falling piece and force a lock.
        state.board.set(x, y, Some(ShapeKind::Z));
        state.phase = Phase::Locking;

        assert_eq!(state.tick(0), Err(CoreError::InvalidLock { x, y }));
        assert_eq!(state.fault(), Some(&CoreError::InvalidLock { x, y }));
        assert_eq!(state.tick(16), Err(CoreError::Halted));
        assert!(!state.apply_command(Command::MoveLeft));
        assert!(!state.place_active(Piece::spawn(ShapeKind::O, 10)));
    }

    #[test]
    fn test_held_soft_drop_key_keeps_gravity_running() {
        // A held key without release reporting arrives as repeated presses.
        let mut state = started(3);
        let y0 = state.active().unwrap().y();
        for _ in 0..30 {
            state.apply_command(Command::SoftDropToggle);
            state.tick(33).unwrap();
        }
        assert_eq!(state.pieces(), 0);
        assert!(state.active().unwrap().y() > y0);
    }

    #[test]
    fn test_double_toggle_does_not_discard_elapsed_time() {
        let mut state = started(3);
        let y0 = state.active().unwrap().y();

        state.tick(900).unwrap();
        assert!(state.apply_command(Command::SoftDropToggle));
        assert!(state.apply_command(Command::SoftDropToggle));
        assert!(!state.is_soft_dropping());

        // 900ms was capped at 100ms by the soft-drop interval, so 900 more completes a step.
        state.tick(900).unwrap();
        assert_eq!(state.active().unwrap().y(), y0 + 1);
    }

    #[test]
    fn test_reset_after_game_over_on_fixture_board() {
        let board = Board::from_ascii(&["IIIIIIII.I", "IIIIIIII.I"]);
        let mut state = GameState::with_board(GameConfig::default(), board);
        assert_eq!(state.tick(0), Ok(Phase::GameOver));

        state.reset();
        assert_eq!(state.episode_id(), 1);
        assert_eq!((state.board().width(), state.board().height()), (10, 2));
        assert_eq!(state.board().occupied_count(), 0);
        assert_eq!(state.phase(), Phase::Falling);
    }
}
