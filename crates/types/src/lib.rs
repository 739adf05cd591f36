//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are pure data with no I/O, making them usable in any context
//! (core rules, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! The default playfield is 10 columns by 20 rows. Both are configurable
//! through [`GameConfig`]; row 0 is the top row and `y` grows downward.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Frame budget (~60 FPS) |
//! | `BASE_GRAVITY_MS` | 1000 | One row per second |
//! | `SOFT_DROP_MULTIPLIER` | 10 | Soft drop divides the gravity interval |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, GameConfig, Rotation, ShapeKind};
//!
//! let kind = ShapeKind::from_str("t").unwrap();
//! assert_eq!(kind, ShapeKind::T);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Rotation::from_index(5), Rotation::East);
//!
//! assert_eq!(Command::from_str("rotate"), Some(Command::Rotate));
//!
//! let config = GameConfig::default();
//! assert_eq!((config.cols, config.rows), (10, 20));
//! assert!(config.validate().is_ok());
//! ```

/// Default board width in cells
pub const DEFAULT_COLS: u16 = 10;

/// Default board height in cells
pub const DEFAULT_ROWS: u16 = 20;

/// Smallest accepted board side (the I shape needs a 4x4 box to rotate)
pub const MIN_BOARD_SIDE: u16 = 4;

/// Largest accepted board side
pub const MAX_BOARD_SIDE: u16 = 64;

/// Frame budget in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Gravity interval at normal speed (1000ms = 1 row per second)
pub const BASE_GRAVITY_MS: u32 = 1000;

/// Soft drop speed multiplier (gravity interval is divided by this)
pub const SOFT_DROP_MULTIPLIER: u32 = 10;

/// Tetromino shape identifiers. Also used as the color tag of a board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl ShapeKind {
    /// Every shape in catalog order.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::J,
        ShapeKind::L,
    ];

    /// Parse shape kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "o" => Some(ShapeKind::O),
            "t" => Some(ShapeKind::T),
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            "j" => Some(ShapeKind::J),
            "l" => Some(ShapeKind::L),
            _ => None,
        }
    }

    /// Uppercase letter, as drawn in side panels
    pub fn letter(&self) -> &'static str {
        match self {
            ShapeKind::I => "I",
            ShapeKind::O => "O",
            ShapeKind::T => "T",
            ShapeKind::S => "S",
            ShapeKind::Z => "Z",
            ShapeKind::J => "J",
            ShapeKind::L => "L",
        }
    }
}

/// Rotation states (North = spawn orientation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotation for a quarter-turn count; any integer, taken modulo 4.
    pub fn from_index(index: i32) -> Self {
        match index.rem_euclid(4) {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Number of clockwise quarter turns from North (0..4)
    pub fn index(&self) -> i32 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotate clockwise
    pub fn rotate_cw(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Rotate counter-clockwise
    pub fn rotate_ccw(&self) -> Self {
        Self::from_index(self.index() - 1)
    }
}

/// Abstract commands consumed by the game state machine.
///
/// Input adapters translate raw device events into this closed set; the core
/// never sees keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDropToggle,
    Rotate,
    Quit,
}

impl Command {
    /// Parse command from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdroptoggle" | "softdrop" => Some(Command::SoftDropToggle),
            "rotate" => Some(Command::Rotate),
            "quit" => Some(Command::Quit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDropToggle => "softDropToggle",
            Command::Rotate => "rotate",
            Command::Quit => "quit",
        }
    }
}

/// Piece selection policy used when spawning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Randomizer {
    /// Every spawn picks any of the seven shapes with equal probability.
    Uniform,
    /// Shuffled bags of all seven shapes, dealt out before reshuffling.
    #[default]
    SevenBag,
}

impl Randomizer {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uniform" | "random" => Some(Randomizer::Uniform),
            "bag" | "7bag" | "sevenbag" => Some(Randomizer::SevenBag),
            _ => None,
        }
    }
}

/// Cell on the board (None = empty, Some = filled, tagged with the shape that locked it)
pub type Cell = Option<ShapeKind>;

/// Game session parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub cols: u16,
    pub rows: u16,
    /// Milliseconds per gravity step at normal speed
    pub gravity_ms: u32,
    /// Gravity interval divisor while soft drop is on
    pub soft_drop_multiplier: u32,
    pub randomizer: Randomizer,
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            gravity_ms: BASE_GRAVITY_MS,
            soft_drop_multiplier: SOFT_DROP_MULTIPLIER,
            randomizer: Randomizer::SevenBag,
            seed: 1,
        }
    }
}

impl GameConfig {
    /// Check that the parameters describe a playable game.
    pub fn validate(&self) -> Result<(), String> {
        let side = MIN_BOARD_SIDE..=MAX_BOARD_SIDE;
        if !side.contains(&self.cols) || !side.contains(&self.rows) {
            return Err(format!(
                "board must be between {min}x{min} and {max}x{max}, got {}x{}",
                self.cols,
                self.rows,
                min = MIN_BOARD_SIDE,
                max = MAX_BOARD_SIDE,
            ));
        }
        if self.gravity_ms == 0 {
            return Err("gravity interval must be at least 1ms".to_string());
        }
        if self.soft_drop_multiplier == 0 {
            return Err("soft drop multiplier must be at least 1".to_string());
        }
        Ok(())
    }

    /// Gravity interval for the given soft-drop state, never below 1ms.
    pub fn gravity_interval_ms(&self, soft_drop: bool) -> u32 {
        let base = self.gravity_ms.max(1);
        if soft_drop {
            (base / self.soft_drop_multiplier.max(1)).max(1)
        } else {
            base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_wraps_modulo_four() {
        assert_eq!(Rotation::from_index(0), Rotation::North);
        assert_eq!(Rotation::from_index(4), Rotation::North);
        assert_eq!(Rotation::from_index(-1), Rotation::West);
        assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
        assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    }

    #[test]
    fn test_command_parse() {
        assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
        assert_eq!(Command::from_str("SOFTDROP"), Some(Command::SoftDropToggle));
        assert_eq!(Command::from_str("hold"), None);
        for cmd in [
            Command::MoveLeft,
            Command::MoveRight,
            Command::SoftDropToggle,
            Command::Rotate,
            Command::Quit,
        ] {
            assert_eq!(Command::from_str(cmd.as_str()), Some(cmd));
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(GameConfig::default().validate().is_ok());

        let tiny = GameConfig {
            cols: 3,
            ..GameConfig::default()
        };
        assert!(tiny.validate().is_err());

        let frozen = GameConfig {
            gravity_ms: 0,
            ..GameConfig::default()
        };
        assert!(frozen.validate().is_err());
    }

    #[test]
    fn test_gravity_interval() {
        let config = GameConfig::default();
        assert_eq!(config.gravity_interval_ms(false), 1000);
        assert_eq!(config.gravity_interval_ms(true), 100);

        let fast = GameConfig {
            gravity_ms: 5,
            soft_drop_multiplier: 10,
            ..GameConfig::default()
        };
        assert_eq!(fast.gravity_interval_ms(true), 1);
    }
}
