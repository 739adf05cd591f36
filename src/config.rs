//! Runtime configuration read from `BLOCKFALL_*` environment variables.
//!
//! Every variable is optional. Values that fail to parse fall back to the
//! default for that field; the assembled game config is then validated.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};

use crate::types::{GameConfig, Randomizer, FRAME_MS};

/// Settings for one run of the terminal game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub game: GameConfig,
    /// Wall-clock length of one frame
    pub frame_ms: u32,
    /// Log file; logging is off when unset
    pub log_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            frame_ms: FRAME_MS,
            log_path: None,
        }
    }
}

impl AppConfig {
    /// Create from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = GameConfig::default();
        let parsed = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u32>().ok());
        let side = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u16>().ok());

        let game = GameConfig {
            cols: side("BLOCKFALL_COLS").unwrap_or(defaults.cols),
            rows: side("BLOCKFALL_ROWS").unwrap_or(defaults.rows),
            gravity_ms: parsed("BLOCKFALL_GRAVITY_MS").unwrap_or(defaults.gravity_ms),
            soft_drop_multiplier: parsed("BLOCKFALL_SOFT_DROP_MULTIPLIER")
                .unwrap_or(defaults.soft_drop_multiplier),
            randomizer: lookup("BLOCKFALL_RANDOMIZER")
                .and_then(|s| Randomizer::from_str(s.trim()))
                .unwrap_or_default(),
            seed: parsed("BLOCKFALL_SEED").unwrap_or_else(clock_seed),
        };
        game.validate().map_err(|e| anyhow!("invalid game config: {e}"))?;

        let frame_ms = parsed("BLOCKFALL_FRAME_MS")
            .filter(|&ms| ms > 0)
            .unwrap_or(FRAME_MS);

        let log_path = lookup("BLOCKFALL_LOG_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(Self {
            game,
            frame_ms,
            log_path,
        })
    }
}

/// Seed taken from the wall clock, so unseeded runs differ.
fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
