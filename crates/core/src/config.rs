//! Game configuration.
//!
//! Values are host supplied; the defaults reproduce the classic four-pad game.
//! `from_env` reads `SIMON_*` variables, mirroring how the terminal binary is
//! configured.

use std::time::Duration;

use crate::types::{DEFAULT_PAD_COUNT, MAX_PAD_COUNT, PLAY_INTERVAL_MS, RESET_TIME_MS};

/// What happens once a failed game's end timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameOverPolicy {
    /// End the session (the host loop exits)
    #[default]
    Close,
    /// Clear the sequence and start again from round 1
    Restart,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub pad_count: u8,
    pub play_interval: Duration,
    pub reset_time: Duration,
    pub game_over: GameOverPolicy,
    /// RNG seed; `None` lets the host pick one.
    pub seed: Option<u32>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },

    #[error("pad count must be between 1 and {max}, got {got}")]
    PadCount { got: u8, max: u8 },

    #[error("play interval must be non-zero")]
    ZeroPlayInterval,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pad_count: DEFAULT_PAD_COUNT,
            play_interval: Duration::from_millis(PLAY_INTERVAL_MS),
            reset_time: Duration::from_millis(RESET_TIME_MS),
            game_over: GameOverPolicy::Close,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create from environment variables.
    ///
    /// - `SIMON_PADS`: pad count (1-9)
    /// - `SIMON_PLAY_INTERVAL_MS`: playback pacing
    /// - `SIMON_RESET_MS`: pause between rounds and before the session ends
    /// - `SIMON_RESTART`: `1`/`true` to restart instead of exiting after a mistake
    /// - `SIMON_SEED`: fixed RNG seed
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(v) = lookup("SIMON_PADS") {
            config.pad_count = parse("SIMON_PADS", &v)?;
        }
        if let Some(v) = lookup("SIMON_PLAY_INTERVAL_MS") {
            config.play_interval = Duration::from_millis(parse("SIMON_PLAY_INTERVAL_MS", &v)?);
        }
        if let Some(v) = lookup("SIMON_RESET_MS") {
            config.reset_time = Duration::from_millis(parse("SIMON_RESET_MS", &v)?);
        }
        if let Some(v) = lookup("SIMON_RESTART") {
            config.game_over = match parse_flag("SIMON_RESTART", &v)? {
                true => GameOverPolicy::Restart,
                false => GameOverPolicy::Close,
            };
        }
        if let Some(v) = lookup("SIMON_SEED") {
            config.seed = Some(parse("SIMON_SEED", &v)?);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pad_count == 0 || self.pad_count > MAX_PAD_COUNT {
            return Err(ConfigError::PadCount {
                got: self.pad_count,
                max: MAX_PAD_COUNT,
            });
        }
        if self.play_interval.is_zero() {
            return Err(ConfigError::ZeroPlayInterval);
        }
        Ok(())
    }
}

fn parse<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        value: value.to_string(),
    })
}

/// Parse a boolean flag (`1`/`true`/`yes` or `0`/`false`/`no`).
pub(crate) fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value: value.to_string(),
        }),
    }
}
