//! Host-side configuration (everything the game core does not care about).

use std::path::PathBuf;

use crate::core::ConfigError;
use crate::term::BellMode;
use crate::types::KEY_RELEASE_TIMEOUT_MS;

/// Input adapter tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputConfig {
    /// Synthesize a release after this long on terminals that never report one.
    pub key_release_timeout_ms: u32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            key_release_timeout_ms: KEY_RELEASE_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub bell: BellMode,
    /// Log file; logging is off when unset
    pub log_path: Option<PathBuf>,
    /// `EnvFilter` directive string
    pub log_filter: String,
    pub input: InputConfig,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            bell: BellMode::default(),
            log_path: None,
            log_filter: "info".to_string(),
            input: InputConfig::default(),
        }
    }
}

impl HostConfig {
    /// Create from environment variables.
    ///
    /// - `SIMON_BELL`: `off`, `failure` or `all`
    /// - `SIMON_LOG_PATH`: write logs to this file
    /// - `SIMON_LOG`: log filter (default `info`)
    /// - `SIMON_KEY_RELEASE_MS`: key release timeout
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(v) = lookup("SIMON_BELL") {
            config.bell = v.parse().map_err(|_| ConfigError::Invalid {
                var: "SIMON_BELL",
                value: v.clone(),
            })?;
        }

        config.log_path = lookup("SIMON_LOG_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        if let Some(v) = lookup("SIMON_LOG").filter(|s| !s.trim().is_empty()) {
            config.log_filter = v.trim().to_string();
        }

        if let Some(v) = lookup("SIMON_KEY_RELEASE_MS") {
            config.input.key_release_timeout_ms =
                v.trim().parse().map_err(|_| ConfigError::Invalid {
                    var: "SIMON_KEY_RELEASE_MS",
                    value: v.clone(),
                })?;
        }

        Ok(config)
    }
}
