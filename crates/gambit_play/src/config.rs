//! TOML configuration for sessions and matches

use std::path::Path;
use std::time::Duration;

use gambit_core::SearchLimits;
use gambit_engine::SearchConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{PlayError, PlayResult};

/// Default config file looked up in the working directory.
pub const CONFIG_FILE: &str = "gambit.toml";

/// Longest per-move budget that loads without a warning.
pub const MAX_THINKING_TIME_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayConfig {
    /// Engine budget per move in milliseconds
    pub thinking_time_ms: u64,
    /// Random weighted first move when the engine opens as White
    pub use_opening_book: bool,
    /// Show the eval bar next to the board
    pub show_eval: bool,
    /// Self-play games are drawn after this many plies
    pub max_plies: u32,
    pub search: SearchConfig,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            thinking_time_ms: 1000,
            use_opening_book: true,
            show_eval: false,
            max_plies: 300,
            search: SearchConfig::default(),
        }
    }
}

impl PlayConfig {
    pub fn from_toml_str(text: &str) -> PlayResult<Self> {
        let config: PlayConfig = toml::from_str(text)?;
        config.check();
        Ok(config)
    }

    /// Reads `path`, failing if it does not exist.
    pub fn load(path: &Path) -> PlayResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| PlayError::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Reads `path` if present, otherwise returns the defaults.
    pub fn load_or_default(path: &Path) -> PlayResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn save(&self, path: &Path) -> PlayResult<()> {
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text).map_err(|e| PlayError::io(path, e))
    }

    pub fn thinking_time(&self) -> Duration {
        Duration::from_millis(self.thinking_time_ms)
    }

    /// Fresh limits for one engine move.
    pub fn search_limits(&self) -> SearchLimits {
        SearchLimits::time(self.thinking_time())
    }

    /// Warns about values that are accepted but probably not meant.
    fn check(&self) {
        if self.thinking_time_ms == 0 {
            warn!("thinking_time_ms is 0, the engine will only search depth 1");
        }
        if self.thinking_time_ms > MAX_THINKING_TIME_MS {
            warn!(
                thinking_time_ms = self.thinking_time_ms,
                "thinking time above 10 s, every engine move will be slow"
            );
        }
        if self.search.eval_roughness < 0 {
            warn!(
                eval_roughness = self.search.eval_roughness,
                "negative eval_roughness is treated as 0"
            );
        }
        if self.search.table_size == 0 {
            warn!("table_size is 0, tables are cleared on nearly every store");
        }
        if self.max_plies == 0 {
            warn!("max_plies is 0, self-play games end before the first move");
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
