//! Search tuning knobs

use serde::{Deserialize, Serialize};

/// Tunables of the searcher. Every field has a default, so a config file
/// only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Entries each table may hold before it is cleared wholesale
    pub table_size: usize,
    /// Minimum move value searched once depth is exhausted
    pub qs_limit: i32,
    /// Score window at which the binary search on gamma stops
    pub eval_roughness: i32,
    /// Score repeated game positions as draws
    pub draw_test: bool,
    /// Deepest iteration the deepening driver will start
    pub max_depth: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            table_size: 10_000_000,
            qs_limit: 219,
            eval_roughness: 13,
            draw_test: true,
            max_depth: 999,
        }
    }
}
