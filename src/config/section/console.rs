//! `[console]` section configuration.
//!
//! ```toml
//! [console]
//! max_message_len = 8192     # Longer preview messages are truncated
//! max_lines = 1000           # Oldest lines are dropped past this many
//! ```

use serde::{Deserialize, Serialize};

use crate::console::{DEFAULT_MAX_LINES, DEFAULT_MAX_MESSAGE_LEN};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub max_message_len: usize,
    pub max_lines: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            max_message_len: DEFAULT_MAX_MESSAGE_LEN,
            max_lines: DEFAULT_MAX_LINES,
        }
    }
}
