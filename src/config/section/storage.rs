//! `[storage]` section configuration.
//!
//! ```toml
//! [storage]
//! dir = ".sandpen"           # Saved project and preferences (relative to the workspace)
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".sandpen"),
        }
    }
}
