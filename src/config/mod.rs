//! Workspace configuration management for `sandpen.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── console    # [console]
//! │   ├── editor     # [editor]
//! │   ├── serve      # [serve]
//! │   └── storage    # [storage]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError
//! │   └── handle     # Global config handle
//! └── mod.rs         # PenConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section     | Purpose                                           |
//! |-------------|---------------------------------------------------|
//! | `[serve]`   | Preview server (interface, port, ws_port)         |
//! | `[editor]`  | Debounce window, auto-run override, file names    |
//! | `[console]` | Console panel limits                              |
//! | `[storage]` | Where the saved project and preferences live      |
//!
//! The file is optional: without one every section takes its defaults.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{ConsoleConfig, EditorConfig, ServeConfig, StorageConfig};
pub use types::{ConfigError, cfg, init_config};

use crate::cli::{Cli, Commands};
use crate::log;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

/// Config file name looked up when `--config` is not given.
pub const DEFAULT_CONFIG_NAME: &str = "sandpen.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing sandpen.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PenConfig {
    /// Absolute path to the config file, which may not exist (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Workspace directory holding the buffer files (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub serve: ServeConfig,

    #[serde(default)]
    pub editor: EditorConfig,

    #[serde(default)]
    pub console: ConsoleConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl PenConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Without `--workspace`, searches upward from cwd for the config file
    /// and uses its directory as the workspace.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let (config_path, exists) = Self::resolve_config_path(cli, &cwd);

        // An explicitly named config must exist
        if !exists && cli.config != Path::new(DEFAULT_CONFIG_NAME) && !cli.is_init() {
            return Err(ConfigError::NotFound(config_path).into());
        }

        let mut config = if exists {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };

        config.root = match &cli.workspace {
            Some(dir) => cwd.join(dir),
            None if exists => config_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| cwd.clone()),
            None => cwd,
        };
        config.config_path = config_path;
        config.apply_command_options(cli);
        config.validate()?;

        Ok(config)
    }

    /// Resolve config file path. Returns the path and whether it exists.
    fn resolve_config_path(cli: &Cli, cwd: &Path) -> (PathBuf, bool) {
        let dir = cli
            .workspace
            .as_ref()
            .map(|w| cwd.join(w))
            .unwrap_or_else(|| cwd.to_path_buf());

        // A named workspace (or init) only looks inside itself
        if cli.workspace.is_some() || cli.is_init() {
            let path = dir.join(&cli.config);
            let exists = path.is_file();
            return (path, exists);
        }

        match find_config_file(&dir, &cli.config) {
            Some(path) => (path, true),
            None => (dir.join(&cli.config), false),
        }
    }

    /// CLI flags override file values.
    fn apply_command_options(&mut self, cli: &Cli) {
        if let Commands::Serve {
            interface,
            port,
            auto_run,
            ..
        } = &cli.command
        {
            if let Some(interface) = interface {
                self.serve.interface = *interface;
            }
            if let Some(port) = port {
                self.serve.port = *port;
            }
            if auto_run.is_some() {
                self.editor.auto_run = *auto_run;
            }
        }
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());

        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.editor.debounce_ms == 0 {
            return Err(ConfigError::Validation(
                "[editor] debounce_ms must be at least 1".into(),
            ));
        }
        if self.console.max_message_len == 0 {
            return Err(ConfigError::Validation(
                "[console] max_message_len must be at least 1".into(),
            ));
        }
        if self.console.max_lines == 0 {
            return Err(ConfigError::Validation(
                "[console] max_lines must be at least 1".into(),
            ));
        }

        let names = [
            ("markup", &self.editor.markup),
            ("style", &self.editor.style),
            ("script", &self.editor.script),
        ];
        for (key, name) in names {
            let plain = !name.is_empty()
                && !name.starts_with('.')
                && Path::new(name.as_str()).file_name() == Some(OsStr::new(name.as_str()));
            if !plain {
                return Err(ConfigError::Validation(format!(
                    "[editor] {key} must be a plain file name, got `{name}`"
                )));
            }
        }
        if names[0].1 == names[1].1 || names[1].1 == names[2].1 || names[0].1 == names[2].1 {
            return Err(ConfigError::Validation(
                "[editor] markup, style and script must be different files".into(),
            ));
        }

        Ok(())
    }

    /// Workspace directory.
    pub fn workspace(&self) -> &Path {
        &self.root
    }

    /// Directory of the keyed store.
    pub fn storage_dir(&self) -> PathBuf {
        self.root.join(&self.storage.dir)
    }
}

/// Parse a config string for tests.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> PenConfig {
    let (config, _) = PenConfig::parse_with_ignored(content).unwrap();
    config
}
