//! Workspace initialization.
//!
//! Writes the starter buffers plus a commented `sandpen.toml` and ignore
//! file. Files that already exist are kept unless `--force`.
//!
//! # Module Structure
//!
//! - [`config`]: Configuration file generation

mod config;

use crate::{config::PenConfig, log, project::ProjectState, workspace::write_project};
use anyhow::{Context, Result};
use std::fs;

/// Initialize the workspace with the starter project.
pub fn init_workspace(config: &PenConfig, force: bool) -> Result<()> {
    let root = config.workspace();
    fs::create_dir_all(root)
        .with_context(|| format!("Failed to create workspace '{}'", root.display()))?;

    let written = write_project(
        root,
        &config.editor.file_names(),
        ProjectState::bootstrap(),
        force,
    )?;
    for path in &written {
        log!("init"; "wrote {}", path.display());
    }

    config::write_config(&config.config_path, force)?;
    config::write_ignore_files(root, &config.storage.dir)?;

    if written.is_empty() {
        log!("init"; "buffers already exist, use --force to overwrite");
    } else {
        log!("init"; "workspace ready, run `sandpen serve`");
    }
    Ok(())
}
