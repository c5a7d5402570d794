//! `sandpen compose`: write the standalone document.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::{compose::compose, config::PenConfig, log, workspace::read_project};

/// Compose the workspace buffers into `output`, or stdout.
pub fn compose_workspace(config: &PenConfig, output: Option<&Path>) -> Result<()> {
    let state = read_project(config.workspace(), &config.editor.file_names())
        .context("Workspace is incomplete, run `sandpen init` first")?;
    let document = compose(&state.markup, &state.style, &state.script);

    match output {
        Some(path) => {
            std::fs::write(path, &document)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            log!("compose"; "wrote {} ({} bytes)", path.display(), document.len());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(document.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
