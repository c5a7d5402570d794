//! Configuration file generation.
//!
//! Creates sandpen.toml and ignore files for new workspaces.

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::config::{ConsoleConfig, EditorConfig, ServeConfig, StorageConfig};

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

/// Generate sandpen.toml content with comments
pub fn generate_config_template() -> String {
    let serve = ServeConfig::default();
    let editor = EditorConfig::default();
    let console = ConsoleConfig::default();
    let storage = StorageConfig::default();

    format!(
        r#"# sandpen configuration file (v{version})

[serve]
interface = "{interface}"     # 0.0.0.0 makes the preview reachable from the LAN
port = {port}                 # HTTP port, retried upward when taken
ws_port = {ws_port}              # Preview socket (reload + console bridge)

[editor]
debounce_ms = {debounce_ms}            # Quiet window before an auto-run render
# auto_run = true            # Force auto-run at startup (unset: keep stored choice)
markup = "{markup}"
style = "{style}"
script = "{script}"

[console]
max_message_len = {max_len}      # Longer preview messages are truncated
max_lines = {max_lines}             # Oldest lines are dropped past this many

[storage]
dir = "{dir}"              # Saved project and preferences
"#,
        version = env!("CARGO_PKG_VERSION"),
        interface = serve.interface,
        port = serve.port,
        ws_port = serve.ws_port,
        debounce_ms = editor.debounce_ms,
        markup = editor.markup,
        style = editor.style,
        script = editor.script,
        max_len = console.max_message_len,
        max_lines = console.max_lines,
        dir = storage.dir.display(),
    )
}

/// Write default sandpen.toml configuration
pub fn write_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Ok(());
    }
    fs::write(path, generate_config_template())
        .with_context(|| format!("Failed to write config file '{}'", path.display()))
}

/// Write .gitignore and .ignore files ignoring the storage directory
pub fn write_ignore_files(root: &Path, storage_dir: &Path) -> Result<()> {
    let patterns = [
        format!("/{}/", storage_dir.display()),
        "/project.html".to_string(),
        ".DS_Store".to_string(),
    ];
    let content = patterns.join("\n");

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        // Only create if doesn't exist (don't overwrite user's ignore files)
        if !path.exists() {
            fs::write(&path, &content)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
        }
    }

    Ok(())
}
