//! `[editor]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [editor]
//! debounce_ms = 400          # Quiet window before an auto-run render
//! auto_run = true            # Force auto-run on at startup (unset: keep stored choice)
//! markup = "index.html"      # Buffer file names, relative to the workspace
//! style = "style.css"
//! script = "script.js"
//! ```

use serde::{Deserialize, Serialize};

use crate::controller::DEFAULT_DEBOUNCE_MS;
use crate::workspace::FileNames;

/// Editing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Trailing-edge debounce window in milliseconds.
    pub debounce_ms: u64,

    /// Auto-run override at startup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_run: Option<bool>,

    pub markup: String,
    pub style: String,
    pub script: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        let names = FileNames::default();
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            auto_run: None,
            markup: names.markup,
            style: names.style,
            script: names.script,
        }
    }
}

impl EditorConfig {
    pub fn file_names(&self) -> FileNames {
        FileNames {
            markup: self.markup.clone(),
            style: self.style.clone(),
            script: self.script.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;
    use crate::project::Buffer;

    #[test]
    fn test_editor_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.editor.debounce_ms, 400);
        assert_eq!(config.editor.auto_run, None);
        assert_eq!(config.editor.file_names().name(Buffer::Script), "script.js");
    }

    #[test]
    fn test_editor_overrides() {
        let config = test_parse_config(
            "[editor]\ndebounce_ms = 150\nauto_run = false\nmarkup = \"page.html\"",
        );
        assert_eq!(config.editor.debounce_ms, 150);
        assert_eq!(config.editor.auto_run, Some(false));
        assert_eq!(config.editor.file_names().name(Buffer::Markup), "page.html");
        assert_eq!(config.editor.style, "style.css");
    }
}
