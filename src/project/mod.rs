//! Project state: the three source buffers plus display preferences.
//!
//! One `ProjectState` is owned by the controller. Every mutation goes
//! through a named method so render, save and share all observe the same
//! current project.

mod defaults;

use std::sync::LazyLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// The three editable buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Buffer {
    Markup,
    Style,
    Script,
}

impl Buffer {
    pub const ALL: [Buffer; 3] = [Buffer::Markup, Buffer::Style, Buffer::Script];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Markup => "html",
            Self::Style => "css",
            Self::Script => "js",
        }
    }
}

/// Bootstrap project, built once at first use and never mutated.
static BOOTSTRAP: LazyLock<ProjectState> = LazyLock::new(|| ProjectState {
    markup: defaults::MARKUP.to_string(),
    style: defaults::STYLE.to_string(),
    script: defaults::SCRIPT.to_string(),
    dark_theme: false,
    auto_run: false,
    saved_at: None,
});

/// Unit of persistence and sharing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectState {
    pub markup: String,
    pub style: String,
    pub script: String,
    pub dark_theme: bool,
    pub auto_run: bool,
    /// Milliseconds since the Unix epoch of the last snapshot. Advisory only.
    pub saved_at: Option<u64>,
}

impl Default for ProjectState {
    fn default() -> Self {
        Self::bootstrap().clone()
    }
}

impl ProjectState {
    /// The canonical bootstrap project.
    pub fn bootstrap() -> &'static ProjectState {
        &BOOTSTRAP
    }

    pub fn buffer(&self, buffer: Buffer) -> &str {
        match buffer {
            Buffer::Markup => &self.markup,
            Buffer::Style => &self.style,
            Buffer::Script => &self.script,
        }
    }

    /// Replace one buffer. Returns `false` when the text is unchanged.
    pub fn edit(&mut self, buffer: Buffer, text: &str) -> bool {
        let slot = match buffer {
            Buffer::Markup => &mut self.markup,
            Buffer::Style => &mut self.style,
            Buffer::Script => &mut self.script,
        };
        if slot == text {
            return false;
        }
        text.clone_into(slot);
        true
    }

    /// Replace all three buffers at once, keeping preferences.
    pub fn load_buffers(&mut self, markup: String, style: String, script: String) {
        self.markup = markup;
        self.style = style;
        self.script = script;
    }

    /// Reset buffers to the bootstrap triple, keeping preferences.
    pub fn reset_buffers(&mut self) {
        let boot = Self::bootstrap();
        self.load_buffers(boot.markup.clone(), boot.style.clone(), boot.script.clone());
    }

    pub fn set_dark_theme(&mut self, on: bool) {
        self.dark_theme = on;
    }

    pub fn set_auto_run(&mut self, on: bool) {
        self.auto_run = on;
    }

    /// Copy of the current state stamped with the current time.
    pub fn snapshot(&self) -> ProjectState {
        ProjectState {
            saved_at: Some(now_millis()),
            ..self.clone()
        }
    }
}

/// Current wall clock in milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
