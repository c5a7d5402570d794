//! Reactive re-render controller.
//!
//! The [`Controller`] owns the project state, the console panel and every
//! host collaborator. Whoever holds it is the single dispatch queue: edits,
//! commands, timer expiry and bridge messages are applied one at a time and
//! always see the current state.
//!
//! Auto-run edits go through the [`Scheduler`]; manual runs bypass it.

mod command;
mod scheduler;

pub use command::{Command, HELP};
pub use scheduler::DEFAULT_DEBOUNCE_MS;
use scheduler::Scheduler;

use std::path::PathBuf;
use std::time::Duration;

use tokio::time::Instant;
use url::Url;

use crate::bridge::{Transport, receive};
use crate::compose::{compose, compose_with};
use crate::console::{ConsolePanel, LineKind};
use crate::persist::{
    self, AUTO_KEY, DARK_KEY, LoadOutcome, Origin, Resolved, Store, StoredProject, flag_value,
};
use crate::platform::{Clipboard, FileSaver, PreviewSurface};
use crate::project::{Buffer, ProjectState};
use crate::workspace::Buffers;

/// File name and MIME type of the standalone download.
pub const DOWNLOAD_NAME: &str = "project.html";
pub const DOWNLOAD_MIME: &str = "text/html";

/// Collaborators handed to a new controller.
pub struct Parts {
    pub buffers: Buffers,
    pub surface: Box<dyn PreviewSurface>,
    pub store: Box<dyn Store>,
    pub clipboard: Box<dyn Clipboard>,
    pub saver: Box<dyn FileSaver>,
    pub console: ConsolePanel,
}

pub struct Controller {
    state: ProjectState,
    console: ConsolePanel,
    buffers: Buffers,
    surface: Box<dyn PreviewSurface>,
    store: Box<dyn Store>,
    clipboard: Box<dyn Clipboard>,
    saver: Box<dyn FileSaver>,
    scheduler: Scheduler,
    /// Bridge transport of the rendered preview
    transport: Transport,
    /// Location share links are built on
    share_base: Url,
}

impl Controller {
    pub fn new(parts: Parts, transport: Transport, debounce: Duration, share_base: Url) -> Self {
        Self {
            state: ProjectState::default(),
            console: parts.console,
            buffers: parts.buffers,
            surface: parts.surface,
            store: parts.store,
            clipboard: parts.clipboard,
            saver: parts.saver,
            scheduler: Scheduler::new(debounce),
            transport,
            share_base,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &ProjectState {
        &self.state
    }

    #[cfg(test)]
    pub fn console(&self) -> &ConsolePanel {
        &self.console
    }

    /// When the pending auto-run render is due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.scheduler.deadline()
    }

    /// Apply the resolved startup state and render once.
    pub fn start(&mut self, resolved: Resolved) {
        self.state = resolved.state;
        match resolved.origin {
            Origin::SharedLink => {
                self.sync_buffers();
                self.console.append(LineKind::Ok, "Loaded from shared link.");
                self.run();
            }
            Origin::Saved => {
                self.sync_buffers();
                self.console.append(LineKind::Ok, "Loaded last project.");
                self.run();
            }
            Origin::Workspace => {
                self.console.append(LineKind::Info, "Using workspace files.");
                self.run();
            }
            Origin::Defaults => self.reset(),
        }
    }

    /// Dispatch one user command. Returns `false` on quit.
    pub fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Run => self.run(),
            Command::Save => self.save(),
            Command::Load => self.load(),
            Command::Reset => self.reset(),
            Command::Share => {
                self.share();
            }
            Command::Download => {
                self.download();
            }
            Command::AutoRun(on) => {
                let on = on.unwrap_or(!self.state.auto_run);
                self.set_auto_run(on);
            }
            Command::ToggleTheme => self.toggle_theme(),
            Command::Clear => self.clear_console(),
            Command::Help => HELP.lines().for_each(crate::logger::log_raw),
            Command::Quit => return false,
        }
        true
    }

    /// Recompose and reload the preview now.
    pub fn run(&mut self) {
        self.scheduler.begin_render();
        let document = compose_with(
            self.transport,
            &self.state.markup,
            &self.state.style,
            &self.state.script,
        );
        self.surface.load(document);
        self.scheduler.finish_render();
        self.console.append(LineKind::Ok, "Preview updated.");
    }

    /// Record an edit. Returns whether the buffer content changed.
    ///
    /// A changed buffer restarts the quiet window when auto-run is on.
    pub fn on_edit(&mut self, buffer: Buffer, text: &str, now: Instant) -> bool {
        if !self.state.edit(buffer, text) {
            return false;
        }
        if self.state.auto_run {
            self.scheduler.edit(now);
        }
        true
    }

    /// Render if the quiet window has elapsed. Returns whether it rendered.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        if !self.scheduler.take_due(now) {
            return false;
        }
        if !self.state.auto_run {
            self.scheduler.finish_render();
            return false;
        }
        self.run();
        true
    }

    pub fn set_auto_run(&mut self, on: bool) {
        self.state.set_auto_run(on);
        self.write_flag(AUTO_KEY, on);
        if on {
            self.console.append(LineKind::Info, "Auto-run on.");
            self.run();
        } else {
            self.scheduler.cancel();
            self.console.append(LineKind::Info, "Auto-run off.");
        }
    }

    pub fn toggle_theme(&mut self) {
        let dark = !self.state.dark_theme;
        self.state.set_dark_theme(dark);
        self.write_flag(DARK_KEY, dark);
        let text = if dark { "Dark theme on." } else { "Dark theme off." };
        self.console.append(LineKind::Info, text);
    }

    pub fn save(&mut self) {
        match persist::save(self.store.as_mut(), &self.state) {
            Ok(snapshot) => {
                self.state.saved_at = snapshot.saved_at;
                self.console.append(LineKind::Ok, "Saved.");
            }
            Err(e) => self
                .console
                .append(LineKind::Error, &format!("Failed to save: {e}")),
        }
    }

    /// Restore the saved buffers. Preferences change only where the record
    /// carries a real boolean.
    pub fn load(&mut self) {
        match persist::load(self.store.as_ref()) {
            LoadOutcome::Loaded(StoredProject { state, dark, auto }) => {
                self.state.load_buffers(state.markup, state.style, state.script);
                self.state.saved_at = state.saved_at;
                if let Some(dark) = dark {
                    self.state.set_dark_theme(dark);
                    self.write_flag(DARK_KEY, dark);
                }
                if let Some(auto) = auto {
                    self.state.set_auto_run(auto);
                    self.write_flag(AUTO_KEY, auto);
                    if !auto {
                        self.scheduler.cancel();
                    }
                }
                self.sync_buffers();
                self.console.append(LineKind::Ok, "Loaded saved project.");
                self.run();
            }
            LoadOutcome::Missing => self
                .console
                .append(LineKind::Warn, "No saved project found."),
            LoadOutcome::Corrupt(e) => self
                .console
                .append(LineKind::Error, &format!("Failed to load: {e}")),
        }
    }

    /// Restore the bootstrap buffers, keeping preferences, and render.
    pub fn reset(&mut self) {
        self.state.reset_buffers();
        self.sync_buffers();
        self.console.append(LineKind::Warn, "Reset to boilerplate.");
        self.run();
    }

    /// Save the standalone document. Returns where it was written.
    pub fn download(&mut self) -> Option<PathBuf> {
        let document = compose(&self.state.markup, &self.state.style, &self.state.script);
        match self.saver.save(DOWNLOAD_NAME, &document, DOWNLOAD_MIME) {
            Ok(path) => {
                crate::debug!("download"; "{}", path.display());
                self.console
                    .append(LineKind::Ok, &format!("Downloaded {DOWNLOAD_NAME}"));
                Some(path)
            }
            Err(e) => {
                self.console
                    .append(LineKind::Error, &format!("Download failed: {e:#}"));
                None
            }
        }
    }

    /// Copy a share link; without a clipboard it goes to the console.
    pub fn share(&mut self) -> String {
        let url = persist::share_url(&self.share_base, &self.state);
        match self.clipboard.write_text(&url) {
            Ok(()) => self
                .console
                .append(LineKind::Ok, "Share link copied to clipboard."),
            Err(e) => {
                crate::debug!("share"; "{e:#}");
                self.console
                    .append(LineKind::Warn, "Copy failed. Link placed in console.");
                self.console.append(LineKind::Info, &url);
            }
        }
        url
    }

    pub fn clear_console(&mut self) {
        self.console.clear();
    }

    /// Feed one raw frame from the preview. Returns whether it was a diagnostic.
    pub fn on_bridge(&mut self, raw: &str) -> bool {
        match receive(raw) {
            Some(event) => {
                self.console.append_event(&event);
                true
            }
            None => {
                crate::debug!("bridge"; "ignored frame ({} bytes)", raw.len());
                false
            }
        }
    }

    /// Write the state's buffers back to the editing surface.
    fn sync_buffers(&mut self) {
        for buffer in Buffer::ALL {
            if let Err(e) = self
                .buffers
                .get_mut(buffer)
                .set_value(self.state.buffer(buffer))
            {
                self.console.append(
                    LineKind::Error,
                    &format!("Failed to write {} buffer: {e:#}", buffer.label()),
                );
            }
        }
    }

    fn write_flag(&mut self, key: &str, on: bool) {
        if let Err(e) = self.store.set(key, flag_value(on)) {
            self.console
                .append(LineKind::Error, &format!("Failed to save preference: {e}"));
        }
    }
}
