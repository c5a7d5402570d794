//! Console panel: bounded log of bridge diagnostics and host status.
//!
//! Only the newest lines are retained; older ones have already been
//! echoed to the terminal.
//!
//! Every line is stamped with the host clock when it is appended, never
//! with the time the preview emitted it.

use std::collections::VecDeque;

use owo_colors::OwoColorize;
use time::OffsetDateTime;

use crate::bridge::{DiagnosticEvent, Level};

/// Default upper bound on the characters kept from one message.
pub const DEFAULT_MAX_MESSAGE_LEN: usize = 8192;

/// Default number of lines the panel retains.
pub const DEFAULT_MAX_LINES: usize = 1000;

/// Visual class of a console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Log,
    Info,
    Warn,
    Error,
    /// Host status (preview updated, saved, ...)
    Ok,
}

impl From<Level> for LineKind {
    fn from(level: Level) -> Self {
        match level {
            Level::Log => Self::Log,
            Level::Info => Self::Info,
            Level::Warn => Self::Warn,
            Level::Error => Self::Error,
        }
    }
}

impl LineKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Log => "log",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Ok => "ok",
        }
    }
}

/// Wall-clock time of day, `HH:MM:SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl Timestamp {
    /// Local time, falling back to UTC when the offset is unknown.
    pub fn now() -> Self {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        Self {
            hour: now.hour(),
            minute: now.minute(),
            second: now.second(),
        }
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// One rendered console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    pub kind: LineKind,
    pub at: Timestamp,
    pub text: String,
}

impl ConsoleLine {
    /// `[HH:MM:SS] text`
    #[cfg(test)]
    pub fn render(&self) -> String {
        format!("[{}] {}", self.at, self.text)
    }
}

/// Console log keeping the newest `max_lines` lines.
#[derive(Debug)]
pub struct ConsolePanel {
    lines: VecDeque<ConsoleLine>,
    max_message_len: usize,
    max_lines: usize,
    echo: bool,
}

impl ConsolePanel {
    pub fn new(max_message_len: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            max_message_len: max_message_len.max(1),
            max_lines: DEFAULT_MAX_LINES,
            echo: true,
        }
    }

    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines.max(1);
        self
    }

    /// Disable terminal echo (lines are still retained).
    #[cfg(test)]
    pub fn silent(mut self) -> Self {
        self.echo = false;
        self
    }

    #[cfg(test)]
    pub fn lines(&self) -> &VecDeque<ConsoleLine> {
        &self.lines
    }

    /// Append one line stamped now.
    pub fn append(&mut self, kind: LineKind, message: &str) {
        self.append_at(kind, message, Timestamp::now());
    }

    pub fn append_at(&mut self, kind: LineKind, message: &str, at: Timestamp) {
        let line = ConsoleLine {
            kind,
            at,
            text: message.to_string(),
        };
        if self.echo {
            print_line(&line);
        }
        if self.lines.len() == self.max_lines {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    /// Append a diagnostic received from the preview.
    ///
    /// Preview text is capped at the configured length; host lines are not.
    pub fn append_event(&mut self, event: &DiagnosticEvent) {
        let text = truncate_message(&event.message, self.max_message_len);
        self.append(event.level.into(), &text);
    }

    /// Remove every line, then note the clear.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.append(LineKind::Info, "Console cleared.");
    }
}

/// Cap `message` at `max` characters, noting how many were dropped.
fn truncate_message(message: &str, max: usize) -> String {
    match message.char_indices().nth(max) {
        None => message.to_string(),
        Some((cut, _)) => {
            let dropped = message[cut..].chars().count();
            format!("{}… ({dropped} more characters)", &message[..cut])
        }
    }
}

fn print_line(line: &ConsoleLine) {
    let stamp = format!("[{}]", line.at).dimmed().to_string();
    let tag = format!("{:>5}", line.kind.label());
    let tag = match line.kind {
        LineKind::Log => tag.white().to_string(),
        LineKind::Info => tag.bright_blue().to_string(),
        LineKind::Warn => tag.bright_yellow().bold().to_string(),
        LineKind::Error => tag.bright_red().bold().to_string(),
        LineKind::Ok => tag.bright_green().to_string(),
    };
    crate::logger::log_raw(&format!("{stamp} {tag} {}", line.text));
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOON: Timestamp = Timestamp {
        hour: 12,
        minute: 5,
        second: 9,
    };

    #[test]
    fn test_render_line() {
        let mut panel = ConsolePanel::new(100).silent();
        panel.append_at(LineKind::Ok, "Preview updated.", NOON);
        assert_eq!(panel.lines()[0].render(), "[12:05:09] Preview updated.");
    }

    #[test]
    fn test_event_keeps_level() {
        let mut panel = ConsolePanel::new(100).silent();
        for level in Level::ALL {
            panel.append_event(&DiagnosticEvent::new(level, level.as_str()));
        }
        let kinds: Vec<_> = panel.lines().iter().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            [LineKind::Log, LineKind::Info, LineKind::Warn, LineKind::Error]
        );
    }

    #[test]
    fn test_long_messages_truncated() {
        let mut panel = ConsolePanel::new(5).silent();
        panel.append_event(&DiagnosticEvent::new(Level::Log, "héllo wörld"));
        assert_eq!(panel.lines()[0].text, "héllo… (6 more characters)");

        panel.append_event(&DiagnosticEvent::new(Level::Warn, "short"));
        assert_eq!(panel.lines()[1].text, "short");

        // Host lines such as share links are kept whole
        panel.append(LineKind::Info, "http://127.0.0.1/#p=abcdefgh");
        assert_eq!(panel.lines()[2].text, "http://127.0.0.1/#p=abcdefgh");
    }

    #[test]
    fn test_oldest_lines_dropped() {
        let mut panel = ConsolePanel::new(100).silent().with_max_lines(3);
        for i in 0..10 {
            panel.append_event(&DiagnosticEvent::new(Level::Log, &i.to_string()));
        }
        let texts: Vec<_> = panel.lines().iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["7", "8", "9"]);

        panel.clear();
        assert_eq!(panel.lines().len(), 1);
    }

    #[test]
    fn test_clear_leaves_notice() {
        let mut panel = ConsolePanel::new(100).silent();
        panel.append(LineKind::Log, "a");
        panel.append(LineKind::Log, "b");
        panel.clear();
        assert_eq!(panel.lines().len(), 1);
        assert_eq!(panel.lines()[0].text, "Console cleared.");
        assert_eq!(panel.lines()[0].kind, LineKind::Info);
    }
}
