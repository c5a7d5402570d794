//! User-triggered actions.

use std::str::FromStr;

/// One user action, from the terminal prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Run,
    Save,
    Load,
    Reset,
    Share,
    Download,
    /// `None` flips the current setting.
    AutoRun(Option<bool>),
    ToggleTheme,
    Clear,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  run              re-render the preview now
  save             store the project
  load             restore the stored project
  reset            restore the starter project
  share            copy a share link
  download         write project.html
  auto [on|off]    toggle auto-run
  theme            toggle the dark theme
  clear            clear the console
  help             show this list
  quit             stop the server";

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err("empty command".into());
        };
        let arg = words.next();

        let command = match head.to_ascii_lowercase().as_str() {
            "run" | "r" => Self::Run,
            "save" | "s" => Self::Save,
            "load" | "l" => Self::Load,
            "reset" => Self::Reset,
            "share" => Self::Share,
            "download" | "dl" => Self::Download,
            "auto" => match arg {
                None => Self::AutoRun(None),
                Some("on") => Self::AutoRun(Some(true)),
                Some("off") => Self::AutoRun(Some(false)),
                Some(other) => return Err(format!("auto: expected on|off, got `{other}`")),
            },
            "theme" | "dark" => Self::ToggleTheme,
            "clear" | "cls" => Self::Clear,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(format!("unknown command `{other}` (try `help`)")),
        };
        Ok(command)
    }
}
