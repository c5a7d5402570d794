//! Input Actor - line commands from the terminal
//!
//! Reads stdin on a plain thread (stdin reads are blocking) and forwards
//! parsed commands to the ControllerActor. Unparsable lines are answered
//! locally and never reach the controller.

use std::io::BufRead;

use tokio::sync::mpsc;

use super::messages::ControllerMsg;
use crate::controller::Command;

pub struct InputActor {
    controller_tx: mpsc::Sender<ControllerMsg>,
}

impl InputActor {
    pub fn new(controller_tx: mpsc::Sender<ControllerMsg>) -> Self {
        Self { controller_tx }
    }

    /// Spawn the reader thread. It ends on EOF, `quit` or a closed channel.
    pub fn spawn(self) {
        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                match parse_line(&line) {
                    Some(Ok(command)) => {
                        let quit = command == Command::Quit;
                        if self.controller_tx.blocking_send(ControllerMsg::Command(command)).is_err() || quit {
                            break;
                        }
                    }
                    Some(Err(e)) => crate::log!("input"; "{}", e),
                    None => {}
                }
            }
            crate::debug!("input"; "stdin closed");
        });
    }
}

/// Blank lines are skipped.
fn parse_line(line: &str) -> Option<Result<Command, String>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    Some(line.parse())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("   "), None);
        assert_eq!(parse_line("share\n"), Some(Ok(Command::Share)));
        assert!(matches!(parse_line("bogus"), Some(Err(_))));
    }
}
