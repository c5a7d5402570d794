//! Controller Actor - the single dispatch queue
//!
//! Owns the [`Controller`]. Edits, commands and bridge frames arrive on
//! one channel and are applied in order; the pending auto-run deadline is
//! awaited in the same `select!`, so a render never interleaves with a
//! message.

#[cfg(test)]
mod tests;

use tokio::sync::mpsc;
use tokio::time::Instant;

use super::messages::ControllerMsg;
use crate::controller::Controller;

/// Why the actor loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// `quit` command
    Quit,
    /// Shutdown message or all senders gone
    Shutdown,
}

pub struct ControllerActor {
    rx: mpsc::Receiver<ControllerMsg>,
    controller: Controller,
}

impl ControllerActor {
    pub fn new(rx: mpsc::Receiver<ControllerMsg>, controller: Controller) -> Self {
        Self { rx, controller }
    }

    /// Run until quit or shutdown. Returns the controller for inspection.
    pub async fn run(mut self) -> (Controller, ExitReason) {
        let reason = loop {
            let deadline = self.controller.deadline();
            tokio::select! {
                biased;
                msg = self.rx.recv() => match msg {
                    Some(ControllerMsg::Edit { buffer, text }) => {
                        self.controller.on_edit(buffer, &text, Instant::now());
                    }
                    Some(ControllerMsg::Command(command)) => {
                        if !self.controller.handle(command) {
                            break ExitReason::Quit;
                        }
                    }
                    Some(ControllerMsg::Bridge(raw)) => {
                        self.controller.on_bridge(&raw);
                    }
                    Some(ControllerMsg::Shutdown) | None => break ExitReason::Shutdown,
                },
                () = sleep_until(deadline) => {
                    self.controller.fire_due(Instant::now());
                }
            }
        };
        crate::debug!("controller"; "stopped ({:?})", reason);
        (self.controller, reason)
    }
}

/// Sleep until `deadline`, or forever when nothing is pending.
async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
