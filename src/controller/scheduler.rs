use std::time::Duration;

use tokio::time::Instant;

pub const DEFAULT_DEBOUNCE_MS: u64 = 400;

/// Render scheduling phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// A render fires at `deadline` unless another edit pushes it back.
    Pending { deadline: Instant },
    Rendering,
}

/// Pure trailing-edge debouncer: only handles timing.
/// No business logic, no global state access.
///
/// There is at most one pending deadline. Each edit replaces it, so a
/// burst of edits collapses into one render after the quiet window.
#[derive(Debug)]
pub struct Scheduler {
    window: Duration,
    phase: Phase,
}

impl Scheduler {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            phase: Phase::Idle,
        }
    }

    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Install or restart the pending deadline.
    pub fn edit(&mut self, now: Instant) {
        self.phase = Phase::Pending {
            deadline: now + self.window,
        };
    }

    /// Drop a pending render, if any.
    pub fn cancel(&mut self) {
        if matches!(self.phase, Phase::Pending { .. }) {
            self.phase = Phase::Idle;
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        match self.phase {
            Phase::Pending { deadline } => Some(deadline),
            _ => None,
        }
    }

    /// Move to `Rendering` if the pending deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.phase {
            Phase::Pending { deadline } if now >= deadline => {
                self.phase = Phase::Rendering;
                true
            }
            _ => false,
        }
    }

    /// Start a render immediately, superseding any pending one.
    pub fn begin_render(&mut self) {
        self.phase = Phase::Rendering;
    }

    pub fn finish_render(&mut self) {
        if self.phase == Phase::Rendering {
            self.phase = Phase::Idle;
        }
    }
}
