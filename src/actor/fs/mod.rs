//! FileSystem Actor
//!
//! Watches the workspace and forwards the new text of each buffer file to
//! the ControllerActor. Timing is the controller's business; this actor
//! only classifies and reads.
//!
//! Architecture:
//! ```text
//! Watcher → Classifier (path → Buffer) → read → ControllerMsg::Edit
//! ```

use std::path::{Path, PathBuf};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use super::messages::ControllerMsg;
use crate::project::Buffer;
use crate::workspace::FileNames;

// Event classification (raw notify events -> buffers).
mod classifier;

#[cfg(test)]
mod tests;

use classifier::changed_buffers;

/// FileSystem Actor - watches the buffer files
pub struct FsActor {
    /// Channel to receive notify events (sync -> async bridge)
    notify_rx: std::sync::mpsc::Receiver<notify::Result<notify::Event>>,
    /// Watcher handle (must be kept alive)
    _watcher: RecommendedWatcher,
    /// Watched workspace root (canonical)
    root: PathBuf,
    names: FileNames,
    /// Channel to send messages to ControllerActor
    controller_tx: mpsc::Sender<ControllerMsg>,
}

impl FsActor {
    /// Create a new FsActor
    ///
    /// The watcher starts immediately, buffering events until `run`.
    pub fn new(
        root: &Path,
        names: FileNames,
        controller_tx: mpsc::Sender<ControllerMsg>,
    ) -> notify::Result<Self> {
        // Create sync channel for notify (it doesn't support async)
        let (notify_tx, notify_rx) = std::sync::mpsc::channel();

        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = notify_tx.send(res);
        })?;

        // Event paths are reported under the watched path, so watch the canonical one
        let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
        watcher.watch(&root, RecursiveMode::NonRecursive)?;
        crate::debug!("watch"; "watching {}", root.display());

        Ok(Self {
            notify_rx,
            _watcher: watcher,
            root,
            names,
            controller_tx,
        })
    }

    /// Run the actor event loop
    pub async fn run(self) {
        let notify_rx = self.notify_rx;
        let (async_tx, mut async_rx) = tokio::sync::mpsc::channel::<notify::Event>(64);

        // Spawn a thread to poll notify events and send to async channel
        std::thread::spawn(move || {
            while let Ok(result) = notify_rx.recv() {
                match result {
                    Ok(event) => {
                        if async_tx.blocking_send(event).is_err() {
                            break; // Receiver dropped
                        }
                    }
                    Err(e) => crate::log!("watch"; "notify error: {}", e),
                }
            }
        });

        while let Some(event) = async_rx.recv().await {
            for buffer in changed_buffers(&event, &self.root, &self.names) {
                let Some(text) = read_buffer(&self.root, &self.names, buffer) else {
                    continue;
                };
                let msg = ControllerMsg::Edit { buffer, text };
                if self.controller_tx.send(msg).await.is_err() {
                    // ControllerActor shut down
                    return;
                }
            }
        }
    }
}

/// Current text of a buffer file. `None` while the file is missing.
fn read_buffer(root: &Path, names: &FileNames, buffer: Buffer) -> Option<String> {
    let path = root.join(names.name(buffer));
    match std::fs::read_to_string(&path) {
        Ok(text) => {
            crate::debug!("watch"; "{} changed ({} bytes)", names.name(buffer), text.len());
            Some(text)
        }
        Err(e) => {
            crate::debug!("watch"; "skip {}: {}", path.display(), e);
            None
        }
    }
}
