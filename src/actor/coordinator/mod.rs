//! Actor Coordinator - Wires up the serve-mode Actor System
//!
//! The Coordinator is a thin orchestrator that:
//! - Creates communication channels
//! - Builds the controller and resolves the startup state
//! - Runs the actors concurrently

mod runtime;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, anyhow};
use arc_swap::ArcSwap;
use crossbeam::channel::Receiver;
use tokio::sync::mpsc;
use url::Url;

use super::controller::ControllerActor;
use super::fs::FsActor;
use super::input::InputActor;
use super::messages::{ControllerMsg, WsMsg};
use super::ws::WsActor;
use crate::bridge::Transport;
use crate::config::PenConfig;
use crate::console::ConsolePanel;
use crate::controller::{Controller, Parts};
use crate::persist::{Adoption, FileStore, Resolved, adopt_workspace, resolve_startup};
use crate::platform::{DirSaver, LivePreview, SystemClipboard};
use crate::workspace::{Buffers, read_project};

const CHANNEL_BUFFER: usize = 64;

/// Coordinator - wires up and runs the actor system.
pub struct Coordinator {
    config: Arc<PenConfig>,
    document: Arc<ArcSwap<String>>,
    share_base: Url,
    shared_link: Option<String>,
    shutdown_rx: Option<Receiver<()>>,
}

impl Coordinator {
    /// `document` is what the HTTP server hands out; `share_base` is its address.
    pub fn new(config: Arc<PenConfig>, document: Arc<ArcSwap<String>>, share_base: Url) -> Self {
        Self {
            config,
            document,
            share_base,
            shared_link: None,
            shutdown_rx: None,
        }
    }

    /// Start from a shared link instead of the saved project.
    pub fn with_shared_link(mut self, link: Option<String>) -> Self {
        self.shared_link = link;
        self
    }

    /// Set shutdown signal receiver.
    pub fn with_shutdown_signal(mut self, rx: Receiver<()>) -> Self {
        self.shutdown_rx = Some(rx);
        self
    }

    /// Run the actor system.
    pub async fn run(mut self) -> Result<()> {
        let (controller_tx, controller_rx) = mpsc::channel::<ControllerMsg>(CHANNEL_BUFFER);
        let (ws_tx, ws_rx) = mpsc::channel::<WsMsg>(CHANNEL_BUFFER);
        let config = Arc::clone(&self.config);

        let ws_port = match crate::reload::server::start_ws_server_with_channel(
            config.serve.interface,
            config.serve.ws_port,
            ws_tx.clone(),
        ) {
            Ok(port) => {
                crate::debug!("ws"; "ws://{}:{}", config.serve.interface, port);
                port
            }
            Err(e) => {
                crate::log!("ws"; "websocket server failed, console bridge unavailable: {}", e);
                config.serve.ws_port
            }
        };

        let names = config.editor.file_names();
        let store = FileStore::new(config.storage_dir());
        let resolved = self.resolve(&store);

        let parts = Parts {
            buffers: Buffers::in_dir(config.workspace(), &names),
            surface: Box::new(LivePreview::new(
                Arc::clone(&self.document),
                Some(ws_tx.clone()),
            )),
            store: Box::new(store),
            clipboard: Box::new(SystemClipboard),
            saver: Box::new(DirSaver::new(config.workspace())),
            console: ConsolePanel::new(config.console.max_message_len)
                .with_max_lines(config.console.max_lines),
        };
        let mut controller = Controller::new(
            parts,
            Transport::Socket { port: ws_port },
            Duration::from_millis(config.editor.debounce_ms),
            self.share_base.clone(),
        );
        controller.start(resolved);

        let fs_actor = FsActor::new(config.workspace(), names, controller_tx.clone())
            .map_err(|e| anyhow!("watcher failed: {}", e))?;
        let ws_actor = WsActor::new(ws_rx, controller_tx.clone());
        InputActor::new(controller_tx.clone()).spawn();
        let controller_actor = ControllerActor::new(controller_rx, controller);

        crate::debug!("actor"; "start");
        let shutdown_rx = self.shutdown_rx.take();
        runtime::run_actors(
            fs_actor,
            ws_actor,
            controller_actor,
            controller_tx,
            ws_tx,
            shutdown_rx,
        )
        .await;

        crate::debug!("actor"; "stopped");
        Ok(())
    }

    /// Startup state: link, then the workspace files, then the saved record,
    /// then the starter project. The `[editor] auto_run` override wins.
    fn resolve(&self, store: &FileStore) -> Resolved {
        let mut resolved = resolve_startup(self.shared_link.as_deref(), store);

        let names = self.config.editor.file_names();
        match read_project(self.config.workspace(), &names) {
            Ok(files) => {
                if adopt_workspace(&mut resolved, files) == Adoption::SupersededRecord {
                    crate::log!(
                        "warning";
                        "workspace files differ from the saved project, keeping the files (`load` restores it)"
                    );
                }
            }
            Err(e) => crate::debug!("actor"; "workspace incomplete: {:#}", e),
        }

        if let Some(on) = self.config.editor.auto_run {
            resolved.state.set_auto_run(on);
        }
        resolved
    }
}
