//! WebSocket Actor - Bidirectional Communication
//!
//! This actor is responsible for:
//! - Managing preview client connections
//! - Broadcasting reloads to all connected clients
//! - Forwarding client frames to the controller, uninterpreted
//!
//! # Architecture
//!
//! ```text
//! LivePreview --[Reload]--> WsActor --[broadcast]--> Clients
//!                              |                        |
//! ControllerActor <--[Bridge]--+-------[console]--------+
//! ```

mod client_io;
mod delivery;

use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tungstenite::WebSocket;

use super::messages::{ControllerMsg, WsMsg};

/// A connected preview client
struct RegisteredClient {
    ws: WebSocket<TcpStream>,
    peer: Option<SocketAddr>,
}

/// WebSocket Actor - manages client connections and broadcasts
pub struct WsActor {
    /// Channel to receive messages
    rx: mpsc::Receiver<WsMsg>,
    /// Connected clients (shared for broadcast + read threads)
    clients: Arc<Mutex<Vec<RegisteredClient>>>,
    /// Where inbound frames go
    controller_tx: mpsc::Sender<ControllerMsg>,
}

impl WsActor {
    pub fn new(rx: mpsc::Receiver<WsMsg>, controller_tx: mpsc::Sender<ControllerMsg>) -> Self {
        Self {
            rx,
            clients: Arc::new(Mutex::new(Vec::new())),
            controller_tx,
        }
    }

    /// Run the actor event loop
    pub async fn run(mut self) {
        // Poll client frames on a plain thread (tungstenite is blocking)
        let clients_for_reader = Arc::clone(&self.clients);
        let controller_tx = self.controller_tx.clone();
        std::thread::spawn(move || {
            Self::client_reader_loop(clients_for_reader, controller_tx);
        });

        while let Some(msg) = self.rx.recv().await {
            match msg {
                WsMsg::Reload { reason } => {
                    self.broadcast_reload(&reason);
                }

                WsMsg::AddClient(stream) => {
                    self.add_client(stream);
                }

                WsMsg::Shutdown => {
                    crate::debug!("ws"; "shutting down");
                    let mut clients = self.clients.lock();
                    for mut client in clients.drain(..) {
                        let _ = client.ws.close(None);
                    }
                    break;
                }
            }
        }
    }
}
