use std::net::TcpStream;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tungstenite::protocol::Message;

use crate::actor::messages::ControllerMsg;
use crate::reload::message::HostMessage;

use super::{RegisteredClient, WsActor};

/// Interval between non-blocking read sweeps
const POLL_INTERVAL: Duration = Duration::from_millis(50);

impl WsActor {
    /// Add a new client connection
    pub(super) fn add_client(&self, stream: TcpStream) {
        let peer = stream.peer_addr().ok();

        // Keep blocking mode during handshake, switch to non-blocking after
        match tungstenite::accept(stream) {
            Ok(mut ws) => {
                let _ = ws.get_ref().set_nonblocking(true);

                let connected_msg = HostMessage::connected();
                if let Err(e) = ws.send(Message::Text(connected_msg.to_json().into())) {
                    crate::log!("ws"; "failed to send connected message: {}", e);
                    return;
                }

                let mut clients = self.clients.lock();
                crate::debug!("ws"; "client connected (total: {}, peer: {:?})", clients.len() + 1, peer);
                clients.push(RegisteredClient { ws, peer });
            }
            Err(e) => {
                crate::log!("ws"; "handshake failed: {}", e);
            }
        }
    }

    /// Background thread to read client frames (non-blocking poll)
    ///
    /// Text frames are collected under the lock and forwarded after it is
    /// released, so a busy controller never stalls broadcasts.
    pub(super) fn client_reader_loop(
        clients: Arc<Mutex<Vec<RegisteredClient>>>,
        controller_tx: mpsc::Sender<ControllerMsg>,
    ) {
        while !crate::core::is_shutdown() {
            std::thread::sleep(POLL_INTERVAL);

            let frames = Self::drain_frames(&mut clients.lock());

            for text in frames {
                if controller_tx.blocking_send(ControllerMsg::Bridge(text)).is_err() {
                    crate::debug!("ws"; "controller gone, reader stopping");
                    return;
                }
            }
        }
    }

    /// Read every pending frame from every client and drop closed ones.
    fn drain_frames(clients: &mut Vec<RegisteredClient>) -> Vec<String> {
        let mut frames = Vec::new();

        clients.retain_mut(|client| loop {
            match client.ws.read() {
                Ok(Message::Text(text)) => frames.push(text.as_str().to_owned()),
                Ok(Message::Close(_)) => {
                    crate::debug!("ws"; "client closed: {:?}", client.peer);
                    break false;
                }
                // Ping/pong are answered by tungstenite on the next read or write
                Ok(_) => {}
                Err(tungstenite::Error::Io(ref e)) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    // No data available
                    break true;
                }
                Err(e) => {
                    crate::debug!("ws"; "client dropped {:?}: {}", client.peer, e);
                    break false;
                }
            }
        });

        frames
    }
}
