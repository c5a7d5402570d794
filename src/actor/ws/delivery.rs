use tungstenite::protocol::Message;

use super::WsActor;
use crate::reload::message::HostMessage;

impl WsActor {
    /// Tell every preview to reload. Returns how many clients took the frame.
    ///
    /// Clients whose socket refuses the write are dropped.
    pub(super) fn broadcast_reload(&self, reason: &str) -> usize {
        let frame = Message::Text(HostMessage::reload_with_reason(reason).to_json().into());
        let mut clients = self.clients.lock();
        if clients.is_empty() {
            crate::debug!("ws"; "reload ({}) with no preview open", reason);
            return 0;
        }

        let before = clients.len();
        clients.retain_mut(|client| match client.ws.send(frame.clone()) {
            Ok(()) => true,
            Err(e) => {
                let peer = client.peer.map(|p| p.to_string()).unwrap_or_default();
                crate::debug!("ws"; "dropping preview {}: {}", peer, e);
                false
            }
        });
        let delivered = clients.len();
        crate::debug!("ws"; "reload ({}) sent to {}/{} previews", reason, delivered, before);
        delivered
    }
}
