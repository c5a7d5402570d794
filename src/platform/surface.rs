//! Preview rendering surface.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tokio::sync::mpsc;

use crate::actor::messages::WsMsg;

/// Accepts a full replacement document and runs it in isolation.
pub trait PreviewSurface: Send {
    fn load(&mut self, document: String);
}

/// Serve-mode surface: the current document is served over HTTP and
/// connected preview clients are told to reload.
pub struct LivePreview {
    document: Arc<ArcSwap<String>>,
    ws_tx: Option<mpsc::Sender<WsMsg>>,
}

impl LivePreview {
    pub fn new(document: Arc<ArcSwap<String>>, ws_tx: Option<mpsc::Sender<WsMsg>>) -> Self {
        Self { document, ws_tx }
    }
}

impl PreviewSurface for LivePreview {
    fn load(&mut self, document: String) {
        self.document.store(Arc::new(document));
        if let Some(tx) = &self.ws_tx
            && tx
                .try_send(WsMsg::Reload {
                    reason: "preview updated".into(),
                })
                .is_err()
        {
            crate::debug!("preview"; "reload not delivered: websocket actor busy or gone");
        }
    }
}
