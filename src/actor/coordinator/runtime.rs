use std::time::Duration;

use crossbeam::channel::Receiver;
use tokio::sync::mpsc;

use crate::actor::controller::{ControllerActor, ExitReason};
use crate::actor::fs::FsActor;
use crate::actor::messages::{ControllerMsg, WsMsg};
use crate::actor::ws::WsActor;

/// Run all actors until shutdown or `quit`.
pub(super) async fn run_actors(
    fs: FsActor,
    ws: WsActor,
    controller: ControllerActor,
    controller_tx: mpsc::Sender<ControllerMsg>,
    ws_tx: mpsc::Sender<WsMsg>,
    shutdown_rx: Option<Receiver<()>>,
) {
    let fs_handle = tokio::spawn(async move { fs.run().await });
    let ws_handle = tokio::spawn(async move { ws.run().await });
    let mut controller_handle = tokio::spawn(async move { controller.run().await });

    let outcome = tokio::select! {
        () = wait_for_signal(shutdown_rx) => {
            crate::debug!("actor"; "shutdown signal received");
            let _ = controller_tx.send(ControllerMsg::Shutdown).await;
            tokio::time::timeout(Duration::from_millis(500), controller_handle)
                .await
                .ok()
                .and_then(Result::ok)
        }
        result = &mut controller_handle => result.ok(),
    };

    // `quit` at the prompt stops the whole server
    if let Some((_, ExitReason::Quit)) = outcome {
        crate::core::request_shutdown();
    }

    crate::debug!("actor"; "sending shutdown to ws");
    let _ = ws_tx.send(WsMsg::Shutdown).await;
    let _ = tokio::time::timeout(Duration::from_millis(500), ws_handle).await;
    fs_handle.abort();
}

/// Resolve once the shutdown channel fires or shutdown is flagged.
async fn wait_for_signal(shutdown_rx: Option<Receiver<()>>) {
    let Some(rx) = shutdown_rx else {
        return std::future::pending().await;
    };
    loop {
        if rx.try_recv().is_ok() || crate::core::is_shutdown() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
}
