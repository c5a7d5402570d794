use std::time::Duration;

use tokio::sync::mpsc;
use url::Url;

use super::{ControllerActor, ExitReason};
use crate::actor::messages::ControllerMsg;
use crate::bridge::{DiagnosticEvent, Level, Transport};
use crate::console::ConsolePanel;
use crate::controller::{Command, Controller, Parts};
use crate::persist::{MemoryStore, resolve_startup};
use crate::platform::{FakeClipboard, MemorySaver, RecordingSurface};
use crate::project::Buffer;
use crate::workspace::{Buffers, MemoryBuffer};

fn controller(surface: &RecordingSurface) -> Controller {
    let store = MemoryStore::new();
    let parts = Parts {
        buffers: Buffers::new(
            Box::new(MemoryBuffer::default()),
            Box::new(MemoryBuffer::default()),
            Box::new(MemoryBuffer::default()),
        ),
        surface: Box::new(surface.clone()),
        store: Box::new(store.clone()),
        clipboard: Box::new(FakeClipboard::default()),
        saver: Box::new(MemorySaver::default()),
        console: ConsolePanel::new(64).silent(),
    };
    let base = Url::parse("http://127.0.0.1:5277/").unwrap();
    let mut controller = Controller::new(
        parts,
        Transport::Socket { port: 5278 },
        Duration::from_millis(400),
        base,
    );
    controller.start(resolve_startup(None, &store));
    controller
}

fn edit(text: &str) -> ControllerMsg {
    ControllerMsg::Edit {
        buffer: Buffer::Script,
        text: text.into(),
    }
}

#[tokio::test(start_paused = true)]
async fn test_debounced_render_through_actor() {
    let surface = RecordingSurface::default();
    let (tx, rx) = mpsc::channel(32);
    let handle = tokio::spawn(ControllerActor::new(rx, controller(&surface)).run());

    tx.send(ControllerMsg::Command(Command::AutoRun(Some(true)))).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    let renders = surface.count();

    for i in 0..5 {
        tx.send(edit(&format!("console.log({i})"))).await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    // 100 ms after the last edit: still quiet
    assert_eq!(surface.count(), renders);

    tokio::time::sleep(Duration::from_millis(350)).await;
    assert_eq!(surface.count(), renders + 1);
    assert!(surface.last().unwrap().contains("console.log(4)"));

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(surface.count(), renders + 1);

    tx.send(ControllerMsg::Shutdown).await.unwrap();
    let (_, reason) = handle.await.unwrap();
    assert_eq!(reason, ExitReason::Shutdown);
}

#[tokio::test(start_paused = true)]
async fn test_bridge_frames_reach_console_in_order() {
    let surface = RecordingSurface::default();
    let (tx, rx) = mpsc::channel(32);
    let handle = tokio::spawn(ControllerActor::new(rx, controller(&surface)).run());

    tx.send(ControllerMsg::Bridge("garbage".into())).await.unwrap();
    for level in [Level::Warn, Level::Log] {
        let frame = DiagnosticEvent::new(level, level.as_str()).to_json();
        tx.send(ControllerMsg::Bridge(frame)).await.unwrap();
    }
    tx.send(ControllerMsg::Command(Command::Quit)).await.unwrap();

    let (controller, reason) = handle.await.unwrap();
    assert_eq!(reason, ExitReason::Quit);
    let tail: Vec<_> = controller
        .console()
        .lines()
        .iter()
        .rev()
        .take(2)
        .map(|l| l.text.as_str())
        .collect();
    assert_eq!(tail, ["log", "warn"]);
}

#[tokio::test]
async fn test_actor_stops_when_senders_drop() {
    let surface = RecordingSurface::default();
    let (tx, rx) = mpsc::channel(4);
    drop(tx);
    let (_, reason) = ControllerActor::new(rx, controller(&surface)).run().await;
    assert_eq!(reason, ExitReason::Shutdown);
}
