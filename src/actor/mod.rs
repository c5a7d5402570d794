//! Actor System for serve mode
//!
//! Message-passing concurrency around one controller:
//!
//! ```text
//! FsActor ----+
//! (watch)     +--> ControllerActor --(LivePreview)--> WsActor --> previews
//! InputActor -+      (dispatch)                      (reload)
//!  (stdin)             ^                                |
//!                      +------------Bridge frames-------+
//! ```
//!
//! # Module Structure
//!
//! - `messages` - Message types for inter-actor communication
//! - `controller` - The single dispatch queue
//! - `fs` - Workspace file watcher
//! - `input` - Terminal line commands
//! - `ws` - WebSocket broadcast and bridge intake
//! - `coordinator` - Wires up and runs actors

pub mod controller;
pub mod coordinator;
pub mod fs;
pub mod input;
pub mod messages;
pub mod ws;

pub use coordinator::Coordinator;
