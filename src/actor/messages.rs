//! Actor Message Definitions
//!
//! Message types for inter-actor communication.
//!
//! ```text
//! FsActor ----Edit----> ControllerActor --(LivePreview)--Reload--> WsActor
//! InputActor -Command->        ^                                     |
//!                              +--------------Bridge-----------------+
//! ```

use crate::controller::Command;
use crate::project::Buffer;

// =============================================================================
// ControllerActor Messages
// =============================================================================

/// Messages to Controller Actor
#[derive(Debug)]
pub enum ControllerMsg {
    /// A buffer file holds new text
    Edit { buffer: Buffer, text: String },
    /// User command from the prompt
    Command(Command),
    /// Raw text frame from a preview client, uninterpreted
    Bridge(String),
    /// Shutdown
    Shutdown,
}

// =============================================================================
// WsActor Messages
// =============================================================================

/// Messages to WebSocket Actor
#[derive(Debug)]
pub enum WsMsg {
    /// Reload every connected preview
    Reload { reason: String },
    /// Add client
    AddClient(std::net::TcpStream),
    /// Shutdown
    Shutdown,
}
