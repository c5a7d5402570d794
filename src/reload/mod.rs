//! Reload Module
//!
//! WebSocket channel between the sandpen host and preview clients.
//!
//! ```text
//! ControllerActor --Reload--> WsActor ---reload---> Preview
//!        ^                                            |
//!        +-----------------Bridge(raw)----------------+
//! ```
//!
//! # Modules
//!
//! - `message` - Host to preview messages (connected, reload)
//! - `server` - WebSocket listener handing clients to the WsActor

pub mod message;
pub mod server;
