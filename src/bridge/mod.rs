//! Diagnostic bridge between the preview and the host.
//!
//! The composed preview runs in its own execution context. The injected
//! bridge script wraps the four console levels and the global error and
//! rejection hooks, and posts each occurrence as:
//!
//! ```json
//! {"type": "console", "payload": {"level": "warn", "msg": "text"}}
//! ```
//!
//! Delivery is fire-and-forget. The host side ([`receive`]) accepts any
//! text, since the transport admits messages from any origin, and keeps
//! only frames of exactly this shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::embed::bridge::{BRIDGE_JS, BridgeVars};

/// Message `type` tag used by the bridge.
pub const MESSAGE_TYPE: &str = "console";

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Log,
    Info,
    Warn,
    Error,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Log, Level::Info, Level::Warn, Level::Error];

    #[cfg(test)]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Log => "log",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "log" => Some(Self::Log),
            "info" => Some(Self::Info),
            "warn" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

/// One diagnostic crossing the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticEvent {
    pub level: Level,
    pub message: String,
}

#[derive(Serialize)]
struct WirePayload<'a> {
    level: Level,
    msg: &'a str,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    payload: WirePayload<'a>,
}

impl DiagnosticEvent {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    /// Wire form, as the bridge script would post it.
    pub fn to_json(&self) -> String {
        let message = WireMessage {
            kind: MESSAGE_TYPE,
            payload: WirePayload {
                level: self.level,
                msg: &self.message,
            },
        };
        serde_json::to_string(&message).unwrap_or_default()
    }
}

/// Filter and decode one inbound frame.
///
/// Non-JSON text, other message types and payload-less messages yield
/// `None`. An unknown level is read as `info`; a missing or non-text
/// `msg` becomes its JSON text, or empty when absent.
pub fn receive(raw: &str) -> Option<DiagnosticEvent> {
    let value: Value = serde_json::from_str(raw).ok()?;
    if value.get("type").and_then(Value::as_str) != Some(MESSAGE_TYPE) {
        return None;
    }
    let payload = value.get("payload")?.as_object()?;

    let level = payload
        .get("level")
        .and_then(Value::as_str)
        .and_then(Level::parse)
        .unwrap_or(Level::Info);
    let message = match payload.get("msg") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };

    Some(DiagnosticEvent { level, message })
}

/// How the bridge script reaches the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// `parent.postMessage(message, "*")`, for previews hosted in a frame.
    ParentFrame,
    /// WebSocket back to the sandpen server on `port`.
    Socket { port: u16 },
}

impl Transport {
    fn config_json(self) -> String {
        match self {
            Self::ParentFrame => r#"{"transport":"parent"}"#.to_string(),
            Self::Socket { port } => format!(r#"{{"transport":"socket","port":{port}}}"#),
        }
    }

    /// Complete `<script>` element installing the bridge.
    pub fn script_tag(self) -> String {
        let js = BRIDGE_JS.render(&BridgeVars {
            config_json: self.config_json(),
        });
        format!("<script>{js}</script>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receive_each_level() {
        for level in Level::ALL {
            let raw = DiagnosticEvent::new(level, "hello").to_json();
            let event = receive(&raw).unwrap();
            assert_eq!(event.level, level);
            assert_eq!(event.message, "hello");
        }
    }

    #[test]
    fn test_wire_shape() {
        let raw = DiagnosticEvent::new(Level::Warn, "w").to_json();
        assert_eq!(raw, r#"{"type":"console","payload":{"level":"warn","msg":"w"}}"#);
    }

    #[test]
    fn test_receive_structured_message_text() {
        // What the bridge posts for console.log({a:1})
        let raw = r#"{"type":"console","payload":{"level":"log","msg":"{\n  \"a\": 1\n}"}}"#;
        let event = receive(raw).unwrap();
        assert!(event.message.contains("\"a\": 1"));
        assert!(!event.message.contains("[object Object]"));
    }

    #[test]
    fn test_receive_ignores_foreign_messages() {
        for raw in [
            "",
            "not json",
            "42",
            "null",
            r#"{"type":"page","path":"/"}"#,
            r#"{"type":"console"}"#,
            r#"{"type":"console","payload":"text"}"#,
            r#"{"payload":{"level":"log","msg":"x"}}"#,
            r#"{"type":"pong","ts":1}"#,
        ] {
            assert!(receive(raw).is_none(), "expected ignored: {raw:?}");
        }
    }

    #[test]
    fn test_receive_lenient_payload() {
        let event = receive(r#"{"type":"console","payload":{"level":"trace"}}"#).unwrap();
        assert_eq!(event.level, Level::Info);
        assert_eq!(event.message, "");

        let event = receive(r#"{"type":"console","payload":{"level":"log","msg":7}}"#).unwrap();
        assert_eq!(event.message, "7");
    }

    #[test]
    fn test_script_tag_transports() {
        let parent = Transport::ParentFrame.script_tag();
        assert!(parent.starts_with("<script>"));
        assert!(parent.ends_with("</script>"));
        assert!(parent.contains(r#"{"transport":"parent"}"#));
        assert!(parent.contains("postMessage"));

        let socket = Transport::Socket { port: 35730 }.script_tag();
        assert!(socket.contains(r#""port":35730"#));
        assert!(socket.contains("WebSocket"));
    }

    use oxc::allocator::Allocator;
    use oxc::ast::ast::{Argument, CallExpression, StringLiteral};
    use oxc::ast_visit::{Visit, walk};
    use oxc::parser::Parser;
    use oxc::span::SourceType;

    /// Call and literal inventory of a parsed script.
    #[derive(Default)]
    struct ScriptScan {
        /// `x.name(...)` calls, in source order
        member_calls: Vec<String>,
        /// First argument of every `addEventListener` call
        listeners: Vec<String>,
        strings: Vec<String>,
    }

    impl<'a> Visit<'a> for ScriptScan {
        fn visit_call_expression(&mut self, it: &CallExpression<'a>) {
            if let Some(name) = it
                .callee
                .as_member_expression()
                .and_then(|member| member.static_property_name())
            {
                if name == "addEventListener" {
                    if let Some(Argument::StringLiteral(event)) = it.arguments.first() {
                        self.listeners.push(event.value.to_string());
                    }
                }
                self.member_calls.push(name.to_string());
            }
            walk::walk_call_expression(self, it);
        }

        fn visit_string_literal(&mut self, it: &StringLiteral<'a>) {
            self.strings.push(it.value.to_string());
        }
    }

    fn scan(transport: Transport) -> ScriptScan {
        let tag = transport.script_tag();
        let js = tag
            .strip_prefix("<script>")
            .and_then(|s| s.strip_suffix("</script>"))
            .unwrap();
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, js, SourceType::mjs()).parse();
        assert!(ret.errors.is_empty(), "rendered bridge does not parse: {:?}", ret.errors);

        let mut scan = ScriptScan::default();
        scan.visit_program(&ret.program);
        scan
    }

    #[test]
    fn test_rendered_bridge_installs_hooks() {
        for transport in [Transport::ParentFrame, Transport::Socket { port: 35730 }] {
            let scan = scan(transport);

            for level in Level::ALL {
                assert!(scan.strings.iter().any(|s| s == level.as_str()), "{level:?} not wrapped");
            }
            assert_eq!(scan.listeners, ["error", "unhandledrejection"]);
            // Structured values are rendered as JSON, with a String() fallback
            assert!(scan.member_calls.iter().any(|c| c == "stringify"));
            assert!(scan.strings.iter().any(|s| s == "console"));
        }
    }

    #[test]
    fn test_rendered_bridge_sends_over_transport() {
        let parent = scan(Transport::ParentFrame);
        assert!(parent.member_calls.iter().any(|c| c == "postMessage"));
        assert!(parent.strings.iter().any(|s| s == "parent"));

        let socket = scan(Transport::Socket { port: 35730 });
        assert!(socket.member_calls.iter().any(|c| c == "send"));
        assert!(socket.strings.iter().any(|s| s == "socket"));
    }
}
