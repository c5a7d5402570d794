//! Embedded static resources for sandpen.
//!
//! # Module Structure
//!
//! - `template` - Template types for typed variable injection
//! - `bridge` - Diagnostic bridge script (minified by `build.rs`)
//!
//! # Usage
//!
//! ```ignore
//! use embed::bridge::{BRIDGE_JS, BridgeVars};
//!
//! let js = BRIDGE_JS.render(&BridgeVars { config_json: r#"{"transport":"parent"}"#.into() });
//! ```

mod template;

pub use template::{Template, TemplateVars};

pub mod bridge {
    use super::{Template, TemplateVars};

    /// Variables for bridge.js.
    pub struct BridgeVars {
        /// JSON object literal read by the bridge as its settings.
        pub config_json: String,
    }

    impl TemplateVars for BridgeVars {
        fn apply(&self, content: &str) -> String {
            content.replace("__SANDPEN_BRIDGE__", &self.config_json)
        }
    }

    /// Console bridge JavaScript with transport settings injection.
    pub const BRIDGE_JS: Template<BridgeVars> =
        Template::new(include_str!(concat!(env!("OUT_DIR"), "/bridge.min.js")));
}
