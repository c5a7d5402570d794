//! Project persistence and link sharing.
//!
//! Two external forms of a [`ProjectState`](crate::project::ProjectState):
//!
//! | Form          | Shape                                   | Preferences |
//! |---------------|-----------------------------------------|-------------|
//! | durable record| JSON `{html, css, js, dark, auto, t}`   | included    |
//! | share token   | `#p=<base64(UTF-8 JSON {h, c, j})>`     | excluded    |
//!
//! Decoding never fails loudly: malformed input is `None`, and callers
//! fall through to the next source. See [`startup`] for the precedence
//! rules applied at process start.

pub mod durable;
pub mod share;
pub mod startup;
pub mod store;

pub use durable::{LoadOutcome, StoredProject, from_durable, load, save};
pub use share::{from_share_token, share_url};
#[cfg(test)]
pub use share::to_share_token;
pub use startup::{Adoption, Origin, Resolved, adopt_workspace, resolve_startup};
pub use store::{FileStore, Store, StoreError};
#[cfg(test)]
pub use store::MemoryStore;

/// Storage key of the durable project record.
pub const PROJECT_KEY: &str = "sandpen-project";
/// Legacy scalar key for the theme preference (`"1"` / `"0"`).
pub const DARK_KEY: &str = "sandpen-dark";
/// Scalar key for the auto-run preference (`"1"` / `"0"`).
pub const AUTO_KEY: &str = "sandpen-auto";

/// Encode a boolean preference as its scalar form.
pub const fn flag_value(on: bool) -> &'static str {
    if on { "1" } else { "0" }
}

/// Read a boolean scalar. Absent keys are `None`; anything but `"1"` is off.
pub fn read_flag(store: &dyn Store, key: &str) -> Option<bool> {
    store.get(key).map(|v| v.trim() == "1")
}
