//! Durable project record.
//!
//! Stored under [`PROJECT_KEY`] as `{html, css, js, dark, auto, t}`. The
//! theme and auto-run scalars are written alongside for the older
//! flag-only storage scheme.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::{AUTO_KEY, DARK_KEY, PROJECT_KEY, Store, StoreError, flag_value};
use crate::project::ProjectState;

/// Serialized form of a [`ProjectState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DurableRecord {
    pub html: String,
    pub css: String,
    pub js: String,
    pub dark: bool,
    pub auto: bool,
    pub t: u64,
}

impl DurableRecord {
    pub fn to_json(&self) -> String {
        // Plain strings and scalars: serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Why a stored record could not be decoded.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("record is not a JSON object")]
    NotAnObject,
}

/// Result of an explicit load request.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(StoredProject),
    Missing,
    Corrupt(RecordError),
}

pub fn to_durable(state: &ProjectState) -> DurableRecord {
    DurableRecord {
        html: state.markup.clone(),
        css: state.style.clone(),
        js: state.script.clone(),
        dark: state.dark_theme,
        auto: state.auto_run,
        t: state.saved_at.unwrap_or_else(crate::project::now_millis),
    }
}

/// A decoded record plus the preferences it actually carried.
///
/// `state` has bootstrap defaults filled in; `dark` and `auto` are `None`
/// when the record has no real boolean for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredProject {
    pub state: ProjectState,
    pub dark: Option<bool>,
    pub auto: Option<bool>,
}

/// Decode a stored record. Absent or mistyped fields take bootstrap defaults.
pub fn decode_record(raw: &str) -> Result<ProjectState, RecordError> {
    decode_stored(raw).map(|stored| stored.state)
}

pub fn decode_stored(raw: &str) -> Result<StoredProject, RecordError> {
    let value: Value = serde_json::from_str(raw)?;
    let Value::Object(map) = value else {
        return Err(RecordError::NotAnObject);
    };

    let boot = ProjectState::bootstrap();
    let text = |key: &str, default: &str| {
        map.get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    };
    let dark = map.get("dark").and_then(Value::as_bool);
    let auto = map.get("auto").and_then(Value::as_bool);

    let state = ProjectState {
        markup: text("html", &boot.markup),
        style: text("css", &boot.style),
        script: text("js", &boot.script),
        dark_theme: dark.unwrap_or(boot.dark_theme),
        auto_run: auto.unwrap_or(boot.auto_run),
        saved_at: map.get("t").and_then(Value::as_u64),
    };
    Ok(StoredProject { state, dark, auto })
}

pub fn from_durable(raw: &str) -> Option<ProjectState> {
    decode_record(raw).ok()
}

/// Persist a snapshot of `state` with both preference scalars.
///
/// Returns the snapshot that was written.
pub fn save(store: &mut dyn Store, state: &ProjectState) -> Result<ProjectState, StoreError> {
    let snapshot = state.snapshot();
    store.set(PROJECT_KEY, &to_durable(&snapshot).to_json())?;
    store.set(DARK_KEY, flag_value(snapshot.dark_theme))?;
    store.set(AUTO_KEY, flag_value(snapshot.auto_run))?;
    Ok(snapshot)
}

/// Explicit load of the stored record.
pub fn load(store: &dyn Store) -> LoadOutcome {
    let Some(raw) = store.get(PROJECT_KEY) else {
        return LoadOutcome::Missing;
    };
    match decode_stored(&raw) {
        Ok(stored) => LoadOutcome::Loaded(stored),
        Err(e) => LoadOutcome::Corrupt(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::{MemoryStore, read_flag};
    use proptest::prelude::*;

    fn sample() -> ProjectState {
        ProjectState {
            markup: "<p>héllo ✓</p>".into(),
            style: "p{color:red}".into(),
            script: "console.log({a:1})".into(),
            dark_theme: true,
            auto_run: true,
            saved_at: Some(1_700_000_000_000),
        }
    }

    #[test]
    fn test_record_shape() {
        let json = to_durable(&sample()).to_json();
        let value: Value = serde_json::from_str(&json).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["html", "css", "js", "dark", "auto", "t"]);
        assert_eq!(value["t"], 1_700_000_000_000u64);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let state = from_durable(r#"{"js":"alert(1)"}"#).unwrap();
        let boot = ProjectState::bootstrap();
        assert_eq!(state.script, "alert(1)");
        assert_eq!(state.markup, boot.markup);
        assert_eq!(state.style, boot.style);
        assert!(!state.dark_theme);
        assert_eq!(state.saved_at, None);
    }

    #[test]
    fn test_stored_preferences_only_when_boolean() {
        let stored = decode_stored(r#"{"html":"x","dark":true,"auto":"1"}"#).unwrap();
        assert_eq!(stored.dark, Some(true));
        assert_eq!(stored.auto, None);
        assert!(!stored.state.auto_run);
    }

    #[test]
    fn test_mistyped_fields_take_defaults() {
        let state = from_durable(r#"{"html":42,"dark":"yes","auto":1}"#).unwrap();
        assert_eq!(state.markup, ProjectState::bootstrap().markup);
        assert!(!state.dark_theme);
        assert!(!state.auto_run);
    }

    #[test]
    fn test_malformed_records_are_absent() {
        for raw in ["", "{", "not json", "null", "[1,2]", "\"text\"", r#"{"html":"x""#] {
            assert!(from_durable(raw).is_none(), "expected absent for {raw:?}");
        }
    }

    #[test]
    fn test_save_writes_record_and_scalars() {
        let mut store = MemoryStore::new();
        let snapshot = save(&mut store, &sample()).unwrap();

        assert!(snapshot.saved_at.is_some());
        assert_eq!(read_flag(&store, DARK_KEY), Some(true));
        assert_eq!(read_flag(&store, AUTO_KEY), Some(true));
        match load(&store) {
            LoadOutcome::Loaded(stored) => {
                assert_eq!(stored.state, snapshot);
                assert_eq!(stored.dark, Some(true));
            }
            other => panic!("expected loaded record, got {other:?}"),
        }
    }

    #[test]
    fn test_load_outcomes() {
        let mut store = MemoryStore::new();
        assert!(matches!(load(&store), LoadOutcome::Missing));

        store.set(PROJECT_KEY, "{broken").unwrap();
        assert!(matches!(load(&store), LoadOutcome::Corrupt(RecordError::Json(_))));

        store.set(PROJECT_KEY, "7").unwrap();
        assert!(matches!(load(&store), LoadOutcome::Corrupt(RecordError::NotAnObject)));
    }

    proptest! {
        #[test]
        fn proptest_durable_roundtrip(
            markup in any::<String>(),
            style in any::<String>(),
            script in any::<String>(),
            dark_theme in any::<bool>(),
            auto_run in any::<bool>(),
            saved_at in 0u64..=u64::from(u32::MAX) * 1000,
        ) {
            let state = ProjectState { markup, style, script, dark_theme, auto_run, saved_at: Some(saved_at) };
            let decoded = from_durable(&to_durable(&state).to_json());
            prop_assert_eq!(decoded, Some(state));
        }
    }
}
