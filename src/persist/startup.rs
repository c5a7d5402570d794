//! Startup state resolution.
//!
//! Buffers come from the first source that decodes:
//!
//! 1. share token in the current location
//! 2. durable record
//! 3. bootstrap defaults
//!
//! Preferences come from the scalar keys when present, then from the
//! record if it was used, then from defaults. A shared link never sets them.
//!
//! In serve mode the workspace files are checked last with
//! [`adopt_workspace`]: files that already exist are never replaced by a
//! saved record that disagrees with them.

use super::{AUTO_KEY, DARK_KEY, PROJECT_KEY, Store, from_durable, from_share_token, read_flag};
use crate::project::ProjectState;

/// Where the startup buffers came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    SharedLink,
    Saved,
    Defaults,
    /// Buffers already present in the workspace files, adopted as they are
    Workspace,
}

/// Resolved startup state.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub state: ProjectState,
    pub origin: Origin,
}

pub fn resolve_startup(location: Option<&str>, store: &dyn Store) -> Resolved {
    let (mut state, origin) = resolve_buffers(location, store);

    if let Some(dark) = read_flag(store, DARK_KEY) {
        state.set_dark_theme(dark);
    }
    if let Some(auto) = read_flag(store, AUTO_KEY) {
        state.set_auto_run(auto);
    }

    Resolved { state, origin }
}

/// How [`adopt_workspace`] treated the files found in the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adoption {
    /// The resolved buffers stand (shared link, or files equal to the record)
    Kept,
    /// The files replace the starter project
    Adopted,
    /// The files differ from the saved record and replace it
    SupersededRecord,
}

/// Prefer buffers already present in the workspace over the starter
/// project or a saved record. A shared link still wins. Preferences are
/// left as resolved.
pub fn adopt_workspace(resolved: &mut Resolved, files: ProjectState) -> Adoption {
    let same = |state: &ProjectState| {
        state.markup == files.markup && state.style == files.style && state.script == files.script
    };
    let adoption = match resolved.origin {
        Origin::SharedLink | Origin::Workspace => return Adoption::Kept,
        Origin::Saved if same(&resolved.state) => return Adoption::Kept,
        Origin::Saved => Adoption::SupersededRecord,
        Origin::Defaults => Adoption::Adopted,
    };
    resolved
        .state
        .load_buffers(files.markup, files.style, files.script);
    resolved.origin = Origin::Workspace;
    adoption
}

fn resolve_buffers(location: Option<&str>, store: &dyn Store) -> (ProjectState, Origin) {
    if let Some(shared) = location.and_then(from_share_token) {
        let mut state = ProjectState::default();
        state.load_buffers(shared.markup, shared.style, shared.script);
        return (state, Origin::SharedLink);
    }

    if let Some(state) = store.get(PROJECT_KEY).as_deref().and_then(from_durable) {
        return (state, Origin::Saved);
    }

    (ProjectState::default(), Origin::Defaults)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::{MemoryStore, save, to_share_token};

    fn project(script: &str) -> ProjectState {
        ProjectState {
            script: script.into(),
            ..ProjectState::default()
        }
    }

    #[test]
    fn test_share_token_wins_over_record() {
        let mut store = MemoryStore::new();
        save(&mut store, &project("saved()")).unwrap();
        let token = to_share_token(&project("shared()"));

        let resolved = resolve_startup(Some(&token), &store);
        assert_eq!(resolved.origin, Origin::SharedLink);
        assert_eq!(resolved.state.script, "shared()");
    }

    #[test]
    fn test_bad_token_falls_through_to_record() {
        let mut store = MemoryStore::new();
        save(&mut store, &project("saved()")).unwrap();

        let resolved = resolve_startup(Some("#p=%%%garbage"), &store);
        assert_eq!(resolved.origin, Origin::Saved);
        assert_eq!(resolved.state.script, "saved()");
    }

    #[test]
    fn test_bad_record_falls_through_to_defaults() {
        let mut store = MemoryStore::new();
        store.set(PROJECT_KEY, "{not json").unwrap();

        let resolved = resolve_startup(None, &store);
        assert_eq!(resolved.origin, Origin::Defaults);
        assert_eq!(&resolved.state, ProjectState::bootstrap());
    }

    #[test]
    fn test_scalars_override_record_preferences() {
        let mut store = MemoryStore::new();
        let mut saved = project("x");
        saved.dark_theme = true;
        saved.auto_run = true;
        save(&mut store, &saved).unwrap();
        store.set(DARK_KEY, "0").unwrap();

        let resolved = resolve_startup(None, &store);
        assert!(!resolved.state.dark_theme);
        assert!(resolved.state.auto_run);
    }

    #[test]
    fn test_workspace_files_beat_stale_record() {
        let mut store = MemoryStore::new();
        let mut saved = project("saved()");
        saved.dark_theme = true;
        save(&mut store, &saved).unwrap();

        let mut resolved = resolve_startup(None, &store);
        let adoption = adopt_workspace(&mut resolved, project("myNewerWork()"));

        assert_eq!(adoption, Adoption::SupersededRecord);
        assert_eq!(resolved.origin, Origin::Workspace);
        assert_eq!(resolved.state.script, "myNewerWork()");
        assert!(resolved.state.dark_theme);
    }

    #[test]
    fn test_matching_files_keep_saved_origin() {
        let mut store = MemoryStore::new();
        save(&mut store, &project("same()")).unwrap();

        let mut resolved = resolve_startup(None, &store);
        assert_eq!(adopt_workspace(&mut resolved, project("same()")), Adoption::Kept);
        assert_eq!(resolved.origin, Origin::Saved);
    }

    #[test]
    fn test_shared_link_beats_workspace_files() {
        let store = MemoryStore::new();
        let token = to_share_token(&project("shared()"));

        let mut resolved = resolve_startup(Some(&token), &store);
        assert_eq!(adopt_workspace(&mut resolved, project("local()")), Adoption::Kept);
        assert_eq!(resolved.state.script, "shared()");

        let mut defaults = resolve_startup(None, &store);
        assert_eq!(adopt_workspace(&mut defaults, project("local()")), Adoption::Adopted);
        assert_eq!(defaults.origin, Origin::Workspace);
    }

    #[test]
    fn test_shared_link_keeps_local_preferences() {
        let mut store = MemoryStore::new();
        store.set(AUTO_KEY, "1").unwrap();

        let mut sharer = project("shared()");
        sharer.dark_theme = true;
        let resolved = resolve_startup(Some(&to_share_token(&sharer)), &store);

        assert_eq!(resolved.origin, Origin::SharedLink);
        assert!(!resolved.state.dark_theme);
        assert!(resolved.state.auto_run);
    }
}
