//! `sandpen open`: decode a shared link into the workspace buffers.

use anyhow::{Result, bail};

use crate::{
    config::PenConfig,
    log,
    persist::from_share_token,
    project::ProjectState,
    workspace::write_project,
};

/// Overwrite the workspace buffers with those carried by `link`.
pub fn open_link(config: &PenConfig, link: &str) -> Result<()> {
    let Some(shared) = from_share_token(link) else {
        log!("warning"; "not a valid share link");
        bail!("could not decode share link");
    };

    let mut state = ProjectState::default();
    state.load_buffers(shared.markup, shared.style, shared.script);
    let written = write_project(config.workspace(), &config.editor.file_names(), &state, true)?;

    log!("open"; "wrote {} buffers into {}", written.len(), config.workspace().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::to_share_token;
    use crate::workspace::read_project;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> PenConfig {
        PenConfig {
            root: dir.path().to_path_buf(),
            ..PenConfig::default()
        }
    }

    #[test]
    fn test_open_writes_buffers() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let shared = ProjectState {
            markup: "<p>shared</p>".into(),
            ..ProjectState::default()
        };
        let link = format!("http://127.0.0.1:5277/{}", to_share_token(&shared));

        open_link(&config, &link).unwrap();

        let state = read_project(dir.path(), &config.editor.file_names()).unwrap();
        assert_eq!(state.markup, "<p>shared</p>");
        assert_eq!(state.script, ProjectState::bootstrap().script);
    }

    #[test]
    fn test_open_rejects_invalid_link() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        assert!(open_link(&config, "#p=%%%").is_err());
        assert!(read_project(dir.path(), &config.editor.file_names()).is_err());
    }
}
