//! Editable buffers backed by workspace files.
//!
//! The files are the editing surface: any editor changes them, the watcher
//! reports the change, and the controller writes them back when a project
//! is loaded or reset.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::project::{Buffer, ProjectState};

/// Text buffer contract: get and set the full value.
pub trait TextBuffer: Send {
    fn value(&self) -> String;

    fn set_value(&mut self, text: &str) -> Result<()>;
}

/// Buffer stored in a file.
#[derive(Debug)]
pub struct FileBuffer {
    path: PathBuf,
}

impl FileBuffer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TextBuffer for FileBuffer {
    fn value(&self) -> String {
        fs::read_to_string(&self.path).unwrap_or_default()
    }

    fn set_value(&mut self, text: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&self.path, text)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}

#[cfg(test)]
pub use testing::MemoryBuffer;

/// The three buffers, addressed by [`Buffer`].
pub struct Buffers {
    markup: Box<dyn TextBuffer>,
    style: Box<dyn TextBuffer>,
    script: Box<dyn TextBuffer>,
}

impl Buffers {
    pub fn new(
        markup: Box<dyn TextBuffer>,
        style: Box<dyn TextBuffer>,
        script: Box<dyn TextBuffer>,
    ) -> Self {
        Self {
            markup,
            style,
            script,
        }
    }

    /// File-backed buffers under `root` with the configured file names.
    pub fn in_dir(root: &Path, names: &FileNames) -> Self {
        Self::new(
            Box::new(FileBuffer::new(root.join(&names.markup))),
            Box::new(FileBuffer::new(root.join(&names.style))),
            Box::new(FileBuffer::new(root.join(&names.script))),
        )
    }

    pub fn get_mut(&mut self, buffer: Buffer) -> &mut dyn TextBuffer {
        match buffer {
            Buffer::Markup => self.markup.as_mut(),
            Buffer::Style => self.style.as_mut(),
            Buffer::Script => self.script.as_mut(),
        }
    }
}

/// Workspace file name of each buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNames {
    pub markup: String,
    pub style: String,
    pub script: String,
}

impl Default for FileNames {
    fn default() -> Self {
        Self {
            markup: "index.html".into(),
            style: "style.css".into(),
            script: "script.js".into(),
        }
    }
}

impl FileNames {
    pub fn name(&self, buffer: Buffer) -> &str {
        match buffer {
            Buffer::Markup => &self.markup,
            Buffer::Style => &self.style,
            Buffer::Script => &self.script,
        }
    }

    /// Which buffer a workspace path belongs to, if any.
    pub fn classify(&self, root: &Path, path: &Path) -> Option<Buffer> {
        let relative = path.strip_prefix(root).unwrap_or(path);
        Buffer::ALL
            .into_iter()
            .find(|&b| relative == Path::new(self.name(b)))
    }
}

/// Read all three buffer files. Fails if any of them is missing.
pub fn read_project(root: &Path, names: &FileNames) -> Result<ProjectState> {
    let read = |buffer: Buffer| {
        let path = root.join(names.name(buffer));
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    };
    let mut state = ProjectState::default();
    state.load_buffers(read(Buffer::Markup)?, read(Buffer::Style)?, read(Buffer::Script)?);
    Ok(state)
}

/// Write the buffers of `state` into the workspace.
///
/// Existing files are kept unless `overwrite`. Returns the files written.
pub fn write_project(
    root: &Path,
    names: &FileNames,
    state: &ProjectState,
    overwrite: bool,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for buffer in Buffer::ALL {
        let mut file = FileBuffer::new(root.join(names.name(buffer)));
        if !overwrite && file.path().exists() {
            crate::debug!("workspace"; "keep {}", file.path().display());
            continue;
        }
        file.set_value(state.buffer(buffer))?;
        written.push(file.path);
    }
    Ok(written)
}


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_buffer_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut buffer = FileBuffer::new(dir.path().join("nested/script.js"));

        assert_eq!(buffer.value(), "");
        buffer.set_value("console.log(1)").unwrap();
        assert_eq!(buffer.value(), "console.log(1)");
        assert_eq!(buffer.path(), dir.path().join("nested/script.js"));
    }

    #[test]
    fn test_memory_buffer_clones_share_text() {
        let buffer = MemoryBuffer::new("a");
        let mut writer = buffer.clone();
        writer.set_value("b").unwrap();
        assert_eq!(buffer.value(), "b");
    }

    #[test]
    fn test_classify_paths() {
        let names = FileNames::default();
        let root = Path::new("/work");
        assert_eq!(
            names.classify(root, Path::new("/work/index.html")),
            Some(Buffer::Markup)
        );
        assert_eq!(
            names.classify(root, Path::new("/work/script.js")),
            Some(Buffer::Script)
        );
        assert_eq!(names.classify(root, Path::new("/work/other.js")), None);
        assert_eq!(names.classify(root, Path::new("/work/sub/style.css")), None);
    }

    #[test]
    fn test_write_then_read_project() {
        let dir = TempDir::new().unwrap();
        let names = FileNames::default();
        assert!(read_project(dir.path(), &names).is_err());

        let written = write_project(dir.path(), &names, ProjectState::bootstrap(), false).unwrap();
        assert_eq!(written.len(), 3);
        assert_eq!(
            read_project(dir.path(), &names).unwrap().markup,
            ProjectState::bootstrap().markup
        );
    }

    #[test]
    fn test_write_project_keeps_existing_files() {
        let dir = TempDir::new().unwrap();
        let names = FileNames::default();
        fs::write(dir.path().join("script.js"), "mine").unwrap();

        let written = write_project(dir.path(), &names, ProjectState::bootstrap(), false).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(fs::read_to_string(dir.path().join("script.js")).unwrap(), "mine");

        write_project(dir.path(), &names, ProjectState::bootstrap(), true).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("script.js")).unwrap(),
            ProjectState::bootstrap().script
        );
    }
}
