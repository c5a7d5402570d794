//! File-save trigger.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Save `content` under `filename`. Returns where it went.
pub trait FileSaver: Send {
    fn save(&mut self, filename: &str, content: &str, mime: &str) -> Result<PathBuf>;
}

/// Writes into a fixed directory.
#[derive(Debug, Clone)]
pub struct DirSaver {
    dir: PathBuf,
}

impl DirSaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FileSaver for DirSaver {
    fn save(&mut self, filename: &str, content: &str, mime: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        let path = self.dir.join(filename);
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        crate::debug!("download"; "{} ({}, {} bytes)", path.display(), mime, content.len());
        Ok(path)
    }
}

#[cfg(test)]
pub mod testing {
    use super::FileSaver;
    use anyhow::Result;
    use parking_lot::Mutex;
    use std::path::PathBuf;
    use std::sync::Arc;

    /// Saved (filename, content, mime) triples.
    #[derive(Clone, Default)]
    pub struct MemorySaver {
        pub saved: Arc<Mutex<Vec<(String, String, String)>>>,
    }

    impl FileSaver for MemorySaver {
        fn save(&mut self, filename: &str, content: &str, mime: &str) -> Result<PathBuf> {
            self.saved
                .lock()
                .push((filename.into(), content.into(), mime.into()));
            Ok(PathBuf::from(filename))
        }
    }
}
