//! Host capabilities the controller drives: the preview surface, the
//! clipboard, and file saving.

mod clipboard;
mod saver;
mod surface;

pub use clipboard::{Clipboard, SystemClipboard};
pub use saver::{DirSaver, FileSaver};
pub use surface::{LivePreview, PreviewSurface};

#[cfg(test)]
pub use clipboard::testing::FakeClipboard;
#[cfg(test)]
pub use saver::testing::MemorySaver;
#[cfg(test)]
pub use surface::testing::RecordingSurface;
