//! Configuration section definitions.

mod console;
mod editor;
mod serve;
mod storage;

pub use console::ConsoleConfig;
pub use editor::EditorConfig;
pub use serve::ServeConfig;
pub use storage::StorageConfig;
