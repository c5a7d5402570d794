use std::path::Path;

use notify::EventKind;
use notify::event::ModifyKind;

use crate::project::Buffer;
use crate::workspace::FileNames;

/// Buffers whose file content may have changed in this event.
///
/// Removals are not edits: an atomic save removes or renames the old file
/// and the following create/rename event carries the new text.
pub(super) fn changed_buffers(event: &notify::Event, root: &Path, names: &FileNames) -> Vec<Buffer> {
    match event.kind {
        EventKind::Create(_) => {}
        // Ignore metadata-only changes (mtime/atime/chmod noise)
        EventKind::Modify(ModifyKind::Metadata(_)) => return Vec::new(),
        EventKind::Modify(_) => {}
        _ => return Vec::new(),
    }

    let mut buffers = Vec::new();
    for path in &event.paths {
        if is_temp_file(path) {
            crate::debug!("watch"; "ignored {}", path.display());
            continue;
        }
        if let Some(buffer) = names.classify(root, path)
            && !buffers.contains(&buffer)
        {
            buffers.push(buffer);
        }
    }
    buffers
}

/// Check if path is a temp/backup file (editor artifacts).
pub(super) fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
        || name.starts_with('#')
}
