use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::classifier::{changed_buffers, is_temp_file};
use super::read_buffer;
use crate::project::Buffer;
use crate::workspace::FileNames;

const ROOT: &str = "/work";

fn make_event(paths: Vec<&str>, kind: notify::EventKind) -> notify::Event {
    notify::Event {
        kind,
        paths: paths.into_iter().map(PathBuf::from).collect(),
        attrs: Default::default(),
    }
}

fn modify_kind() -> notify::EventKind {
    notify::EventKind::Modify(notify::event::ModifyKind::Data(
        notify::event::DataChange::Any,
    ))
}

fn create_kind() -> notify::EventKind {
    notify::EventKind::Create(notify::event::CreateKind::File)
}

fn remove_kind() -> notify::EventKind {
    notify::EventKind::Remove(notify::event::RemoveKind::File)
}

fn rename_to_kind() -> notify::EventKind {
    notify::EventKind::Modify(notify::event::ModifyKind::Name(
        notify::event::RenameMode::To,
    ))
}

fn metadata_kind() -> notify::EventKind {
    notify::EventKind::Modify(notify::event::ModifyKind::Metadata(
        notify::event::MetadataKind::WriteTime,
    ))
}

fn classify(event: &notify::Event) -> Vec<Buffer> {
    changed_buffers(event, Path::new(ROOT), &FileNames::default())
}

#[test]
fn test_buffer_files_classified() {
    let event = make_event(
        vec!["/work/index.html", "/work/style.css", "/work/script.js"],
        modify_kind(),
    );
    assert_eq!(classify(&event), Buffer::ALL);
}

#[test]
fn test_atomic_save_counts_as_edit() {
    assert_eq!(
        classify(&make_event(vec!["/work/script.js"], rename_to_kind())),
        [Buffer::Script]
    );
    assert_eq!(
        classify(&make_event(vec!["/work/style.css"], create_kind())),
        [Buffer::Style]
    );
}

#[test]
fn test_non_edits_ignored() {
    assert!(classify(&make_event(vec!["/work/script.js"], remove_kind())).is_empty());
    assert!(classify(&make_event(vec!["/work/script.js"], metadata_kind())).is_empty());
    assert!(classify(&make_event(vec!["/work/notes.txt"], modify_kind())).is_empty());
    assert!(classify(&make_event(vec!["/work/.sandpen/sandpen-project"], modify_kind())).is_empty());
}

#[test]
fn test_dedup_same_buffer() {
    let event = make_event(vec!["/work/script.js", "/work/script.js"], modify_kind());
    assert_eq!(classify(&event), [Buffer::Script]);
}

#[test]
fn test_temp_file_detection() {
    for name in ["/w/.script.js.swp", "/w/script.js~", "/w/x.tmp", "/w/#index.html#", "/w/a.bak"] {
        assert!(is_temp_file(Path::new(name)), "{name}");
    }
    assert!(!is_temp_file(Path::new("/w/script.js")));
}

#[test]
fn test_custom_file_names() {
    let names = FileNames {
        markup: "page.html".into(),
        ..FileNames::default()
    };
    let event = make_event(vec!["/work/page.html", "/work/index.html"], modify_kind());
    assert_eq!(
        changed_buffers(&event, Path::new(ROOT), &names),
        [Buffer::Markup]
    );
}

#[test]
fn test_read_buffer_skips_missing_file() {
    let dir = TempDir::new().unwrap();
    let names = FileNames::default();

    assert_eq!(read_buffer(dir.path(), &names, Buffer::Script), None);

    std::fs::write(dir.path().join("script.js"), "console.log(1)").unwrap();
    assert_eq!(
        read_buffer(dir.path(), &names, Buffer::Script).as_deref(),
        Some("console.log(1)")
    );
}
