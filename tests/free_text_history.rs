// Undo/redo behaviour of the free-text editor

use std::fs;

use folio::error::{EditorError, UploadError};
use folio::freetext::{
    FreeTextEditor, History, ImageUploader, MarkupSurface, MemorySurface,
};

fn editor(initial: &str) -> FreeTextEditor<MemorySurface> {
    FreeTextEditor::new(MemorySurface::default(), initial)
}

#[test]
fn test_undo_and_redo_stop_at_the_ends() {
    let mut history = History::new("a");
    assert_eq!(history.undo(), None);
    assert_eq!(history.cursor(), 0);

    let mut history = History::new("a");
    history.record("b");
    assert_eq!(history.redo(), None);
    assert_eq!(history.cursor(), 1);
}

#[test]
fn test_edit_undo_redo_round_trip() {
    let mut history = History::new("a");
    assert!(history.record("b"));
    assert_eq!(history.snapshots(), ["a", "b"]);
    assert_eq!(history.cursor(), 1);

    assert_eq!(history.undo(), Some("a"));
    assert_eq!(history.cursor(), 0);
    assert_eq!(history.redo(), Some("b"));
    assert_eq!(history.cursor(), 1);
}

#[test]
fn test_editing_after_undo_discards_the_redo_branch() {
    let mut history = History::new("a");
    history.record("b");
    history.record("c");

    assert_eq!(history.undo(), Some("b"));
    assert!(history.record("d"));
    assert_eq!(history.snapshots(), ["a", "b", "d"]);
    assert_eq!(history.cursor(), 2);
    assert_eq!(history.redo(), None);
}

#[test]
fn test_identical_content_is_not_recorded() {
    let mut history = History::new("a");
    history.record("b");
    assert!(!history.record("b"));
    assert_eq!(history.len(), 2);
    assert_eq!(history.cursor(), 1);
}

#[test]
fn test_editor_session_with_formatting() {
    let mut editor = editor("<p>Intro</p>");
    editor.insert_text(" more");
    let selected = editor.surface_mut().select(3, 8);
    assert!(selected);
    editor.bold();
    editor.insert_link("https://example.com");

    assert_eq!(
        editor.content(),
        "<p><b>Intro</b></p> more<a href=\"https://example.com\">Link</a>"
    );
    assert_eq!(editor.history().len(), 4);

    assert!(editor.undo());
    assert!(editor.undo());
    assert_eq!(editor.surface().current_markup(), "<p>Intro</p> more");

    editor.quote();
    assert!(!editor.history().can_redo());
    assert_eq!(editor.save(), "<p>Intro</p> more<blockquote>Click to edit...</blockquote>");
}

#[test]
fn test_typed_text_survives_undo_and_redo() {
    let mut editor = editor("a");
    editor.insert_text("b");
    editor.surface_mut().type_text(" typed");

    assert!(editor.undo());
    assert_eq!(editor.surface().current_markup(), "ab");
    assert_eq!(editor.history().snapshots(), ["a", "ab", "ab typed"]);

    assert!(editor.redo());
    assert_eq!(editor.surface().current_markup(), "ab typed");
    assert_eq!(editor.content(), "ab typed");
}

#[test]
fn test_unreadable_image_leaves_editor_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let mut editor = editor("<p>x</p>");
    let before = editor.history().clone();

    let result = editor.insert_image_file(&dir.path().join("gone.png"), None);
    assert!(matches!(result, Err(EditorError::ImageRead { .. })));
    assert_eq!(editor.history(), &before);
    assert_eq!(editor.surface().current_markup(), "<p>x</p>");
}

#[test]
fn test_image_without_upload_path_is_embedded_inline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dot.gif");
    fs::write(&path, [0u8, 1, 2]).unwrap();

    let mut editor = editor("");
    assert!(editor.insert_image_file(&path, None).unwrap());
    assert_eq!(editor.content(), "<img src=\"data:image/gif;base64,AAEC\">");
    assert_eq!(editor.history().len(), 2);
}

struct Cdn;

impl ImageUploader for Cdn {
    fn upload(&self, file_name: &str, _mime: &str, _bytes: &[u8]) -> Result<String, UploadError> {
        Ok(format!("https://cdn.example.com/{file_name}"))
    }
}

#[test]
fn test_uploaded_image_uses_returned_url() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("photo.jpg");
    fs::write(&path, b"jpeg").unwrap();

    let mut editor = editor("");
    editor.insert_image_file(&path, Some(&Cdn)).unwrap();
    assert_eq!(
        editor.content(),
        "<img src=\"https://cdn.example.com/photo.jpg\">"
    );
}
