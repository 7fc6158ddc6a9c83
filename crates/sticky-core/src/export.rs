//! Plain-text export of note contents.

use crate::id::NoteId;
use crate::model::Note;

/// File name used when exporting every note.
pub const EXPORT_ALL_FILENAME: &str = "sticky-notes.txt";

/// A text file ready to be handed to the host for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub contents: String,
}

/// File name used when exporting a single note.
pub fn note_filename(id: &NoteId) -> String {
    format!("sticky-note-{id}.txt")
}

/// Join the trimmed text of every non-blank note, in list order, with a
/// blank line between notes. `None` when there is nothing to write.
pub fn export_all(notes: &[Note]) -> Option<ExportFile> {
    let parts: Vec<&str> = notes.iter().filter_map(Note::trimmed_text).collect();
    if parts.is_empty() {
        return None;
    }
    Some(ExportFile {
        filename: EXPORT_ALL_FILENAME.to_string(),
        contents: parts.join("\n\n"),
    })
}

/// Export one note's trimmed text. `None` if the note is missing or blank.
pub fn export_one(notes: &[Note], id: &NoteId) -> Option<ExportFile> {
    let note = notes.iter().find(|n| &n.id == id)?;
    let text = note.trimmed_text()?;
    Some(ExportFile {
        filename: note_filename(&note.id),
        contents: text.to_string(),
    })
}
