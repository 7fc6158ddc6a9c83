//! Persistence of the note list as a single JSON string slot.
//!
//! The whole list is serialized on every write. Reading is forgiving: a
//! missing slot, an unreadable backend or malformed JSON all yield an empty
//! list after a warning, never an error.

use crate::model::Note;
use std::collections::HashMap;
use thiserror::Error;

/// Storage key used by default; matches the original widget's slot.
pub const DEFAULT_STORAGE_KEY: &str = "stickyNotes";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend is unavailable")]
    Unavailable,
    #[error("failed to read `{key}`: {reason}")]
    Read { key: String, reason: String },
    #[error("failed to write `{key}`: {reason}")]
    Write { key: String, reason: String },
    #[error("failed to encode notes: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A string-keyed persistent slot store (e.g. browser `localStorage`).
pub trait NoteStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory storage, for tests and native hosts.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with one slot.
    pub fn with_slot(key: &str, value: &str) -> Self {
        let mut slots = HashMap::new();
        slots.insert(key.to_string(), value.to_string());
        Self { slots }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl NoteStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub fn encode_notes(notes: &[Note]) -> Result<String, serde_json::Error> {
    serde_json::to_string(notes)
}

/// Decode a saved list. A JSON `null` decodes as an empty list.
pub fn decode_notes(json: &str) -> Result<Vec<Note>, serde_json::Error> {
    let notes: Option<Vec<Note>> = serde_json::from_str(json)?;
    Ok(notes.unwrap_or_default())
}

/// Read the note list from `key`. Never fails: problems are logged and
/// treated as "no saved notes".
pub fn load_notes<S: NoteStorage + ?Sized>(storage: &S, key: &str) -> Vec<Note> {
    let raw = match storage.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            log::warn!("could not read saved notes: {e}");
            return Vec::new();
        }
    };
    match decode_notes(&raw) {
        Ok(notes) => {
            log::debug!("loaded {} notes from `{key}`", notes.len());
            notes
        }
        Err(e) => {
            log::warn!("failed to parse saved notes in `{key}`: {e}");
            Vec::new()
        }
    }
}

/// Write the whole note list to `key`.
pub fn save_notes<S: NoteStorage + ?Sized>(
    storage: &mut S,
    key: &str,
    notes: &[Note],
) -> Result<(), StorageError> {
    let json = encode_notes(notes)?;
    storage.write(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::NoteId;
    use crate::model::{PALETTE, Position};
    use pretty_assertions::assert_eq;

    struct BrokenStorage;

    impl NoteStorage for BrokenStorage {
        fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }

        fn write(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write {
                key: key.to_string(),
                reason: "quota exceeded".into(),
            })
        }
    }

    #[test]
    fn save_then_load() {
        let mut storage = MemoryStorage::new();
        let mut note = Note::new(NoteId::new("a"), PALETTE[1], Position::new(1.0, 2.0));
        note.text = "hi".into();
        save_notes(&mut storage, DEFAULT_STORAGE_KEY, &[note.clone()]).unwrap();

        let loaded = load_notes(&storage, DEFAULT_STORAGE_KEY);
        assert_eq!(loaded, vec![note]);
    }

    #[test]
    fn missing_slot_is_empty() {
        assert!(load_notes(&MemoryStorage::new(), DEFAULT_STORAGE_KEY).is_empty());
    }

    #[test]
    fn malformed_json_is_empty() {
        let storage = MemoryStorage::with_slot(DEFAULT_STORAGE_KEY, "{not json");
        assert!(load_notes(&storage, DEFAULT_STORAGE_KEY).is_empty());

        let storage = MemoryStorage::with_slot(DEFAULT_STORAGE_KEY, r#"{"id":"a"}"#);
        assert!(load_notes(&storage, DEFAULT_STORAGE_KEY).is_empty());

        let storage = MemoryStorage::with_slot(DEFAULT_STORAGE_KEY, r#"[{"id":"a","color":"red"}]"#);
        assert!(load_notes(&storage, DEFAULT_STORAGE_KEY).is_empty());

        // Well-formed hex, but not one of the board colors.
        let storage =
            MemoryStorage::with_slot(DEFAULT_STORAGE_KEY, r##"[{"id":"a","color":"#123456"}]"##);
        assert!(load_notes(&storage, DEFAULT_STORAGE_KEY).is_empty());
    }

    #[test]
    fn null_is_empty() {
        let storage = MemoryStorage::with_slot(DEFAULT_STORAGE_KEY, "null");
        assert!(load_notes(&storage, DEFAULT_STORAGE_KEY).is_empty());
    }

    #[test]
    fn unreadable_backend_is_empty() {
        assert!(load_notes(&BrokenStorage, DEFAULT_STORAGE_KEY).is_empty());
    }

    #[test]
    fn write_failure_is_reported() {
        let err = save_notes(&mut BrokenStorage, DEFAULT_STORAGE_KEY, &[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to write `stickyNotes`: quota exceeded"
        );
    }

    #[test]
    fn loads_list_saved_without_positions() {
        let raw = r##"[{"id":"x1","textArea":"old","color":"#3357FF","isDone":true,"isEditing":false}]"##;
        let notes = decode_notes(raw).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].text, "old");
        assert_eq!(notes[0].position, None);
        assert!(notes[0].done);
    }
}
