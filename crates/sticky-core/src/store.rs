//! Note collection store.
//!
//! The store owns the ordered note list. Every change is expressed as a
//! `NoteMutation` and goes through `NoteStore::apply`, which reports whether
//! the list actually changed. Mutations naming a missing id, or that would
//! break an invariant, are no-ops:
//!
//! - ids are unique across the list;
//! - `done` implies `!editing`.

use crate::id::NoteId;
use crate::model::{Color, Note, Position};
use rand::Rng;
use std::collections::HashSet;

/// A change to the note list.
#[derive(Debug, Clone, PartialEq)]
pub enum NoteMutation {
    /// Append a fully built note. Rejected if its id is already taken.
    Add { note: Note },
    UpdateText { id: NoteId, text: String },
    ToggleDone { id: NoteId, done: bool },
    ToggleEditing { id: NoteId, editing: bool },
    Remove { id: NoteId },
    /// Move `from` to the index currently held by `to`.
    Reorder { from: NoteId, to: NoteId },
    /// Fold `source` into `target`; `source` disappears.
    Merge { source: NoteId, target: NoteId },
    MoveTo { id: NoteId, position: Position },
}

impl NoteMutation {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            NoteMutation::Add { .. } => "add",
            NoteMutation::UpdateText { .. } => "updateText",
            NoteMutation::ToggleDone { .. } => "toggleDone",
            NoteMutation::ToggleEditing { .. } => "toggleEditing",
            NoteMutation::Remove { .. } => "remove",
            NoteMutation::Reorder { .. } => "reorder",
            NoteMutation::Merge { .. } => "merge",
            NoteMutation::MoveTo { .. } => "moveTo",
        }
    }
}

/// Combine two note texts the way a merge does: the source goes below the
/// target with a blank line between them. Blank sides are dropped.
pub fn merge_text(target: &str, source: &str) -> String {
    match (target.trim().is_empty(), source.trim().is_empty()) {
        (false, false) => format!("{target}\n\n{source}"),
        (false, true) => target.to_string(),
        (true, _) => source.to_string(),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteStore {
    notes: Vec<Note>,
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from loaded notes. Later duplicates of an id are dropped
    /// and `done` notes are forced out of editing.
    pub fn from_notes(notes: Vec<Note>) -> Self {
        let mut seen = HashSet::new();
        let notes = notes
            .into_iter()
            .filter(|n| {
                let fresh = seen.insert(n.id.clone());
                if !fresh {
                    log::warn!("dropping note with duplicate id {}", n.id);
                }
                fresh
            })
            .map(|mut n| {
                if n.done {
                    n.editing = false;
                }
                n
            })
            .collect();
        Self { notes }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn index_of(&self, id: &NoteId) -> Option<usize> {
        self.notes.iter().position(|n| &n.id == id)
    }

    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| &n.id == id)
    }

    pub fn contains(&self, id: &NoteId) -> bool {
        self.get(id).is_some()
    }

    fn get_mut(&mut self, id: &NoteId) -> Option<&mut Note> {
        self.notes.iter_mut().find(|n| &n.id == id)
    }

    /// Generate an id not used by any note in the store.
    pub fn fresh_id<R: Rng + ?Sized>(&self, rng: &mut R) -> NoteId {
        loop {
            let id = NoteId::generate(rng);
            if !self.contains(&id) {
                return id;
            }
        }
    }

    // ─── Operations ──────────────────────────────────────────────────────

    /// Create an empty, editable note of `color` at `position` and append it.
    pub fn add<R: Rng + ?Sized>(&mut self, color: Color, position: Position, rng: &mut R) -> NoteId {
        let id = self.fresh_id(rng);
        self.apply(NoteMutation::Add {
            note: Note::new(id.clone(), color, position),
        });
        id
    }

    pub fn update_text(&mut self, id: &NoteId, text: &str) -> bool {
        self.apply(NoteMutation::UpdateText {
            id: id.clone(),
            text: text.to_string(),
        })
    }

    pub fn toggle_done(&mut self, id: &NoteId, done: bool) -> bool {
        self.apply(NoteMutation::ToggleDone {
            id: id.clone(),
            done,
        })
    }

    pub fn toggle_editing(&mut self, id: &NoteId, editing: bool) -> bool {
        self.apply(NoteMutation::ToggleEditing {
            id: id.clone(),
            editing,
        })
    }

    pub fn remove(&mut self, id: &NoteId) -> bool {
        self.apply(NoteMutation::Remove { id: id.clone() })
    }

    pub fn reorder(&mut self, from: &NoteId, to: &NoteId) -> bool {
        self.apply(NoteMutation::Reorder {
            from: from.clone(),
            to: to.clone(),
        })
    }

    pub fn merge(&mut self, source: &NoteId, target: &NoteId) -> bool {
        self.apply(NoteMutation::Merge {
            source: source.clone(),
            target: target.clone(),
        })
    }

    pub fn move_to(&mut self, id: &NoteId, position: Position) -> bool {
        self.apply(NoteMutation::MoveTo {
            id: id.clone(),
            position,
        })
    }

    /// Apply a mutation. Returns `true` if the list changed.
    pub fn apply(&mut self, mutation: NoteMutation) -> bool {
        match mutation {
            NoteMutation::Add { note } => {
                if self.contains(&note.id) {
                    log::warn!("refusing to add note with existing id {}", note.id);
                    return false;
                }
                self.notes.push(note);
                true
            }
            NoteMutation::UpdateText { id, text } => match self.get_mut(&id) {
                // The text field is read-only unless the note is being edited.
                Some(note) if note.editing && !note.done && note.text != text => {
                    note.text = text;
                    true
                }
                _ => false,
            },
            NoteMutation::ToggleDone { id, done } => match self.get_mut(&id) {
                Some(note) if note.done != done || (done && note.editing) => {
                    note.done = done;
                    note.editing = false;
                    true
                }
                _ => false,
            },
            NoteMutation::ToggleEditing { id, editing } => match self.get_mut(&id) {
                Some(note) if note.editing != editing && !(editing && note.done) => {
                    note.editing = editing;
                    true
                }
                _ => false,
            },
            NoteMutation::Remove { id } => {
                let before = self.notes.len();
                self.notes.retain(|n| n.id != id);
                self.notes.len() != before
            }
            NoteMutation::Reorder { from, to } => {
                let (Some(from_idx), Some(to_idx)) = (self.index_of(&from), self.index_of(&to))
                else {
                    return false;
                };
                if from_idx == to_idx {
                    return false;
                }
                let note = self.notes.remove(from_idx);
                self.notes.insert(to_idx, note);
                true
            }
            NoteMutation::Merge { source, target } => {
                if source == target || !self.contains(&target) {
                    return false;
                }
                let Some(src_idx) = self.index_of(&source) else {
                    return false;
                };
                let absorbed = self.notes.remove(src_idx);
                if let Some(note) = self.get_mut(&target) {
                    note.text = merge_text(&note.text, &absorbed.text);
                    note.done = false;
                    note.editing = true;
                }
                true
            }
            NoteMutation::MoveTo { id, position } => match self.get_mut(&id) {
                Some(note) if note.position != Some(position) => {
                    note.position = Some(position);
                    true
                }
                _ => false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PALETTE;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0xC0FFEE)
    }

    fn ids(store: &NoteStore) -> Vec<&str> {
        store.notes().iter().map(|n| n.id.as_str()).collect()
    }

    fn note(id: &str, text: &str) -> Note {
        let mut n = Note::new(NoteId::new(id), PALETTE[0], Position::default());
        n.text = text.to_string();
        n
    }

    #[test]
    fn merge_text_rules() {
        assert_eq!(merge_text("world", "hello"), "world\n\nhello");
        assert_eq!(merge_text("", "hello"), "hello");
        assert_eq!(merge_text("   ", "hello"), "hello");
        assert_eq!(merge_text("world", ""), "world");
        assert_eq!(merge_text("", ""), "");
    }

    #[test]
    fn add_creates_editable_empty_note() {
        let mut store = NoteStore::new();
        let mut rng = rng();
        let id = store.add(PALETTE[2], Position::new(5.0, 6.0), &mut rng);

        let n = store.get(&id).unwrap();
        assert_eq!(n.text, "");
        assert_eq!(n.color, PALETTE[2]);
        assert!(n.editing);
        assert!(!n.done);
        assert_eq!(n.position, Some(Position::new(5.0, 6.0)));
    }

    #[test]
    fn add_rejects_duplicate_id() {
        let mut store = NoteStore::from_notes(vec![note("a", "")]);
        assert!(!store.apply(NoteMutation::Add { note: note("a", "x") }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn from_notes_drops_duplicates_and_fixes_done_editing() {
        let mut done = note("b", "x");
        done.done = true;
        done.editing = true;
        let store = NoteStore::from_notes(vec![note("a", "1"), done, note("a", "2")]);

        assert_eq!(ids(&store), vec!["a", "b"]);
        assert_eq!(store.notes()[0].text, "1");
        assert!(!store.notes()[1].editing);
    }

    #[test]
    fn update_text_only_while_editing() {
        let mut store = NoteStore::from_notes(vec![note("a", "")]);
        let a = NoteId::new("a");
        assert!(store.update_text(&a, "hello"));
        assert_eq!(store.get(&a).unwrap().text, "hello");

        store.toggle_editing(&a, false);
        assert!(!store.update_text(&a, "changed"));
        assert_eq!(store.get(&a).unwrap().text, "hello");

        assert!(!store.update_text(&NoteId::new("missing"), "x"));
    }

    #[test]
    fn toggle_done_clears_editing() {
        let mut store = NoteStore::from_notes(vec![note("a", "x")]);
        let a = NoteId::new("a");

        assert!(store.toggle_done(&a, true));
        let n = store.get(&a).unwrap();
        assert!(n.done);
        assert!(!n.editing);

        assert!(store.toggle_done(&a, false));
        let n = store.get(&a).unwrap();
        assert!(!n.done);
        assert!(!n.editing, "undoing done must not re-enter edit mode");
    }

    #[test]
    fn cannot_edit_done_note() {
        let mut store = NoteStore::from_notes(vec![note("a", "x")]);
        let a = NoteId::new("a");
        store.toggle_done(&a, true);
        assert!(!store.toggle_editing(&a, true));
        assert!(!store.get(&a).unwrap().editing);
    }

    #[test]
    fn remove_filters_id() {
        let mut store = NoteStore::from_notes(vec![note("a", ""), note("b", "")]);
        assert!(store.remove(&NoteId::new("a")));
        assert_eq!(ids(&store), vec!["b"]);
        assert!(!store.remove(&NoteId::new("a")));
    }

    #[test]
    fn reorder_is_stable_move() {
        let mut store = NoteStore::from_notes(vec![
            note("a", ""),
            note("b", ""),
            note("c", ""),
            note("d", ""),
        ]);
        assert!(store.reorder(&NoteId::new("a"), &NoteId::new("c")));
        assert_eq!(ids(&store), vec!["b", "c", "a", "d"]);

        assert!(store.reorder(&NoteId::new("d"), &NoteId::new("b")));
        assert_eq!(ids(&store), vec!["d", "b", "c", "a"]);

        assert!(!store.reorder(&NoteId::new("d"), &NoteId::new("d")));
        assert!(!store.reorder(&NoteId::new("zz"), &NoteId::new("d")));
        assert_eq!(ids(&store), vec!["d", "b", "c", "a"]);
    }

    #[test]
    fn merge_appends_source_below_target() {
        let mut store = NoteStore::from_notes(vec![note("a", "hello"), note("b", "world")]);
        let b = NoteId::new("b");
        store.toggle_editing(&b, false);

        assert!(store.merge(&NoteId::new("a"), &b));
        assert_eq!(ids(&store), vec!["b"]);
        let n = store.get(&b).unwrap();
        assert_eq!(n.text, "world\n\nhello");
        assert!(n.editing);
    }

    #[test]
    fn merge_into_done_target_reopens_it() {
        let mut store = NoteStore::from_notes(vec![note("a", "x"), note("b", "y")]);
        let b = NoteId::new("b");
        store.toggle_done(&b, true);

        assert!(store.merge(&NoteId::new("a"), &b));
        let n = store.get(&b).unwrap();
        assert!(n.editing);
        assert!(!n.done);
    }

    #[test]
    fn merge_noops() {
        let mut store = NoteStore::from_notes(vec![note("a", "x"), note("b", "y")]);
        let before = store.clone();
        assert!(!store.merge(&NoteId::new("a"), &NoteId::new("a")));
        assert!(!store.merge(&NoteId::new("a"), &NoteId::new("gone")));
        assert!(!store.merge(&NoteId::new("gone"), &NoteId::new("a")));
        assert_eq!(store, before);
    }

    #[test]
    fn move_to_sets_position() {
        let mut store = NoteStore::from_notes(vec![note("a", "")]);
        let a = NoteId::new("a");
        assert!(store.move_to(&a, Position::new(3.0, 4.0)));
        assert!(!store.move_to(&a, Position::new(3.0, 4.0)));
        assert_eq!(store.get(&a).unwrap().position, Some(Position::new(3.0, 4.0)));
    }

    #[test]
    fn ids_stay_unique_across_add_remove() {
        let mut store = NoteStore::new();
        let mut rng = rng();
        for round in 0..200 {
            let id = store.add(PALETTE[round % PALETTE.len()], Position::default(), &mut rng);
            if round % 3 == 0 {
                store.remove(&id);
            }
            let unique: HashSet<_> = store.notes().iter().map(|n| &n.id).collect();
            assert_eq!(unique.len(), store.len());
        }
    }
}
