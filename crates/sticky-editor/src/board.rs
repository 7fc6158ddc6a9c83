//! Board controller: the single owner of a sticky-notes board.
//!
//! `NotesBoard` holds the authoritative `NoteStore` together with the
//! surface geometry, the storage backend, the color-picker flag and the
//! transient drag state. Every note change goes through `apply`, which
//! writes the whole list back to storage when something changed
//! (write-through). Storage failures are logged and otherwise ignored: the
//! in-memory board stays authoritative.

use crate::config::BoardConfig;
use crate::drag::DragTool;
use crate::hit::hit_test;
use crate::input::InputEvent;
use rand::Rng;
use sticky_core::export::{self, ExportFile};
use sticky_core::model::{Color, Note, NoteBounds, Position};
use sticky_core::persist::{NoteStorage, load_notes, save_notes};
use sticky_core::{NoteId, NoteMutation, NoteStore, Surface};

pub struct NotesBoard<S: NoteStorage> {
    store: NoteStore,
    surface: Surface,
    storage: S,
    storage_key: String,
    picker_open: bool,
    drag: DragTool,
}

impl<S: NoteStorage> NotesBoard<S> {
    /// Load the board from `storage`. Missing or malformed data yields an
    /// empty board. Notes without a position are cascaded from the origin
    /// and every position is clamped to the surface.
    pub fn load(config: &BoardConfig, storage: S) -> Self {
        let store = NoteStore::from_notes(load_notes(&storage, &config.storage_key));
        let mut board = Self {
            store,
            surface: config.surface(),
            storage,
            storage_key: config.storage_key.clone(),
            picker_open: false,
            drag: DragTool::new(),
        };
        if board.place_notes() {
            board.persist();
        }
        board
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn notes(&self) -> &[Note] {
        self.store.notes()
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn note(&self, id: &NoteId) -> Option<&Note> {
        self.store.get(id)
    }

    /// Where a note is drawn right now: its live drag position while it is
    /// being dragged, its stored position otherwise.
    pub fn display_position(&self, note: &Note) -> Position {
        match (self.drag.dragged(), self.drag.live_position()) {
            (Some(id), Some(live)) if id == &note.id => live,
            _ => note.position.unwrap_or_default(),
        }
    }

    /// Current on-screen bounds of a note.
    pub fn note_bounds(&self, id: &NoteId) -> Option<NoteBounds> {
        let note = self.store.get(id)?;
        Some(self.surface.bounds_at(self.display_position(note)))
    }

    /// Topmost note under (x, y).
    pub fn note_at(&self, x: f32, y: f32) -> Option<&NoteId> {
        hit_test(self.store.notes(), &self.surface, x, y)
    }

    pub fn dragged(&self) -> Option<&NoteId> {
        self.drag.dragged()
    }

    pub fn merge_candidate(&self) -> Option<&NoteId> {
        self.drag.merge_candidate()
    }

    // ─── Note operations ─────────────────────────────────────────────────

    /// Create a note of `color` at a random spot on the surface and close
    /// the color picker.
    pub fn add_note<R: Rng + ?Sized>(&mut self, color: Color, rng: &mut R) -> NoteId {
        let position = self.surface.random_position(rng);
        let id = self.store.add(color, position, rng);
        log::debug!("add {id}: {} notes", self.store.len());
        self.persist();
        self.picker_open = false;
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
        if self.drag.dragged() == Some(id) {
            self.drag.cancel();
        }
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

    /// Move a note, clamping the position to the surface.
    pub fn move_note(&mut self, id: &NoteId, position: Position) -> bool {
        self.apply(NoteMutation::MoveTo {
            id: id.clone(),
            position: self.surface.clamp(position),
        })
    }

    /// Apply a mutation and persist on change. Returns `true` if the list
    /// changed.
    pub fn apply(&mut self, mutation: NoteMutation) -> bool {
        let name = mutation.name();
        let changed = self.store.apply(mutation);
        if changed {
            log::debug!("{name}: {} notes", self.store.len());
            self.persist();
        }
        changed
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    /// Feed a pointer event to the drag tool and apply what it commits.
    /// Returns `true` if the board needs a repaint.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        let (x, y) = event.position();
        let hit = hit_test(self.store.notes(), &self.surface, x, y).cloned();

        let mut changed = false;
        if matches!(event, InputEvent::PointerDown { .. }) && hit.is_none() && self.picker_open {
            self.picker_open = false;
            changed = true;
        }

        let was_dragging = self.drag.is_dragging();
        let mutations = self
            .drag
            .handle(event, hit.as_ref(), self.store.notes(), &self.surface);
        for mutation in mutations {
            changed |= self.apply(mutation);
        }
        changed || was_dragging || self.drag.is_dragging()
    }

    /// Drop the current drag without committing. Returns `true` if a drag
    /// was in progress.
    pub fn cancel_drag(&mut self) -> bool {
        let was_dragging = self.drag.is_dragging();
        self.drag.cancel();
        was_dragging
    }

    // ─── Surface ─────────────────────────────────────────────────────────

    /// Resize the surface and pull every note back inside it.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        self.surface.width = width;
        self.surface.height = height;
        self.drag.cancel();
        let changed = self.place_notes();
        if changed {
            self.persist();
        }
        changed
    }

    /// Give unplaced notes a cascade position and clamp the rest.
    fn place_notes(&mut self) -> bool {
        let mut unplaced = 0;
        let moves: Vec<(NoteId, Position)> = self
            .store
            .notes()
            .iter()
            .map(|n| {
                let target = match n.position {
                    Some(p) => self.surface.clamp(p),
                    None => {
                        unplaced += 1;
                        self.surface.cascade_position(unplaced - 1)
                    }
                };
                (n.id.clone(), target)
            })
            .collect();

        let mut changed = false;
        for (id, position) in moves {
            changed |= self.store.move_to(&id, position);
        }
        changed
    }

    // ─── Color picker ────────────────────────────────────────────────────

    pub fn is_picker_open(&self) -> bool {
        self.picker_open
    }

    /// Toggle the picker, returning the new state.
    pub fn toggle_picker(&mut self) -> bool {
        self.picker_open = !self.picker_open;
        self.picker_open
    }

    pub fn close_picker(&mut self) {
        self.picker_open = false;
    }

    // ─── Export ──────────────────────────────────────────────────────────

    pub fn export_all(&self) -> Option<ExportFile> {
        export::export_all(self.store.notes())
    }

    pub fn export_note(&self, id: &NoteId) -> Option<ExportFile> {
        export::export_one(self.store.notes(), id)
    }

    // ─── Private helpers ─────────────────────────────────────────────────

    fn persist(&mut self) {
        if let Err(e) = save_notes(&mut self.storage, &self.storage_key, self.store.notes()) {
            log::warn!("failed to save notes to `{}`: {e}", self.storage_key);
        }
    }
}
