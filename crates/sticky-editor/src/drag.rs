//! Free-position drag tool.
//!
//! Translates pointer events into `NoteMutation`s:
//!
//! - **Down** on a note starts a drag and remembers where inside the note it
//!   was grabbed.
//! - **Move** updates a live, clamped position and recomputes the merge
//!   candidate (first note in list order whose bounds overlap the live
//!   rectangle). Nothing is committed; the candidate is only for
//!   highlighting.
//! - **Up** commits: `Merge` into the candidate if the dropped rectangle
//!   overlaps one, otherwise `MoveTo` the dropped position. A press and
//!   release without movement commits nothing.
//!
//! Drag state is cleared on every pointer-up, whatever the outcome.
//!
//! ## Modifier behaviors
//!
//! | Modifier | Effect |
//! |----------|--------|
//! | **Shift** | Constrain the drag to its dominant axis |

use crate::hit::merge_candidate;
use crate::input::{InputEvent, Modifiers};
use sticky_core::model::{Note, Position};
use sticky_core::{NoteId, NoteMutation, Surface};

#[derive(Debug, Clone)]
struct ActiveDrag {
    id: NoteId,
    /// Pointer offset from the note's top-left corner at grab time.
    grab_dx: f32,
    grab_dy: f32,
    origin: Position,
    live: Position,
    candidate: Option<NoteId>,
    moved: bool,
}

impl ActiveDrag {
    /// Where the note would sit for a pointer at (x, y).
    fn track(&self, x: f32, y: f32, modifiers: Modifiers, surface: &Surface) -> Position {
        let mut p = Position::new(x - self.grab_dx, y - self.grab_dy);
        if modifiers.shift {
            if (p.x - self.origin.x).abs() > (p.y - self.origin.y).abs() {
                p.y = self.origin.y;
            } else {
                p.x = self.origin.x;
            }
        }
        surface.clamp(p)
    }

    fn update(&mut self, event: &InputEvent, notes: &[Note], surface: &Surface) {
        let (x, y) = event.position();
        self.live = self.track(x, y, event.modifiers(), surface);
        self.moved |= self.live != self.origin;
        self.candidate =
            merge_candidate(notes, surface, &self.id, &surface.bounds_at(self.live)).cloned();
    }
}

#[derive(Debug, Clone, Default)]
pub struct DragTool {
    active: Option<ActiveDrag>,
}

impl DragTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle an input event, returning zero or one mutations.
    /// `hit` is the topmost note under the pointer, if any.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        hit: Option<&NoteId>,
        notes: &[Note],
        surface: &Surface,
    ) -> Vec<NoteMutation> {
        match event {
            InputEvent::PointerDown { x, y, .. } => {
                self.active = hit
                    .and_then(|id| notes.iter().find(|n| &n.id == id))
                    .map(|note| {
                        let origin = note.position.unwrap_or_default();
                        ActiveDrag {
                            id: note.id.clone(),
                            grab_dx: x - origin.x,
                            grab_dy: y - origin.y,
                            origin,
                            live: origin,
                            candidate: None,
                            moved: false,
                        }
                    });
                vec![]
            }
            InputEvent::PointerMove { .. } => {
                if let Some(drag) = self.active.as_mut() {
                    drag.update(event, notes, surface);
                    log::trace!(
                        "drag {} -> ({:.1}, {:.1}) candidate={:?}",
                        drag.id,
                        drag.live.x,
                        drag.live.y,
                        drag.candidate
                    );
                }
                vec![]
            }
            InputEvent::PointerUp { .. } => {
                let Some(mut drag) = self.active.take() else {
                    return vec![];
                };
                drag.update(event, notes, surface);
                if !drag.moved {
                    return vec![];
                }
                match drag.candidate {
                    Some(target) => vec![NoteMutation::Merge {
                        source: drag.id,
                        target,
                    }],
                    None => vec![NoteMutation::MoveTo {
                        id: drag.id,
                        position: drag.live,
                    }],
                }
            }
        }
    }

    /// Abandon the current drag without committing anything.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// The note being dragged.
    pub fn dragged(&self) -> Option<&NoteId> {
        self.active.as_ref().map(|d| &d.id)
    }

    /// Live (uncommitted) position of the dragged note.
    pub fn live_position(&self) -> Option<Position> {
        self.active.as_ref().map(|d| d.live)
    }

    /// Note that would absorb the dragged one if it were dropped now.
    pub fn merge_candidate(&self) -> Option<&NoteId> {
        self.active.as_ref().and_then(|d| d.candidate.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hit::hit_test;
    use sticky_core::model::PALETTE;

    const SURFACE: Surface = Surface {
        width: 800.0,
        height: 600.0,
        note_width: 100.0,
        note_height: 100.0,
    };

    fn notes() -> Vec<Note> {
        vec![
            Note::new(NoteId::new("a"), PALETTE[0], Position::new(0.0, 0.0)),
            Note::new(NoteId::new("b"), PALETTE[1], Position::new(400.0, 300.0)),
        ]
    }

    fn down(x: f32, y: f32) -> InputEvent {
        InputEvent::from_pointer_down(x, y, Modifiers::NONE)
    }

    fn mv(x: f32, y: f32) -> InputEvent {
        InputEvent::from_pointer_move(x, y, Modifiers::NONE)
    }

    fn up(x: f32, y: f32) -> InputEvent {
        InputEvent::from_pointer_up(x, y, Modifiers::NONE)
    }

    fn feed(tool: &mut DragTool, notes: &[Note], event: InputEvent) -> Vec<NoteMutation> {
        let (x, y) = event.position();
        let hit = hit_test(notes, &SURFACE, x, y).cloned();
        tool.handle(&event, hit.as_ref(), notes, &SURFACE)
    }

    #[test]
    fn drop_in_free_space_moves_note() {
        let notes = notes();
        let mut tool = DragTool::new();

        feed(&mut tool, &notes, down(10.0, 10.0));
        assert_eq!(tool.dragged().map(NoteId::as_str), Some("a"));
        feed(&mut tool, &notes, mv(110.0, 60.0));
        assert_eq!(tool.live_position(), Some(Position::new(100.0, 50.0)));

        let mutations = feed(&mut tool, &notes, up(210.0, 60.0));
        assert_eq!(
            mutations,
            vec![NoteMutation::MoveTo {
                id: NoteId::new("a"),
                position: Position::new(200.0, 50.0),
            }]
        );
        assert!(!tool.is_dragging());
    }

    #[test]
    fn drop_onto_other_note_merges() {
        let notes = notes();
        let mut tool = DragTool::new();

        feed(&mut tool, &notes, down(10.0, 10.0));
        feed(&mut tool, &notes, mv(380.0, 280.0));
        assert_eq!(tool.merge_candidate().map(NoteId::as_str), Some("b"));

        let mutations = feed(&mut tool, &notes, up(390.0, 290.0));
        assert_eq!(
            mutations,
            vec![NoteMutation::Merge {
                source: NoteId::new("a"),
                target: NoteId::new("b"),
            }]
        );
        assert_eq!(tool.merge_candidate(), None);
    }

    #[test]
    fn hovering_over_then_leaving_does_not_merge() {
        let notes = notes();
        let mut tool = DragTool::new();

        feed(&mut tool, &notes, down(10.0, 10.0));
        feed(&mut tool, &notes, mv(380.0, 280.0));
        assert!(tool.merge_candidate().is_some());
        feed(&mut tool, &notes, mv(10.0, 500.0));
        assert_eq!(tool.merge_candidate(), None);

        let mutations = feed(&mut tool, &notes, up(10.0, 500.0));
        assert!(matches!(mutations[..], [NoteMutation::MoveTo { .. }]));
    }

    #[test]
    fn drag_is_clamped_to_surface() {
        let notes = notes();
        let mut tool = DragTool::new();

        feed(&mut tool, &notes, down(50.0, 50.0));
        feed(&mut tool, &notes, mv(-500.0, 5000.0));
        assert_eq!(tool.live_position(), Some(Position::new(0.0, 500.0)));

        let mutations = feed(&mut tool, &notes, up(5000.0, -500.0));
        match &mutations[..] {
            [NoteMutation::MoveTo { position, .. }] => {
                assert_eq!(*position, Position::new(700.0, 0.0));
            }
            other => panic!("expected MoveTo, got {other:?}"),
        }
    }

    #[test]
    fn click_without_motion_commits_nothing() {
        let notes = notes();
        let mut tool = DragTool::new();
        feed(&mut tool, &notes, down(10.0, 10.0));
        assert!(feed(&mut tool, &notes, up(10.0, 10.0)).is_empty());
        assert!(!tool.is_dragging());
    }

    #[test]
    fn press_on_empty_board_does_nothing() {
        let notes = notes();
        let mut tool = DragTool::new();
        feed(&mut tool, &notes, down(700.0, 50.0));
        assert!(!tool.is_dragging());
        assert!(feed(&mut tool, &notes, mv(720.0, 60.0)).is_empty());
        assert!(feed(&mut tool, &notes, up(720.0, 60.0)).is_empty());
    }

    #[test]
    fn shift_constrains_to_dominant_axis() {
        let notes = notes();
        let mut tool = DragTool::new();
        let shift = Modifiers::SHIFT;

        feed(&mut tool, &notes, down(10.0, 10.0));
        let (x, y) = (210.0, 40.0);
        tool.handle(
            &InputEvent::from_pointer_move(x, y, shift),
            None,
            &notes,
            &SURFACE,
        );
        assert_eq!(tool.live_position(), Some(Position::new(200.0, 0.0)));
    }

    #[test]
    fn cancel_resets_state() {
        let notes = notes();
        let mut tool = DragTool::new();
        feed(&mut tool, &notes, down(10.0, 10.0));
        feed(&mut tool, &notes, mv(380.0, 280.0));
        tool.cancel();
        assert!(!tool.is_dragging());
        assert_eq!(tool.merge_candidate(), None);
        assert!(feed(&mut tool, &notes, up(380.0, 280.0)).is_empty());
    }
}
