//! Hit testing: point → note, dropped rectangle → merge target.
//!
//! Notes later in the list paint on top, so point lookups walk the list in
//! reverse. Overlap queries keep list order.

use sticky_core::model::{Note, NoteBounds};
use sticky_core::{NoteId, Surface};

/// Find the topmost note under (px, py).
/// Returns `None` if the point is on the empty board.
pub fn hit_test<'a>(notes: &'a [Note], surface: &Surface, px: f32, py: f32) -> Option<&'a NoteId> {
    notes
        .iter()
        .rev()
        .find(|n| surface.bounds_of(n).contains(px, py))
        .map(|n| &n.id)
}

/// The note a drop at `rect` would merge into: the first overlapping note in
/// list order.
pub fn merge_candidate<'a>(
    notes: &'a [Note],
    surface: &Surface,
    dragged: &NoteId,
    rect: &NoteBounds,
) -> Option<&'a NoteId> {
    notes
        .iter()
        .find(|n| &n.id != dragged && surface.bounds_of(n).intersects(rect))
        .map(|n| &n.id)
}
