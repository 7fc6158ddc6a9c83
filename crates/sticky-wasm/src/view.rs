//! JSON views handed to the host page.

use crate::picker::{Rect, text_area};
use serde::Serialize;
use sticky_core::NoteStorage;
use sticky_core::model::Note;
use sticky_editor::NotesBoard;

/// A note as the host sees it: stored fields plus where it is drawn now.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteView<'a> {
    pub id: &'a str,
    pub text: &'a str,
    pub color: String,
    pub done: bool,
    pub editing: bool,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub dragging: bool,
    pub merge_target: bool,
}

impl<'a> NoteView<'a> {
    pub fn of<S: NoteStorage>(board: &NotesBoard<S>, note: &'a Note) -> Self {
        let p = board.display_position(note);
        let surface = board.surface();
        NoteView {
            id: note.id.as_str(),
            text: &note.text,
            color: note.color.to_hex(),
            done: note.done,
            editing: note.editing,
            x: p.x,
            y: p.y,
            width: surface.note_width,
            height: surface.note_height,
            dragging: board.dragged() == Some(&note.id),
            merge_target: board.merge_candidate() == Some(&note.id),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RectView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl From<Rect> for RectView {
    fn from(r: Rect) -> Self {
        RectView {
            x: r.x,
            y: r.y,
            width: r.w,
            height: r.h,
        }
    }
}

pub fn notes_json<S: NoteStorage>(board: &NotesBoard<S>) -> String {
    let views: Vec<NoteView> = board.notes().iter().map(|n| NoteView::of(board, n)).collect();
    serde_json::to_string(&views).unwrap_or_else(|_| "[]".to_string())
}

/// Where the host should overlay a text editor for note `id`, or `{}`.
pub fn text_area_json<S: NoteStorage>(board: &NotesBoard<S>, id: &sticky_core::NoteId) -> String {
    board
        .note_bounds(id)
        .and_then(|b| serde_json::to_string(&RectView::from(text_area(&b))).ok())
        .unwrap_or_else(|| "{}".to_string())
}

/// Result of a pointer-down, for the host: `{"changed":bool,"action":"..","id":".."}`.
#[derive(Debug, Serialize)]
pub struct PointerOutcome {
    pub changed: bool,
    pub action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl PointerOutcome {
    pub fn none() -> Self {
        Self {
            changed: false,
            action: "none",
            id: None,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"changed":false,"action":"none"}"#.to_string())
    }
}
