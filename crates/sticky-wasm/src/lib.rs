//! WASM bridge for Sticky Board: exposes the notes board to JavaScript.
//!
//! Compiled via `wasm-pack build --target web` and loaded by `web/index.html`.
//! The host forwards pointer events and overlays a `<textarea>` on notes
//! that are being edited; everything else is drawn here.

mod download;
mod logger;
mod picker;
mod render2d;
mod storage;
mod view;

use picker::{ChromeHit, ChromeLayout, NoteControl, control_at};
use sticky_core::NoteId;
use sticky_core::model::{Color, PALETTE};
use sticky_editor::{BoardConfig, InputEvent, Modifiers, NotesBoard};
use storage::BrowserStorage;
use view::PointerOutcome;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// The main WASM-facing board controller.
///
/// Owns the board, its `localStorage` backend and the chrome layout. All
/// interaction from the host page goes through this struct.
#[wasm_bindgen]
pub struct StickyBoard {
    board: NotesBoard<BrowserStorage>,
    chrome: ChromeLayout,
    width: f64,
    height: f64,
    /// Dark mode flag: `false` = light (default), `true` = dark.
    dark_mode: bool,
}

#[wasm_bindgen]
impl StickyBoard {
    /// Create a board of the given size, loading saved notes.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Self {
        logger::init();

        let config = BoardConfig::with_size(width as f32, height as f32);
        let board = NotesBoard::load(&config, BrowserStorage::from_window());
        log::info!("sticky board ready with {} notes", board.notes().len());

        Self {
            board,
            chrome: ChromeLayout::new(width as f32, height as f32),
            width,
            height,
            dark_mode: false,
        }
    }

    /// Paint the board onto a Canvas2D context.
    pub fn render(&self, ctx: &CanvasRenderingContext2d) {
        let theme = if self.dark_mode {
            render2d::CanvasTheme::dark()
        } else {
            render2d::CanvasTheme::light()
        };
        render2d::render_board(ctx, &self.board, &self.chrome, self.width, self.height, &theme);
    }

    pub fn set_theme(&mut self, dark: bool) {
        self.dark_mode = dark;
    }

    /// Resize the surface. Notes outside the new bounds are pulled back in.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.chrome = ChromeLayout::new(width as f32, height as f32);
        self.board.resize(width as f32, height as f32);
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    /// Pointer-down. Returns a JSON `PointerOutcome`:
    /// `{"changed":bool,"action":"picker|add|export|delete|save|edit|done|undo|download|drag|none","id":".."}`.
    pub fn handle_pointer_down(&mut self, x: f32, y: f32, shift: bool) -> String {
        if let Some(hit) = self.chrome.hit(x, y, self.board.is_picker_open()) {
            return self.chrome_action(hit).to_json();
        }

        let control = self.board.note_at(x, y).cloned().and_then(|id| {
            let note = self.board.note(&id)?;
            let bounds = self.board.note_bounds(&id)?;
            control_at(note, &bounds, x, y).map(|c| (id, c))
        });
        if let Some((id, control)) = control {
            self.board.close_picker();
            return self.note_action(&id, control).to_json();
        }

        let modifiers = Modifiers { shift };
        let changed = self
            .board
            .handle_input(&InputEvent::from_pointer_down(x, y, modifiers));
        PointerOutcome {
            changed,
            action: if self.board.dragged().is_some() { "drag" } else { "none" },
            id: self.board.dragged().map(|id| id.to_string()),
        }
        .to_json()
    }

    /// Pointer-move. Returns `true` if the board needs a repaint.
    pub fn handle_pointer_move(&mut self, x: f32, y: f32, shift: bool) -> bool {
        let modifiers = Modifiers { shift };
        self.board
            .handle_input(&InputEvent::from_pointer_move(x, y, modifiers))
    }

    /// Pointer-up. Commits a merge or a move. Returns `true` if the board
    /// needs a repaint.
    pub fn handle_pointer_up(&mut self, x: f32, y: f32, shift: bool) -> bool {
        let modifiers = Modifiers { shift };
        self.board
            .handle_input(&InputEvent::from_pointer_up(x, y, modifiers))
    }

    /// Abandon an in-flight drag (Escape, pointer-cancel, window blur).
    pub fn cancel_drag(&mut self) -> bool {
        self.board.cancel_drag()
    }

    // ─── Color picker ────────────────────────────────────────────────────

    /// Toggle the picker, returning the new state.
    pub fn toggle_picker(&mut self) -> bool {
        self.board.toggle_picker()
    }

    pub fn is_picker_open(&self) -> bool {
        self.board.is_picker_open()
    }

    /// The palette as a JSON array of hex strings.
    pub fn palette_json(&self) -> String {
        let hexes: Vec<String> = PALETTE.iter().map(Color::to_hex).collect();
        serde_json::to_string(&hexes).unwrap_or_else(|_| "[]".to_string())
    }

    // ─── Note operations ─────────────────────────────────────────────────

    /// Add a note of a palette color. Returns the new id, or `""` if the
    /// color is not in the palette.
    pub fn add_note(&mut self, color_hex: &str) -> String {
        match Color::from_palette_hex(color_hex) {
            Some(color) => self.board.add_note(color, &mut rand::thread_rng()).to_string(),
            None => {
                log::warn!("add_note: {color_hex} is not a palette color");
                String::new()
            }
        }
    }

    pub fn update_text(&mut self, id: &str, text: &str) -> bool {
        self.board.update_text(&NoteId::from(id), text)
    }

    pub fn toggle_done(&mut self, id: &str, done: bool) -> bool {
        self.board.toggle_done(&NoteId::from(id), done)
    }

    pub fn toggle_editing(&mut self, id: &str, editing: bool) -> bool {
        self.board.toggle_editing(&NoteId::from(id), editing)
    }

    pub fn remove_note(&mut self, id: &str) -> bool {
        self.board.remove(&NoteId::from(id))
    }

    pub fn reorder(&mut self, from: &str, to: &str) -> bool {
        self.board.reorder(&NoteId::from(from), &NoteId::from(to))
    }

    pub fn merge(&mut self, source: &str, target: &str) -> bool {
        self.board.merge(&NoteId::from(source), &NoteId::from(target))
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// All notes in list order, with their current on-screen geometry.
    pub fn notes_json(&self) -> String {
        view::notes_json(&self.board)
    }

    /// Topmost note under the point, or `""`.
    pub fn note_at(&self, x: f32, y: f32) -> String {
        self.board
            .note_at(x, y)
            .map(|id| id.to_string())
            .unwrap_or_default()
    }

    /// Bounds of a note as `{"x","y","width","height"}`, or `{}`.
    pub fn note_bounds(&self, id: &str) -> String {
        self.board
            .note_bounds(&NoteId::from(id))
            .and_then(|b| serde_json::to_string(&b).ok())
            .unwrap_or_else(|| "{}".to_string())
    }

    /// Where the host should overlay its text editor for a note, or `{}`.
    pub fn text_area_bounds(&self, id: &str) -> String {
        view::text_area_json(&self.board, &NoteId::from(id))
    }

    /// Id of the note being dragged, or `""`.
    pub fn dragged_id(&self) -> String {
        self.board
            .dragged()
            .map(|id| id.to_string())
            .unwrap_or_default()
    }

    // ─── Export ──────────────────────────────────────────────────────────

    /// Download all non-blank notes as one text file. Returns `false` when
    /// there is nothing to export or the download failed.
    pub fn export_all(&self) -> bool {
        self.board.export_all().is_some_and(|file| offer(&file))
    }

    /// Download a single note. Returns `false` for blank or unknown notes.
    pub fn export_note(&self, id: &str) -> bool {
        self.board
            .export_note(&NoteId::from(id))
            .is_some_and(|file| offer(&file))
    }
}

impl StickyBoard {
    fn chrome_action(&mut self, hit: ChromeHit) -> PointerOutcome {
        match hit {
            ChromeHit::PickerButton => {
                self.board.toggle_picker();
                PointerOutcome {
                    changed: true,
                    action: "picker",
                    id: None,
                }
            }
            ChromeHit::Swatch(color) => {
                let id = self.board.add_note(color, &mut rand::thread_rng());
                PointerOutcome {
                    changed: true,
                    action: "add",
                    id: Some(id.to_string()),
                }
            }
            ChromeHit::ExportAll => {
                self.board.close_picker();
                self.export_all();
                PointerOutcome {
                    changed: true,
                    action: "export",
                    id: None,
                }
            }
            ChromeHit::Popover => PointerOutcome::none(),
        }
    }

    fn note_action(&mut self, id: &NoteId, control: NoteControl) -> PointerOutcome {
        let changed = match control {
            NoteControl::Delete => self.board.remove(id),
            NoteControl::Save => self.board.toggle_editing(id, false),
            NoteControl::Edit => self.board.toggle_editing(id, true),
            NoteControl::Done => self.board.toggle_done(id, true),
            NoteControl::Undo => self.board.toggle_done(id, false),
            NoteControl::Download => {
                self.export_note(id.as_str());
                false
            }
        };
        PointerOutcome {
            changed,
            action: control.name(),
            id: Some(id.to_string()),
        }
    }
}

fn offer(file: &sticky_core::ExportFile) -> bool {
    match download::save_text_as_file(file) {
        Ok(()) => {
            log::info!("exported {}", file.filename);
            true
        }
        Err(e) => {
            log::error!(
                "export of {} failed: {}",
                file.filename,
                storage::js_error_text(&e)
            );
            false
        }
    }
}

/// Set the log level by name (`"debug"`, `"info"`, ...). Returns `false`
/// for an unknown name.
#[wasm_bindgen]
pub fn set_log_level(name: &str) -> bool {
    logger::init();
    match logger::parse_level(name) {
        Some(level) => {
            log::set_max_level(level);
            true
        }
        None => false,
    }
}
