//! Board chrome layout: the title banner, the color-picker button and
//! popover, the export button, and the per-note control buttons.
//!
//! Pure geometry, shared by the renderer and the pointer hit tests so the
//! two can never disagree.

use sticky_core::model::{Color, Note, NoteBounds, PALETTE};

const MARGIN: f32 = 24.0;
const BUTTON_H: f32 = 44.0;
const PICKER_BUTTON_W: f32 = 150.0;
const EXPORT_BUTTON_W: f32 = 120.0;
const BUTTON_GAP: f32 = 12.0;
const POPOVER_PAD: f32 = 12.0;
const SWATCH_SIZE: f32 = 32.0;
const BANNER_H: f32 = 64.0;

/// Note padding, header and footer heights.
const NOTE_PAD: f32 = 10.0;
const NOTE_HEADER_H: f32 = 24.0;
const NOTE_BUTTON_H: f32 = 26.0;
const NOTE_BUTTON_GAP: f32 = 6.0;
const DELETE_SIZE: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.w && py >= self.y && py <= self.y + self.h
    }
}

// ─── Board chrome ────────────────────────────────────────────────────────

/// What a pointer-down on the board chrome landed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChromeHit {
    PickerButton,
    ExportAll,
    Swatch(Color),
    /// Inside the open popover but between swatches.
    Popover,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChromeLayout {
    /// Title band across the top of the board, painted under the notes.
    pub banner: Rect,
    pub picker_button: Rect,
    pub export_button: Rect,
    pub popover: Rect,
    pub swatches: Vec<(Color, Rect)>,
}

impl ChromeLayout {
    /// Anchor everything to the bottom-right corner of a `width × height` board.
    pub fn new(width: f32, height: f32) -> Self {
        let picker_button = Rect {
            x: width - MARGIN - PICKER_BUTTON_W,
            y: height - MARGIN - BUTTON_H,
            w: PICKER_BUTTON_W,
            h: BUTTON_H,
        };
        let export_button = Rect {
            x: picker_button.x - BUTTON_GAP - EXPORT_BUTTON_W,
            y: picker_button.y,
            w: EXPORT_BUTTON_W,
            h: BUTTON_H,
        };

        let n = PALETTE.len() as f32;
        let popover_w = POPOVER_PAD * 2.0 + n * SWATCH_SIZE + (n - 1.0) * POPOVER_PAD;
        let popover_h = POPOVER_PAD * 2.0 + SWATCH_SIZE;
        let popover = Rect {
            x: picker_button.x + picker_button.w - popover_w,
            y: picker_button.y - BUTTON_GAP - popover_h,
            w: popover_w,
            h: popover_h,
        };

        let swatches = PALETTE
            .iter()
            .enumerate()
            .map(|(i, &color)| {
                let rect = Rect {
                    x: popover.x + POPOVER_PAD + i as f32 * (SWATCH_SIZE + POPOVER_PAD),
                    y: popover.y + POPOVER_PAD,
                    w: SWATCH_SIZE,
                    h: SWATCH_SIZE,
                };
                (color, rect)
            })
            .collect();

        let banner = Rect {
            x: 0.0,
            y: 0.0,
            w: width.max(0.0),
            h: BANNER_H.min(height.max(0.0)),
        };

        Self {
            banner,
            picker_button,
            export_button,
            popover,
            swatches,
        }
    }

    /// Hit-test the chrome. The popover only counts while it is open.
    pub fn hit(&self, x: f32, y: f32, picker_open: bool) -> Option<ChromeHit> {
        if self.picker_button.contains(x, y) {
            return Some(ChromeHit::PickerButton);
        }
        if self.export_button.contains(x, y) {
            return Some(ChromeHit::ExportAll);
        }
        if picker_open && self.popover.contains(x, y) {
            let swatch = self
                .swatches
                .iter()
                .find(|(_, r)| r.contains(x, y))
                .map(|(c, _)| ChromeHit::Swatch(*c));
            return Some(swatch.unwrap_or(ChromeHit::Popover));
        }
        None
    }
}

// ─── Note controls ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteControl {
    Delete,
    Save,
    Edit,
    Done,
    Undo,
    Download,
}

impl NoteControl {
    pub fn label(self) -> &'static str {
        match self {
            NoteControl::Delete => "✕",
            NoteControl::Save => "Save",
            NoteControl::Edit => "Edit",
            NoteControl::Done => "Done",
            NoteControl::Undo => "Undo",
            NoteControl::Download => "Download",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NoteControl::Delete => "delete",
            NoteControl::Save => "save",
            NoteControl::Edit => "edit",
            NoteControl::Done => "done",
            NoteControl::Undo => "undo",
            NoteControl::Download => "download",
        }
    }

    fn width(self) -> f32 {
        match self {
            NoteControl::Delete => DELETE_SIZE,
            NoteControl::Save | NoteControl::Edit => 48.0,
            NoteControl::Done | NoteControl::Undo => 52.0,
            NoteControl::Download => 80.0,
        }
    }
}

/// Controls shown on a note, with their rectangles.
///
/// Delete is always present. Save/Edit only for non-blank notes that are
/// not done; Done/Undo and Download for any non-blank note.
pub fn note_controls(note: &Note, b: &NoteBounds) -> Vec<(NoteControl, Rect)> {
    let mut controls = vec![(
        NoteControl::Delete,
        Rect {
            x: b.x + b.width - NOTE_PAD - DELETE_SIZE,
            y: b.y + (NOTE_PAD + NOTE_HEADER_H - DELETE_SIZE) / 2.0,
            w: DELETE_SIZE,
            h: DELETE_SIZE,
        },
    )];

    if note.text.is_empty() {
        return controls;
    }

    let mut row = Vec::with_capacity(3);
    if !note.done {
        row.push(if note.editing {
            NoteControl::Save
        } else {
            NoteControl::Edit
        });
    }
    row.push(if note.done {
        NoteControl::Undo
    } else {
        NoteControl::Done
    });
    row.push(NoteControl::Download);

    let y = b.y + b.height - NOTE_PAD - NOTE_BUTTON_H;
    let mut x = b.x + NOTE_PAD;
    for control in row {
        let w = control.width();
        controls.push((
            control,
            Rect {
                x,
                y,
                w,
                h: NOTE_BUTTON_H,
            },
        ));
        x += w + NOTE_BUTTON_GAP;
    }
    controls
}

pub fn control_at(note: &Note, b: &NoteBounds, x: f32, y: f32) -> Option<NoteControl> {
    note_controls(note, b)
        .into_iter()
        .find(|(_, r)| r.contains(x, y))
        .map(|(c, _)| c)
}

/// Region of a note where text is shown (and the host overlays its editor).
pub fn text_area(b: &NoteBounds) -> Rect {
    let top = NOTE_PAD + NOTE_HEADER_H;
    let bottom = NOTE_PAD * 2.0 + NOTE_BUTTON_H;
    Rect {
        x: b.x + NOTE_PAD,
        y: b.y + top,
        w: (b.width - NOTE_PAD * 2.0).max(0.0),
        h: (b.height - top - bottom).max(0.0),
    }
}

/// Rectangle of the header strip (title and grip).
pub fn header(b: &NoteBounds) -> Rect {
    Rect {
        x: b.x + NOTE_PAD,
        y: b.y,
        w: (b.width - NOTE_PAD * 2.0).max(0.0),
        h: NOTE_PAD + NOTE_HEADER_H,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sticky_core::NoteId;
    use sticky_core::model::Position;

    const BOUNDS: NoteBounds = NoteBounds {
        x: 100.0,
        y: 100.0,
        width: 220.0,
        height: 200.0,
    };

    fn note(text: &str, done: bool, editing: bool) -> Note {
        let mut n = Note::new(NoteId::new("n"), PALETTE[0], Position::new(100.0, 100.0));
        n.text = text.to_string();
        n.done = done;
        n.editing = editing;
        n
    }

    fn kinds(note: &Note) -> Vec<NoteControl> {
        note_controls(note, &BOUNDS).into_iter().map(|(c, _)| c).collect()
    }

    #[test]
    fn blank_note_only_deletes() {
        assert_eq!(kinds(&note("", false, true)), vec![NoteControl::Delete]);
    }

    #[test]
    fn controls_follow_note_state() {
        use NoteControl::*;
        assert_eq!(
            kinds(&note("x", false, true)),
            vec![Delete, Save, Done, Download]
        );
        assert_eq!(
            kinds(&note("x", false, false)),
            vec![Delete, Edit, Done, Download]
        );
        assert_eq!(kinds(&note("x", true, false)), vec![Delete, Undo, Download]);
    }

    #[test]
    fn controls_fit_inside_note() {
        for (_, r) in note_controls(&note("x", false, true), &BOUNDS) {
            assert!(r.x >= BOUNDS.x && r.x + r.w <= BOUNDS.x + BOUNDS.width, "{r:?}");
            assert!(r.y >= BOUNDS.y && r.y + r.h <= BOUNDS.y + BOUNDS.height, "{r:?}");
        }
    }

    #[test]
    fn control_hit() {
        let n = note("x", false, true);
        let controls = note_controls(&n, &BOUNDS);
        let (_, delete) = controls[0];
        assert_eq!(
            control_at(&n, &BOUNDS, delete.x + 1.0, delete.y + 1.0),
            Some(NoteControl::Delete)
        );
        let area = text_area(&BOUNDS);
        assert_eq!(control_at(&n, &BOUNDS, area.x + 5.0, area.y + 5.0), None);
    }

    #[test]
    fn chrome_hits() {
        let chrome = ChromeLayout::new(1000.0, 700.0);
        let b = chrome.picker_button;
        assert_eq!(
            chrome.hit(b.x + 2.0, b.y + 2.0, false),
            Some(ChromeHit::PickerButton)
        );
        let e = chrome.export_button;
        assert_eq!(chrome.hit(e.x + 2.0, e.y + 2.0, false), Some(ChromeHit::ExportAll));

        let (color, s) = chrome.swatches[2];
        assert_eq!(chrome.hit(s.x + 3.0, s.y + 3.0, false), None);
        assert_eq!(
            chrome.hit(s.x + 3.0, s.y + 3.0, true),
            Some(ChromeHit::Swatch(color))
        );
        let p = chrome.popover;
        assert_eq!(chrome.hit(p.x + 1.0, p.y + 1.0, true), Some(ChromeHit::Popover));
        assert_eq!(chrome.hit(10.0, 10.0, true), None);
    }

    #[test]
    fn banner_spans_top_and_is_not_clickable() {
        let chrome = ChromeLayout::new(1000.0, 700.0);
        assert_eq!(
            chrome.banner,
            Rect {
                x: 0.0,
                y: 0.0,
                w: 1000.0,
                h: 64.0
            }
        );
        assert_eq!(chrome.hit(500.0, 20.0, true), None);

        let tiny = ChromeLayout::new(300.0, 40.0);
        assert_eq!(tiny.banner.h, 40.0);
    }

    #[test]
    fn swatches_follow_palette() {
        let chrome = ChromeLayout::new(800.0, 600.0);
        let colors: Vec<Color> = chrome.swatches.iter().map(|(c, _)| *c).collect();
        assert_eq!(colors, PALETTE.to_vec());
        for (_, r) in &chrome.swatches {
            assert!(r.x >= chrome.popover.x && r.x + r.w <= chrome.popover.x + chrome.popover.w);
        }
    }
}
