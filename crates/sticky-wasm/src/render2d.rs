//! Canvas2D software renderer.
//!
//! Paints the board to an HTML `<canvas>` via `CanvasRenderingContext2d`:
//! notes in list order, the dragged note last at its live position, then
//! the picker and export chrome on top.

use crate::picker::{ChromeLayout, Rect, header, note_controls, text_area};
use sticky_core::NoteStorage;
use sticky_core::model::{Note, NoteBounds};
use sticky_editor::NotesBoard;
use web_sys::CanvasRenderingContext2d;

const NOTE_RADIUS: f64 = 8.0;
const LINE_HEIGHT: f64 = 18.0;
const TEXT_FONT: &str = "400 14px Inter, system-ui, sans-serif";
const HEADER_FONT: &str = "italic 700 13px Inter, system-ui, sans-serif";
const BUTTON_FONT: &str = "500 12px Inter, system-ui, sans-serif";
const MERGE_RING: &str = "rgba(250, 204, 21, 0.9)";
const BANNER_FONT: &str = "700 24px Inter, system-ui, sans-serif";
const BANNER_TITLE: &str = "STICKIFY";

/// Theme-dependent colors for the board renderer.
pub struct CanvasTheme {
    pub bg: &'static str,
    pub grid: &'static str,
    pub popover_bg: &'static str,
    pub popover_border: &'static str,
    pub shadow: &'static str,
    pub banner_bg: &'static str,
}

impl CanvasTheme {
    pub fn light() -> Self {
        Self {
            bg: "#F3F4F6",
            grid: "rgba(0, 0, 0, 0.05)",
            popover_bg: "#FFFFFF",
            popover_border: "#D1D5DB",
            shadow: "rgba(0, 0, 0, 0.18)",
            banner_bg: "#0F172A",
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: "#1C1C1E",
            grid: "rgba(255, 255, 255, 0.04)",
            popover_bg: "#2C2C2E",
            popover_border: "#48484A",
            shadow: "rgba(0, 0, 0, 0.5)",
            banner_bg: "#020617",
        }
    }
}

/// Render the whole board.
pub fn render_board<S: NoteStorage>(
    ctx: &CanvasRenderingContext2d,
    board: &NotesBoard<S>,
    chrome: &ChromeLayout,
    canvas_width: f64,
    canvas_height: f64,
    theme: &CanvasTheme,
) {
    ctx.set_fill_style_str(theme.bg);
    ctx.fill_rect(0.0, 0.0, canvas_width, canvas_height);
    draw_grid(ctx, canvas_width, canvas_height, theme);
    draw_banner(ctx, &chrome.banner, theme);

    let dragged = board.dragged();
    let candidate = board.merge_candidate();

    for note in board.notes() {
        if dragged == Some(&note.id) {
            continue;
        }
        let b = board.surface().bounds_at(board.display_position(note));
        draw_note(ctx, note, &b, theme, candidate == Some(&note.id), false);
    }

    // The dragged note floats above everything else.
    if let Some(note) = dragged.and_then(|id| board.note(id)) {
        let b = board.surface().bounds_at(board.display_position(note));
        draw_note(ctx, note, &b, theme, false, true);
    }

    draw_chrome(ctx, chrome, board.is_picker_open(), theme);
}

// ─── Notes ──────────────────────────────────────────────────────────────

fn draw_note(
    ctx: &CanvasRenderingContext2d,
    note: &Note,
    b: &NoteBounds,
    theme: &CanvasTheme,
    merge_target: bool,
    dragging: bool,
) {
    let (x, y, w, h) = (b.x as f64, b.y as f64, b.width as f64, b.height as f64);

    ctx.save();
    if dragging {
        ctx.set_global_alpha(0.5);
    }

    ctx.set_shadow_color(theme.shadow);
    ctx.set_shadow_blur(10.0);
    ctx.set_shadow_offset_y(3.0);
    rounded_rect_path(ctx, x, y, w, h, NOTE_RADIUS);
    ctx.set_fill_style_str(&note.color.to_hex());
    ctx.fill();
    clear_shadow(ctx);

    if merge_target {
        ctx.set_stroke_style_str(MERGE_RING);
        ctx.set_line_width(3.0);
        rounded_rect_path(ctx, x - 3.0, y - 3.0, w + 6.0, h + 6.0, NOTE_RADIUS + 3.0);
        ctx.stroke();
    }

    let ink = ink_for(note);
    draw_header(ctx, b, ink);

    // Text being edited is shown by the host's overlay editor, except while
    // the note is in flight.
    if !note.editing || dragging {
        draw_note_text(ctx, note, &text_area(b), ink);
    }

    for (control, r) in note_controls(note, b) {
        draw_button(ctx, &r, control.label(), "rgba(0, 0, 0, 0.22)", ink);
    }

    ctx.restore();
}

/// White ink unless the note color is too light for it.
fn ink_for(note: &Note) -> &'static str {
    if note.color.luminance() > 0.75 {
        "#1C1C1E"
    } else {
        "#FFFFFF"
    }
}

fn draw_header(ctx: &CanvasRenderingContext2d, b: &NoteBounds, ink: &str) {
    let r = header(b);
    ctx.set_font(HEADER_FONT);
    ctx.set_fill_style_str(ink);
    ctx.set_text_align("left");
    ctx.set_text_baseline("middle");
    let _ = ctx.fill_text("Drag to merge notes", r.x as f64, (r.y + r.h / 2.0) as f64 + 4.0);

    // Grip, left of the delete button.
    ctx.save();
    ctx.set_global_alpha(ctx.global_alpha() * 0.6);
    ctx.set_text_align("right");
    let _ = ctx.fill_text("⋮⋮", (r.x + r.w) as f64 - 28.0, (r.y + r.h / 2.0) as f64 + 4.0);
    ctx.restore();
}

fn draw_note_text(ctx: &CanvasRenderingContext2d, note: &Note, area: &Rect, ink: &str) {
    if note.text.is_empty() {
        return;
    }
    ctx.save();
    ctx.begin_path();
    ctx.rect(area.x as f64, area.y as f64, area.w as f64, area.h as f64);
    ctx.clip();

    ctx.set_font(TEXT_FONT);
    ctx.set_fill_style_str(ink);
    ctx.set_stroke_style_str(ink);
    ctx.set_line_width(1.0);
    ctx.set_text_align("left");
    ctx.set_text_baseline("top");

    let max_lines = (area.h as f64 / LINE_HEIGHT).floor().max(0.0) as usize;
    let lines = wrap_text(&note.text, area.w as f64, |s| {
        ctx.measure_text(s).map(|m| m.width()).unwrap_or(0.0)
    });

    for (i, line) in lines.iter().take(max_lines).enumerate() {
        let ly = area.y as f64 + i as f64 * LINE_HEIGHT;
        let _ = ctx.fill_text(line, area.x as f64, ly);
        if note.done && !line.is_empty() {
            let width = ctx.measure_text(line).map(|m| m.width()).unwrap_or(0.0);
            ctx.begin_path();
            ctx.move_to(area.x as f64, ly + LINE_HEIGHT / 2.0 - 1.0);
            ctx.line_to(area.x as f64 + width, ly + LINE_HEIGHT / 2.0 - 1.0);
            ctx.stroke();
        }
    }
    ctx.restore();
}

/// Greedy word wrap. Explicit newlines are kept; words wider than
/// `max_width` get a line of their own.
pub fn wrap_text(text: &str, max_width: f64, measure: impl Fn(&str) -> f64) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split(' ') {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if current.is_empty() || measure(&candidate) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        lines.push(current);
    }
    lines
}

// ─── Chrome ─────────────────────────────────────────────────────────────

fn draw_banner(ctx: &CanvasRenderingContext2d, r: &Rect, theme: &CanvasTheme) {
    let (x, y, w, h) = (r.x as f64, r.y as f64, r.w as f64, r.h as f64);
    ctx.set_fill_style_str(theme.banner_bg);
    ctx.fill_rect(x, y, w, h);

    ctx.set_font(BANNER_FONT);
    ctx.set_fill_style_str("#FFFFFF");
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    let _ = ctx.fill_text(BANNER_TITLE, x + w / 2.0, y + h / 2.0);
}

fn draw_chrome(
    ctx: &CanvasRenderingContext2d,
    chrome: &ChromeLayout,
    picker_open: bool,
    theme: &CanvasTheme,
) {
    ctx.save();
    ctx.set_shadow_color(theme.shadow);
    ctx.set_shadow_blur(12.0);
    draw_button(ctx, &chrome.export_button, "Export all", "#16A34A", "#FFFFFF");
    draw_button(ctx, &chrome.picker_button, "Choose a color", "#2563EB", "#FFFFFF");
    clear_shadow(ctx);

    if picker_open {
        let p = &chrome.popover;
        ctx.set_shadow_color(theme.shadow);
        ctx.set_shadow_blur(12.0);
        rounded_rect_path(ctx, p.x as f64, p.y as f64, p.w as f64, p.h as f64, 8.0);
        ctx.set_fill_style_str(theme.popover_bg);
        ctx.fill();
        clear_shadow(ctx);

        for (color, r) in &chrome.swatches {
            let (cx, cy) = ((r.x + r.w / 2.0) as f64, (r.y + r.h / 2.0) as f64);
            ctx.begin_path();
            let _ = ctx.arc(cx, cy, r.w as f64 / 2.0, 0.0, std::f64::consts::TAU);
            ctx.set_fill_style_str(&color.to_hex());
            ctx.fill();
            ctx.set_stroke_style_str(theme.popover_border);
            ctx.set_line_width(1.0);
            ctx.stroke();
        }
    }
    ctx.restore();
}

fn draw_button(ctx: &CanvasRenderingContext2d, r: &Rect, label: &str, fill: &str, ink: &str) {
    let (x, y, w, h) = (r.x as f64, r.y as f64, r.w as f64, r.h as f64);
    rounded_rect_path(ctx, x, y, w, h, (h / 2.0).min(8.0));
    ctx.set_fill_style_str(fill);
    ctx.fill();

    ctx.set_font(BUTTON_FONT);
    ctx.set_fill_style_str(ink);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    let _ = ctx.fill_text(label, x + w / 2.0, y + h / 2.0);
}

// ─── Drawing primitives ─────────────────────────────────────────────────

fn draw_grid(ctx: &CanvasRenderingContext2d, width: f64, height: f64, theme: &CanvasTheme) {
    let spacing = 24.0;
    ctx.set_fill_style_str(theme.grid);
    let mut y = spacing;
    while y < height {
        let mut x = spacing;
        while x < width {
            ctx.fill_rect(x - 0.75, y - 0.75, 1.5, 1.5);
            x += spacing;
        }
        y += spacing;
    }
}

fn rounded_rect_path(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
    let r = r.min(w / 2.0).min(h / 2.0).max(0.0);
    ctx.begin_path();
    ctx.move_to(x + r, y);
    ctx.line_to(x + w - r, y);
    ctx.quadratic_curve_to(x + w, y, x + w, y + r);
    ctx.line_to(x + w, y + h - r);
    ctx.quadratic_curve_to(x + w, y + h, x + w - r, y + h);
    ctx.line_to(x + r, y + h);
    ctx.quadratic_curve_to(x, y + h, x, y + h - r);
    ctx.line_to(x, y + r);
    ctx.quadratic_curve_to(x, y, x + r, y);
    ctx.close_path();
}

fn clear_shadow(ctx: &CanvasRenderingContext2d) {
    ctx.set_shadow_color("transparent");
    ctx.set_shadow_blur(0.0);
    ctx.set_shadow_offset_x(0.0);
    ctx.set_shadow_offset_y(0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Fixed-width measure: 10px per char.
    fn mono(s: &str) -> f64 {
        s.chars().count() as f64 * 10.0
    }

    #[test]
    fn wraps_on_word_boundaries() {
        let lines = wrap_text("the quick brown fox", 100.0, mono);
        assert_eq!(lines, vec!["the quick", "brown fox"]);
    }

    #[test]
    fn keeps_explicit_newlines() {
        let lines = wrap_text("world\n\nhello", 100.0, mono);
        assert_eq!(lines, vec!["world", "", "hello"]);
    }

    #[test]
    fn long_word_gets_own_line() {
        let lines = wrap_text("a supercalifragilistic b", 100.0, mono);
        assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
    }
}
