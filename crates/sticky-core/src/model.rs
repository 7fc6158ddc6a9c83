//! Core data model for sticky notes.
//!
//! A board is an ordered list of `Note`s. In the free-position board the
//! order is the paint order: later notes draw on top and win hit tests.
//! Each note carries its own `Position`; `NoteBounds` is the rectangle a
//! note occupies once the surface's fixed note size is applied.

use crate::id::NoteId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ─── Colors ──────────────────────────────────────────────────────────────

/// Opaque RGB note color.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// The fixed palette offered by the color picker, in display order.
pub const PALETTE: [Color; 4] = [
    Color::rgb(0xFF, 0x57, 0x33),
    Color::rgb(0x33, 0xFF, 0x57),
    Color::rgb(0x33, 0x57, 0xFF),
    Color::rgb(0xF1, 0xC4, 0x0F),
];

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RGB` or `#RRGGBB`. The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        match bytes.len() {
            3 => {
                let r = hex_val(bytes[0])?;
                let g = hex_val(bytes[1])?;
                let b = hex_val(bytes[2])?;
                Some(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 => {
                let r = hex_val(bytes[0])? << 4 | hex_val(bytes[1])?;
                let g = hex_val(bytes[2])? << 4 | hex_val(bytes[3])?;
                let b = hex_val(bytes[4])? << 4 | hex_val(bytes[5])?;
                Some(Self::rgb(r, g, b))
            }
            _ => None,
        }
    }

    /// Parse a hex string and accept it only if it names a palette entry.
    pub fn from_palette_hex(hex: &str) -> Option<Self> {
        Self::from_hex(hex).filter(Color::is_in_palette)
    }

    pub fn is_in_palette(&self) -> bool {
        PALETTE.contains(self)
    }

    /// Emit as `#RRGGBB`, upper-case.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Perceived luminance in `0.0..=1.0` (sRGB weights).
    pub fn luminance(&self) -> f32 {
        (0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32) / 255.0
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_palette_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("`{s}` is not a palette color")))
    }
}

// ─── Geometry ────────────────────────────────────────────────────────────

/// Top-left corner of a note on the board surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle occupied by a note.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NoteBounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl NoteBounds {
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    /// AABB overlap with a non-zero intersection on both axes.
    /// Rectangles that only share an edge do not overlap.
    pub fn intersects(&self, other: &NoteBounds) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

// ─── Note ────────────────────────────────────────────────────────────────

/// A single sticky note.
///
/// Field names on the wire match the saved data of the original widget
/// (`textArea`, `isDone`, `isEditing`), so existing storage keeps loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    #[serde(rename = "textArea", default)]
    pub text: String,
    pub color: Color,
    #[serde(rename = "isDone", default)]
    pub done: bool,
    #[serde(rename = "isEditing", default)]
    pub editing: bool,
    /// Absent in data saved by list-ordered boards; placed on load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Note {
    /// A freshly created note: empty, open for editing.
    pub fn new(id: NoteId, color: Color, position: Position) -> Self {
        Self {
            id,
            text: String::new(),
            color,
            done: false,
            editing: true,
            position: Some(position),
        }
    }

    /// Text with surrounding whitespace removed, or `None` when nothing is left.
    pub fn trimmed_text(&self) -> Option<&str> {
        let t = self.text.trim();
        (!t.is_empty()).then_some(t)
    }
}
