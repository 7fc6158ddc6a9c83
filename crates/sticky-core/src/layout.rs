//! Board surface geometry.
//!
//! Notes have one fixed size per board. Every committed position is clamped
//! so the whole note stays on the visible surface:
//! `0 <= x <= width - note_width` and `0 <= y <= height - note_height`.
//! When the surface is smaller than a note the range collapses to `0`.

use crate::model::{Note, NoteBounds, Position};
use rand::Rng;

/// Offset between successive notes placed by `cascade_position`.
const CASCADE_STEP: f32 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
    pub note_width: f32,
    pub note_height: f32,
}

impl Surface {
    pub fn new(width: f32, height: f32, note_width: f32, note_height: f32) -> Self {
        Self {
            width,
            height,
            note_width,
            note_height,
        }
    }

    /// Largest x a note may take.
    pub fn max_x(&self) -> f32 {
        (self.width - self.note_width).max(0.0)
    }

    /// Largest y a note may take.
    pub fn max_y(&self) -> f32 {
        (self.height - self.note_height).max(0.0)
    }

    pub fn clamp(&self, p: Position) -> Position {
        // NaN from a bogus pointer event collapses to the origin.
        let x = if p.x.is_nan() { 0.0 } else { p.x };
        let y = if p.y.is_nan() { 0.0 } else { p.y };
        Position {
            x: x.clamp(0.0, self.max_x()),
            y: y.clamp(0.0, self.max_y()),
        }
    }

    pub fn contains_position(&self, p: Position) -> bool {
        (0.0..=self.max_x()).contains(&p.x) && (0.0..=self.max_y()).contains(&p.y)
    }

    pub fn bounds_at(&self, p: Position) -> NoteBounds {
        NoteBounds {
            x: p.x,
            y: p.y,
            width: self.note_width,
            height: self.note_height,
        }
    }

    /// Bounds of a note at its stored position (origin if unplaced).
    pub fn bounds_of(&self, note: &Note) -> NoteBounds {
        self.bounds_at(note.position.unwrap_or_default())
    }

    /// Uniformly random position inside the clamp range.
    pub fn random_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        Position {
            x: rng.gen_range(0.0..=self.max_x()),
            y: rng.gen_range(0.0..=self.max_y()),
        }
    }

    /// Deterministic staircase placement for the `index`-th unplaced note,
    /// wrapping back to the top-left when it would leave the surface.
    pub fn cascade_position(&self, index: usize) -> Position {
        let offset = index as f32 * CASCADE_STEP;
        let span_x = self.max_x() + CASCADE_STEP;
        let span_y = self.max_y() + CASCADE_STEP;
        Position {
            x: offset % span_x,
            y: offset % span_y,
        }
        .clamped_by(self)
    }
}

impl Position {
    pub fn clamped_by(self, surface: &Surface) -> Position {
        surface.clamp(self)
    }
}
