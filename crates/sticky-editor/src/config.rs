//! Board configuration.

use sticky_core::Surface;
use sticky_core::persist::DEFAULT_STORAGE_KEY;

/// Static settings a board is created with.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    /// Visible surface size, in CSS pixels.
    pub width: f32,
    pub height: f32,
    /// Fixed size of every note.
    pub note_width: f32,
    pub note_height: f32,
    /// Storage slot holding the serialized note list.
    pub storage_key: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            note_width: 220.0,
            note_height: 200.0,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl BoardConfig {
    /// Default settings on a surface of the given size.
    pub fn with_size(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn surface(&self) -> Surface {
        Surface::new(self.width, self.height, self.note_width, self.note_height)
    }
}
