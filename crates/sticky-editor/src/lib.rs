pub mod board;
pub mod config;
pub mod drag;
pub mod hit;
pub mod input;

pub use board::NotesBoard;
pub use config::BoardConfig;
pub use input::{InputEvent, Modifiers};
