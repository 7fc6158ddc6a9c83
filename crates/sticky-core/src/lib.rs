pub mod export;
pub mod id;
pub mod layout;
pub mod model;
pub mod persist;
pub mod store;

pub use export::{ExportFile, export_all, export_one};
pub use id::NoteId;
pub use layout::Surface;
pub use model::*;
pub use persist::{MemoryStorage, NoteStorage, StorageError};
pub use store::{NoteMutation, NoteStore, merge_text};
