// Free-text editor: opaque formatted markup edited through a host surface,
// with linear undo/redo history

pub mod editor;
pub mod format;
pub mod history;
pub mod image;
pub mod sanitize;
pub mod surface;

pub use editor::FreeTextEditor;
pub use format::FormatCommand;
pub use history::History;
pub use image::ImageUploader;
pub use sanitize::sanitize_markup;
pub use surface::{MarkupSurface, MemorySurface};
