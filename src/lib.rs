// Library exports for folio

pub mod blocks;
pub mod config;
pub mod error;
pub mod freetext;

pub use config::EditorConfig;
pub use error::{EditError, EditResult, EditorError};
