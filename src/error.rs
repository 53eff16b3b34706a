// Error types shared by the block store, the free-text editor and the CLI

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result of a positional block operation
pub type EditResult<T = ()> = Result<T, EditError>;

/// Errors that can occur while mutating a block document.
///
/// Every variant is reported before any mutation happens, so a failed
/// operation leaves the document exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("block index {index} is out of range (document has {len} blocks)")]
    OutOfRange { index: usize, len: usize },
    #[error("list item {item} is out of range (list has {len} items)")]
    ListItemOutOfRange { item: usize, len: usize },
    #[error("block {index} is not a list")]
    NotAList { index: usize },
}

/// Recoverable errors reported by the free-text editor
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("failed to read image file '{}': {source}", .path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("'{}' is not an image file", .path.display())]
    NotAnImage { path: PathBuf },
}

/// Failure reported by an image upload collaborator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("image upload failed: {0}")]
pub struct UploadError(pub String);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file: {0}")]
    Io(#[from] io::Error),
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Top-level error used by the command line driver
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("failed to access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("terminal i/o failed: {0}")]
    Terminal(#[from] io::Error),
    #[error("invalid block document: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl FolioError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        FolioError::Io {
            path: path.into(),
            source,
        }
    }
}
