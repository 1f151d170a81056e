//! Error types for directory operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by [`Directory`](crate::Directory) operations.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// A position outside `[0, len)` was passed to `get` or `remove_by_index`.
    #[error("index {index} is out of range for a directory of {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    /// Load was requested for a path that does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Save was requested for a path that is an existing directory.
    #[error("{} is a directory", .0.display())]
    IsADirectory(PathBuf),

    /// An underlying open, read, write or flush failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A persisted line did not split into exactly five fields.
    #[error(
        "malformed record on line {line}: expected {} fields, found {fields}",
        crate::format::FIELD_COUNT
    )]
    MalformedRecord { line: usize, fields: usize },
}

impl DirectoryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DirectoryError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for directory operations.
pub type Result<T> = std::result::Result<T, DirectoryError>;
