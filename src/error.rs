//! Error types for dirflat

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while rendering or flattening a directory tree.
#[derive(Debug, Error)]
pub enum FlattenError {
    #[error("permission denied: {path}: {source}")]
    PermissionDenied { path: PathBuf, source: io::Error },

    #[error("source and destination are the same file: {path}")]
    SameFile { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl FlattenError {
    /// Recoverable errors are logged and traversal continues; everything
    /// else aborts the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FlattenError::PermissionDenied { .. } | FlattenError::SameFile { .. }
        )
    }

    /// Wrap an I/O error, tagging permission failures with the path that
    /// triggered them.
    pub fn from_io(err: io::Error, path: &std::path::Path) -> Self {
        if err.kind() == io::ErrorKind::PermissionDenied {
            FlattenError::PermissionDenied {
                path: path.to_path_buf(),
                source: err,
            }
        } else {
            FlattenError::Io(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, FlattenError>;
