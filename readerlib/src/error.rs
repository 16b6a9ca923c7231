//! Error types for readerlib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, organizing or writing text units
#[derive(Error, Debug)]
pub enum ReaderError {
    /// Constructor input that is not a usable path
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Failed to open or read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write a unit's output
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// Path exists but is not a directory
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Named member absent from a collection or library
    #[error("no {kind} named '{name}' in '{owner}'")]
    MemberNotFound {
        kind: &'static str,
        name: String,
        owner: String,
    },

    /// Wrong kind of entry where a file was expected
    #[error("type mismatch for '{path}': expected {expected}, found {found}")]
    TypeMismatch {
        path: PathBuf,
        expected: &'static str,
        found: &'static str,
    },

    /// Invalid extension filter
    #[error("invalid extension filter '{0}'")]
    InvalidFilter(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of a [`ReaderError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    TypeMismatch,
    Io,
}

impl ReaderError {
    /// The taxonomy bucket this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReaderError::InvalidArgument(_) | ReaderError::InvalidFilter(_) => {
                ErrorKind::InvalidArgument
            }
            ReaderError::FileRead { .. }
            | ReaderError::PathNotFound(_)
            | ReaderError::NotADirectory(_)
            | ReaderError::MemberNotFound { .. } => ErrorKind::NotFound,
            ReaderError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            ReaderError::FileWrite { .. } | ReaderError::Io(_) => ErrorKind::Io,
        }
    }

    /// True for every error in the NotFound bucket.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}
