//! Error types for catalog loading.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that occur while loading a catalog resource.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading a resource file.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Parse error with file location context.
    #[error("{path}:{line}:{column}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// The same message id is defined twice in one resource.
    #[error("{path}: message '{id}' is defined more than once")]
    DuplicateMessage { path: PathBuf, id: String },

    /// Attempted to reload a bundle that was loaded from a string.
    #[error("cannot reload '{language}': was loaded from string, not file")]
    NoPathForReload { language: String },
}

/// Warnings produced when validating a translation against its source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadWarning {
    /// A message exists in the translation but not in the source.
    #[error("message '{id}' in '{language}' does not exist in the source catalog")]
    UnknownMessage { id: String, language: String },

    /// A message attribute exists in the translation but not on the source
    /// message.
    #[error("message '{id}' in '{language}' has attribute '.{attribute}' not present in the source")]
    UnknownAttribute {
        id: String,
        attribute: String,
        language: String,
    },
}
