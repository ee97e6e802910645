// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for dirkit

use std::io;
use thiserror::Error;

/// Result type alias
pub type DirkitResult<T> = Result<T, DirkitError>;

/// Main error type
#[derive(Error, Debug)]
pub enum DirkitError {
    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Directory not empty: {0}")]
    NotEmpty(String),

    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Failure category, for callers that only need to branch on the kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    NotEmpty,
    IoFailure,
}

impl DirkitError {
    pub fn io(path: impl Into<String>, source: io::Error) -> Self {
        DirkitError::Io { path: path.into(), source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DirkitError::NotFound(_) => ErrorKind::NotFound,
            DirkitError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            DirkitError::NotEmpty(_) => ErrorKind::NotEmpty,
            DirkitError::Io { .. } => ErrorKind::IoFailure,
        }
    }

    /// The path the failing operation was acting on
    pub fn path(&self) -> &str {
        match self {
            DirkitError::NotFound(path)
            | DirkitError::AlreadyExists(path)
            | DirkitError::NotEmpty(path)
            | DirkitError::Io { path, .. } => path,
        }
    }
}
