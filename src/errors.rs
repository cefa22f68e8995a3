/*!
 * Error types for the beatsplit application.
 *
 * This module contains custom error types for the split/merge core and the
 * application layer, using the thiserror crate for ergonomic error definitions.
 */

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Kind of structural problem found while parsing a master document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedKind {
    /// Scene marker with no open act
    OrphanScene,
    /// Beat marker with no open scene
    OrphanBeat,
}

impl fmt::Display for MalformedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OrphanScene => write!(f, "scene marker outside of any act"),
            Self::OrphanBeat => write!(f, "beat marker outside of any scene"),
        }
    }
}

/// Errors that can occur while splitting or merging a master document
#[derive(Error, Debug)]
pub enum SplitError {
    /// The master document or split directory does not exist
    #[error("Input not found: {path:?}")]
    MissingInput {
        /// Path that was expected to exist
        path: PathBuf,
    },

    /// A marker appeared without its required parent (strict mode only)
    #[error("Malformed structure at line {line}: {kind}")]
    MalformedStructure {
        /// 1-based line number in the master document
        line: usize,
        /// What was wrong with the marker
        kind: MalformedKind,
    },

    /// An I/O operation on a specific path failed
    #[error("Filesystem error on {path:?}: {source}")]
    Filesystem {
        /// Path being read, written or removed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The split output directory would contain a file that must survive the split
    #[error("Output directory {output:?} contains {protected:?}, which a split would delete")]
    OutputContainsProtected {
        /// Requested output directory
        output: PathBuf,
        /// Master document or other file inside it
        protected: PathBuf,
    },

    /// The configuration cannot be used for a split or merge
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SplitError {
    /// Wrap an I/O error together with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the split/merge core
    #[error("Split error: {0}")]
    Split(#[from] SplitError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        Self::File(error.to_string())
    }
}
