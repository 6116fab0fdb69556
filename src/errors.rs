//! Error types for the livingnotes crate.
//!
//! Only the typed `try_*` entry points and the command-line runner surface
//! these; the public parse helpers degrade to empty values instead.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for the livingnotes crate.
#[derive(Error, Debug)]
pub enum NotesError {
    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Note was not found when performing an operation.
    #[error("Note not found: {id}")]
    NoteNotFound { id: String },

    /// Stored text was valid JSON but not of the expected shape.
    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    /// Errors related to configuration.
    #[error("Configuration error in {path}: {message}")]
    ConfigError { path: PathBuf, message: String },
}
