//! Error types for the notes backend

use thiserror::Error;

/// Failures of the flat-file note store
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Notes file is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),

    #[error("Failed to serialize notes: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to write notes file: {0}")]
    Write(#[from] std::io::Error),
}

/// Failures of the append path
#[derive(Error, Debug)]
pub enum NoteError {
    #[error("Invalid note: {0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Failed to hash password: {0}")]
    Hashing(String),

    #[error("Malformed password hash: {0}")]
    MalformedHash(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a valid number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("{name} must not be empty")]
    Empty { name: &'static str },
}
