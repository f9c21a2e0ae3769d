//! Error types for the shindig crates.

use thiserror::Error;

/// Errors that can occur in shindig operations.
#[derive(Error, Debug)]
pub enum ShindigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("No RSVP at index {0}")]
    InvalidIndex(usize),

    #[error("Could not decode image: {0}")]
    InvalidImage(String),

    #[error("Unsupported image extension: {0}")]
    UnsupportedExtension(String),
}

/// Result type alias for shindig operations.
pub type ShindigResult<T> = Result<T, ShindigError>;
