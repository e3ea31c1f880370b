//! Error types for gsheet-object-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding column letters or range addresses
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Column letters contain a non-letter or overflow the column index
    #[error("Invalid column letters: {0}")]
    InvalidColumn(String),

    /// Range address could not be parsed
    #[error("Invalid range: {0}")]
    InvalidRange(String),
}
