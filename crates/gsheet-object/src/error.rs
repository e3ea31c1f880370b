//! Error types for the sheet accessor.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Sheet {0} not found")]
    NotFound(String),

    #[error("You must call init before {0}")]
    Uninitialized(&'static str),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Field {0} not found in header row")]
    FieldNotFound(String),

    #[error("Invalid row number {0}: data rows start at 1")]
    InvalidRow(usize),

    #[error(transparent)]
    Core(#[from] gsheet_object_core::Error),
}

impl SheetError {
    /// Wrap a collaborator failure without interpreting it
    pub fn transport<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        SheetError::Transport(err.into())
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;
