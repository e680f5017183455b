//! Error types for the futebol data layer

use crate::cli::types::EntityKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FutebolError>;

#[derive(Error, Debug)]
pub enum FutebolError {
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Duplicate {kind}: {key} already registered")]
    DuplicateKey { kind: EntityKind, key: String },

    #[error("Referenced {kind} {id} does not exist")]
    Reference { kind: EntityKind, id: u64 },

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),
}

impl FutebolError {
    pub(crate) fn validation(field: &str, message: impl Into<String>) -> Self {
        FutebolError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Whether the caller can report this outcome and carry on.
    ///
    /// Validation, duplicate-key and reference failures are expected results of
    /// user input; everything else is a storage or configuration failure.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FutebolError::Validation { .. }
                | FutebolError::DuplicateKey { .. }
                | FutebolError::Reference { .. }
        )
    }
}

#[cfg(test)]
mod tests;
