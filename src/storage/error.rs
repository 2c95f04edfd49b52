//! Error types for journey storage

use std::fmt;
use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A different journey already exists for the same collaborator and year
    #[error("Conflict: {0}")]
    Conflict(String),
}

impl StorageError {
    /// Create a serialization error
    pub fn serialization<E: fmt::Display>(err: E) -> Self {
        Self::Serialization(err.to_string())
    }

    /// Create a conflict error
    pub fn conflict<E: fmt::Display>(msg: E) -> Self {
        Self::Conflict(msg.to_string())
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_predicates() {
        assert!(StorageError::conflict("dup").is_conflict());
        assert!(!StorageError::serialization("bad").is_conflict());
    }

    #[test]
    fn test_json_errors_convert_to_serialization() {
        let err: StorageError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, StorageError::Serialization(_)));
        assert!(err.to_string().starts_with("Serialization error"));
    }
}
