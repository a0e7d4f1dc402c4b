//! Error types for the field catalogue

use thiserror::Error;

/// Result type for catalogue lookups
pub type Result<T> = std::result::Result<T, FieldsError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldsError {
    /// No catalogued shape carries this name
    #[error("Unknown shape: {0}")]
    UnknownShape(String),
}
