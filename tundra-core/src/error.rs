//! Core error types for Tundra domain logic
//!
//! These errors represent domain-level lookups that callers asked for by
//! name or id. Mutating operations never error; they decline silently.

use thiserror::Error;

use crate::task::TaskId;

/// Core domain errors
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Task #{0} not found")]
    TaskNotFound(TaskId),

    #[error("Category '{0}' not found")]
    CategoryNotFound(String),

    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },
}

impl CoreError {
    /// Create a validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
