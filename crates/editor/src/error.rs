//! Error types for the zplane editor

use thiserror::Error;

/// Editor error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Core error: {0}")]
    Core(#[from] zplane_core::CoreError),
}

/// Result type for editor operations
pub type Result<T> = std::result::Result<T, EditorError>;
