//! Error types for zplane core

use num_complex::Complex64;
use thiserror::Error;

use crate::model::RootKind;

/// Core error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid sample count: {count} (must be at least 1)")]
    InvalidSampleCount { count: usize },

    #[error("Non-finite {kind} at index {index}: {value}")]
    NonFiniteRoot {
        kind: RootKind,
        index: usize,
        value: Complex64,
    },

    #[error("{kind} index {index} out of range (have {len})")]
    IndexOutOfRange {
        kind: RootKind,
        index: usize,
        len: usize,
    },

    #[error("Unknown preset: {name}")]
    UnknownPreset { name: String },
}

/// Result type for zplane core operations
pub type Result<T> = std::result::Result<T, CoreError>;
