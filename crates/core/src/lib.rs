//! zplane core - pole/zero filters and their frequency response
//!
//! This crate models a discrete-time LTI filter by the roots of its
//! transfer function and evaluates `H(e^(jω))` over `[-π, π]`.

pub mod analysis;
pub mod error;
pub mod grid;
pub mod model;
pub mod presets;
pub mod response;

pub use error::{CoreError, Result};
pub use num_complex::Complex64;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        analysis::{local_maxima, local_minima, Extremum, ResponseSummary},
        error::{CoreError, Result},
        grid::{FrequencyGrid, DEFAULT_SAMPLE_COUNT},
        model::{PoleZeroModel, RootKind},
        presets::Preset,
        response::{
            evaluate, evaluate_default, response_at, FrequencyResponse, DEFAULT_DB_CEILING,
            DEFAULT_DB_FLOOR,
        },
    };
    pub use num_complex::Complex64;
}
