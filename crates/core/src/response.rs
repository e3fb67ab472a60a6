//! Transfer function evaluation on the unit circle
//!
//! A filter with zeros `z_k` and poles `p_k` has
//! `H(z) = Π(z - z_k) / Π(z - p_k)`. Factoring `z^Z / z^P` out of the two
//! products gives `H(z) = Π(1 - z_k/z) / Π(1 - p_k/z)` up to a pure delay,
//! and every factor of that form stays close to unit magnitude for roots
//! near the unit circle. All evaluation in this module uses that form.

use num_complex::Complex64;

use crate::grid::{FrequencyGrid, DEFAULT_SAMPLE_COUNT};
use crate::model::RootKind;
use crate::{CoreError, Result};

/// Default display range for log-magnitude traces, in dB
pub const DEFAULT_DB_FLOOR: f64 = -60.0;
pub const DEFAULT_DB_CEILING: f64 = 30.0;

const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Complex response samples, index-aligned with their frequency grid
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyResponse {
    grid: FrequencyGrid,
    values: Vec<Complex64>,
}

impl FrequencyResponse {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn grid(&self) -> &FrequencyGrid {
        &self.grid
    }

    /// Angular frequencies in rad/sample
    pub fn frequencies(&self) -> &[f64] {
        self.grid.as_slice()
    }

    pub fn values(&self) -> &[Complex64] {
        &self.values
    }

    /// `(ω, H(e^(jω)))` pairs in grid order
    pub fn iter(&self) -> impl Iterator<Item = (f64, Complex64)> + '_ {
        self.grid
            .as_slice()
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// Linear magnitude `|H|`
    pub fn magnitude(&self) -> Vec<f64> {
        self.values.iter().map(|h| h.norm()).collect()
    }

    /// Log magnitude `20·log10|H|`; zeros on the circle give `-inf`
    pub fn magnitude_db(&self) -> Vec<f64> {
        self.values.iter().map(|h| to_db(h.norm())).collect()
    }

    /// Log magnitude clamped to `[floor, ceiling]`.
    ///
    /// Undefined samples (NaN) are reported at the floor so that a trace can
    /// always be drawn.
    pub fn magnitude_db_clipped(&self, floor: f64, ceiling: f64) -> Vec<f64> {
        self.values
            .iter()
            .map(|h| clip(to_db(h.norm()), floor, ceiling))
            .collect()
    }

    /// Phase angle in radians, `(-π, π]`
    pub fn phase(&self) -> Vec<f64> {
        self.values.iter().map(|h| h.arg()).collect()
    }

    /// Samples that are NaN or infinite, i.e. frequencies sitting on a pole
    pub fn non_finite_count(&self) -> usize {
        self.values.iter().filter(|h| !h.is_finite()).count()
    }

    pub fn into_parts(self) -> (Vec<f64>, Vec<Complex64>) {
        (self.grid.into_vec(), self.values)
    }
}

/// Evaluate `H(e^(jω))` for `sample_count` frequencies spanning `[-π, π]`.
///
/// Empty `poles` or `zeros` contribute a constant 1. Non-finite roots and a
/// zero sample count are rejected; a frequency that lands exactly on a pole
/// yields a non-finite sample instead of an error.
///
/// With `sample_count == 1` the grid degenerates to the single frequency `-π`.
pub fn evaluate(
    poles: &[Complex64],
    zeros: &[Complex64],
    sample_count: usize,
) -> Result<FrequencyResponse> {
    validate_roots(RootKind::Pole, poles)?;
    validate_roots(RootKind::Zero, zeros)?;

    let grid = FrequencyGrid::new(sample_count)?;
    let values = grid
        .unit_circle_points()
        .map(|z| transfer_at(poles, zeros, z))
        .collect();

    Ok(FrequencyResponse { grid, values })
}

/// [`evaluate`] with the default of 1000 samples
pub fn evaluate_default(poles: &[Complex64], zeros: &[Complex64]) -> Result<FrequencyResponse> {
    evaluate(poles, zeros, DEFAULT_SAMPLE_COUNT)
}

/// Response at a single angular frequency `omega`
pub fn response_at(poles: &[Complex64], zeros: &[Complex64], omega: f64) -> Result<Complex64> {
    validate_roots(RootKind::Pole, poles)?;
    validate_roots(RootKind::Zero, zeros)?;

    Ok(transfer_at(poles, zeros, Complex64::from_polar(1.0, omega)))
}

fn transfer_at(poles: &[Complex64], zeros: &[Complex64], z: Complex64) -> Complex64 {
    let z_inv = z.inv();
    let numerator = factor_product(zeros, z_inv);
    let denominator = factor_product(poles, z_inv);
    numerator / denominator
}

/// `Π(1 - root/z)`, multiplied in root order
fn factor_product(roots: &[Complex64], z_inv: Complex64) -> Complex64 {
    roots
        .iter()
        .fold(ONE, |acc, &root| acc * (ONE - root * z_inv))
}

pub(crate) fn validate_roots(kind: RootKind, roots: &[Complex64]) -> Result<()> {
    match roots.iter().position(|r| !r.is_finite()) {
        Some(index) => Err(CoreError::NonFiniteRoot {
            kind,
            index,
            value: roots[index],
        }),
        None => Ok(()),
    }
}

/// Convert a linear magnitude to decibels
pub fn to_db(magnitude: f64) -> f64 {
    20.0 * magnitude.log10()
}

/// Clamp a dB value for display, sending NaN to `floor`
pub fn clip(db: f64, floor: f64, ceiling: f64) -> f64 {
    if db.is_nan() {
        floor
    } else {
        db.clamp(floor, ceiling)
    }
}
