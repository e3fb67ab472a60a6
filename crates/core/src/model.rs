//! Pole/zero description of a discrete-time LTI filter

use std::fmt;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::response::{evaluate, validate_roots, FrequencyResponse};
use crate::{CoreError, Result};

/// Which polynomial a root belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RootKind {
    /// Root of the denominator
    Pole,
    /// Root of the numerator
    Zero,
}

impl fmt::Display for RootKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootKind::Pole => write!(f, "pole"),
            RootKind::Zero => write!(f, "zero"),
        }
    }
}

/// Ordered poles and zeros of a transfer function.
///
/// Duplicates are repeated roots. Insertion order is preserved so that an
/// editor can address roots by index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoleZeroModel {
    #[serde(default)]
    pub poles: Vec<Complex64>,
    #[serde(default)]
    pub zeros: Vec<Complex64>,
}

impl PoleZeroModel {
    pub fn new(poles: Vec<Complex64>, zeros: Vec<Complex64>) -> Self {
        Self { poles, zeros }
    }

    /// The identity filter, `H(z) = 1`
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn roots(&self, kind: RootKind) -> &[Complex64] {
        match kind {
            RootKind::Pole => &self.poles,
            RootKind::Zero => &self.zeros,
        }
    }

    fn roots_mut(&mut self, kind: RootKind) -> &mut Vec<Complex64> {
        match kind {
            RootKind::Pole => &mut self.poles,
            RootKind::Zero => &mut self.zeros,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.poles.is_empty() && self.zeros.is_empty()
    }

    /// Append a root, returning its index
    pub fn push(&mut self, kind: RootKind, root: Complex64) -> usize {
        let roots = self.roots_mut(kind);
        roots.push(root);
        roots.len() - 1
    }

    /// Remove the root at `index`, shifting later roots down
    pub fn remove(&mut self, kind: RootKind, index: usize) -> Result<Complex64> {
        let roots = self.roots_mut(kind);
        if index >= roots.len() {
            return Err(CoreError::IndexOutOfRange {
                kind,
                index,
                len: roots.len(),
            });
        }
        Ok(roots.remove(index))
    }

    /// Move the root at `index` to a new position
    pub fn set(&mut self, kind: RootKind, index: usize, root: Complex64) -> Result<()> {
        let roots = self.roots_mut(kind);
        let len = roots.len();
        let slot = roots
            .get_mut(index)
            .ok_or(CoreError::IndexOutOfRange { kind, index, len })?;
        *slot = root;
        Ok(())
    }

    /// Index of the first root of `kind` strictly closer than `threshold` to `at`
    pub fn find_near(&self, kind: RootKind, at: Complex64, threshold: f64) -> Option<usize> {
        self.roots(kind)
            .iter()
            .position(|root| (root - at).norm() < threshold)
    }

    pub fn clear(&mut self) {
        self.poles.clear();
        self.zeros.clear();
    }

    /// Reject NaN or infinite coordinates
    pub fn validate(&self) -> Result<()> {
        validate_roots(RootKind::Pole, &self.poles)?;
        validate_roots(RootKind::Zero, &self.zeros)
    }

    /// Largest pole magnitude, or `None` without poles.
    ///
    /// Informational only: the evaluator accepts poles on or outside the
    /// unit circle.
    pub fn max_pole_radius(&self) -> Option<f64> {
        self.poles.iter().map(|p| p.norm()).reduce(f64::max)
    }

    /// True when every pole lies strictly inside the unit circle
    pub fn is_stable(&self) -> bool {
        self.poles.iter().all(|p| p.norm() < 1.0)
    }

    /// Evaluate the frequency response over `sample_count` frequencies
    pub fn frequency_response(&self, sample_count: usize) -> Result<FrequencyResponse> {
        evaluate(&self.poles, &self.zeros, sample_count)
    }
}
