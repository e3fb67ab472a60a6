//! Angular frequency grids over the unit circle

use std::f64::consts::PI;
use std::ops::Index;

use num_complex::Complex64;

use crate::{CoreError, Result};

/// Number of samples used when the caller does not choose one
pub const DEFAULT_SAMPLE_COUNT: usize = 1000;

/// Evenly spaced angular frequencies over `[-π, π]`, both endpoints included.
///
/// A single-sample grid holds only `-π`; there is no spacing to speak of in
/// that case and [`FrequencyGrid::spacing`] reports zero.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyGrid {
    omega: Vec<f64>,
}

impl FrequencyGrid {
    /// Build a grid of `sample_count` frequencies
    pub fn new(sample_count: usize) -> Result<Self> {
        if sample_count == 0 {
            return Err(CoreError::InvalidSampleCount {
                count: sample_count,
            });
        }

        Ok(Self {
            omega: linspace(-PI, PI, sample_count),
        })
    }

    /// Number of frequencies in the grid
    pub fn len(&self) -> usize {
        self.omega.len()
    }

    /// Grids are never empty; kept for API symmetry with slices
    pub fn is_empty(&self) -> bool {
        self.omega.is_empty()
    }

    /// Distance between neighbouring frequencies, `2π / (N - 1)`
    pub fn spacing(&self) -> f64 {
        if self.omega.len() < 2 {
            return 0.0;
        }
        2.0 * PI / (self.omega.len() - 1) as f64
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.omega
    }

    /// Points `e^(jω)` on the unit circle, index-aligned with the grid
    pub fn unit_circle_points(&self) -> impl Iterator<Item = Complex64> + '_ {
        self.omega.iter().map(|&w| Complex64::from_polar(1.0, w))
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.omega
    }
}

impl Index<usize> for FrequencyGrid {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.omega[index]
    }
}

/// Linear spacing with the last value pinned to `stop`
pub(crate) fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            let mut values: Vec<f64> = (0..count).map(|i| start + i as f64 * step).collect();
            values[count - 1] = stop;
            values
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_endpoints() {
        let grid = FrequencyGrid::new(DEFAULT_SAMPLE_COUNT).unwrap();
        assert_eq!(grid.len(), 1000);
        assert_eq!(grid[0], -PI);
        assert_eq!(grid[999], PI);
    }

    #[test]
    fn test_grid_uniform_spacing() {
        let grid = FrequencyGrid::new(9).unwrap();
        let step = grid.spacing();
        assert!((step - PI / 4.0).abs() < 1e-12);

        for pair in grid.as_slice().windows(2) {
            assert!((pair[1] - pair[0] - step).abs() < 1e-12);
        }
        assert!(grid[4].abs() < 1e-12);
    }

    #[test]
    fn test_zero_samples_rejected() {
        assert_eq!(
            FrequencyGrid::new(0),
            Err(CoreError::InvalidSampleCount { count: 0 })
        );
    }

    #[test]
    fn test_single_sample_grid() {
        let grid = FrequencyGrid::new(1).unwrap();
        assert_eq!(grid.as_slice(), &[-PI]);
        assert_eq!(grid.spacing(), 0.0);
    }

    #[test]
    fn test_unit_circle_points() {
        let grid = FrequencyGrid::new(5).unwrap();
        for (z, &w) in grid.unit_circle_points().zip(grid.as_slice()) {
            assert!((z.norm() - 1.0).abs() < 1e-12);
            assert!((z.arg().abs() - w.abs()).abs() < 1e-12);
        }
    }
}
