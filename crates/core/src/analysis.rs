//! Peak/trough analysis over a computed frequency response

use serde::{Deserialize, Serialize};

use crate::response::FrequencyResponse;

/// A single magnitude extremum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extremum {
    pub index: usize,
    pub omega: f64,
    pub magnitude: f64,
}

/// Headline numbers for a frequency response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSummary {
    pub sample_count: usize,
    /// Largest finite magnitude
    pub peak: Option<Extremum>,
    /// Smallest finite magnitude
    pub trough: Option<Extremum>,
    pub non_finite: usize,
}

impl ResponseSummary {
    pub fn from_response(response: &FrequencyResponse) -> Self {
        let magnitude = response.magnitude();
        let w = response.frequencies();

        let mut peak: Option<Extremum> = None;
        let mut trough: Option<Extremum> = None;

        for (index, &m) in magnitude.iter().enumerate() {
            if !m.is_finite() {
                continue;
            }
            let here = Extremum {
                index,
                omega: w[index],
                magnitude: m,
            };
            if peak.map_or(true, |p| m > p.magnitude) {
                peak = Some(here);
            }
            if trough.map_or(true, |t| m < t.magnitude) {
                trough = Some(here);
            }
        }

        Self {
            sample_count: response.len(),
            peak,
            trough,
            non_finite: response.non_finite_count(),
        }
    }
}

/// Indices of interior samples strictly larger than both neighbours
pub fn local_maxima(magnitude: &[f64]) -> Vec<usize> {
    interior_extrema(magnitude, |centre, side| centre > side)
}

/// Indices of interior samples strictly smaller than both neighbours
pub fn local_minima(magnitude: &[f64]) -> Vec<usize> {
    interior_extrema(magnitude, |centre, side| centre < side)
}

fn interior_extrema(values: &[f64], beats: impl Fn(f64, f64) -> bool) -> Vec<usize> {
    values
        .windows(3)
        .enumerate()
        .filter(|(_, w)| {
            w.iter().all(|v| v.is_finite()) && beats(w[1], w[0]) && beats(w[1], w[2])
        })
        .map(|(i, _)| i + 1)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::evaluate;
    use num_complex::Complex64;
    use std::f64::consts::PI;

    #[test]
    fn test_local_extrema() {
        let values = [0.0, 2.0, 1.0, 1.0, 0.5, 3.0, f64::NAN, 1.0];
        assert_eq!(local_maxima(&values), vec![1]);
        assert_eq!(local_minima(&values), vec![4]);
        assert!(local_maxima(&[1.0, 2.0]).is_empty());
    }

    #[test]
    fn test_resonator_maxima() {
        let poles = [Complex64::new(0.0, 0.9), Complex64::new(0.0, -0.9)];
        let response = evaluate(&poles, &[], 1000).unwrap();
        let maxima = local_maxima(&response.magnitude());
        assert_eq!(maxima.len(), 2);
        for (idx, target) in maxima.iter().zip([-PI / 2.0, PI / 2.0]) {
            assert!((response.frequencies()[*idx] - target).abs() < 0.02);
        }
    }

    #[test]
    fn test_summary_skips_non_finite() {
        let response = evaluate(&[Complex64::new(1.0, 0.0)], &[], 3).unwrap();
        let summary = ResponseSummary::from_response(&response);
        assert_eq!(summary.sample_count, 3);
        assert_eq!(summary.non_finite, 1);

        let peak = summary.peak.unwrap();
        let trough = summary.trough.unwrap();
        assert!(peak.magnitude.is_finite());
        assert!((peak.magnitude - 0.5).abs() < 1e-12);
        assert!((trough.magnitude - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_identity_summary() {
        let response = evaluate(&[], &[], 10).unwrap();
        let summary = ResponseSummary::from_response(&response);
        assert_eq!(summary.peak.unwrap().index, 0);
        assert_eq!(summary.peak.unwrap().magnitude, 1.0);
        assert_eq!(summary.non_finite, 0);
    }
}
