//! Built-in example filters

use std::f64::consts::PI;

use num_complex::Complex64;

use crate::model::PoleZeroModel;
use crate::{CoreError, Result};

/// A named example filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Zeros at ±j: notch at ω = ±π/2
    Notch,
    /// Poles at ±0.9j: resonant peaks at ω = ±π/2
    Resonator,
    /// Pole at 0.8, zero at -1
    Lowpass,
    /// Poles at 0.9·e^(±jπ/4), zeros at ±1
    Bandpass,
    /// Poles at 0.8·e^(±jπ/3), zeros at ±1 and ±j
    Multi,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::Notch,
        Preset::Resonator,
        Preset::Lowpass,
        Preset::Bandpass,
        Preset::Multi,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Notch => "notch",
            Preset::Resonator => "resonator",
            Preset::Lowpass => "lowpass",
            Preset::Bandpass => "bandpass",
            Preset::Multi => "multi",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Preset::Notch => "Notch at ±π/2 (zeros on the unit circle at ±j)",
            Preset::Resonator => "Resonant peak at ±π/2 (poles at ±0.9j)",
            Preset::Lowpass => "Low-pass (zero at -1, pole at 0.8)",
            Preset::Bandpass => "Band-pass (poles at 0.9·e^(±jπ/4), zeros at ±1)",
            Preset::Multi => "Poles at 0.8·e^(±jπ/3), zeros at ±1 and ±j",
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| CoreError::UnknownPreset {
                name: name.to_string(),
            })
    }

    pub fn model(&self) -> PoleZeroModel {
        let j = Complex64::i();
        let one = Complex64::new(1.0, 0.0);

        match self {
            Preset::Notch => PoleZeroModel::new(vec![], vec![j, -j]),
            Preset::Resonator => PoleZeroModel::new(vec![0.9 * j, -0.9 * j], vec![]),
            Preset::Lowpass => PoleZeroModel::new(vec![0.8 * one], vec![-one]),
            Preset::Bandpass => PoleZeroModel::new(
                vec![
                    Complex64::from_polar(0.9, PI / 4.0),
                    Complex64::from_polar(0.9, -PI / 4.0),
                ],
                vec![one, -one],
            ),
            Preset::Multi => PoleZeroModel::new(
                vec![
                    Complex64::from_polar(0.8, PI / 3.0),
                    Complex64::from_polar(0.8, -PI / 3.0),
                ],
                vec![one, -one, j, -j],
            ),
        }
    }
}
