//! Plot view-model: everything a renderer needs to draw the z-plane and
//! the magnitude curve, as plain data.

use std::f64::consts::PI;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use zplane_core::model::PoleZeroModel;
use zplane_core::response::{clip, FrequencyResponse, DEFAULT_DB_CEILING, DEFAULT_DB_FLOOR};

use crate::state::MagnitudeScale;

/// Default number of vertices on the unit circle polyline
pub const UNIT_CIRCLE_POINTS: usize = 100;

/// Smallest half-width of the z-plane view
pub const MIN_AXIS_LIMIT: f64 = 1.5;

const AXIS_MARGIN: f64 = 0.5;

/// Marker shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Glyph {
    /// Poles
    Cross,
    /// Zeros, drawn hollow
    Ring,
}

/// A pole or zero marker in plot coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    pub glyph: Glyph,
}

/// Frequency axis tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub position: f64,
    pub label: &'static str,
}

/// Closed polyline over `[0, 2π]` on the unit circle
pub fn unit_circle(points: usize) -> Vec<(f64, f64)> {
    match points {
        0 => Vec::new(),
        1 => vec![(1.0, 0.0)],
        _ => {
            let step = 2.0 * PI / (points - 1) as f64;
            (0..points)
                .map(|i| {
                    let theta = i as f64 * step;
                    (theta.cos(), theta.sin())
                })
                .collect()
        }
    }
}

/// Symmetric axis limit that fits every root with some margin
pub fn axis_limit(model: &PoleZeroModel) -> f64 {
    let roots = model.poles.iter().chain(model.zeros.iter());
    let (max_x, max_y) = roots.fold((0.0_f64, 0.0_f64), |(x, y), r| {
        (x.max(r.re.abs()), y.max(r.im.abs()))
    });
    MIN_AXIS_LIMIT
        .max(max_x + AXIS_MARGIN)
        .max(max_y + AXIS_MARGIN)
}

/// Markers for every root, poles first
pub fn markers(model: &PoleZeroModel) -> Vec<Marker> {
    let marker = |glyph: Glyph| move |r: &Complex64| Marker { x: r.re, y: r.im, glyph };
    model
        .poles
        .iter()
        .map(marker(Glyph::Cross))
        .chain(model.zeros.iter().map(marker(Glyph::Ring)))
        .collect()
}

/// Ticks at multiples of π/4 over `[-π, π]`
pub fn frequency_ticks() -> Vec<Tick> {
    const LABELS: [&str; 9] = [
        "-π", "-3π/4", "-π/2", "-π/4", "0", "π/4", "π/2", "3π/4", "π",
    ];
    LABELS
        .iter()
        .enumerate()
        .map(|(i, &label)| Tick {
            position: -PI + i as f64 * PI / 4.0,
            label,
        })
        .collect()
}

/// Magnitude values to plot for the given scale; dB traces are clipped to
/// the default display range
pub fn magnitude_trace(response: &FrequencyResponse, scale: MagnitudeScale) -> Vec<f64> {
    match scale {
        MagnitudeScale::Linear => response.magnitude(),
        MagnitudeScale::Decibel => {
            response.magnitude_db_clipped(DEFAULT_DB_FLOOR, DEFAULT_DB_CEILING)
        }
    }
}

/// Vertical range of a trace, with fixed bounds in dB mode
pub fn trace_range(trace: &[f64], scale: MagnitudeScale) -> (f64, f64) {
    match scale {
        MagnitudeScale::Decibel => (DEFAULT_DB_FLOOR, DEFAULT_DB_CEILING),
        MagnitudeScale::Linear => {
            let top = trace
                .iter()
                .copied()
                .filter(|v| v.is_finite())
                .fold(0.0_f64, f64::max);
            (0.0, if top > 0.0 { top } else { 1.0 })
        }
    }
}

/// Clamp an already computed dB value to the default display range
pub fn clip_db(db: f64) -> f64 {
    clip(db, DEFAULT_DB_FLOOR, DEFAULT_DB_CEILING)
}
