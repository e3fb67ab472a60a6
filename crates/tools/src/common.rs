//! Common utilities for the command-line tool

use anyhow::{Context, Result};
use clap::ValueEnum;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use zplane_editor::state::MagnitudeScale;

/// Output format for response samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable summary only
    #[default]
    Table,
    /// One row per frequency sample
    Csv,
    /// Full response as a JSON document
    Json,
}

/// Magnitude scale selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleArg {
    #[default]
    Linear,
    Db,
}

impl From<ScaleArg> for MagnitudeScale {
    fn from(arg: ScaleArg) -> Self {
        match arg {
            ScaleArg::Linear => MagnitudeScale::Linear,
            ScaleArg::Db => MagnitudeScale::Decibel,
        }
    }
}

/// Parse a complex literal.
///
/// Accepted forms: `0.5`, `0.9j`, `-j`, `0.5+0.5j`, `0.5-0.5i` and polar
/// `0.8@60` (magnitude, angle in degrees).
pub fn parse_complex(input: &str) -> Result<Complex64> {
    let s: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if s.is_empty() {
        anyhow::bail!("Empty complex number");
    }

    let value = if let Some((radius, degrees)) = s.split_once('@') {
        let radius = parse_part(radius, input)?;
        let degrees = parse_part(degrees, input)?;
        Complex64::from_polar(radius, degrees.to_radians())
    } else if let Some(body) = s.strip_suffix(['j', 'i']) {
        match split_real_imag(body) {
            Some(split) => {
                let (re, im) = body.split_at(split);
                Complex64::new(parse_part(re, input)?, parse_imag(im, input)?)
            }
            None => Complex64::new(0.0, parse_imag(body, input)?),
        }
    } else {
        Complex64::new(parse_part(&s, input)?, 0.0)
    };

    if !value.is_finite() {
        anyhow::bail!("Complex number must be finite: {}", input);
    }
    Ok(value)
}

/// Position of the sign separating real and imaginary parts, skipping a
/// leading sign and exponent signs
fn split_real_imag(body: &str) -> Option<usize> {
    let bytes = body.as_bytes();
    (1..bytes.len())
        .rev()
        .find(|&i| matches!(bytes[i], b'+' | b'-') && !matches!(bytes[i - 1], b'e' | b'E'))
}

fn parse_imag(part: &str, input: &str) -> Result<f64> {
    match part {
        "" | "+" => Ok(1.0),
        "-" => Ok(-1.0),
        _ => parse_part(part, input),
    }
}

fn parse_part(part: &str, input: &str) -> Result<f64> {
    part.parse::<f64>()
        .with_context(|| format!("Invalid complex number: {}", input))
}

/// Format a complex value as `a+bj`
pub fn format_complex(value: Complex64) -> String {
    if value.im < 0.0 || (value.im == 0.0 && value.im.is_sign_negative()) {
        format!("{:.4}-{:.4}j", value.re, -value.im)
    } else {
        format!("{:.4}+{:.4}j", value.re, value.im)
    }
}

/// Initialize logging: `--debug` for DEBUG, `--verbose` for INFO, else WARN
pub fn init_logging(verbose: bool, debug: bool) {
    let log_level = if debug {
        tracing::Level::DEBUG
    } else if verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();
}
