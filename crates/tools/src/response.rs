//! Frequency response evaluation and reporting

use anyhow::{Context, Result};
use clap::Parser;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

use zplane_core::analysis::ResponseSummary;
use zplane_core::model::PoleZeroModel;
use zplane_core::presets::Preset;
use zplane_core::response::FrequencyResponse;
use zplane_editor::state::MagnitudeScale;
use zplane_editor::view::magnitude_trace;

use crate::common::{format_complex, parse_complex, OutputFormat, ScaleArg};
use crate::config::FilterConfig;

/// Response evaluation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(about = "Evaluate the frequency response of a pole/zero filter")]
pub struct ResponseConfig {
    /// Pole location, e.g. 0.9j, 0.5-0.5j or 0.8@60 (repeatable)
    #[arg(short, long = "pole", value_parser = parse_complex, allow_hyphen_values = true)]
    pub poles: Vec<Complex64>,

    /// Zero location (repeatable)
    #[arg(short, long = "zero", value_parser = parse_complex, allow_hyphen_values = true)]
    pub zeros: Vec<Complex64>,

    /// Start from a built-in filter
    #[arg(long)]
    pub preset: Option<String>,

    /// Filter definition file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of frequency samples over [-π, π]
    #[arg(short = 'n', long)]
    pub samples: Option<usize>,

    /// Magnitude scale
    #[arg(long, value_enum, default_value = "linear")]
    pub scale: ScaleArg,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Draw the magnitude curve in the terminal
    #[arg(long)]
    pub plot: bool,
}

/// Evaluates the filter described by a [`ResponseConfig`]
pub struct ResponseTool {
    config: ResponseConfig,
}

impl ResponseTool {
    pub fn new(config: ResponseConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResponseConfig {
        &self.config
    }

    /// Combine the config file, preset and command-line roots into one
    /// filter, in that order
    pub fn resolve_filter(&self) -> Result<(PoleZeroModel, usize)> {
        let file = match &self.config.config {
            Some(path) => FilterConfig::from_file(path)?,
            None => FilterConfig::default(),
        };

        let mut model = file.model()?;
        if let Some(name) = &self.config.preset {
            let preset = Preset::from_name(name)?.model();
            model.poles.extend(preset.poles);
            model.zeros.extend(preset.zeros);
        }
        model.poles.extend_from_slice(&self.config.poles);
        model.zeros.extend_from_slice(&self.config.zeros);

        let sample_count = self.config.samples.unwrap_or_else(|| file.sample_count());
        debug!(
            poles = model.poles.len(),
            zeros = model.zeros.len(),
            sample_count,
            "resolved filter"
        );
        Ok((model, sample_count))
    }

    pub fn run(&self) -> Result<ResponseReport> {
        let (model, sample_count) = self.resolve_filter()?;
        let response = model
            .frequency_response(sample_count)
            .context("Failed to evaluate frequency response")?;
        let summary = ResponseSummary::from_response(&response);
        info!("Evaluated {} samples", response.len());

        Ok(ResponseReport {
            model,
            response,
            summary,
        })
    }
}

/// Everything produced by one evaluation
#[derive(Debug, Clone)]
pub struct ResponseReport {
    pub model: PoleZeroModel,
    pub response: FrequencyResponse,
    pub summary: ResponseSummary,
}

/// JSON layout of a full response.
///
/// JSON has no NaN or infinity, so samples that land on a pole are written
/// as `null`; `non_finite` counts them.
#[derive(Debug, Serialize)]
struct ResponseDocument<'a> {
    sample_count: usize,
    non_finite: usize,
    poles: &'a [Complex64],
    zeros: &'a [Complex64],
    frequencies: &'a [f64],
    response: &'a [Complex64],
    magnitude: Vec<f64>,
    scale: MagnitudeScale,
}

impl ResponseReport {
    /// Render the response in `format`; the table format is the summary alone
    pub fn render(&self, format: OutputFormat, scale: MagnitudeScale) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(self.summary_text()),
            OutputFormat::Csv => Ok(self.to_csv(scale)),
            OutputFormat::Json => {
                let document = ResponseDocument {
                    sample_count: self.response.len(),
                    non_finite: self.summary.non_finite,
                    poles: &self.model.poles,
                    zeros: &self.model.zeros,
                    frequencies: self.response.frequencies(),
                    response: self.response.values(),
                    magnitude: magnitude_trace(&self.response, scale),
                    scale,
                };
                serde_json::to_string_pretty(&document).context("Failed to serialize response")
            }
        }
    }

    fn to_csv(&self, scale: MagnitudeScale) -> String {
        let column = match scale {
            MagnitudeScale::Linear => "magnitude",
            MagnitudeScale::Decibel => "magnitude_db",
        };
        let trace = magnitude_trace(&self.response, scale);

        let mut out = format!("omega,re,im,{}\n", column);
        for ((w, h), m) in self.response.iter().zip(trace) {
            out.push_str(&format!("{},{},{},{}\n", w, h.re, h.im, m));
        }
        out
    }

    pub fn summary_text(&self) -> String {
        let list = |roots: &[Complex64]| -> String {
            if roots.is_empty() {
                "none".to_string()
            } else {
                roots.iter().map(|r| format_complex(*r)).collect::<Vec<_>>().join(", ")
            }
        };

        let mut lines = vec![
            format!("Poles:       {}", list(&self.model.poles)),
            format!("Zeros:       {}", list(&self.model.zeros)),
            format!("Samples:     {}", self.summary.sample_count),
        ];
        if let Some(peak) = self.summary.peak {
            lines.push(format!(
                "Peak:        |H| = {:.4} ({:.2} dB) at ω = {:.4}",
                peak.magnitude,
                zplane_core::response::to_db(peak.magnitude),
                peak.omega
            ));
        }
        if let Some(trough) = self.summary.trough {
            lines.push(format!(
                "Minimum:     |H| = {:.4e} at ω = {:.4}",
                trough.magnitude, trough.omega
            ));
        }
        lines.push(format!("Non-finite:  {}", self.summary.non_finite));
        lines.push(match self.model.max_pole_radius() {
            Some(radius) => format!("Pole radius: {:.4} (max)", radius),
            None => "Pole radius: n/a".to_string(),
        });

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn config() -> ResponseConfig {
        ResponseConfig::default()
    }

    #[test]
    fn test_cli_arguments() {
        let config = ResponseConfig::try_parse_from([
            "response", "--pole", "0.9j", "--pole", "-0.9j", "--zero", "-1", "-n", "64", "--scale",
            "db",
        ])
        .unwrap();
        assert_eq!(config.poles, vec![Complex64::new(0.0, 0.9), Complex64::new(0.0, -0.9)]);
        assert_eq!(config.zeros, vec![Complex64::new(-1.0, 0.0)]);
        assert_eq!(config.samples, Some(64));
        assert_eq!(config.scale, ScaleArg::Db);
        assert_eq!(config.format, OutputFormat::Table);

        assert!(ResponseConfig::try_parse_from(["response", "--pole", "zz"]).is_err());
    }

    #[test]
    fn test_identity_by_default() {
        let report = ResponseTool::new(config()).run().unwrap();
        assert!(report.model.is_empty());
        assert_eq!(report.response.len(), 1000);
        assert_eq!(report.summary.peak.unwrap().magnitude, 1.0);
    }

    #[test]
    fn test_preset_and_extra_roots() {
        let tool = ResponseTool::new(ResponseConfig {
            preset: Some("lowpass".to_string()),
            zeros: vec![Complex64::new(0.0, 1.0)],
            samples: Some(32),
            ..config()
        });
        let (model, samples) = tool.resolve_filter().unwrap();
        assert_eq!(samples, 32);
        assert_eq!(model.poles, vec![Complex64::new(0.8, 0.0)]);
        assert_eq!(model.zeros, vec![Complex64::new(-1.0, 0.0), Complex64::new(0.0, 1.0)]);
    }

    #[test]
    fn test_sample_count_from_file() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "sample_count = 17\npoles = [[0.5, 0.0]]\n").unwrap();

        let tool = ResponseTool::new(ResponseConfig {
            config: Some(file.path().to_path_buf()),
            ..config()
        });
        let report = tool.run().unwrap();
        assert_eq!(report.response.len(), 17);
        assert_eq!(report.model.poles.len(), 1);
    }

    #[test]
    fn test_invalid_sample_count() {
        let tool = ResponseTool::new(ResponseConfig {
            samples: Some(0),
            ..config()
        });
        assert!(tool.run().is_err());
    }

    #[test]
    fn test_csv_output() {
        let tool = ResponseTool::new(ResponseConfig {
            preset: Some("multi".to_string()),
            samples: Some(5),
            ..config()
        });
        let report = tool.run().unwrap();
        let csv = report.render(OutputFormat::Csv, MagnitudeScale::Decibel).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "omega,re,im,magnitude_db");
        // |H(e^(-jπ))| sits on the zero at -1 and clips to the floor
        assert!(lines[1].ends_with(",-60"));
    }

    #[test]
    fn test_json_output() {
        let tool = ResponseTool::new(ResponseConfig {
            preset: Some("notch".to_string()),
            samples: Some(8),
            ..config()
        });
        let report = tool.run().unwrap();
        let json = report.render(OutputFormat::Json, MagnitudeScale::Linear).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["sample_count"], 8);
        assert_eq!(value["frequencies"].as_array().unwrap().len(), 8);
        assert_eq!(value["zeros"].as_array().unwrap().len(), 2);
        assert_eq!(value["scale"], "linear");
        assert_eq!(value["non_finite"], 0);
    }

    #[test]
    fn test_json_marks_singular_samples() {
        // The middle of three samples is ω = 0, exactly on the pole at 1
        let tool = ResponseTool::new(ResponseConfig {
            poles: vec![Complex64::new(1.0, 0.0)],
            samples: Some(3),
            ..config()
        });
        let report = tool.run().unwrap();
        assert_eq!(report.summary.non_finite, 1);

        let json = report.render(OutputFormat::Json, MagnitudeScale::Linear).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["non_finite"], 1);
        assert!(value["magnitude"][1].is_null());
        assert!(value["magnitude"][0].is_number());
    }

    #[test]
    fn test_summary_text() {
        let tool = ResponseTool::new(ResponseConfig {
            preset: Some("resonator".to_string()),
            ..config()
        });
        let text = tool.run().unwrap().summary_text();
        assert!(text.contains("Samples:     1000"));
        assert!(text.contains("Pole radius: 0.9000 (max)"));
        assert!(text.contains("Zeros:       none"));
    }
}
