//! Filter definitions stored as TOML

use anyhow::{Context, Result};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::path::Path;

use zplane_core::grid::DEFAULT_SAMPLE_COUNT;
use zplane_core::model::PoleZeroModel;
use zplane_core::presets::Preset;

/// Filter file contents.
///
/// Roots are written as `[re, im]` pairs. When `preset` is set, the listed
/// poles and zeros are appended to the preset's own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_count: Option<usize>,

    #[serde(default)]
    pub poles: Vec<Complex64>,

    #[serde(default)]
    pub zeros: Vec<Complex64>,
}

impl FilterConfig {
    /// Capture a model as a config
    pub fn from_model(model: &PoleZeroModel) -> Self {
        Self {
            poles: model.poles.clone(),
            zeros: model.zeros.clone(),
            ..Self::default()
        }
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read filter file: {:?}", path))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse filter file: {:?}", path))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Invalid filter definition")?;
        config.model()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize filter")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write filter file: {:?}", path))?;

        Ok(())
    }

    /// Build the pole/zero model this config describes
    pub fn model(&self) -> Result<PoleZeroModel> {
        let mut model = match &self.preset {
            Some(name) => Preset::from_name(name)?.model(),
            None => PoleZeroModel::identity(),
        };
        model.poles.extend_from_slice(&self.poles);
        model.zeros.extend_from_slice(&self.zeros);
        model.validate()?;
        Ok(model)
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count.unwrap_or(DEFAULT_SAMPLE_COUNT)
    }
}
