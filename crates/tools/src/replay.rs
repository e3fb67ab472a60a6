//! Replay recorded editor sessions

use anyhow::{Context, Result};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use zplane_core::analysis::ResponseSummary;
use zplane_editor::editor::Editor;
use zplane_editor::event::{Cursor, EventKind, MouseButton};
use zplane_editor::state::MagnitudeScale;

use crate::config::FilterConfig;
use crate::response::ResponseReport;

/// One recorded input event.
///
/// A missing `at` means the pointer was outside the plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedEvent {
    pub kind: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<Complex64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button: Option<MouseButton>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<char>,
}

impl RecordedEvent {
    pub fn cursor(&self) -> Cursor {
        Cursor {
            position: self.at,
            button: self.button,
            key: self.key,
        }
    }
}

/// A starting filter plus the events applied to it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub events: Vec<RecordedEvent>,
}

impl ReplayScript {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read replay script: {:?}", path))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse replay script: {:?}", path))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid replay script")
    }
}

/// Final state of a replayed session
#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    pub report: ResponseReport,
    pub scale: MagnitudeScale,
    /// Events that changed the editor state
    pub applied: usize,
}

/// Run every event of `script` through a fresh editor
pub fn replay(script: &ReplayScript) -> Result<ReplayOutcome> {
    let model = script.filter.model()?;
    let mut editor = Editor::new(model, script.filter.sample_count())?;
    info!("Replaying {} events", script.events.len());

    let mut applied = 0;
    for (i, event) in script.events.iter().enumerate() {
        let changed = editor
            .handle(event.kind, &event.cursor())
            .with_context(|| format!("Event {} ({:?}) failed", i, event.kind))?;
        if changed {
            applied += 1;
        } else {
            debug!("Event {} ({:?}) had no effect", i, event.kind);
        }
    }

    let response = editor.response().clone();
    let summary = ResponseSummary::from_response(&response);
    Ok(ReplayOutcome {
        report: ResponseReport {
            model: editor.model().clone(),
            response,
            summary,
        },
        scale: editor.scale(),
        applied,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    const SCRIPT: &str = r#"
[filter]
preset = "lowpass"
sample_count = 64

[[events]]
kind = "press"
at = [0.25, 0.5]
button = "primary"

[[events]]
kind = "press"
at = [0.8, 0.0]
button = "primary"

[[events]]
kind = "release"
at = [0.81, 0.0]

[[events]]
kind = "press"
at = [0.5, 0.5]
button = "secondary"

[[events]]
kind = "motion"

[[events]]
kind = "key"
key = "l"
"#;

    #[test]
    fn test_replay_script() {
        let script = ReplayScript::from_toml(SCRIPT).unwrap();
        assert_eq!(script.events.len(), 6);
        assert_eq!(script.events[4].at, None);

        let outcome = replay(&script).unwrap();
        // pole added, pole 0.8 picked and removed, zero added, key toggled
        assert_eq!(outcome.applied, 5);
        assert_eq!(outcome.scale, MagnitudeScale::Decibel);
        assert_eq!(outcome.report.model.poles, vec![Complex64::new(0.25, 0.5)]);
        assert_eq!(
            outcome.report.model.zeros,
            vec![Complex64::new(-1.0, 0.0), Complex64::new(0.5, 0.5)]
        );
        assert_eq!(outcome.report.response.len(), 64);
    }

    #[test]
    fn test_script_from_file() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), SCRIPT).unwrap();
        let script = ReplayScript::from_file(file.path()).unwrap();
        assert_eq!(script.filter.preset.as_deref(), Some("lowpass"));
    }

    #[test]
    fn test_empty_script() {
        let outcome = replay(&ReplayScript::default()).unwrap();
        assert_eq!(outcome.applied, 0);
        assert!(outcome.report.model.is_empty());
        assert_eq!(outcome.report.response.len(), 1000);
    }

    #[test]
    fn test_bad_event_kind() {
        assert!(ReplayScript::from_toml("[[events]]\nkind = \"scroll\"\n").is_err());
    }
}
