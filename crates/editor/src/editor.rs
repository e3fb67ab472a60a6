//! Editor controller: owns the state and keeps the response in step with it

use num_complex::Complex64;
use tracing::debug;
use zplane_core::model::{PoleZeroModel, RootKind};
use zplane_core::response::FrequencyResponse;

use crate::event::{Cursor, DispatchTable, EventKind};
use crate::state::{EditorState, MagnitudeScale};
use crate::Result;

/// Interactive pole/zero editor without any windowing.
///
/// Every change to the model triggers a full re-evaluation of the frequency
/// response. There is no incremental update.
pub struct Editor {
    state: EditorState,
    table: DispatchTable,
    sample_count: usize,
    response: FrequencyResponse,
}

impl Editor {
    /// Create an editor with the default dispatch table
    pub fn new(model: PoleZeroModel, sample_count: usize) -> Result<Self> {
        Self::with_table(model, sample_count, DispatchTable::default())
    }

    pub fn with_table(
        model: PoleZeroModel,
        sample_count: usize,
        table: DispatchTable,
    ) -> Result<Self> {
        let response = model.frequency_response(sample_count)?;
        Ok(Self {
            state: EditorState::new(model),
            table,
            sample_count,
            response,
        })
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn model(&self) -> &PoleZeroModel {
        &self.state.model
    }

    pub fn scale(&self) -> MagnitudeScale {
        self.state.scale
    }

    pub fn response(&self) -> &FrequencyResponse {
        &self.response
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Feed one input event through the dispatch table.
    ///
    /// Returns whether the state changed.
    pub fn handle(&mut self, kind: EventKind, cursor: &Cursor) -> Result<bool> {
        let next = self.table.dispatch(kind, &self.state, cursor);
        if next == self.state {
            return Ok(false);
        }
        debug!(
            ?kind,
            poles = next.model.poles.len(),
            zeros = next.model.zeros.len(),
            "editor state changed"
        );
        self.replace(next)?;
        Ok(true)
    }

    pub fn add_root(&mut self, kind: RootKind, at: Complex64) -> Result<usize> {
        let mut next = self.state.clone();
        let index = next.add_root(kind, at);
        self.replace(next)?;
        Ok(index)
    }

    pub fn remove_near(&mut self, kind: RootKind, at: Complex64) -> Result<Option<Complex64>> {
        let mut next = self.state.clone();
        let removed = next.remove_near(kind, at);
        if removed.is_some() {
            self.replace(next)?;
        }
        Ok(removed)
    }

    /// Click behaviour: remove the root under `at` or add a new one there
    pub fn toggle_at(&mut self, kind: RootKind, at: Complex64) -> Result<()> {
        let mut next = self.state.clone();
        next.toggle_at(kind, at);
        self.replace(next)
    }

    pub fn toggle_scale(&mut self) {
        self.state.toggle_scale();
    }

    pub fn clear(&mut self) -> Result<()> {
        let mut next = self.state.clone();
        next.clear();
        self.replace(next)
    }

    /// Swap in a new state, recomputing the response when the model moved.
    ///
    /// The old state is kept if the new model cannot be evaluated.
    fn replace(&mut self, next: EditorState) -> Result<()> {
        if next.model != self.state.model {
            self.response = next.model.frequency_response(self.sample_count)?;
        }
        self.state = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MouseButton;
    use crate::EditorError;
    use zplane_core::presets::Preset;
    use zplane_core::CoreError;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn test_response_follows_edits() {
        let mut editor = Editor::new(PoleZeroModel::identity(), 256).unwrap();
        assert!(editor.response().magnitude().iter().all(|m| (m - 1.0).abs() < 1e-12));

        editor.add_root(RootKind::Zero, c(0.0, 1.0)).unwrap();
        editor.add_root(RootKind::Zero, c(0.0, -1.0)).unwrap();
        let expected = Preset::Notch.model().frequency_response(256).unwrap();
        assert_eq!(editor.response(), &expected);

        editor.clear().unwrap();
        assert!(editor.model().is_empty());
        assert!(editor.response().magnitude().iter().all(|m| (m - 1.0).abs() < 1e-12));
    }

    #[test]
    fn test_events_drive_model() {
        let model = PoleZeroModel::new(vec![c(0.75, 0.0)], vec![c(-1.0, 0.0)]);
        let mut editor = Editor::new(model, 128).unwrap();

        let press = Cursor::at(c(0.75, 0.0)).with_button(MouseButton::Primary);
        assert!(editor.handle(EventKind::Press, &press).unwrap());
        assert!(editor.handle(EventKind::Motion, &Cursor::at(c(0.5, 0.0))).unwrap());
        assert!(editor.handle(EventKind::Release, &Cursor::at(c(0.5, 0.0))).unwrap());

        assert_eq!(editor.model().poles, vec![c(0.5, 0.0)]);
        let expected = PoleZeroModel::new(vec![c(0.5, 0.0)], vec![c(-1.0, 0.0)])
            .frequency_response(128)
            .unwrap();
        assert_eq!(editor.response(), &expected);

        assert!(!editor.handle(EventKind::Key, &Cursor::key('q')).unwrap());
        assert!(editor.handle(EventKind::Key, &Cursor::key('l')).unwrap());
        assert_eq!(editor.scale(), MagnitudeScale::Decibel);
    }

    #[test]
    fn test_toggle_and_remove() {
        let mut editor = Editor::new(PoleZeroModel::identity(), 64).unwrap();
        editor.toggle_at(RootKind::Pole, c(0.3, 0.3)).unwrap();
        assert_eq!(editor.model().poles.len(), 1);
        editor.toggle_at(RootKind::Pole, c(0.31, 0.3)).unwrap();
        assert!(editor.model().poles.is_empty());

        assert_eq!(editor.remove_near(RootKind::Zero, c(0.0, 0.0)).unwrap(), None);
    }

    #[test]
    fn test_non_finite_root_rejected() {
        let mut editor = Editor::new(PoleZeroModel::identity(), 64).unwrap();
        let err = editor.add_root(RootKind::Pole, c(f64::NAN, 0.0)).unwrap_err();
        assert!(matches!(err, EditorError::Core(CoreError::NonFiniteRoot { .. })));
        assert!(editor.model().is_empty());
    }

    #[test]
    fn test_zero_samples_rejected() {
        assert!(Editor::new(PoleZeroModel::identity(), 0).is_err());
    }
}
