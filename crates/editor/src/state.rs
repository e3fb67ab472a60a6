//! Editor state: the pole/zero model plus drag and display mode

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use zplane_core::model::{PoleZeroModel, RootKind};

/// A click closer than this to an existing root picks that root
pub const REMOVE_THRESHOLD: f64 = 0.1;

/// A drag shorter than this counts as a click and removes the root
pub const DRAG_THRESHOLD: f64 = 0.05;

/// How the magnitude response is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MagnitudeScale {
    #[default]
    Linear,
    Decibel,
}

impl MagnitudeScale {
    pub fn toggled(self) -> Self {
        match self {
            MagnitudeScale::Linear => MagnitudeScale::Decibel,
            MagnitudeScale::Decibel => MagnitudeScale::Linear,
        }
    }
}

/// Root being dragged
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragHandle {
    pub index: usize,
    /// Position of the root when the drag started
    pub origin: Complex64,
    /// Cursor position at press time
    pub anchor: Complex64,
}

impl DragHandle {
    /// Root position for a cursor at `cursor`, keeping the press offset
    pub fn follow(&self, cursor: Complex64) -> Complex64 {
        self.origin + (cursor - self.anchor)
    }
}

/// Drag in progress, if any
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ActiveDrag {
    #[default]
    Idle,
    Pole(DragHandle),
    Zero(DragHandle),
}

impl ActiveDrag {
    pub fn start(kind: RootKind, handle: DragHandle) -> Self {
        match kind {
            RootKind::Pole => ActiveDrag::Pole(handle),
            RootKind::Zero => ActiveDrag::Zero(handle),
        }
    }

    pub fn target(&self) -> Option<(RootKind, DragHandle)> {
        match *self {
            ActiveDrag::Idle => None,
            ActiveDrag::Pole(handle) => Some((RootKind::Pole, handle)),
            ActiveDrag::Zero(handle) => Some((RootKind::Zero, handle)),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, ActiveDrag::Idle)
    }
}

/// Complete editor state.
///
/// Event handlers take a state by reference and hand back a new one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorState {
    pub model: PoleZeroModel,
    pub drag: ActiveDrag,
    pub scale: MagnitudeScale,
}

impl EditorState {
    pub fn new(model: PoleZeroModel) -> Self {
        Self {
            model,
            ..Self::default()
        }
    }

    pub fn add_root(&mut self, kind: RootKind, at: Complex64) -> usize {
        self.model.push(kind, at)
    }

    /// Remove the first root of `kind` within [`REMOVE_THRESHOLD`] of `at`
    pub fn remove_near(&mut self, kind: RootKind, at: Complex64) -> Option<Complex64> {
        let index = self.model.find_near(kind, at, REMOVE_THRESHOLD)?;
        self.model.remove(kind, index).ok()
    }

    /// Remove a nearby root, or add one at `at` when none is close
    pub fn toggle_at(&mut self, kind: RootKind, at: Complex64) {
        if self.remove_near(kind, at).is_none() {
            self.add_root(kind, at);
        }
    }

    pub fn toggle_scale(&mut self) {
        self.scale = self.scale.toggled();
    }

    /// Drop every pole and zero and any drag in progress
    pub fn clear(&mut self) {
        self.model.clear();
        self.drag = ActiveDrag::Idle;
    }
}
