//! Input events and the handler dispatch table
//!
//! Every handler is a plain function from the current state and a cursor
//! snapshot to the next state. Handlers never mutate the state they are
//! given, so a handler that decides to do nothing simply returns a clone.

use std::collections::HashMap;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use zplane_core::model::RootKind;

use crate::state::{ActiveDrag, DragHandle, EditorState, DRAG_THRESHOLD, REMOVE_THRESHOLD};

/// Mouse buttons the editor reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    /// Edits poles
    Primary,
    /// Edits zeros
    Secondary,
}

impl MouseButton {
    pub fn root_kind(self) -> RootKind {
        match self {
            MouseButton::Primary => RootKind::Pole,
            MouseButton::Secondary => RootKind::Zero,
        }
    }
}

/// Kinds of input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Press,
    Motion,
    Release,
    Key,
}

/// Snapshot of the pointer and keyboard at the time of an event
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cursor {
    /// Position in the z-plane; `None` outside the plotting region
    pub position: Option<Complex64>,
    pub button: Option<MouseButton>,
    pub key: Option<char>,
}

impl Cursor {
    pub fn at(position: Complex64) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn outside() -> Self {
        Self::default()
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = Some(button);
        self
    }

    pub fn key(key: char) -> Self {
        Self {
            key: Some(key),
            ..Self::default()
        }
    }

    /// Position inside the plotting region, if any
    pub fn point(&self) -> Option<Complex64> {
        self.position.filter(|p| p.is_finite())
    }
}

/// Event handler signature
pub type Handler = fn(&EditorState, &Cursor) -> EditorState;

/// Maps each event kind to its handler
#[derive(Clone)]
pub struct DispatchTable {
    handlers: HashMap<EventKind, Handler>,
}

impl DispatchTable {
    /// Table without any handlers; every event is a no-op
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Install `handler` for `kind`, returning the one it replaces
    pub fn register(&mut self, kind: EventKind, handler: Handler) -> Option<Handler> {
        self.handlers.insert(kind, handler)
    }

    pub fn dispatch(&self, kind: EventKind, state: &EditorState, cursor: &Cursor) -> EditorState {
        match self.handlers.get(&kind) {
            Some(handler) => handler(state, cursor),
            None => state.clone(),
        }
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.register(EventKind::Press, on_press);
        table.register(EventKind::Motion, on_motion);
        table.register(EventKind::Release, on_release);
        table.register(EventKind::Key, on_key);
        table
    }
}

/// Pick up a nearby root for dragging, or drop a new one
pub fn on_press(state: &EditorState, cursor: &Cursor) -> EditorState {
    let (Some(at), Some(button)) = (cursor.point(), cursor.button) else {
        return state.clone();
    };
    if !state.drag.is_idle() {
        return state.clone();
    }

    let kind = button.root_kind();
    let mut next = state.clone();
    match state.model.find_near(kind, at, REMOVE_THRESHOLD) {
        Some(index) => {
            let handle = DragHandle {
                index,
                origin: state.model.roots(kind)[index],
                anchor: at,
            };
            next.drag = ActiveDrag::start(kind, handle);
        }
        None => {
            next.add_root(kind, at);
        }
    }
    next
}

/// Move the dragged root with the cursor
pub fn on_motion(state: &EditorState, cursor: &Cursor) -> EditorState {
    let (Some(at), Some((kind, handle))) = (cursor.point(), state.drag.target()) else {
        return state.clone();
    };

    let mut next = state.clone();
    if next.model.set(kind, handle.index, handle.follow(at)).is_err() {
        next.drag = ActiveDrag::Idle;
    }
    next
}

/// Finish a drag: revert outside the region, remove on a click, else commit
pub fn on_release(state: &EditorState, cursor: &Cursor) -> EditorState {
    let Some((kind, handle)) = state.drag.target() else {
        return state.clone();
    };

    let mut next = state.clone();
    next.drag = ActiveDrag::Idle;

    // A stale index means the model changed under the drag; nothing to finish.
    let outcome = match cursor.point() {
        None => next.model.set(kind, handle.index, handle.origin),
        Some(at) if (at - handle.anchor).norm() < DRAG_THRESHOLD => {
            next.model.remove(kind, handle.index).map(|_| ())
        }
        Some(at) => next.model.set(kind, handle.index, handle.follow(at)),
    };
    if outcome.is_err() {
        next.model = state.model.clone();
    }
    next
}

/// `l` toggles linear/dB magnitude, `c` clears the plot
pub fn on_key(state: &EditorState, cursor: &Cursor) -> EditorState {
    let mut next = state.clone();
    match cursor.key.map(|k| k.to_ascii_lowercase()) {
        Some('l') => next.toggle_scale(),
        Some('c') => next.clear(),
        _ => {}
    }
    next
}
