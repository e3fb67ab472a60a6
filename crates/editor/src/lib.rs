//! zplane editor - headless pole/zero editing
//!
//! State, input dispatch and plot view-model for an interactive pole/zero
//! editor. Drawing and window management are left to the embedding
//! application; this crate only decides what the plot should contain.

pub mod editor;
pub mod error;
pub mod event;
pub mod state;
pub mod view;

pub use error::{EditorError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        editor::Editor,
        error::{EditorError, Result},
        event::{Cursor, DispatchTable, EventKind, Handler, MouseButton},
        state::{
            ActiveDrag, DragHandle, EditorState, MagnitudeScale, DRAG_THRESHOLD, REMOVE_THRESHOLD,
        },
        view::{
            axis_limit, frequency_ticks, magnitude_trace, markers, unit_circle, Glyph, Marker, Tick,
        },
    };
}
