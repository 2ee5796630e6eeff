//! The editing state machine of the measurement canvas.
//!
//! The valid state transitions are:
//! ```text
//!              ┌─────────────┐
//!        ┌─────►   Drawing   ├─────┐
//!        │     └─────────────┘     │
//! ┌──────┴───┐                   ┌─▼────────┐
//! │   Idle   │                   │   Idle   │
//! └──────┬───┘                   └─▲────────┘
//!        │     ┌─────────────┐     │
//!        └─────►  Dragging   ├─────┘
//!              │  Endpoint   │
//!              └─────────────┘
//! ```
//!
//! `Drawing` always coincides with an edit line in the document. `DraggingEndpoint`
//! refers to a committed line by id, so removing that line invalidates the drag
//! instead of leaving a dangling reference.

use crate::line::{Endpoint, LineId};

/// An endpoint of a committed line, resolved against the document on every access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointHandle {
    pub line: LineId,
    pub endpoint: Endpoint,
}

/// The possible states of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EditorState {
    /// No edit line and no endpoint drag
    #[default]
    Idle,
    /// An edit line exists and its second endpoint follows the pointer
    Drawing {
        /// Input time (seconds) of the click that started the line
        started_at: f64,
    },
    /// An endpoint of a committed line follows the pointer
    DraggingEndpoint(EndpointHandle),
}

impl EditorState {
    /// Validates whether a transition to the new state is allowed
    pub fn can_transition_to(&self, new_state: &EditorState) -> bool {
        match (self, new_state) {
            // From Idle, we can go to any state
            (EditorState::Idle, _) => true,

            // Drawing and dragging can only finish or be cancelled
            (EditorState::Drawing { .. }, EditorState::Idle) => true,
            (EditorState::DraggingEndpoint(_), EditorState::Idle) => true,

            _ => false,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EditorState::Idle => "Idle",
            EditorState::Drawing { .. } => "Drawing",
            EditorState::DraggingEndpoint(_) => "DraggingEndpoint",
        }
    }

    /// Returns true if the editor is currently in an idle state
    pub fn is_idle(&self) -> bool {
        matches!(self, EditorState::Idle)
    }

    /// Returns true if a line is being drawn
    pub fn is_drawing(&self) -> bool {
        matches!(self, EditorState::Drawing { .. })
    }

    /// Returns true if an endpoint is being dragged
    pub fn is_dragging(&self) -> bool {
        matches!(self, EditorState::DraggingEndpoint(_))
    }

    /// Returns the dragged endpoint if in dragging state
    pub fn dragged_endpoint(&self) -> Option<EndpointHandle> {
        match self {
            EditorState::DraggingEndpoint(handle) => Some(*handle),
            _ => None,
        }
    }

    /// Returns when the current line was started if in drawing state
    pub fn drawing_started_at(&self) -> Option<f64> {
        match self {
            EditorState::Drawing { started_at } => Some(*started_at),
            _ => None,
        }
    }
}
