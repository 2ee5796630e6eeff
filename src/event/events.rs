use egui::Pos2;

use crate::line::{Endpoint, LineId};
use crate::state::EditorState;
use crate::tools::ToolMode;

/// Changes to the measurement model that collaborators (renderer, table, export) react to.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    ToolChanged {
        old: ToolMode,
        new: ToolMode,
    },
    StateChanged {
        old: EditorState,
        new: EditorState,
    },
    LineCommitted {
        id: LineId,
        is_scale: bool,
    },
    LineRemoved {
        id: LineId,
    },
    /// A pending edit line was thrown away without being committed.
    EditLineDiscarded,
    EndpointMoved {
        id: LineId,
        endpoint: Endpoint,
        position: Pos2,
    },
    ScaleChanged {
        old: f32,
        new: f32,
    },
    /// All lines were dropped and the scale reset (new background image).
    DocumentReset,
}

impl EditorEvent {
    /// Whether the committed measurements (and so any table or export) changed.
    pub fn changes_measurements(&self) -> bool {
        matches!(
            self,
            Self::LineCommitted { .. }
                | Self::LineRemoved { .. }
                | Self::EndpointMoved { .. }
                | Self::ScaleChanged { .. }
                | Self::DocumentReset
        )
    }
}
