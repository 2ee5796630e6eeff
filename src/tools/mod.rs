use serde::{Deserialize, Serialize};

/// How pointer input on the canvas is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ToolMode {
    /// Draw regular measurement lines.
    #[default]
    Measure,
    /// Draw lines tagged as scale references.
    Scale,
    /// Remove the line nearest to a click.
    Erase,
    /// Drag an endpoint of an existing line.
    Edit,
}

impl ToolMode {
    pub const ALL: [ToolMode; 4] = [Self::Measure, Self::Scale, Self::Erase, Self::Edit];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Measure => "Measure",
            Self::Scale => "Scale",
            Self::Erase => "Erase",
            Self::Edit => "Edit",
        }
    }

    /// Whether a pending edit line survives switching into this mode.
    pub fn keeps_edit_line(&self) -> bool {
        matches!(self, Self::Measure | Self::Scale | Self::Edit)
    }

    pub fn cursor_icon(&self) -> egui::CursorIcon {
        match self {
            Self::Measure | Self::Scale => egui::CursorIcon::Crosshair,
            Self::Erase => egui::CursorIcon::NotAllowed,
            Self::Edit => egui::CursorIcon::Grab,
        }
    }
}

impl std::fmt::Display for ToolMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
