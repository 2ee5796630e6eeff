use egui::Pos2;

use crate::geometry::{distance_to_segment, pos_distance};
use crate::id_generator::generate_line_id;

/// Stable identity of a line for its whole lifetime, independent of its position in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(pub(crate) usize);

impl std::fmt::Display for LineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which end of a line an operation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    P1,
    P2,
}

impl Endpoint {
    pub fn other(self) -> Self {
        match self {
            Self::P1 => Self::P2,
            Self::P2 => Self::P1,
        }
    }
}

/// A straight measurement segment in image pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    id: LineId,
    pub p1: Pos2,
    pub p2: Pos2,
    /// Drawn with the scale tool, i.e. meant as the calibration reference.
    pub is_scale: bool,
}

impl Line {
    /// Creates a line with a fresh identity.
    pub fn new(p1: Pos2, p2: Pos2, is_scale: bool) -> Self {
        Self {
            id: generate_line_id(),
            p1,
            p2,
            is_scale,
        }
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    pub fn length(&self) -> f32 {
        pos_distance(self.p1, self.p2)
    }

    pub fn dx(&self) -> f32 {
        self.p2.x - self.p1.x
    }

    pub fn dy(&self) -> f32 {
        self.p2.y - self.p1.y
    }

    pub fn endpoint(&self, endpoint: Endpoint) -> Pos2 {
        match endpoint {
            Endpoint::P1 => self.p1,
            Endpoint::P2 => self.p2,
        }
    }

    pub fn endpoint_mut(&mut self, endpoint: Endpoint) -> &mut Pos2 {
        match endpoint {
            Endpoint::P1 => &mut self.p1,
            Endpoint::P2 => &mut self.p2,
        }
    }

    /// The endpoint closer to `pos`; `P2` wins a tie.
    pub fn nearer_endpoint(&self, pos: Pos2) -> Endpoint {
        if pos_distance(pos, self.p1) < pos_distance(pos, self.p2) {
            Endpoint::P1
        } else {
            Endpoint::P2
        }
    }

    /// Distance from `pos` to the segment between the endpoints.
    pub fn distance_to(&self, pos: Pos2) -> f32 {
        distance_to_segment(pos, self.p1, self.p2)
    }

    pub fn midpoint(&self) -> Pos2 {
        self.p1.lerp(self.p2, 0.5)
    }
}
