pub mod hit_testing;
pub mod snapping;

pub use hit_testing::{distance_to_segment, DEFAULT_HIT_TEST_RADIUS};
pub use snapping::{snap_to_angle, DEFAULT_SNAP_TOLERANCE_DEG, SNAP_ANGLES};

use egui::Pos2;

/// Euclidean distance between `(ax, ay)` and `(bx, by)`.
pub fn distance(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    let dx = bx - ax;
    let dy = by - ay;
    (dx * dx + dy * dy).sqrt()
}

/// Euclidean distance between two positions.
pub fn pos_distance(a: Pos2, b: Pos2) -> f32 {
    distance(a.x, a.y, b.x, b.y)
}

/// Direction of `from -> to` in degrees, `-180..=180`, in image coordinates (y down).
pub fn angle_deg(from: Pos2, to: Pos2) -> f32 {
    let delta = to - from;
    delta.y.atan2(delta.x).to_degrees()
}
