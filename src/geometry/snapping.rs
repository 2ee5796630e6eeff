use egui::Pos2;

use super::{angle_deg, pos_distance};

/// Compass rose the free endpoint snaps to, in degrees.
pub const SNAP_ANGLES: [f32; 8] = [0.0, 45.0, 90.0, 135.0, 180.0, -135.0, -90.0, -45.0];

/// Angular distance below which the target is pulled onto the nearest compass direction.
pub const DEFAULT_SNAP_TOLERANCE_DEG: f32 = 8.0;

/// Circular difference between two angles in degrees, in `0..=180`.
fn angular_difference(a: f32, b: f32) -> f32 {
    let diff = (a - b).abs() % 360.0;
    if diff > 180.0 { 360.0 - diff } else { diff }
}

/// Snaps `target` onto the nearest compass direction as seen from `anchor`.
///
/// The returned point keeps the distance from `anchor`. If no compass direction is
/// closer than `tolerance_deg`, `target` is returned unchanged.
pub fn snap_to_angle(anchor: Pos2, target: Pos2, tolerance_deg: f32) -> Pos2 {
    let angle = angle_deg(anchor, target);

    let mut closest = SNAP_ANGLES[0];
    let mut min_diff = f32::INFINITY;
    for &candidate in &SNAP_ANGLES {
        let diff = angular_difference(candidate, angle);
        if diff < min_diff {
            min_diff = diff;
            closest = candidate;
        }
    }

    if min_diff < tolerance_deg {
        let radians = closest.to_radians();
        let len = pos_distance(anchor, target);
        Pos2::new(anchor.x + len * radians.cos(), anchor.y + len * radians.sin())
    } else {
        target
    }
}
