use egui::Pos2;

/// Maximum pixel distance for a point query to count as hitting a line.
pub const DEFAULT_HIT_TEST_RADIUS: f32 = 50.0;

/// Minimum distance from `point` to the segment `start..end` (not the infinite line).
///
/// A zero-length segment degrades to the distance to its single point.
pub fn distance_to_segment(point: Pos2, start: Pos2, end: Pos2) -> f32 {
    let segment = end - start;
    let to_point = point - start;

    let length = segment.length();
    if length == 0.0 {
        return to_point.length();
    }

    let t = ((to_point.x * segment.x + to_point.y * segment.y) / length).clamp(0.0, length);
    let projection = start + segment * (t / length);
    (point - projection).length()
}
