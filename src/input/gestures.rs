/// Decides whether the second click of a line gesture commits the line.
///
/// Browsers and egui both report a double click as two presses followed by a double-click
/// event. The second press must not leave a tiny line behind, so a short line finished
/// quickly is treated as part of a double click and discarded. This is a heuristic, not
/// gesture recognition: a deliberate short line drawn very fast is discarded too.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommitGesture {
    /// Lines longer than this (pixels) are always committed.
    pub min_commit_length: f32,
    /// Shorter lines are committed only when finished later than this (seconds).
    pub double_click_window: f64,
}

impl Default for CommitGesture {
    fn default() -> Self {
        Self {
            min_commit_length: 50.0,
            double_click_window: 0.5,
        }
    }
}

impl CommitGesture {
    /// `length` in pixels, `elapsed` in seconds since the line was started.
    pub fn should_commit(&self, length: f32, elapsed: f64) -> bool {
        length > self.min_commit_length || (length > 0.0 && elapsed > self.double_click_window)
    }
}
