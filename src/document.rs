use egui::Pos2;
use log::debug;

use crate::geometry::DEFAULT_HIT_TEST_RADIUS;
use crate::line::{Endpoint, Line, LineId};

/// The measurement store: committed lines in insertion order, at most one edit line,
/// and the units-per-pixel scale.
///
/// The edit line lives outside the committed sequence, so `lines()`, `find_closest()`
/// and everything built on them never see it.
#[derive(Debug, Clone)]
pub struct Document {
    lines: Vec<Line>,
    edit_line: Option<Line>,
    units_per_pixel: f32,
    hit_test_radius: f32,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::with_hit_test_radius(DEFAULT_HIT_TEST_RADIUS)
    }

    pub fn with_hit_test_radius(hit_test_radius: f32) -> Self {
        Self {
            lines: Vec::new(),
            edit_line: None,
            units_per_pixel: 1.0,
            hit_test_radius,
        }
    }

    /// Drops every line and resets the scale to raw pixels.
    pub fn reset(&mut self) {
        self.lines.clear();
        self.edit_line = None;
        self.units_per_pixel = 1.0;
    }

    /// Starts a new edit line with both endpoints at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if an edit line already exists.
    pub fn start_edit_line(&mut self, pos: Pos2, is_scale: bool) {
        assert!(
            self.edit_line.is_none(),
            "start_edit_line called while an edit line is in progress"
        );
        let line = Line::new(pos, pos, is_scale);
        debug!("Edit line {} started at {:?} (scale: {})", line.id(), pos, is_scale);
        self.edit_line = Some(line);
    }

    /// Moves the free endpoint of the edit line and returns the updated line.
    ///
    /// # Panics
    ///
    /// Panics if there is no edit line.
    pub fn update_edit_line(&mut self, pos: Pos2) -> &Line {
        let Some(line) = self.edit_line.as_mut() else {
            panic!("update_edit_line called without an edit line");
        };
        line.p2 = pos;
        line
    }

    /// Appends the edit line to the committed lines and returns its id.
    ///
    /// # Panics
    ///
    /// Panics if there is no edit line.
    pub fn commit_edit_line(&mut self) -> LineId {
        let Some(line) = self.edit_line.take() else {
            panic!("commit_edit_line called without an edit line");
        };
        let id = line.id();
        self.lines.push(line);
        id
    }

    /// Discards the edit line, if any. Returns whether there was one.
    pub fn forget_edit_line(&mut self) -> bool {
        self.edit_line.take().is_some()
    }

    pub fn has_edit_line(&self) -> bool {
        self.edit_line.is_some()
    }

    pub fn edit_line(&self) -> Option<&Line> {
        self.edit_line.as_ref()
    }

    /// Removes the committed line with the given id. Absent ids are ignored.
    pub fn remove_line(&mut self, id: LineId) -> Option<Line> {
        let index = self.lines.iter().position(|line| line.id() == id)?;
        Some(self.lines.remove(index))
    }

    /// The committed line nearest to `pos`, if it lies within the hit-test radius.
    ///
    /// On equal distances the line inserted first wins. That tie-break is arbitrary and
    /// callers should not depend on it.
    pub fn find_closest(&self, pos: Pos2) -> Option<&Line> {
        let mut best: Option<(&Line, f32)> = None;
        for line in &self.lines {
            let distance = line.distance_to(pos);
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((line, distance)),
            }
        }
        best.filter(|(_, distance)| *distance <= self.hit_test_radius)
            .map(|(line, _)| line)
    }

    /// Committed lines in insertion order.
    pub fn lines(&self) -> impl Iterator<Item = &Line> + '_ {
        self.lines.iter()
    }

    /// Calls `visitor` for every committed line in insertion order.
    pub fn for_all_lines(&self, mut visitor: impl FnMut(&Line)) {
        for line in &self.lines {
            visitor(line);
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.lines.iter().find(|line| line.id() == id)
    }

    /// Mutable access to one endpoint of a committed line.
    pub fn endpoint_mut(&mut self, id: LineId, endpoint: Endpoint) -> Option<&mut Pos2> {
        self.lines
            .iter_mut()
            .find(|line| line.id() == id)
            .map(|line| line.endpoint_mut(endpoint))
    }

    pub fn units_per_pixel(&self) -> f32 {
        self.units_per_pixel
    }

    /// Sets the scale. `value` must be finite and positive; callers validate user input first.
    pub fn set_units_per_pixel(&mut self, value: f32) {
        debug_assert!(
            value.is_finite() && value > 0.0,
            "units per pixel must be finite and positive, got {value}"
        );
        self.units_per_pixel = value;
    }

    /// Length of `line` in calibrated units.
    pub fn calibrated_length(&self, line: &Line) -> f32 {
        line.length() * self.units_per_pixel
    }

    pub fn hit_test_radius(&self) -> f32 {
        self.hit_test_radius
    }

    pub fn set_hit_test_radius(&mut self, radius: f32) {
        self.hit_test_radius = radius;
    }
}
