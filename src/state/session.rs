//! The editing session: owns the measurement document, the tool mode and the
//! editing state, and turns input events into document changes.
//!
//! All mutation of the document by user input goes through here. The renderer and
//! exporters only get shared references.

use egui::{Key, PointerButton, Pos2};
use log::{debug, info, warn};

use super::{EditorState, EndpointHandle};
use crate::calibration::{self, CalibrationRequest};
use crate::config::SessionConfig;
use crate::document::Document;
use crate::error::CalibrationError;
use crate::event::{EditorEvent, EventBus};
use crate::geometry::snap_to_angle;
use crate::input::{CommitGesture, InputEvent, InputLocation};
use crate::line::LineId;
use crate::tools::ToolMode;

#[derive(Debug)]
pub struct EditingSession {
    document: Document,
    tool_mode: ToolMode,
    state: EditorState,
    config: SessionConfig,
    gesture: CommitGesture,
    /// Line selected for calibration, drawn highlighted until the prompt is answered.
    highlighted: Option<LineId>,
    event_bus: EventBus,
}

impl Default for EditingSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl EditingSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            document: Document::with_hit_test_radius(config.hit_test_radius),
            tool_mode: ToolMode::default(),
            state: EditorState::Idle,
            gesture: config.commit_gesture(),
            config,
            highlighted: None,
            event_bus: EventBus::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn tool_mode(&self) -> ToolMode {
        self.tool_mode
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub fn highlighted_line(&self) -> Option<LineId> {
        self.highlighted
    }

    pub fn set_config(&mut self, config: SessionConfig) {
        self.document.set_hit_test_radius(config.hit_test_radius);
        self.gesture = config.commit_gesture();
        self.config = config;
    }

    pub fn set_snap_to_angle(&mut self, enabled: bool) {
        self.config.snap_to_angle = enabled;
    }

    pub fn set_show_deltas(&mut self, show: bool) {
        self.config.show_deltas = show;
    }

    pub fn set_show_angles(&mut self, show: bool) {
        self.config.show_angles = show;
    }

    pub fn set_show_loupe(&mut self, show: bool) {
        self.config.show_loupe = show;
    }

    /// Switches the tool. Leaving for a mode that does not draw or edit discards the
    /// pending edit line; leaving `Edit` ends an endpoint drag.
    pub fn set_tool_mode(&mut self, mode: ToolMode) {
        if mode == self.tool_mode {
            return;
        }
        let old = self.tool_mode;
        self.tool_mode = mode;
        info!("Tool changed: {} -> {}", old, mode);
        self.event_bus.emit(EditorEvent::ToolChanged { old, new: mode });

        if !mode.keeps_edit_line() {
            self.cancel_edit_line();
        }
        if old == ToolMode::Edit {
            self.end_drag();
        }
    }

    /// Dispatches one input event. Returns a calibration request when a double click
    /// selected a line; the caller prompts for its length and answers through
    /// [`EditingSession::apply_calibration`].
    pub fn handle_event(&mut self, event: &InputEvent) -> Option<CalibrationRequest> {
        match event {
            InputEvent::PointerDown {
                location,
                button,
                time,
            } => {
                self.pointer_down(*location, *button, *time);
                None
            }
            InputEvent::PointerMove { location } => {
                self.pointer_move(location.position);
                None
            }
            InputEvent::DoubleClick { location } => self.double_click(*location),
            InputEvent::KeyDown { key } => {
                self.key_down(*key);
                None
            }
        }
    }

    pub fn pointer_down(&mut self, location: InputLocation, button: PointerButton, time: f64) {
        if !location.is_in_canvas {
            return;
        }
        let pos = location.position;

        match button {
            PointerButton::Secondary => {
                if self.document.has_edit_line() {
                    self.cancel_edit_line();
                } else {
                    self.end_drag();
                    self.remove_closest(pos);
                }
            }
            PointerButton::Primary => match self.tool_mode {
                ToolMode::Erase => {
                    self.cancel_edit_line();
                    self.end_drag();
                    self.remove_closest(pos);
                }
                ToolMode::Edit => {
                    self.cancel_edit_line();
                    if self.state.is_dragging() {
                        // The endpoint is already where the last move put it.
                        self.end_drag();
                    } else {
                        self.begin_drag(pos);
                    }
                }
                ToolMode::Measure | ToolMode::Scale => {
                    self.end_drag();
                    self.draw_click(pos, time);
                }
            },
            _ => {}
        }
    }

    pub fn pointer_move(&mut self, pos: Pos2) {
        match self.state {
            EditorState::Drawing { .. } => {
                let Some(anchor) = self.document.edit_line().map(|line| line.p1) else {
                    return;
                };
                let target = self.snapped(anchor, pos);
                self.document.update_edit_line(target);
            }
            EditorState::DraggingEndpoint(handle) => {
                let Some(line) = self.document.line(handle.line) else {
                    debug!("Dragged line {} is gone, ending drag", handle.line);
                    self.end_drag();
                    return;
                };
                let anchor = line.endpoint(handle.endpoint.other());
                let target = self.snapped(anchor, pos);
                if let Some(point) = self.document.endpoint_mut(handle.line, handle.endpoint) {
                    *point = target;
                    self.event_bus.emit(EditorEvent::EndpointMoved {
                        id: handle.line,
                        endpoint: handle.endpoint,
                        position: target,
                    });
                }
            }
            EditorState::Idle => {}
        }
    }

    /// Cancels any pending line and selects the nearest line for calibration.
    pub fn double_click(&mut self, location: InputLocation) -> Option<CalibrationRequest> {
        self.cancel_edit_line();
        self.end_drag();
        if !location.is_in_canvas {
            return None;
        }

        let id = self.document.find_closest(location.position)?.id();
        let request = CalibrationRequest::for_line(&self.document, id)?;
        debug!("Calibration requested for line {} ({})", id, request.current_text);
        self.highlighted = Some(id);
        Some(request)
    }

    pub fn key_down(&mut self, key: Key) {
        if key == Key::Escape {
            self.cancel_edit_line();
            self.end_drag();
        }
    }

    /// Answers a calibration prompt. Invalid or unchanged input leaves the scale as it was.
    pub fn apply_calibration(&mut self, request: &CalibrationRequest, input: &str) -> bool {
        self.highlighted = None;
        let old = self.document.units_per_pixel();
        match calibration::apply(&mut self.document, request, input) {
            Ok(new) => {
                self.event_bus.emit(EditorEvent::ScaleChanged { old, new });
                true
            }
            Err(CalibrationError::Unchanged) => {
                debug!("Calibration input unchanged, keeping scale {}", old);
                false
            }
            Err(err) => {
                warn!("Ignoring calibration input '{}': {}", input, err);
                false
            }
        }
    }

    /// Closes a calibration prompt without an answer.
    pub fn cancel_calibration(&mut self) {
        self.highlighted = None;
    }

    /// Discards the pending edit line, if any.
    pub fn cancel_edit_line(&mut self) {
        if self.document.forget_edit_line() {
            debug!("Edit line discarded");
            self.event_bus.emit(EditorEvent::EditLineDiscarded);
        }
        if self.state.is_drawing() {
            self.transition_to(EditorState::Idle);
        }
    }

    /// Starts over for a new background image: no lines, raw pixel scale.
    pub fn reset_for_image(&mut self) {
        self.document.reset();
        self.highlighted = None;
        if !self.state.is_idle() {
            self.transition_to(EditorState::Idle);
        }
        info!("Document reset for new image");
        self.event_bus.emit(EditorEvent::DocumentReset);
    }

    fn draw_click(&mut self, pos: Pos2, time: f64) {
        let Some(started_at) = self.state.drawing_started_at() else {
            self.document
                .start_edit_line(pos, self.tool_mode == ToolMode::Scale);
            self.transition_to(EditorState::Drawing { started_at: time });
            return;
        };

        // The click itself is taken as given; snapping only guides the preview
        let length = self.document.update_edit_line(pos).length();
        let elapsed = time - started_at;

        if self.gesture.should_commit(length, elapsed) {
            let is_scale = self.document.edit_line().is_some_and(|line| line.is_scale);
            let id = self.document.commit_edit_line();
            info!("Line {} committed ({:.1} px, scale: {})", id, length, is_scale);
            self.event_bus.emit(EditorEvent::LineCommitted { id, is_scale });
        } else {
            debug!(
                "Discarding {:.1} px line finished after {:.3} s as a double click",
                length, elapsed
            );
            self.document.forget_edit_line();
            self.event_bus.emit(EditorEvent::EditLineDiscarded);
        }
        self.transition_to(EditorState::Idle);
    }

    fn begin_drag(&mut self, pos: Pos2) {
        let Some(line) = self.document.find_closest(pos) else {
            return;
        };
        let handle = EndpointHandle {
            line: line.id(),
            endpoint: line.nearer_endpoint(pos),
        };
        debug!("Dragging {:?} of line {}", handle.endpoint, handle.line);
        self.transition_to(EditorState::DraggingEndpoint(handle));
    }

    fn end_drag(&mut self) {
        if self.state.is_dragging() {
            self.transition_to(EditorState::Idle);
        }
    }

    fn remove_closest(&mut self, pos: Pos2) {
        let Some(id) = self.document.find_closest(pos).map(|line| line.id()) else {
            return;
        };
        if self.document.remove_line(id).is_some() {
            if self.highlighted == Some(id) {
                self.highlighted = None;
            }
            info!("Line {} removed", id);
            self.event_bus.emit(EditorEvent::LineRemoved { id });
        }
    }

    fn snapped(&self, anchor: Pos2, target: Pos2) -> Pos2 {
        if self.config.snap_to_angle {
            snap_to_angle(anchor, target, self.config.snap_tolerance_deg)
        } else {
            target
        }
    }

    fn transition_to(&mut self, new_state: EditorState) {
        debug_assert!(
            self.state.can_transition_to(&new_state),
            "invalid transition {} -> {}",
            self.state.name(),
            new_state.name()
        );
        let old = self.state;
        self.state = new_state;
        debug!("State changed: {} -> {}", old.name(), new_state.name());
        self.event_bus.emit(EditorEvent::StateChanged {
            old,
            new: new_state,
        });
    }
}
