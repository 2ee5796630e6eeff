use egui::{Context, Key, PointerButton, Pos2, Rect};

pub mod gestures;

pub use gestures::CommitGesture;

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// The position in image pixel coordinates
    pub position: Pos2,
    /// Whether this position is within the canvas bounds
    pub is_in_canvas: bool,
}

impl InputLocation {
    /// A location inside the canvas, in image coordinates.
    pub fn at(position: Pos2) -> Self {
        Self {
            position,
            is_in_canvas: true,
        }
    }
}

/// Input events the editing session understands
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse button was pressed
    PointerDown {
        location: InputLocation,
        button: PointerButton,
        /// Seconds on a monotonic clock
        time: f64,
    },
    /// Mouse moved (with or without buttons pressed)
    PointerMove { location: InputLocation },
    /// Primary button double click, reported after its second `PointerDown`
    DoubleClick { location: InputLocation },
    /// Key was pressed
    KeyDown { key: Key },
}

impl InputEvent {
    /// Helper to check if an input event occurred within the canvas
    pub fn is_in_canvas(&self) -> bool {
        match self {
            InputEvent::PointerDown { location, .. }
            | InputEvent::PointerMove { location }
            | InputEvent::DoubleClick { location } => location.is_in_canvas,
            InputEvent::KeyDown { .. } => false,
        }
    }
}

/// Handles converting raw egui input into image-space InputEvents
#[derive(Debug)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    /// Maps a screen position to image pixel coordinates
    fn make_location(&self, pos: Pos2) -> InputLocation {
        InputLocation {
            position: (pos - self.canvas_rect.min).to_pos2(),
            is_in_canvas: self.canvas_rect.contains(pos),
        }
    }

    /// Process raw egui input and generate our InputEvents.
    ///
    /// Pointer events outside the canvas are dropped; keys are always reported.
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            if let Some(pos) = input.pointer.hover_pos() {
                if Some(pos) != self.last_pointer_pos {
                    events.push(InputEvent::PointerMove {
                        location: self.make_location(pos),
                    });
                }
                self.last_pointer_pos = Some(pos);
            } else {
                self.last_pointer_pos = None;
            }

            if let Some(pos) = input.pointer.interact_pos() {
                let location = self.make_location(pos);
                for button in [PointerButton::Primary, PointerButton::Secondary] {
                    if input.pointer.button_pressed(button) {
                        events.push(InputEvent::PointerDown {
                            location,
                            button,
                            time: input.time,
                        });
                    }
                }
                if input.pointer.button_double_clicked(PointerButton::Primary) {
                    events.push(InputEvent::DoubleClick { location });
                }
            }

            for event in &input.raw.events {
                if let egui::Event::Key {
                    key, pressed: true, ..
                } = event
                {
                    events.push(InputEvent::KeyDown { key: *key });
                }
            }
        });

        events.retain(|event| matches!(event, InputEvent::KeyDown { .. }) || event.is_in_canvas());
        events
    }
}
