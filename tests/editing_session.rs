use std::cell::RefCell;
use std::rc::Rc;

use augenmass::{
    CalibrationRequest, EditingSession, EditorEvent, EditorState, Endpoint, InputEvent,
    InputLocation, SessionConfig, ToolMode,
};
use egui::{Key, PointerButton, Pos2};

fn press(session: &mut EditingSession, x: f32, y: f32, button: PointerButton, time: f64) {
    session.handle_event(&InputEvent::PointerDown {
        location: InputLocation::at(Pos2::new(x, y)),
        button,
        time,
    });
}

fn click(session: &mut EditingSession, x: f32, y: f32, time: f64) {
    press(session, x, y, PointerButton::Primary, time);
}

fn move_to(session: &mut EditingSession, x: f32, y: f32) {
    session.handle_event(&InputEvent::PointerMove {
        location: InputLocation::at(Pos2::new(x, y)),
    });
}

fn double_click(session: &mut EditingSession, x: f32, y: f32) -> Option<CalibrationRequest> {
    session.handle_event(&InputEvent::DoubleClick {
        location: InputLocation::at(Pos2::new(x, y)),
    })
}

// Draws a committed line with two clicks one second apart
fn draw_line(session: &mut EditingSession, from: (f32, f32), to: (f32, f32)) {
    click(session, from.0, from.1, 0.0);
    move_to(session, to.0, to.1);
    click(session, to.0, to.1, 1.0);
}

fn recording_session(config: SessionConfig) -> (EditingSession, Rc<RefCell<Vec<EditorEvent>>>) {
    let session = EditingSession::new(config);
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    session
        .event_bus()
        .subscribe(Box::new(move |event: &EditorEvent| {
            sink.borrow_mut().push(event.clone());
        }));
    (session, events)
}

#[test]
fn test_double_click_without_lines_leaves_nothing() {
    let mut session = EditingSession::default();

    click(&mut session, 10.0, 10.0, 0.0);
    assert!(session.state().is_drawing());
    click(&mut session, 10.0, 10.0, 0.2);
    assert!(double_click(&mut session, 10.0, 10.0).is_none());

    assert!(session.document().is_empty());
    assert!(!session.document().has_edit_line());
    assert!(session.state().is_idle());
}

#[test]
fn test_long_line_commits_immediately() {
    let mut session = EditingSession::default();
    click(&mut session, 0.0, 0.0, 0.0);
    move_to(&mut session, 120.0, 0.0);
    click(&mut session, 120.0, 0.0, 0.1);

    assert_eq!(session.document().line_count(), 1);
    assert_eq!(session.document().lines().next().unwrap().length(), 120.0);
    assert!(session.state().is_idle());
}

#[test]
fn test_short_line_commits_only_after_double_click_window() {
    let mut session = EditingSession::default();

    click(&mut session, 0.0, 0.0, 0.0);
    click(&mut session, 20.0, 0.0, 0.2);
    assert!(session.document().is_empty());

    click(&mut session, 0.0, 0.0, 1.0);
    click(&mut session, 20.0, 0.0, 1.6);
    assert_eq!(session.document().line_count(), 1);
}

#[test]
fn test_scale_tool_tags_lines() {
    let mut session = EditingSession::default();
    session.set_tool_mode(ToolMode::Scale);
    draw_line(&mut session, (0.0, 0.0), (100.0, 0.0));

    assert!(session.document().lines().next().unwrap().is_scale);
}

#[test]
fn test_switching_to_erase_discards_edit_line() {
    let mut session = EditingSession::default();
    click(&mut session, 0.0, 0.0, 0.0);
    move_to(&mut session, 80.0, 0.0);
    assert!(session.document().has_edit_line());

    session.set_tool_mode(ToolMode::Erase);
    assert!(!session.document().has_edit_line());
    assert!(session.state().is_idle());
    assert!(session.document().is_empty());
}

#[test]
fn test_switching_to_scale_keeps_edit_line() {
    let mut session = EditingSession::default();
    click(&mut session, 0.0, 0.0, 0.0);
    session.set_tool_mode(ToolMode::Scale);
    assert!(session.document().has_edit_line());
}

#[test]
fn test_erase_removes_closest_line() {
    let mut session = EditingSession::default();
    draw_line(&mut session, (0.0, 0.0), (100.0, 0.0));
    draw_line(&mut session, (0.0, 100.0), (100.0, 100.0));
    let second = session.document().lines().nth(1).unwrap().id();

    session.set_tool_mode(ToolMode::Erase);
    click(&mut session, 50.0, 20.0, 2.0);

    let remaining: Vec<_> = session.document().lines().map(|line| line.id()).collect();
    assert_eq!(remaining, vec![second]);

    // Nothing in range
    click(&mut session, 500.0, 500.0, 3.0);
    assert_eq!(session.document().line_count(), 1);
}

#[test]
fn test_right_click_cancels_edit_line_before_removing() {
    let mut session = EditingSession::default();
    draw_line(&mut session, (0.0, 0.0), (100.0, 0.0));

    click(&mut session, 10.0, 10.0, 2.0);
    press(&mut session, 50.0, 0.0, PointerButton::Secondary, 2.1);
    assert!(!session.document().has_edit_line());
    assert_eq!(session.document().line_count(), 1);

    press(&mut session, 50.0, 0.0, PointerButton::Secondary, 2.2);
    assert!(session.document().is_empty());
}

#[test]
fn test_escape_cancels_edit_line() {
    let mut session = EditingSession::default();
    click(&mut session, 0.0, 0.0, 0.0);
    move_to(&mut session, 60.0, 0.0);

    session.handle_event(&InputEvent::KeyDown { key: Key::Escape });
    assert!(!session.document().has_edit_line());
    assert!(session.state().is_idle());
}

#[test]
fn test_pointer_outside_canvas_is_ignored() {
    let mut session = EditingSession::default();
    session.handle_event(&InputEvent::PointerDown {
        location: InputLocation {
            position: Pos2::new(-5.0, 10.0),
            is_in_canvas: false,
        },
        button: PointerButton::Primary,
        time: 0.0,
    });
    assert!(session.state().is_idle());
    assert!(!session.document().has_edit_line());
}

#[test]
fn test_snapping_guides_preview_but_click_commits_raw_point() {
    let config = SessionConfig {
        snap_to_angle: true,
        ..Default::default()
    };
    let mut session = EditingSession::new(config);
    click(&mut session, 0.0, 0.0, 0.0);
    move_to(&mut session, 100.0, 5.0);
    assert_eq!(session.document().edit_line().unwrap().p2, Pos2::new(100.0, 0.0));

    click(&mut session, 100.0, 5.0, 1.0);
    assert_eq!(session.document().lines().next().unwrap().p2, Pos2::new(100.0, 5.0));
}

#[test]
fn test_edit_mode_drags_nearest_endpoint() {
    let mut session = EditingSession::default();
    draw_line(&mut session, (0.0, 0.0), (100.0, 0.0));
    let id = session.document().lines().next().unwrap().id();

    session.set_tool_mode(ToolMode::Edit);
    click(&mut session, 95.0, 2.0, 2.0);
    let handle = session.state().dragged_endpoint().unwrap();
    assert_eq!(handle.line, id);
    assert_eq!(handle.endpoint, Endpoint::P2);

    move_to(&mut session, 100.0, 60.0);
    assert_eq!(session.document().line(id).unwrap().p2, Pos2::new(100.0, 60.0));
    assert_eq!(session.document().line(id).unwrap().p1, Pos2::new(0.0, 0.0));

    click(&mut session, 100.0, 60.0, 3.0);
    assert!(session.state().is_idle());

    // Moving after the drag ended changes nothing
    move_to(&mut session, 0.0, 90.0);
    assert_eq!(session.document().line(id).unwrap().p2, Pos2::new(100.0, 60.0));
}

#[test]
fn test_edit_mode_drag_snaps_around_other_endpoint() {
    let mut session = EditingSession::default();
    draw_line(&mut session, (0.0, 0.0), (100.0, 0.0));
    let id = session.document().lines().next().unwrap().id();

    session.set_snap_to_angle(true);
    session.set_tool_mode(ToolMode::Edit);
    click(&mut session, 100.0, 2.0, 2.0);
    move_to(&mut session, 100.0, 95.0);

    let p2 = session.document().line(id).unwrap().p2;
    assert!((p2.x - p2.y).abs() < 1e-3, "expected a 45 degree line, got {p2:?}");
}

#[test]
fn test_leaving_edit_mode_ends_drag() {
    let mut session = EditingSession::default();
    draw_line(&mut session, (0.0, 0.0), (100.0, 0.0));
    session.set_tool_mode(ToolMode::Edit);
    click(&mut session, 100.0, 0.0, 2.0);
    assert!(session.state().is_dragging());

    session.set_tool_mode(ToolMode::Measure);
    assert_eq!(*session.state(), EditorState::Idle);
}

#[test]
fn test_removing_dragged_line_ends_drag() {
    let mut session = EditingSession::default();
    draw_line(&mut session, (0.0, 0.0), (100.0, 0.0));
    session.set_tool_mode(ToolMode::Edit);
    click(&mut session, 100.0, 0.0, 2.0);

    press(&mut session, 50.0, 0.0, PointerButton::Secondary, 2.5);
    assert!(session.document().is_empty());
    assert!(session.state().is_idle());
    move_to(&mut session, 10.0, 10.0);
}

#[test]
fn test_calibration_sets_scale() {
    let mut session = EditingSession::default();
    draw_line(&mut session, (0.0, 0.0), (50.0, 0.0));

    let request = double_click(&mut session, 25.0, 3.0).unwrap();
    assert_eq!(request.current_text, "50.00");
    assert_eq!(session.highlighted_line(), Some(request.line));

    assert!(session.apply_calibration(&request, "25"));
    assert_eq!(session.document().units_per_pixel(), 0.5);
    assert!(session.highlighted_line().is_none());

    draw_line(&mut session, (0.0, 100.0), (100.0, 100.0));
    let line = session.document().lines().nth(1).unwrap().clone();
    assert_eq!(session.document().calibrated_length(&line), 50.0);
}

#[test]
fn test_calibration_accepts_trailing_text() {
    let mut session = EditingSession::default();
    draw_line(&mut session, (0.0, 0.0), (100.0, 0.0));
    let request = double_click(&mut session, 50.0, 0.0).unwrap();

    assert!(session.apply_calibration(&request, " 10 mm"));
    assert_eq!(session.document().units_per_pixel(), 0.1);
}

#[test]
fn test_invalid_calibration_is_ignored() {
    let mut session = EditingSession::default();
    draw_line(&mut session, (0.0, 0.0), (100.0, 0.0));

    for input in ["abc", "", "-5", "0"] {
        let request = double_click(&mut session, 50.0, 0.0).unwrap();
        assert!(!session.apply_calibration(&request, input), "accepted {input:?}");
        assert_eq!(session.document().units_per_pixel(), 1.0);
    }
}

#[test]
fn test_unchanged_calibration_is_ignored() {
    let (mut session, events) = recording_session(SessionConfig::default());
    draw_line(&mut session, (0.0, 0.0), (100.0, 0.0));
    let request = double_click(&mut session, 50.0, 0.0).unwrap();

    let unchanged = request.current_text.clone();
    assert!(!session.apply_calibration(&request, &unchanged));
    assert!(
        !events
            .borrow()
            .iter()
            .any(|event| matches!(event, EditorEvent::ScaleChanged { .. }))
    );
}

#[test]
fn test_events_are_published() {
    let (mut session, events) = recording_session(SessionConfig::default());
    draw_line(&mut session, (0.0, 0.0), (100.0, 0.0));
    let id = session.document().lines().next().unwrap().id();

    session.set_tool_mode(ToolMode::Erase);
    click(&mut session, 50.0, 0.0, 2.0);

    let events = events.borrow();
    assert!(events.contains(&EditorEvent::LineCommitted {
        id,
        is_scale: false
    }));
    assert!(events.contains(&EditorEvent::ToolChanged {
        old: ToolMode::Measure,
        new: ToolMode::Erase
    }));
    assert_eq!(events.last(), Some(&EditorEvent::LineRemoved { id }));
    assert!(events.iter().any(|event| matches!(
        event,
        EditorEvent::StateChanged {
            new: EditorState::Drawing { .. },
            ..
        }
    )));
}

#[test]
fn test_reset_for_image() {
    let (mut session, events) = recording_session(SessionConfig::default());
    draw_line(&mut session, (0.0, 0.0), (100.0, 0.0));
    let request = double_click(&mut session, 50.0, 0.0).unwrap();
    session.apply_calibration(&request, "200");
    click(&mut session, 10.0, 10.0, 5.0);

    session.reset_for_image();
    assert!(session.document().is_empty());
    assert!(!session.document().has_edit_line());
    assert_eq!(session.document().units_per_pixel(), 1.0);
    assert!(session.state().is_idle());
    assert_eq!(events.borrow().last(), Some(&EditorEvent::DocumentReset));
}

#[test]
fn test_config_changes_hit_test_radius() {
    let mut session = EditingSession::default();
    draw_line(&mut session, (0.0, 0.0), (100.0, 0.0));
    assert!(double_click(&mut session, 50.0, 40.0).is_some());
    session.cancel_calibration();

    session.set_config(SessionConfig {
        hit_test_radius: 10.0,
        ..Default::default()
    });
    assert_eq!(session.document().hit_test_radius(), 10.0);
    assert!(double_click(&mut session, 50.0, 40.0).is_none());
}

#[test]
fn test_reading_aid_toggles() {
    let mut session = EditingSession::default();
    assert!(!session.config().show_angles);
    assert!(session.config().show_loupe);

    session.set_show_angles(true);
    session.set_show_loupe(false);
    assert!(session.config().show_angles);
    assert!(!session.config().show_loupe);
}
