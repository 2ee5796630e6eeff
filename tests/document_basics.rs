use augenmass::Document;
use egui::Pos2;

// Helper to build a document with three committed horizontal lines
fn create_test_document() -> Document {
    let mut doc = Document::new();
    for (x, y) in [(0.0, 0.0), (0.0, 100.0), (0.0, 200.0)] {
        doc.start_edit_line(Pos2::new(x, y), false);
        doc.update_edit_line(Pos2::new(x + 100.0, y));
        doc.commit_edit_line();
    }
    doc
}

#[test]
fn test_edit_line_roundtrip() {
    let mut doc = Document::new();
    assert!(!doc.has_edit_line());

    doc.start_edit_line(Pos2::new(10.0, 10.0), false);
    assert!(doc.has_edit_line());
    assert_eq!(doc.edit_line().unwrap().length(), 0.0);

    let updated = doc.update_edit_line(Pos2::new(13.0, 14.0));
    assert_eq!(updated.length(), 5.0);

    let id = doc.commit_edit_line();
    assert!(!doc.has_edit_line());
    assert_eq!(doc.line_count(), 1);
    assert_eq!(doc.line(id).unwrap().p2, Pos2::new(13.0, 14.0));
}

#[test]
fn test_forget_edit_line_is_idempotent() {
    let mut doc = Document::new();
    doc.start_edit_line(Pos2::new(1.0, 1.0), true);
    assert!(doc.forget_edit_line());
    assert!(!doc.forget_edit_line());
    assert!(doc.is_empty());
}

#[test]
fn test_remove_absent_line_is_noop() {
    let mut doc = create_test_document();
    let first = doc.lines().next().unwrap().id();

    assert!(doc.remove_line(first).is_some());
    assert!(doc.remove_line(first).is_none());
    assert_eq!(doc.line_count(), 2);
}

#[test]
fn test_edit_line_is_not_committed() {
    let mut doc = Document::new();
    doc.start_edit_line(Pos2::new(0.0, 0.0), false);
    doc.update_edit_line(Pos2::new(100.0, 0.0));

    assert_eq!(doc.lines().count(), 0);
    assert!(doc.find_closest(Pos2::new(50.0, 0.0)).is_none());

    let mut visited = 0;
    doc.for_all_lines(|_| visited += 1);
    assert_eq!(visited, 0);
}

#[test]
fn test_find_closest() {
    let doc = create_test_document();
    let ids: Vec<_> = doc.lines().map(|line| line.id()).collect();

    assert_eq!(doc.find_closest(Pos2::new(50.0, 10.0)).unwrap().id(), ids[0]);
    assert_eq!(doc.find_closest(Pos2::new(50.0, 90.0)).unwrap().id(), ids[1]);
    assert_eq!(doc.find_closest(Pos2::new(150.0, 200.0)).unwrap().id(), ids[2]);

    // Further than the hit-test radius from every line
    assert!(doc.find_closest(Pos2::new(500.0, 500.0)).is_none());
}

#[test]
fn test_find_closest_tie_prefers_first_line() {
    let doc = create_test_document();
    let first = doc.lines().next().unwrap().id();
    // Exactly halfway between the first and second line
    assert_eq!(doc.find_closest(Pos2::new(50.0, 50.0)).unwrap().id(), first);
}

#[test]
fn test_lines_keep_insertion_order() {
    let mut doc = create_test_document();
    let ids: Vec<_> = doc.lines().map(|line| line.id()).collect();
    doc.remove_line(ids[1]);

    let remaining: Vec<_> = doc.lines().map(|line| line.id()).collect();
    assert_eq!(remaining, vec![ids[0], ids[2]]);
}

#[test]
fn test_reset_restores_pixel_scale() {
    let mut doc = create_test_document();
    doc.set_units_per_pixel(0.25);
    let line = doc.lines().next().unwrap().clone();
    assert_eq!(doc.calibrated_length(&line), 25.0);

    doc.reset();
    assert!(doc.is_empty());
    assert_eq!(doc.units_per_pixel(), 1.0);
}

#[test]
#[should_panic]
fn test_commit_without_edit_line_panics() {
    let mut doc = Document::new();
    doc.commit_edit_line();
}

#[test]
#[should_panic]
fn test_second_edit_line_panics() {
    let mut doc = Document::new();
    doc.start_edit_line(Pos2::ZERO, false);
    doc.start_edit_line(Pos2::ZERO, false);
}
