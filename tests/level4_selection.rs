//! Level 4: Selection Tests
//!
//! Click selection over nodes and connections, additive clicks, marquee
//! selection (including connections crossed by the marquee) and the
//! click-clears-selection rule.

mod common;

use common::harness::{shift, CanvasHarness};
use workflow_canvas::{Gesture, Point, SelectionKind};

#[test]
fn test_click_selects_single_node() {
    let mut h = CanvasHarness::new();
    h.click(Point::new(150.0, 130.0));

    assert!(h.canvas.selection.is_node_selected(&h.source));
    assert_eq!(h.canvas.selection.selected_nodes().len(), 1);
}

#[test]
fn test_click_other_node_replaces_selection() {
    let mut h = CanvasHarness::new();
    h.click(Point::new(150.0, 130.0));
    h.click(Point::new(450.0, 130.0));

    assert!(!h.canvas.selection.is_node_selected(&h.source));
    assert!(h.canvas.selection.is_node_selected(&h.target));
}

#[test]
fn test_shift_click_accumulates_nodes() {
    let mut h = CanvasHarness::new();
    h.click(Point::new(150.0, 130.0));
    h.click_with(Point::new(450.0, 130.0), shift());

    assert!(h.canvas.selection.is_node_selected(&h.source));
    assert!(h.canvas.selection.is_node_selected(&h.target));
}

#[test]
fn test_shift_click_toggles_off() {
    let mut h = CanvasHarness::new();
    h.click(Point::new(150.0, 130.0));
    h.click_with(Point::new(450.0, 130.0), shift());
    h.click_with(Point::new(150.0, 130.0), shift());

    assert!(!h.canvas.selection.is_node_selected(&h.source));
    assert!(h.canvas.selection.is_node_selected(&h.target));
}

#[test]
fn test_click_connection_selects_it() {
    let mut h = CanvasHarness::new();
    let conn = h.connect_fixture();

    // Midpoint of the horizontal curve between the sockets
    h.click(Point::new(340.0, 132.0));

    assert!(h.canvas.selection.is_connection_selected(&conn));
    assert!(h.canvas.selection.selected_nodes().is_empty());
}

#[test]
fn test_selecting_node_after_connection_drops_it() {
    let mut h = CanvasHarness::new();
    let conn = h.connect_fixture();

    h.click(Point::new(340.0, 132.0));
    h.click(Point::new(150.0, 130.0));

    assert!(!h.canvas.selection.is_connection_selected(&conn));
    assert!(h.canvas.selection.is_node_selected(&h.source));
}

#[test]
fn test_background_click_clears() {
    let mut h = CanvasHarness::new();
    h.click(Point::new(150.0, 130.0));
    h.click(Point::new(700.0, 500.0));

    assert!(h.canvas.selection.is_empty());
}

#[test]
fn test_marquee_selects_enclosed_node_only() {
    let mut h = CanvasHarness::new();
    // Source footprint 100..280 x 100..180 intersects; target 400..580 does not
    h.drag(Point::new(50.0, 50.0), Point::new(350.0, 250.0));

    assert!(h.canvas.selection.is_node_selected(&h.source));
    assert!(!h.canvas.selection.is_node_selected(&h.target));
}

#[test]
fn test_marquee_from_any_corner() {
    let mut h = CanvasHarness::new();
    // Dragged up-left instead of down-right
    h.drag(Point::new(350.0, 250.0), Point::new(50.0, 50.0));
    assert!(h.canvas.selection.is_node_selected(&h.source));
}

#[test]
fn test_marquee_touching_footprint_counts() {
    let mut h = CanvasHarness::new();
    // Marquee right edge lands exactly on the source's left edge
    h.drag(Point::new(20.0, 50.0), Point::new(100.0, 250.0));
    assert!(h.canvas.selection.is_node_selected(&h.source));
}

#[test]
fn test_marquee_selects_crossed_connection() {
    let mut h = CanvasHarness::new();
    let conn = h.connect_fixture();

    // A band over the curve between the two nodes, touching neither body
    h.drag(Point::new(300.0, 50.0), Point::new(380.0, 250.0));

    assert!(h.canvas.selection.is_connection_selected(&conn));
    assert!(h.canvas.selection.selected_nodes().is_empty());
}

#[test]
fn test_marquee_live_updates_while_dragging() {
    let mut h = CanvasHarness::new();
    h.canvas.pointer_down(
        Point::new(50.0, 50.0),
        workflow_canvas::PointerButton::Primary,
        workflow_canvas::Modifiers::default(),
    );
    h.canvas.pointer_move(Point::new(350.0, 250.0));

    // Still mid-gesture, selection already reflects the rectangle
    assert!(matches!(
        h.canvas.gesture(),
        Gesture::MarqueeSelecting { .. }
    ));
    assert!(h.canvas.selection.is_node_selected(&h.source));
    let rect = h.canvas.marquee_rect().expect("marquee active");
    assert_eq!(rect.min, Point::new(50.0, 50.0));
    assert_eq!(rect.max, Point::new(350.0, 250.0));

    // Shrinking the rectangle deselects again
    h.canvas.pointer_move(Point::new(80.0, 80.0));
    assert!(!h.canvas.selection.is_node_selected(&h.source));

    h.canvas.pointer_up(Point::new(80.0, 80.0));
    assert!(h.canvas.marquee_rect().is_none());
}

#[test]
fn test_additive_marquee_unions_existing_selection() {
    let mut h = CanvasHarness::new();
    h.click(Point::new(450.0, 130.0));
    assert!(h.canvas.selection.is_node_selected(&h.target));

    h.drag_with(Point::new(50.0, 50.0), Point::new(350.0, 250.0), shift());

    assert!(h.canvas.selection.is_node_selected(&h.source));
    assert!(h.canvas.selection.is_node_selected(&h.target));
}

#[test]
fn test_plain_marquee_replaces_existing_selection() {
    let mut h = CanvasHarness::new();
    h.click(Point::new(450.0, 130.0));

    h.drag(Point::new(50.0, 50.0), Point::new(350.0, 250.0));

    assert!(h.canvas.selection.is_node_selected(&h.source));
    assert!(!h.canvas.selection.is_node_selected(&h.target));
}

#[test]
fn test_marquee_under_zoom_uses_world_space() {
    let mut h = CanvasHarness::new();
    h.canvas.viewport.zoom = 0.5;

    // Screen (25, 25)-(175, 125) maps to world (50, 50)-(350, 250)
    h.drag(Point::new(25.0, 25.0), Point::new(175.0, 125.0));

    assert!(h.canvas.selection.is_node_selected(&h.source));
    assert!(!h.canvas.selection.is_node_selected(&h.target));
}

#[test]
fn test_sub_threshold_marquee_is_a_click() {
    let mut h = CanvasHarness::new();
    h.canvas.selection.toggle(SelectionKind::Node, &h.source);

    // 1px of travel stays below the drag threshold
    h.drag(Point::new(700.0, 500.0), Point::new(701.0, 501.0));

    assert!(h.canvas.selection.is_empty());
}

#[test]
fn test_pointer_leave_commits_marquee() {
    let mut h = CanvasHarness::new();
    h.canvas.pointer_down(
        Point::new(50.0, 50.0),
        workflow_canvas::PointerButton::Primary,
        workflow_canvas::Modifiers::default(),
    );
    h.canvas.pointer_move(Point::new(350.0, 250.0));
    h.canvas.pointer_leave();

    assert_eq!(*h.canvas.gesture(), Gesture::Idle);
    assert!(h.canvas.selection.is_node_selected(&h.source));
}
