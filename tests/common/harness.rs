//! Test harness wrapping [`CanvasController`] with a standard two-node
//! fixture and helpers for simulating user interactions.

#![allow(dead_code)]

use super::EventLog;
use workflow_canvas::{
    CanvasController, Key, Modifiers, NodeTemplate, Point, PointerButton,
};

/// Standard fixture: a text input at world (100, 100) and a text output at
/// world (400, 100), unconnected, with event logging attached.
///
/// Useful socket positions at zoom 1 with no pan:
/// - source output `out`: (286, 132)
/// - target input `in`:   (394, 132)
pub struct CanvasHarness {
    pub canvas: CanvasController,
    pub source: String,
    pub target: String,
    pub log: EventLog,
}

impl CanvasHarness {
    pub fn new() -> Self {
        let mut canvas = CanvasController::new();
        let log = EventLog::new();
        canvas.graph.subscribe(log.subscriber());
        let source = canvas
            .graph
            .add_node(&NodeTemplate::text_input(), Point::new(100.0, 100.0));
        let target = canvas
            .graph
            .add_node(&NodeTemplate::text_output(), Point::new(400.0, 100.0));
        log.clear();
        Self {
            canvas,
            source,
            target,
            log,
        }
    }

    /// Press, move and release the primary button along a straight path.
    pub fn drag(&mut self, from: Point, to: Point) {
        self.canvas
            .pointer_down(from, PointerButton::Primary, Modifiers::default());
        self.canvas.pointer_move(to);
        self.canvas.pointer_up(to);
    }

    /// Like [`Self::drag`] but with modifier keys held.
    pub fn drag_with(&mut self, from: Point, to: Point, mods: Modifiers) {
        self.canvas.pointer_down(from, PointerButton::Primary, mods);
        self.canvas.pointer_move(to);
        self.canvas.pointer_up(to);
    }

    /// Press and release the primary button without travel.
    pub fn click(&mut self, at: Point) {
        self.drag(at, at);
    }

    /// Press and release with modifiers held, without travel.
    pub fn click_with(&mut self, at: Point, mods: Modifiers) {
        self.drag_with(at, at, mods);
    }

    pub fn press_key(&mut self, key: Key) {
        self.canvas.key_down(key, Modifiers::default());
    }

    /// Wire the fixture's source output to the target input directly
    /// through the store, returning the connection id.
    pub fn connect_fixture(&mut self) -> String {
        use workflow_canvas::PortRef;
        self.canvas.graph.create_connection(
            PortRef::new(self.source.clone(), "out"),
            PortRef::new(self.target.clone(), "in"),
        )
    }
}

/// Shift held, nothing else.
pub fn shift() -> Modifiers {
    Modifiers {
        shift: true,
        ..Modifiers::default()
    }
}
