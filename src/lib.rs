//! Core state and interaction logic for a node-graph workflow canvas.
//!
//! This crate implements the non-rendering half of a visual workflow
//! editor: a graph store with typed ports and cascade deletion, a
//! selection model over nodes and connections, a zoom/pan viewport, the
//! Bezier geometry connections are drawn with, and a pointer/keyboard
//! controller that turns raw input events into graph mutations. No
//! drawing happens here; a UI layer renders from the state these types
//! expose ([`CubicBezier::to_svg_path`], [`grid::grid_lines`],
//! [`CanvasController::marquee_rect`], ...) and feeds events back in.
//!
//! ```
//! use workflow_canvas::{CanvasController, Modifiers, NodeTemplate, Point, PointerButton};
//!
//! let mut canvas = CanvasController::new();
//! let a = canvas.graph.add_node(&NodeTemplate::text_input(), Point::new(100.0, 100.0));
//! let b = canvas.graph.add_node(&NodeTemplate::text_output(), Point::new(400.0, 100.0));
//!
//! // Drag from the source's output socket to the target's input socket
//! canvas.pointer_down(Point::new(286.0, 132.0), PointerButton::Primary, Modifiers::default());
//! canvas.pointer_move(Point::new(394.0, 132.0));
//! canvas.pointer_up(Point::new(394.0, 132.0));
//!
//! let conn = &canvas.graph.connections()[0];
//! assert_eq!(conn.source_node_id, a);
//! assert_eq!(conn.target_node_id, b);
//! ```

pub mod controller;
pub mod geometry;
pub mod graph;
pub mod grid;
pub mod path;
pub mod selection;
pub mod viewport;

pub use controller::{
    CanvasController, Gesture, Key, Modifiers, PointerButton, CLICK_DRAG_THRESHOLD,
};
pub use geometry::{Point, PortSide, Rect, NODE_HEIGHT, NODE_WIDTH};
pub use graph::{
    Connection, ConnectionError, GraphEvent, GraphSnapshot, GraphStore, Node, NodeData,
    NodeTemplate, Port, PortHit, PortRef, PortRole,
};
pub use path::{CubicBezier, CURVE_SAMPLES};
pub use selection::{SelectionKind, SelectionManager};
pub use viewport::{Viewport, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
