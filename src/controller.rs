//! Pointer and keyboard interaction for the canvas.
//!
//! [`CanvasController`] owns the graph, selection and viewport, and turns
//! raw pointer events into gestures. Exactly one gesture is active at a
//! time; a new gesture can only begin from [`Gesture::Idle`], so a stray
//! button press during a drag cannot fork the interaction state.
//!
//! All pointer events arrive in screen coordinates. The controller
//! converts through its viewport before touching the graph, which keeps
//! drag deltas correct at any zoom level.

use crate::geometry::{Point, PortSide, Rect};
use crate::graph::{GraphStore, NodeData, NodeTemplate, PortHit, PortRole};
use crate::path::CubicBezier;
use crate::selection::{SelectionKind, SelectionManager};
use crate::viewport::Viewport;

/// Pointer travel below this screen-space distance counts as a click
/// rather than a marquee drag.
pub const CLICK_DRAG_THRESHOLD: f32 = 2.0;

/// Which pointer button initiated an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Modifier keys held during a pointer or keyboard event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    /// The platform "command" modifier: ctrl, or meta on macOS.
    pub fn primary(&self) -> bool {
        self.ctrl || self.meta
    }

    /// Whether this event extends the selection instead of replacing it.
    pub fn additive(&self) -> bool {
        self.shift
    }
}

/// Keyboard keys the canvas reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Delete,
    Backspace,
    Z,
}

/// The active pointer gesture.
#[derive(Clone, Debug, PartialEq)]
pub enum Gesture {
    Idle,
    /// Dragging the background with a pan button; moves the viewport
    /// offset by the raw screen delta.
    Panning,
    /// Moving a node; the node tracks the pointer from where it was
    /// grabbed, divided by zoom so world motion matches screen motion.
    DraggingNode {
        node_id: String,
        start_screen: Point,
        node_start: Point,
    },
    /// Dragging a pending connection out of a port.
    DrawingConnection {
        origin: PortHit,
        current_world: Point,
    },
    /// Dragging a selection rectangle over empty canvas.
    MarqueeSelecting {
        start_screen: Point,
        start_world: Point,
        current_world: Point,
        additive: bool,
        base_nodes: Vec<String>,
        base_connections: Vec<String>,
    },
}

type UndoHandler = Box<dyn FnMut()>;

/// Owns the canvas state and drives it from input events.
#[derive(Default)]
pub struct CanvasController {
    pub graph: GraphStore,
    pub selection: SelectionManager,
    pub viewport: Viewport,
    gesture: Gesture,
    last_screen: Point,
    undo_handler: Option<UndoHandler>,
}

impl Default for Gesture {
    fn default() -> Self {
        Gesture::Idle
    }
}

impl CanvasController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a controller around an existing graph, e.g. one restored
    /// from a snapshot.
    pub fn with_graph(graph: GraphStore) -> Self {
        Self {
            graph,
            ..Self::default()
        }
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Register the callback invoked by the undo shortcut. History
    /// itself lives with the host application, not the canvas.
    pub fn set_undo_handler(&mut self, f: impl FnMut() + 'static) {
        self.undo_handler = Some(Box::new(f));
    }

    // === Pointer events ===

    pub fn pointer_down(&mut self, screen: Point, button: PointerButton, mods: Modifiers) {
        self.last_screen = screen;
        if self.gesture != Gesture::Idle {
            return;
        }
        let world = self.viewport.screen_to_world(screen);

        let pan_button = button == PointerButton::Middle
            || (button == PointerButton::Primary && mods.alt);
        if pan_button {
            self.gesture = Gesture::Panning;
            return;
        }
        // Secondary is reserved for host context menus
        if button != PointerButton::Primary {
            return;
        }

        // Ports sit partly outside the node body and take priority over it
        if let Some(origin) = self.graph.port_at_default(world) {
            self.gesture = Gesture::DrawingConnection {
                origin,
                current_world: world,
            };
            return;
        }

        if let Some(node) = self.graph.node_at(world) {
            let node_id = node.id.clone();
            let node_start = node.position;
            // The modifier changes the selection action, not the gesture
            if mods.additive() {
                self.selection.toggle(SelectionKind::Node, &node_id);
            } else if !self.selection.is_node_selected(&node_id) {
                self.selection.select_only(SelectionKind::Node, &node_id);
            }
            self.gesture = Gesture::DraggingNode {
                node_id,
                start_screen: screen,
                node_start,
            };
            return;
        }

        if let Some(connection_id) = self.connection_at(world) {
            if mods.additive() {
                self.selection.toggle(SelectionKind::Connection, &connection_id);
            } else {
                self.selection.select_only(SelectionKind::Connection, &connection_id);
            }
            return;
        }

        // Empty canvas: start a marquee; whether it ends up a click or a
        // drag is decided by travel distance on release.
        let (base_nodes, base_connections) = if mods.additive() {
            (
                self.selection.selected_nodes().iter().cloned().collect(),
                self.selection
                    .selected_connections()
                    .iter()
                    .cloned()
                    .collect(),
            )
        } else {
            (Vec::new(), Vec::new())
        };
        self.gesture = Gesture::MarqueeSelecting {
            start_screen: screen,
            start_world: world,
            current_world: world,
            additive: mods.additive(),
            base_nodes,
            base_connections,
        };
    }

    pub fn pointer_move(&mut self, screen: Point) {
        let world = self.viewport.screen_to_world(screen);
        match self.gesture.clone() {
            Gesture::Idle => {}
            Gesture::Panning => {
                self.viewport.pan_by(screen - self.last_screen);
            }
            Gesture::DraggingNode {
                node_id,
                start_screen,
                node_start,
            } => {
                let new_position = node_start + (screen - start_screen) / self.viewport.zoom;
                self.graph.move_node(&node_id, new_position);
            }
            Gesture::DrawingConnection { origin, .. } => {
                self.gesture = Gesture::DrawingConnection {
                    origin,
                    current_world: world,
                };
            }
            Gesture::MarqueeSelecting {
                start_screen,
                start_world,
                additive,
                base_nodes,
                base_connections,
                ..
            } => {
                let rect = Rect::from_points(start_world, world);
                let mut nodes = self.graph.nodes_in_rect(&rect);
                let mut connections = self.graph.connections_in_rect(&rect);
                if additive {
                    nodes.extend(base_nodes.iter().cloned());
                    connections.extend(base_connections.iter().cloned());
                }
                self.selection.replace(nodes, connections);
                self.gesture = Gesture::MarqueeSelecting {
                    start_screen,
                    start_world,
                    current_world: world,
                    additive,
                    base_nodes,
                    base_connections,
                };
            }
        }
        self.last_screen = screen;
    }

    pub fn pointer_up(&mut self, screen: Point) {
        self.pointer_move(screen);
        let gesture = std::mem::replace(&mut self.gesture, Gesture::Idle);
        match gesture {
            Gesture::DrawingConnection { origin, .. } => {
                let world = self.viewport.screen_to_world(screen);
                self.commit_connection(origin, world);
            }
            Gesture::MarqueeSelecting {
                start_screen,
                additive,
                ..
            } => {
                let travel = screen - start_screen;
                let is_click =
                    travel.x.abs() < CLICK_DRAG_THRESHOLD && travel.y.abs() < CLICK_DRAG_THRESHOLD;
                if is_click && !additive {
                    self.selection.clear();
                }
            }
            Gesture::Idle
            | Gesture::Panning
            | Gesture::DraggingNode { .. } => {}
        }
    }

    /// The pointer left the canvas: finish the active gesture at the last
    /// known position instead of leaving it stuck.
    pub fn pointer_leave(&mut self) {
        self.pointer_up(self.last_screen);
    }

    fn commit_connection(&mut self, origin: PortHit, world: Point) {
        let Some(hit) = self.graph.port_at_default(world) else {
            log::debug!("connection from {} dropped on empty canvas", origin.port_id);
            return;
        };
        match self.graph.resolve_connection(&origin.port_ref(), &hit.port_ref()) {
            Ok((source, target)) => {
                self.graph.create_connection(source, target);
            }
            Err(err) => {
                log::debug!("rejected connection: {err}");
            }
        }
    }

    // === Keyboard ===

    pub fn key_down(&mut self, key: Key, mods: Modifiers) {
        match key {
            Key::Delete | Key::Backspace => self.delete_selection(),
            Key::Z if mods.primary() => {
                if let Some(handler) = self.undo_handler.as_mut() {
                    handler();
                }
            }
            Key::Z => {}
        }
    }

    /// Delete every selected node (with its connection cascade) if any
    /// node is selected; otherwise delete every selected connection.
    /// Node deletion wins so a mixed marquee selection does not also
    /// destroy connections between surviving nodes.
    pub fn delete_selection(&mut self) {
        let nodes: Vec<String> = self.selection.selected_nodes().iter().cloned().collect();
        if !nodes.is_empty() {
            for id in &nodes {
                self.graph.delete_node(id);
            }
        } else {
            let connections: Vec<String> = self
                .selection
                .selected_connections()
                .iter()
                .cloned()
                .collect();
            for id in &connections {
                self.graph.delete_connection(id);
            }
        }
        self.selection.clear();
    }

    // === Palette and configuration ===

    /// Spawn a node from a serialized palette template at a screen
    /// position. The new node becomes the sole selection, matching the
    /// just-dropped-it editing flow; its id is returned.
    pub fn drop_template(&mut self, payload: &str, screen: Point) -> serde_json::Result<String> {
        let template = NodeTemplate::from_json(payload)?;
        let world = self.viewport.screen_to_world(screen);
        let id = self.graph.add_node(&template, world);
        self.selection.select_only(SelectionKind::Node, &id);
        Ok(id)
    }

    /// Current configuration payload for the external panel.
    pub fn configure_node(&self, node_id: &str) -> Option<NodeData> {
        self.graph.node(node_id).map(|n| n.data.clone())
    }

    /// Write a configuration payload back from the external panel.
    pub fn apply_node_config(&mut self, node_id: &str, data: NodeData) {
        self.graph.update_node_data(node_id, data);
    }

    // === Render helpers ===

    /// The marquee rectangle in world space, while one is being dragged.
    pub fn marquee_rect(&self) -> Option<Rect> {
        match &self.gesture {
            Gesture::MarqueeSelecting {
                start_world,
                current_world,
                ..
            } => Some(Rect::from_points(*start_world, *current_world)),
            _ => None,
        }
    }

    /// The pending connection curve, while one is being dragged out of a
    /// port. Drawn output-to-pointer regardless of which end was grabbed.
    pub fn connection_preview(&self) -> Option<CubicBezier> {
        match &self.gesture {
            Gesture::DrawingConnection {
                origin,
                current_world,
            } => Some(match origin.role {
                PortRole::Output => {
                    CubicBezier::connection(origin.position, *current_world, PortSide::Left)
                }
                PortRole::Input => {
                    CubicBezier::connection(*current_world, origin.position, PortSide::Left)
                }
            }),
            _ => None,
        }
    }

    fn connection_at(&self, world: Point) -> Option<String> {
        // Zero-area rect plus the standard padding gives a small pick slop
        let probe = Rect::from_points(world, world);
        self.graph.connections_in_rect(&probe).pop()
    }
}
