//! The workflow graph data model and its owning store.
//!
//! [`GraphStore`] is the authoritative owner of the node and connection
//! collections. It is a plain in-memory structure with change
//! notifications, so any UI layer (immediate-mode canvas, retained scene
//! graph or DOM) can mirror it. All mutation is synchronous and total:
//! operations on unknown ids are no-ops, and deleting a node removes its
//! incident connections in the same operation.

use crate::geometry::{node_rect, port_world_position, Point, PortSide, Rect};
use crate::hit_test::{self, MARQUEE_PADDING, PORT_HIT_RADIUS};
use crate::path::CubicBezier;
use serde::{Deserialize, Serialize};

/// Whether a port is a connection target (input) or origin (output).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PortRole {
    Input,
    Output,
}

/// A typed attachment point on a node. Ids are unique within the owning
/// node, not globally.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub id: String,
    pub label: String,
    #[serde(rename = "position")]
    pub side: PortSide,
}

impl Port {
    pub fn new(id: impl Into<String>, label: impl Into<String>, side: PortSide) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            side,
        }
    }
}

/// Per-node-type configuration payload.
///
/// The canvas treats this as opaque: it is written by the external
/// configuration panel and shipped to the execution backend, but the
/// editor itself never inspects the contents, only the tag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum NodeData {
    TextInput,
    VoiceInput(VoiceInputData),
    AiModel(AiModelData),
    RagDocuments(RagDocumentsData),
    GoogleSheets(GoogleSheetsData),
    IfCondition(IfConditionData),
    TextOutput,
    VoiceOutput(VoiceOutputData),
}

impl NodeData {
    /// The wire tag for this node type, as the backend expects it.
    pub fn kind(&self) -> &'static str {
        match self {
            NodeData::TextInput => "text-input",
            NodeData::VoiceInput(_) => "voice-input",
            NodeData::AiModel(_) => "ai-model",
            NodeData::RagDocuments(_) => "rag-documents",
            NodeData::GoogleSheets(_) => "google-sheets",
            NodeData::IfCondition(_) => "if-condition",
            NodeData::TextOutput => "text-output",
            NodeData::VoiceOutput(_) => "voice-output",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VoiceInputData {
    pub language: String,
}

impl Default for VoiceInputData {
    fn default() -> Self {
        Self {
            language: "en".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiModelData {
    pub model_name: String,
    pub system_prompt: String,
    pub temperature: f32,
    pub output_variable_name: String,
}

impl Default for AiModelData {
    fn default() -> Self {
        Self {
            model_name: "gpt-4o-mini".into(),
            system_prompt: "You are a helpful assistant.".into(),
            temperature: 0.7,
            output_variable_name: String::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RagDocumentsData {
    pub documents_path: String,
    pub top_k: u32,
}

impl Default for RagDocumentsData {
    fn default() -> Self {
        Self {
            documents_path: "./documents".into(),
            top_k: 3,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GoogleSheetsData {
    pub spreadsheet_id: String,
    pub sheet_name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IfConditionData {
    pub condition_type: String,
    pub field: String,
    pub condition_value: String,
}

impl Default for IfConditionData {
    fn default() -> Self {
        Self {
            condition_type: "contains".into(),
            field: "response".into(),
            condition_value: String::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VoiceOutputData {
    pub voice_id: String,
}

/// A positioned unit of the workflow graph with typed ports.
///
/// `position` is the top-left corner in world space; the footprint is the
/// fixed 180×80 rectangle of [`crate::geometry`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(flatten)]
    pub data: NodeData,
    pub position: Point,
    pub inputs: Vec<Port>,
    pub outputs: Vec<Port>,
}

impl Node {
    pub fn rect(&self) -> Rect {
        node_rect(self.position)
    }

    /// Look up a port and its role by id.
    pub fn port(&self, port_id: &str) -> Option<(&Port, PortRole)> {
        self.inputs
            .iter()
            .find(|p| p.id == port_id)
            .map(|p| (p, PortRole::Input))
            .or_else(|| {
                self.outputs
                    .iter()
                    .find(|p| p.id == port_id)
                    .map(|p| (p, PortRole::Output))
            })
    }

    /// World-space socket center for one of this node's ports.
    ///
    /// The socket index counts only ports on the same side: a bottom
    /// context input does not shift the left-hand input rows.
    pub fn port_position(&self, port_id: &str) -> Option<Point> {
        let (port, role) = self.port(port_id)?;
        let group = match role {
            PortRole::Input => &self.inputs,
            PortRole::Output => &self.outputs,
        };
        let index = group
            .iter()
            .filter(|p| p.side == port.side)
            .position(|p| p.id == port_id)?;
        Some(port_world_position(self.position, port.side, index))
    }

    /// All ports with their roles, inputs first.
    pub fn ports(&self) -> impl Iterator<Item = (&Port, PortRole)> {
        self.inputs
            .iter()
            .map(|p| (p, PortRole::Input))
            .chain(self.outputs.iter().map(|p| (p, PortRole::Output)))
    }
}

/// A directed edge from an output port to an input port.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: String,
    pub source_node_id: String,
    pub source_port_id: String,
    pub target_node_id: String,
    pub target_port_id: String,
}

impl Connection {
    /// Whether either endpoint references the given node.
    pub fn touches(&self, node_id: &str) -> bool {
        self.source_node_id == node_id || self.target_node_id == node_id
    }
}

/// Addresses one port on one node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PortRef {
    pub node_id: String,
    pub port_id: String,
}

impl PortRef {
    pub fn new(node_id: impl Into<String>, port_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            port_id: port_id.into(),
        }
    }
}

/// Result of a successful port hit-test.
#[derive(Clone, Debug, PartialEq)]
pub struct PortHit {
    pub node_id: String,
    pub port_id: String,
    pub role: PortRole,
    pub position: Point,
}

impl PortHit {
    pub fn port_ref(&self) -> PortRef {
        PortRef::new(self.node_id.clone(), self.port_id.clone())
    }
}

/// Why two ports cannot be connected.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum ConnectionError {
    #[error("port {port_id} not found on node {node_id}")]
    PortNotFound { node_id: String, port_id: String },
    #[error("cannot connect a node to itself")]
    SameNode,
    #[error("must connect an output to an input")]
    SameRole,
}

/// Palette payload used to spawn a node: the default configuration and
/// port lists for one node type. Arrives as serialized JSON in the
/// drag-and-drop transfer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeTemplate {
    #[serde(flatten)]
    pub data: NodeData,
    #[serde(default)]
    pub default_inputs: Vec<Port>,
    #[serde(default)]
    pub default_outputs: Vec<Port>,
}

impl NodeTemplate {
    /// Parse a template from the drag-and-drop JSON payload.
    pub fn from_json(payload: &str) -> serde_json::Result<Self> {
        serde_json::from_str(payload)
    }

    fn with_ports(data: NodeData, inputs: Vec<Port>, outputs: Vec<Port>) -> Self {
        Self {
            data,
            default_inputs: inputs,
            default_outputs: outputs,
        }
    }

    pub fn text_input() -> Self {
        Self::with_ports(
            NodeData::TextInput,
            vec![],
            vec![Port::new("out", "Out", PortSide::Right)],
        )
    }

    pub fn voice_input() -> Self {
        Self::with_ports(
            NodeData::VoiceInput(VoiceInputData::default()),
            vec![],
            vec![Port::new("out", "Out", PortSide::Right)],
        )
    }

    pub fn ai_model() -> Self {
        Self::with_ports(
            NodeData::AiModel(AiModelData::default()),
            vec![
                Port::new("in", "In", PortSide::Left),
                Port::new("context", "Context", PortSide::Bottom),
            ],
            vec![Port::new("out", "Out", PortSide::Right)],
        )
    }

    pub fn rag_documents() -> Self {
        Self::with_ports(
            NodeData::RagDocuments(RagDocumentsData::default()),
            vec![],
            vec![Port::new("out", "Context", PortSide::Right)],
        )
    }

    pub fn google_sheets() -> Self {
        Self::with_ports(
            NodeData::GoogleSheets(GoogleSheetsData::default()),
            vec![],
            vec![Port::new("out", "Data", PortSide::Right)],
        )
    }

    pub fn if_condition() -> Self {
        Self::with_ports(
            NodeData::IfCondition(IfConditionData::default()),
            vec![
                Port::new("in", "In", PortSide::Left),
                Port::new("context", "Context", PortSide::Bottom),
            ],
            vec![
                Port::new("true", "True", PortSide::Right),
                Port::new("false", "False", PortSide::Right),
            ],
        )
    }

    pub fn text_output() -> Self {
        Self::with_ports(
            NodeData::TextOutput,
            vec![Port::new("in", "In", PortSide::Left)],
            vec![],
        )
    }

    pub fn voice_output() -> Self {
        Self::with_ports(
            NodeData::VoiceOutput(VoiceOutputData::default()),
            vec![Port::new("in", "In", PortSide::Left)],
            vec![],
        )
    }
}

/// Change notification emitted after every committed mutation.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphEvent {
    NodeAdded(String),
    NodeMoved(String),
    /// A node was deleted together with every connection touching it.
    NodeRemoved {
        node_id: String,
        connection_ids: Vec<String>,
    },
    NodeDataChanged(String),
    ConnectionAdded(String),
    ConnectionRemoved(String),
}

type Subscriber = Box<dyn Fn(&GraphEvent)>;

/// Serializable view of the graph for save/run requests.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
}

/// Authoritative owner of the node/connection collections.
#[derive(Default)]
pub struct GraphStore {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
    next_node_id: u64,
    next_connection_id: u64,
    subscribers: Vec<Subscriber>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from a serialized snapshot. Id allocation resumes
    /// past the highest numeric suffix present so restored graphs keep
    /// producing unique ids.
    pub fn restore(snapshot: GraphSnapshot) -> Self {
        let next_node_id = next_counter(snapshot.nodes.iter().map(|n| n.id.as_str()), "node-");
        let next_connection_id = next_counter(
            snapshot.connections.iter().map(|c| c.id.as_str()),
            "conn-",
        );
        Self {
            nodes: snapshot.nodes,
            connections: snapshot.connections,
            next_node_id,
            next_connection_id,
            subscribers: Vec::new(),
        }
    }

    /// Clone the collections for persistence or a run request.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes.clone(),
            connections: self.connections.clone(),
        }
    }

    /// Register a change listener. Listeners are called synchronously
    /// after each mutation commits.
    pub fn subscribe(&mut self, f: impl Fn(&GraphEvent) + 'static) {
        self.subscribers.push(Box::new(f));
    }

    fn emit(&self, event: GraphEvent) {
        for sub in &self.subscribers {
            sub(&event);
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    pub fn connection(&self, connection_id: &str) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == connection_id)
    }

    // === Mutations ===

    /// Spawn a node from a palette template at a world position. Returns
    /// the id of the new node.
    pub fn add_node(&mut self, template: &NodeTemplate, position: Point) -> String {
        self.next_node_id += 1;
        let id = format!("node-{}", self.next_node_id);
        log::debug!("add node {id} ({}) at {position:?}", template.data.kind());
        self.nodes.push(Node {
            id: id.clone(),
            data: template.data.clone(),
            position,
            inputs: template.default_inputs.clone(),
            outputs: template.default_outputs.clone(),
        });
        self.emit(GraphEvent::NodeAdded(id.clone()));
        id
    }

    /// Replace a node's position. Unknown ids are a silent no-op; no
    /// bounds are enforced.
    pub fn move_node(&mut self, node_id: &str, position: Point) {
        let Some(node) = self.nodes.iter_mut().find(|n| n.id == node_id) else {
            return;
        };
        node.position = position;
        log::trace!("move node {node_id} to {position:?}");
        self.emit(GraphEvent::NodeMoved(node_id.to_string()));
    }

    /// Write back a configuration payload from the external panel. The
    /// panel owns `data` only; geometry and ports are never touched here.
    pub fn update_node_data(&mut self, node_id: &str, data: NodeData) {
        let Some(node) = self.nodes.iter_mut().find(|n| n.id == node_id) else {
            return;
        };
        node.data = data;
        self.emit(GraphEvent::NodeDataChanged(node_id.to_string()));
    }

    /// Remove a node and, atomically, every connection touching it.
    pub fn delete_node(&mut self, node_id: &str) {
        let Some(index) = self.nodes.iter().position(|n| n.id == node_id) else {
            return;
        };
        self.nodes.remove(index);
        let removed: Vec<String> = self
            .connections
            .iter()
            .filter(|c| c.touches(node_id))
            .map(|c| c.id.clone())
            .collect();
        self.connections.retain(|c| !c.touches(node_id));
        debug_assert!(
            self.connections.iter().all(|c| !c.touches(node_id)),
            "dangling connection survived node deletion"
        );
        log::debug!(
            "delete node {node_id}, cascaded {} connection(s)",
            removed.len()
        );
        self.emit(GraphEvent::NodeRemoved {
            node_id: node_id.to_string(),
            connection_ids: removed,
        });
    }

    /// Append a pre-validated connection (see [`Self::resolve_connection`])
    /// and return its id.
    pub fn create_connection(&mut self, source: PortRef, target: PortRef) -> String {
        self.next_connection_id += 1;
        let id = format!("conn-{}", self.next_connection_id);
        log::debug!(
            "connect {}:{} -> {}:{}",
            source.node_id,
            source.port_id,
            target.node_id,
            target.port_id
        );
        self.connections.push(Connection {
            id: id.clone(),
            source_node_id: source.node_id,
            source_port_id: source.port_id,
            target_node_id: target.node_id,
            target_port_id: target.port_id,
        });
        self.emit(GraphEvent::ConnectionAdded(id.clone()));
        id
    }

    /// Remove a connection if present, else no-op.
    pub fn delete_connection(&mut self, connection_id: &str) {
        let before = self.connections.len();
        self.connections.retain(|c| c.id != connection_id);
        if self.connections.len() != before {
            log::debug!("delete connection {connection_id}");
            self.emit(GraphEvent::ConnectionRemoved(connection_id.to_string()));
        }
    }

    // === Connection validation ===

    /// Check that two port endpoints can be connected and normalize them
    /// so the output side is always the source.
    ///
    /// Rules: both ports must exist, they must lie on different nodes,
    /// and exactly one of them must be an output. A port may participate
    /// in any number of connections, so duplicates are not rejected.
    pub fn resolve_connection(
        &self,
        a: &PortRef,
        b: &PortRef,
    ) -> Result<(PortRef, PortRef), ConnectionError> {
        let role_a = self.port_role(a)?;
        let role_b = self.port_role(b)?;

        if a.node_id == b.node_id {
            return Err(ConnectionError::SameNode);
        }
        if role_a == role_b {
            return Err(ConnectionError::SameRole);
        }

        if role_a == PortRole::Output {
            Ok((a.clone(), b.clone()))
        } else {
            Ok((b.clone(), a.clone()))
        }
    }

    fn port_role(&self, port: &PortRef) -> Result<PortRole, ConnectionError> {
        self.node(&port.node_id)
            .and_then(|n| n.port(&port.port_id))
            .map(|(_, role)| role)
            .ok_or_else(|| ConnectionError::PortNotFound {
                node_id: port.node_id.clone(),
                port_id: port.port_id.clone(),
            })
    }

    // === World-space queries ===

    /// World-space socket center for a port addressed by node and port id.
    pub fn port_position(&self, port: &PortRef) -> Option<Point> {
        self.node(&port.node_id)?.port_position(&port.port_id)
    }

    /// The Bezier curve a connection is rendered as, if both endpoints
    /// still resolve.
    pub fn connection_curve(&self, connection: &Connection) -> Option<CubicBezier> {
        let source_node = self.node(&connection.source_node_id)?;
        let target_node = self.node(&connection.target_node_id)?;
        let source = source_node.port_position(&connection.source_port_id)?;
        let target = target_node.port_position(&connection.target_port_id)?;
        let (target_port, _) = target_node.port(&connection.target_port_id)?;
        Some(CubicBezier::connection(source, target, target_port.side))
    }

    /// Topmost port socket under a world-space pointer position.
    ///
    /// Later nodes draw on top, so the search walks the collection in
    /// reverse insertion order.
    pub fn port_at(&self, world: Point, radius: f32) -> Option<PortHit> {
        for node in self.nodes.iter().rev() {
            for (port, role) in node.ports() {
                let Some(position) = node.port_position(&port.id) else {
                    continue;
                };
                if hit_test::hit_socket(world, position, radius) {
                    return Some(PortHit {
                        node_id: node.id.clone(),
                        port_id: port.id.clone(),
                        role,
                        position,
                    });
                }
            }
        }
        None
    }

    /// Topmost port socket under the pointer, at the default hit radius.
    pub fn port_at_default(&self, world: Point) -> Option<PortHit> {
        self.port_at(world, PORT_HIT_RADIUS)
    }

    /// Topmost node body under a world-space pointer position.
    pub fn node_at(&self, world: Point) -> Option<&Node> {
        self.nodes
            .iter()
            .rev()
            .find(|n| hit_test::point_in_node(world, n.position))
    }

    /// Ids of all nodes whose footprint intersects the rectangle.
    pub fn nodes_in_rect(&self, rect: &Rect) -> Vec<String> {
        self.nodes
            .iter()
            .filter(|n| hit_test::node_intersects_rect(n.position, rect))
            .map(|n| n.id.clone())
            .collect()
    }

    /// Ids of all connections whose curve passes through the rectangle
    /// (sampled test, padded by [`MARQUEE_PADDING`]).
    pub fn connections_in_rect(&self, rect: &Rect) -> Vec<String> {
        self.connections
            .iter()
            .filter(|c| {
                self.connection_curve(c)
                    .map(|curve| hit_test::connection_intersects_rect(&curve, rect, MARQUEE_PADDING))
                    .unwrap_or(false)
            })
            .map(|c| c.id.clone())
            .collect()
    }
}

fn next_counter<'a>(ids: impl Iterator<Item = &'a str>, prefix: &str) -> u64 {
    ids.filter_map(|id| id.strip_prefix(prefix))
        .filter_map(|suffix| suffix.parse::<u64>().ok())
        .max()
        .unwrap_or(0)
}
