//! Selection state over nodes and connections.
//!
//! Selection is a pair of id sets kept separate from the graph itself so
//! that deleting or restoring graph content cannot leave the store
//! entangled with UI state. The rules mirror the usual canvas
//! conventions: a plain click selects exactly one item, a modified click
//! toggles within a kind, and a marquee replaces the selection wholesale
//! while it is dragged.

use std::collections::HashSet;

/// What a selectable id refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionKind {
    Node,
    Connection,
}

/// The set of currently selected nodes and connections.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionManager {
    nodes: HashSet<String>,
    connections: HashSet<String>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_nodes(&self) -> &HashSet<String> {
        &self.nodes
    }

    pub fn selected_connections(&self) -> &HashSet<String> {
        &self.connections
    }

    pub fn is_node_selected(&self, id: &str) -> bool {
        self.nodes.contains(id)
    }

    pub fn is_connection_selected(&self, id: &str) -> bool {
        self.connections.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.connections.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.connections.clear();
    }

    /// Plain click: the item becomes the sole selection. Already-sole
    /// selections are left alone so a click on a selected item does not
    /// churn listeners.
    pub fn select_only(&mut self, kind: SelectionKind, id: &str) {
        let sole = match kind {
            SelectionKind::Node => {
                self.connections.is_empty() && self.nodes.len() == 1 && self.nodes.contains(id)
            }
            SelectionKind::Connection => {
                self.nodes.is_empty()
                    && self.connections.len() == 1
                    && self.connections.contains(id)
            }
        };
        if sole {
            return;
        }
        self.clear();
        match kind {
            SelectionKind::Node => self.nodes.insert(id.to_string()),
            SelectionKind::Connection => self.connections.insert(id.to_string()),
        };
    }

    /// Modified click: toggle the item within its kind. Mixing kinds in
    /// one selection is not supported, so toggling a node drops any
    /// selected connections and vice versa.
    pub fn toggle(&mut self, kind: SelectionKind, id: &str) {
        match kind {
            SelectionKind::Node => {
                self.connections.clear();
                if !self.nodes.remove(id) {
                    self.nodes.insert(id.to_string());
                }
            }
            SelectionKind::Connection => {
                self.nodes.clear();
                if !self.connections.remove(id) {
                    self.connections.insert(id.to_string());
                }
            }
        }
    }

    /// Replace the whole selection, used by the live marquee update.
    pub fn replace(
        &mut self,
        nodes: impl IntoIterator<Item = String>,
        connections: impl IntoIterator<Item = String>,
    ) {
        self.nodes = nodes.into_iter().collect();
        self.connections = connections.into_iter().collect();
    }

    /// Drop ids that no longer exist in the graph, called after deletions.
    pub fn retain_existing(
        &mut self,
        node_exists: impl Fn(&str) -> bool,
        connection_exists: impl Fn(&str) -> bool,
    ) {
        self.nodes.retain(|id| node_exists(id));
        self.connections.retain(|id| connection_exists(id));
    }
}
