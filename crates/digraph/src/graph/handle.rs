//! Opaque handles for graph elements.
//!
//! A handle is the identity of a node or edge. It carries the id of the graph
//! that issued it plus a per-graph monotonic index, so handles are never
//! reused and a handle from one graph is never mistaken for an element of
//! another.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity of a single [`Digraph`](super::Digraph) instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GraphId(Uuid);

impl GraphId {
    /// Generate a fresh random graph id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for GraphId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId {
    graph: GraphId,
    index: u64,
}

impl NodeId {
    pub(crate) fn new(graph: GraphId, index: u64) -> Self {
        Self { graph, index }
    }

    /// Same index, issued by `graph` instead.
    pub(crate) fn rebrand(self, graph: GraphId) -> Self {
        Self::new(graph, self.index)
    }

    /// Position of this node in its graph's creation order.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// The graph that issued this handle.
    pub fn graph(&self) -> GraphId {
        self.graph
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.index)
    }
}

/// Handle to an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId {
    graph: GraphId,
    index: u64,
}

impl EdgeId {
    pub(crate) fn new(graph: GraphId, index: u64) -> Self {
        Self { graph, index }
    }

    /// Same index, issued by `graph` instead.
    pub(crate) fn rebrand(self, graph: GraphId) -> Self {
        Self::new(graph, self.index)
    }

    /// Position of this edge in its graph's creation order.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// The graph that issued this handle.
    pub fn graph(&self) -> GraphId {
        self.graph
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.index)
    }
}

/// Translates handles of a graph into handles of its clone.
///
/// Returned by [`Digraph::clone_with_map`](super::Digraph::clone_with_map).
/// Only handles the source graph had issued at clone time translate; handles
/// it issues afterwards have no counterpart in the clone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleMap {
    source: GraphId,
    target: GraphId,
    node_limit: u64,
    edge_limit: u64,
}

impl HandleMap {
    pub(crate) fn new(source: GraphId, target: GraphId, node_limit: u64, edge_limit: u64) -> Self {
        Self {
            source,
            target,
            node_limit,
            edge_limit,
        }
    }

    /// The graph that was cloned.
    pub fn source(&self) -> GraphId {
        self.source
    }

    /// The clone.
    pub fn target(&self) -> GraphId {
        self.target
    }

    /// The clone's handle for a node of the source graph.
    pub fn node(&self, id: NodeId) -> Option<NodeId> {
        (id.graph == self.source && id.index < self.node_limit).then(|| id.rebrand(self.target))
    }

    /// The clone's handle for an edge of the source graph.
    pub fn edge(&self, id: EdgeId) -> Option<EdgeId> {
        (id.graph == self.source && id.index < self.edge_limit).then(|| id.rebrand(self.target))
    }
}

/// Kind of graph element a handle refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// A vertex
    Node,
    /// A directed edge
    Edge,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Node => write!(f, "node"),
            ElementKind::Edge => write!(f, "edge"),
        }
    }
}
