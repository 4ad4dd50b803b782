//! Core graph types: nodes, edges and neighbor directions.

use super::handle::{EdgeId, GraphId, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Direction for neighbor queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Follow outgoing edges (from this node)
    Outgoing,
    /// Follow incoming edges (to this node)
    Incoming,
    /// Follow edges in both directions
    Both,
}

/// A node in the graph.
///
/// Holds the caller's payload plus the incidence sets: edges leaving this node
/// (it is their tail) and edges arriving at it (it is their head). The sets
/// are maintained by [`Digraph`](super::Digraph) and are read-only here.
#[derive(Debug, Clone)]
pub struct Node<N> {
    id: NodeId,
    data: N,
    outgoing: BTreeSet<EdgeId>,
    incoming: BTreeSet<EdgeId>,
}

impl<N> Node<N> {
    pub(crate) fn new(id: NodeId, data: N) -> Self {
        Self {
            id,
            data,
            outgoing: BTreeSet::new(),
            incoming: BTreeSet::new(),
        }
    }

    /// Handle of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The node's payload.
    pub fn data(&self) -> &N {
        &self.data
    }

    /// Edges whose tail is this node, in insertion order.
    pub fn outgoing(&self) -> &BTreeSet<EdgeId> {
        &self.outgoing
    }

    /// Edges whose head is this node, in insertion order.
    pub fn incoming(&self) -> &BTreeSet<EdgeId> {
        &self.incoming
    }

    /// Number of outgoing edges.
    pub fn out_degree(&self) -> usize {
        self.outgoing.len()
    }

    /// Number of incoming edges.
    pub fn in_degree(&self) -> usize {
        self.incoming.len()
    }

    /// Total degree; a self loop counts once in each direction.
    pub fn degree(&self) -> usize {
        self.outgoing.len() + self.incoming.len()
    }

    /// True when no edge touches this node.
    pub fn is_isolated(&self) -> bool {
        self.outgoing.is_empty() && self.incoming.is_empty()
    }

    pub(crate) fn data_mut(&mut self) -> &mut N {
        &mut self.data
    }

    pub(crate) fn replace_data(&mut self, data: N) -> N {
        std::mem::replace(&mut self.data, data)
    }

    pub(crate) fn outgoing_mut(&mut self) -> &mut BTreeSet<EdgeId> {
        &mut self.outgoing
    }

    pub(crate) fn incoming_mut(&mut self) -> &mut BTreeSet<EdgeId> {
        &mut self.incoming
    }

    pub(crate) fn into_data(self) -> N {
        self.data
    }

    /// Copy of this node with every handle reissued by `graph`.
    pub(crate) fn rebranded(&self, graph: GraphId) -> Self
    where
        N: Clone,
    {
        Self {
            id: self.id.rebrand(graph),
            data: self.data.clone(),
            outgoing: self.outgoing.iter().map(|e| e.rebrand(graph)).collect(),
            incoming: self.incoming.iter().map(|e| e.rebrand(graph)).collect(),
        }
    }
}

/// A directed edge in the graph.
///
/// Parallel edges and self loops (`tail == head`) are allowed.
#[derive(Debug, Clone)]
pub struct Edge<E> {
    id: EdgeId,
    data: E,
    tail: NodeId,
    head: NodeId,
}

impl<E> Edge<E> {
    pub(crate) fn new(id: EdgeId, data: E, tail: NodeId, head: NodeId) -> Self {
        Self {
            id,
            data,
            tail,
            head,
        }
    }

    /// Handle of this edge.
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// The edge's payload.
    pub fn data(&self) -> &E {
        &self.data
    }

    /// Source node.
    pub fn tail(&self) -> NodeId {
        self.tail
    }

    /// Destination node.
    pub fn head(&self) -> NodeId {
        self.head
    }

    /// True when the edge starts and ends at the same node.
    pub fn is_self_loop(&self) -> bool {
        self.tail == self.head
    }

    pub(crate) fn data_mut(&mut self) -> &mut E {
        &mut self.data
    }

    pub(crate) fn replace_data(&mut self, data: E) -> E {
        std::mem::replace(&mut self.data, data)
    }

    pub(crate) fn set_tail(&mut self, tail: NodeId) {
        self.tail = tail;
    }

    pub(crate) fn set_head(&mut self, head: NodeId) {
        self.head = head;
    }

    pub(crate) fn into_data(self) -> E {
        self.data
    }

    pub(crate) fn rebranded(&self, graph: GraphId) -> Self
    where
        E: Clone,
    {
        Self::new(
            self.id.rebrand(graph),
            self.data.clone(),
            self.tail.rebrand(graph),
            self.head.rebrand(graph),
        )
    }
}
