//! Main `Digraph` store: node/edge registry with bidirectional adjacency.

use super::handle::{EdgeId, ElementKind, GraphId, HandleMap, NodeId};
use super::traversal::{self, Order, Traversal, VisitRecorder};
use super::types::{Direction, Edge, Node};
use crate::error::{GraphError, Result};
use crate::query::NodeQuery;
use log::{debug, trace};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

/// A directed graph with opaque node payloads `N` and edge payloads `E`.
///
/// The graph owns every node and edge. Each node carries an index of its
/// incident edges (outgoing and incoming) which is kept consistent with the
/// edges' tail and head on every mutation; [`Digraph::validate`] re-checks
/// that invariant from scratch.
///
/// Elements are addressed by [`NodeId`] and [`EdgeId`] handles. Identity is
/// the handle, not the payload: two nodes with equal payloads are distinct.
///
/// A clone is a new graph with its own [`GraphId`]; use
/// [`Digraph::clone_with_map`] to carry handles over to it.
///
/// # Example
///
/// ```
/// use digraph::Digraph;
///
/// # fn example() -> digraph::Result<()> {
/// let mut graph: Digraph<&str, u32> = Digraph::new();
/// let a = graph.add_node("a");
/// let b = graph.add_node("b");
/// graph.add_edge(1, a, b)?;
///
/// assert_eq!(graph.node_count(), 2);
/// assert!(graph.find_edge(a, b).is_some());
/// assert!(graph.validate());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Digraph<N, E> {
    id: GraphId,
    // Monotonic counters; indices are never reused
    node_counter: u64,
    edge_counter: u64,
    nodes: HashMap<NodeId, Node<N>>,
    edges: HashMap<EdgeId, Edge<E>>,
}

impl<N: Clone, E: Clone> Clone for Digraph<N, E> {
    fn clone(&self) -> Self {
        self.clone_with_map().0
    }
}

impl<N, E> Default for Digraph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> Digraph<N, E> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Create an empty graph with room for the given number of elements.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        let id = GraphId::new();
        debug!("Creating graph {id}");
        Self {
            id,
            node_counter: 0,
            edge_counter: 0,
            nodes: HashMap::with_capacity(nodes),
            edges: HashMap::with_capacity(edges),
        }
    }

    /// Identity of this graph; every handle it issues carries it.
    pub fn id(&self) -> GraphId {
        self.id
    }

    // ===== Mutation =====

    /// Add a node with no incident edges.
    pub fn add_node(&mut self, data: N) -> NodeId {
        let id = self.next_node_id();
        trace!("Adding node {id}");
        self.nodes.insert(id, Node::new(id, data));
        id
    }

    /// Add several nodes, returning their handles in input order.
    pub fn add_nodes<I>(&mut self, data: I) -> Vec<NodeId>
    where
        I: IntoIterator<Item = N>,
    {
        let ids: Vec<NodeId> = data.into_iter().map(|d| self.add_node(d)).collect();
        debug!("Added batch of {} nodes", ids.len());
        ids
    }

    /// Add a directed edge from `tail` to `head`.
    ///
    /// Self loops and parallel edges are allowed.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidHandle`] if either endpoint is not a node
    /// of this graph. Nothing is registered in that case.
    pub fn add_edge(&mut self, data: E, tail: NodeId, head: NodeId) -> Result<EdgeId> {
        self.check_endpoint(tail)?;
        self.check_endpoint(head)?;
        let id = self.link_edge(data, tail, head);
        debug!("Added edge {id}: {tail} -> {head}");
        Ok(id)
    }

    /// Add several edges as one unit.
    ///
    /// Every endpoint is checked before any edge is registered, so either all
    /// edges are added or none are.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidHandle`] for the first bad endpoint.
    pub fn add_edges<I>(&mut self, edges: I) -> Result<Vec<EdgeId>>
    where
        I: IntoIterator<Item = (E, NodeId, NodeId)>,
    {
        let edges: Vec<(E, NodeId, NodeId)> = edges.into_iter().collect();
        for (_, tail, head) in &edges {
            self.check_endpoint(*tail)?;
            self.check_endpoint(*head)?;
        }

        let ids: Vec<EdgeId> = edges
            .into_iter()
            .map(|(data, tail, head)| self.link_edge(data, tail, head))
            .collect();
        debug!("Added batch of {} edges", ids.len());
        Ok(ids)
    }

    /// Remove a node together with every edge that has it as tail or head.
    ///
    /// Returns the node's payload.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NotInGraph`] if the node is not a member.
    pub fn remove_node(&mut self, id: NodeId) -> Result<N> {
        let node = self
            .nodes
            .remove(&id)
            .ok_or_else(|| GraphError::not_in_graph(ElementKind::Node, id))?;

        // A self loop sits in both sets; the union visits it once
        let incident: BTreeSet<EdgeId> = node.outgoing().union(node.incoming()).copied().collect();
        debug!("Removing node {id} and {} incident edges", incident.len());

        for edge_id in incident {
            if let Some(edge) = self.edges.remove(&edge_id) {
                self.unlink_edge(&edge);
            }
        }

        Ok(node.into_data())
    }

    /// Remove a single edge, returning its payload.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NotInGraph`] if the edge is not a member.
    pub fn remove_edge(&mut self, id: EdgeId) -> Result<E> {
        let edge = self
            .edges
            .remove(&id)
            .ok_or_else(|| GraphError::not_in_graph(ElementKind::Edge, id))?;
        self.unlink_edge(&edge);
        debug!("Removed edge {id}: {} -> {}", edge.tail(), edge.head());
        Ok(edge.into_data())
    }

    /// Remove every edge from `tail` to `head`, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NotInGraph`] if either node is not a member.
    pub fn remove_edges_between(&mut self, tail: NodeId, head: NodeId) -> Result<usize> {
        let matching = self.edges_between(tail, head)?;
        for edge_id in &matching {
            self.remove_edge(*edge_id)?;
        }
        Ok(matching.len())
    }

    /// Remove every node and edge.
    ///
    /// Counters keep running, so handles issued before the clear stay invalid.
    pub fn clear(&mut self) {
        debug!(
            "Clearing graph {}: {} nodes, {} edges",
            self.id,
            self.nodes.len(),
            self.edges.len()
        );
        self.nodes.clear();
        self.edges.clear();
    }

    /// Replace a node's payload, returning the previous one.
    pub fn set_node_data(&mut self, id: NodeId, data: N) -> Result<N> {
        Ok(self.node_entry_mut(id)?.replace_data(data))
    }

    /// Replace an edge's payload, returning the previous one.
    pub fn set_edge_data(&mut self, id: EdgeId, data: E) -> Result<E> {
        Ok(self.edge_entry_mut(id)?.replace_data(data))
    }

    /// Re-point an edge so it leaves from `tail`.
    ///
    /// # Errors
    ///
    /// [`GraphError::NotInGraph`] for an unknown edge,
    /// [`GraphError::InvalidHandle`] for an unknown node. The graph is
    /// unchanged on error.
    pub fn set_edge_tail(&mut self, id: EdgeId, tail: NodeId) -> Result<()> {
        let old_tail = self.edge(id)?.tail();
        self.check_endpoint(tail)?;
        if old_tail == tail {
            return Ok(());
        }

        if let Some(node) = self.nodes.get_mut(&old_tail) {
            node.outgoing_mut().remove(&id);
        }
        if let Some(node) = self.nodes.get_mut(&tail) {
            node.outgoing_mut().insert(id);
        }
        self.edge_entry_mut(id)?.set_tail(tail);
        debug!("Moved tail of edge {id}: {old_tail} -> {tail}");
        Ok(())
    }

    /// Re-point an edge so it arrives at `head`.
    ///
    /// # Errors
    ///
    /// [`GraphError::NotInGraph`] for an unknown edge,
    /// [`GraphError::InvalidHandle`] for an unknown node. The graph is
    /// unchanged on error.
    pub fn set_edge_head(&mut self, id: EdgeId, head: NodeId) -> Result<()> {
        let old_head = self.edge(id)?.head();
        self.check_endpoint(head)?;
        if old_head == head {
            return Ok(());
        }

        if let Some(node) = self.nodes.get_mut(&old_head) {
            node.incoming_mut().remove(&id);
        }
        if let Some(node) = self.nodes.get_mut(&head) {
            node.incoming_mut().insert(id);
        }
        self.edge_entry_mut(id)?.set_head(head);
        debug!("Moved head of edge {id}: {old_head} -> {head}");
        Ok(())
    }

    // ===== Lookup =====

    /// Get a node by handle.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NotInGraph`] if the node doesn't exist.
    pub fn node(&self, id: NodeId) -> Result<&Node<N>> {
        self.nodes
            .get(&id)
            .ok_or_else(|| GraphError::not_in_graph(ElementKind::Node, id))
    }

    /// Get an edge by handle.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NotInGraph`] if the edge doesn't exist.
    pub fn edge(&self, id: EdgeId) -> Result<&Edge<E>> {
        self.edges
            .get(&id)
            .ok_or_else(|| GraphError::not_in_graph(ElementKind::Edge, id))
    }

    /// A node's payload.
    pub fn node_data(&self, id: NodeId) -> Result<&N> {
        self.node(id).map(Node::data)
    }

    /// Mutable access to a node's payload.
    pub fn node_data_mut(&mut self, id: NodeId) -> Result<&mut N> {
        Ok(self.node_entry_mut(id)?.data_mut())
    }

    /// An edge's payload.
    pub fn edge_data(&self, id: EdgeId) -> Result<&E> {
        self.edge(id).map(Edge::data)
    }

    /// Mutable access to an edge's payload.
    pub fn edge_data_mut(&mut self, id: EdgeId) -> Result<&mut E> {
        Ok(self.edge_entry_mut(id)?.data_mut())
    }

    /// True if the node belongs to this graph.
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// True if the edge belongs to this graph.
    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edges.contains_key(&id)
    }

    /// Find one edge from `tail` to `head`, if any.
    ///
    /// With parallel edges the earliest-added one is returned. Unknown
    /// handles simply yield `None`.
    pub fn find_edge(&self, tail: NodeId, head: NodeId) -> Option<EdgeId> {
        self.nodes.get(&tail)?.outgoing().iter().copied().find(|edge_id| {
            self.edges
                .get(edge_id)
                .is_some_and(|edge| edge.head() == head)
        })
    }

    /// All edges from `tail` to `head`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NotInGraph`] if either node is not a member.
    pub fn edges_between(&self, tail: NodeId, head: NodeId) -> Result<Vec<EdgeId>> {
        let tail_node = self.node(tail)?;
        self.node(head)?;

        Ok(tail_node
            .outgoing()
            .iter()
            .copied()
            .filter(|edge_id| {
                self.edges
                    .get(edge_id)
                    .is_some_and(|edge| edge.head() == head)
            })
            .collect())
    }

    /// Snapshot of all node handles.
    ///
    /// The returned set is independent of the graph.
    pub fn node_ids(&self) -> BTreeSet<NodeId> {
        self.nodes.keys().copied().collect()
    }

    /// Snapshot of all edge handles.
    pub fn edge_ids(&self) -> BTreeSet<EdgeId> {
        self.edges.keys().copied().collect()
    }

    /// All nodes in creation order.
    ///
    /// Nodes are sorted up front, so the first item costs a full pass.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<N>> + '_ {
        let mut nodes: Vec<&Node<N>> = self.nodes.values().collect();
        nodes.sort_by_key(|node| node.id());
        nodes.into_iter()
    }

    /// All edges in creation order.
    ///
    /// Edges are sorted up front, like [`Digraph::nodes`].
    pub fn edges(&self) -> impl Iterator<Item = &Edge<E>> + '_ {
        let mut edges: Vec<&Edge<E>> = self.edges.values().collect();
        edges.sort_by_key(|edge| edge.id());
        edges.into_iter()
    }

    /// Get the total number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the total number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// True when the graph has no nodes (and therefore no edges).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ===== Adjacency =====

    /// Edges leaving `id`.
    pub fn outgoing_edges(&self, id: NodeId) -> Result<&BTreeSet<EdgeId>> {
        self.node(id).map(Node::outgoing)
    }

    /// Edges arriving at `id`.
    pub fn incoming_edges(&self, id: NodeId) -> Result<&BTreeSet<EdgeId>> {
        self.node(id).map(Node::incoming)
    }

    /// Number of edges leaving `id`.
    pub fn out_degree(&self, id: NodeId) -> Result<usize> {
        self.node(id).map(Node::out_degree)
    }

    /// Number of edges arriving at `id`.
    pub fn in_degree(&self, id: NodeId) -> Result<usize> {
        self.node(id).map(Node::in_degree)
    }

    /// In-degree plus out-degree.
    pub fn degree(&self, id: NodeId) -> Result<usize> {
        self.node(id).map(Node::degree)
    }

    /// Get all neighbor nodes connected by edges in the specified direction.
    ///
    /// Neighbors are deduplicated and returned in handle order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NotInGraph`] if the node is not a member.
    pub fn neighbors(&self, id: NodeId, direction: Direction) -> Result<Vec<NodeId>> {
        let node = self.node(id)?;
        let mut neighbors = BTreeSet::new();

        if matches!(direction, Direction::Outgoing | Direction::Both) {
            neighbors.extend(
                node.outgoing()
                    .iter()
                    .filter_map(|edge_id| self.edges.get(edge_id))
                    .map(Edge::head),
            );
        }
        if matches!(direction, Direction::Incoming | Direction::Both) {
            neighbors.extend(
                node.incoming()
                    .iter()
                    .filter_map(|edge_id| self.edges.get(edge_id))
                    .map(Edge::tail),
            );
        }

        Ok(neighbors.into_iter().collect())
    }

    /// Every node of the graph that is not in `group`.
    pub fn other_nodes<'a, I>(&self, group: I) -> BTreeSet<NodeId>
    where
        I: IntoIterator<Item = &'a NodeId>,
    {
        let group: HashSet<&NodeId> = group.into_iter().collect();
        self.nodes
            .keys()
            .filter(|id| !group.contains(id))
            .copied()
            .collect()
    }

    /// Union of tails and heads over the given edges.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NotInGraph`] if any edge is not a member.
    pub fn endpoints<'a, I>(&self, edges: I) -> Result<BTreeSet<NodeId>>
    where
        I: IntoIterator<Item = &'a EdgeId>,
    {
        let mut ends = BTreeSet::new();
        for edge_id in edges {
            let edge = self.edge(*edge_id)?;
            ends.insert(edge.tail());
            ends.insert(edge.head());
        }
        Ok(ends)
    }

    // ===== Validation =====

    /// Re-check the incidence invariant across the whole graph.
    ///
    /// Every edge must be in its tail's outgoing set and its head's incoming
    /// set, and every incidence entry must point at a live edge with the
    /// matching endpoint. Reports only; never repairs.
    pub fn validate(&self) -> bool {
        for (edge_id, edge) in &self.edges {
            if edge.id() != *edge_id || edge_id.graph() != self.id {
                debug!("Validation failed: edge {edge_id} registered under wrong handle");
                return false;
            }
            let tail_ok = self
                .nodes
                .get(&edge.tail())
                .is_some_and(|node| node.outgoing().contains(edge_id));
            let head_ok = self
                .nodes
                .get(&edge.head())
                .is_some_and(|node| node.incoming().contains(edge_id));
            if !tail_ok || !head_ok {
                debug!("Validation failed: edge {edge_id} missing from its endpoints");
                return false;
            }
        }

        for (node_id, node) in &self.nodes {
            if node.id() != *node_id || node_id.graph() != self.id {
                debug!("Validation failed: node {node_id} registered under wrong handle");
                return false;
            }
            let outgoing_ok = node.outgoing().iter().all(|edge_id| {
                self.edges
                    .get(edge_id)
                    .is_some_and(|edge| edge.tail() == *node_id)
            });
            let incoming_ok = node.incoming().iter().all(|edge_id| {
                self.edges
                    .get(edge_id)
                    .is_some_and(|edge| edge.head() == *node_id)
            });
            if !outgoing_ok || !incoming_ok {
                debug!("Validation failed: node {node_id} has a dangling incidence entry");
                return false;
            }
        }

        true
    }

    // ===== Queries and traversal =====

    /// Create a new query builder over this graph's nodes.
    pub fn query(&self) -> NodeQuery<'_, N, E> {
        NodeQuery::new(self)
    }

    /// Breadth-first traversal from `start`.
    ///
    /// See [`traversal::breadth_first`].
    pub fn breadth_first_traversal<P>(&self, start: NodeId, processor: &mut P) -> Result<Traversal>
    where
        P: traversal::Processor<N, E> + ?Sized,
    {
        traversal::breadth_first(self, start, processor)
    }

    /// Depth-first traversal from `start`.
    ///
    /// See [`traversal::depth_first`].
    pub fn depth_first_traversal<P>(&self, start: NodeId, processor: &mut P) -> Result<Traversal>
    where
        P: traversal::Processor<N, E> + ?Sized,
    {
        traversal::depth_first(self, start, processor)
    }

    /// Nodes reachable from `start` (including it), in visit order.
    pub fn reachable(&self, start: NodeId, order: Order) -> Result<Vec<NodeId>> {
        let mut recorder = VisitRecorder::new();
        traversal::traverse(self, start, order, &mut recorder)?;
        Ok(recorder.pre_order())
    }

    /// True if `to` can be reached from `from` by following edges forward.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NotInGraph`] if either node is not a member.
    pub fn is_reachable(&self, from: NodeId, to: NodeId) -> Result<bool> {
        self.node(to)?;
        let mut recorder = VisitRecorder::new().stop_at(to);
        let outcome = traversal::breadth_first(self, from, &mut recorder)?;
        Ok(outcome.is_aborted())
    }

    // Private helper methods

    fn next_node_id(&mut self) -> NodeId {
        let id = NodeId::new(self.id, self.node_counter);
        self.node_counter += 1;
        id
    }

    fn next_edge_id(&mut self) -> EdgeId {
        let id = EdgeId::new(self.id, self.edge_counter);
        self.edge_counter += 1;
        id
    }

    fn check_endpoint(&self, id: NodeId) -> Result<()> {
        if self.nodes.contains_key(&id) {
            Ok(())
        } else {
            Err(GraphError::invalid_handle(ElementKind::Node, id))
        }
    }

    fn node_entry_mut(&mut self, id: NodeId) -> Result<&mut Node<N>> {
        self.nodes
            .get_mut(&id)
            .ok_or_else(|| GraphError::not_in_graph(ElementKind::Node, id))
    }

    fn edge_entry_mut(&mut self, id: EdgeId) -> Result<&mut Edge<E>> {
        self.edges
            .get_mut(&id)
            .ok_or_else(|| GraphError::not_in_graph(ElementKind::Edge, id))
    }

    /// Register a new edge. Both endpoints must already be checked.
    fn link_edge(&mut self, data: E, tail: NodeId, head: NodeId) -> EdgeId {
        let id = self.next_edge_id();

        if let Some(node) = self.nodes.get_mut(&tail) {
            node.outgoing_mut().insert(id);
        }
        if let Some(node) = self.nodes.get_mut(&head) {
            node.incoming_mut().insert(id);
        }
        self.edges.insert(id, Edge::new(id, data, tail, head));

        id
    }

    /// Drop a removed edge from its endpoints' incidence sets.
    fn unlink_edge(&mut self, edge: &Edge<E>) {
        if let Some(node) = self.nodes.get_mut(&edge.tail()) {
            node.outgoing_mut().remove(&edge.id());
        }
        if let Some(node) = self.nodes.get_mut(&edge.head()) {
            node.incoming_mut().remove(&edge.id());
        }
    }
}

impl<N: Clone, E: Clone> Digraph<N, E> {
    /// Copy the graph under a fresh [`GraphId`].
    ///
    /// Every element keeps its index but is reissued by the copy, so the two
    /// graphs never accept each other's handles. The returned [`HandleMap`]
    /// translates handles of `self` into handles of the copy.
    pub fn clone_with_map(&self) -> (Self, HandleMap) {
        let id = GraphId::new();
        debug!(
            "Cloning graph {} into {id}: {} nodes, {} edges",
            self.id,
            self.nodes.len(),
            self.edges.len()
        );

        let nodes = self
            .nodes
            .values()
            .map(|node| {
                let node = node.rebranded(id);
                (node.id(), node)
            })
            .collect();
        let edges = self
            .edges
            .values()
            .map(|edge| {
                let edge = edge.rebranded(id);
                (edge.id(), edge)
            })
            .collect();

        let copy = Self {
            id,
            node_counter: self.node_counter,
            edge_counter: self.edge_counter,
            nodes,
            edges,
        };
        let map = HandleMap::new(self.id, id, self.node_counter, self.edge_counter);
        (copy, map)
    }
}

impl<N: PartialEq, E> Digraph<N, E> {
    /// Handles of every node whose payload equals `data`, in creation order.
    pub fn nodes_with_data(&self, data: &N) -> Vec<NodeId> {
        self.nodes()
            .filter(|node| node.data() == data)
            .map(Node::id)
            .collect()
    }
}

impl<N, E: PartialEq> Digraph<N, E> {
    /// Handles of every edge whose payload equals `data`, in creation order.
    pub fn edges_with_data(&self, data: &E) -> Vec<EdgeId> {
        self.edges()
            .filter(|edge| edge.data() == data)
            .map(Edge::id)
            .collect()
    }
}

impl<N: fmt::Display, E> Digraph<N, E> {
    fn node_label(&self, id: NodeId) -> String {
        match self.nodes.get(&id) {
            Some(node) => node.data().to_string(),
            None => id.to_string(),
        }
    }
}

impl<N: fmt::Display, E: fmt::Display> fmt::Display for Digraph<N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Graph")?;
        for node in self.nodes() {
            writeln!(f, "  Node {}: {}", node.id(), node.data())?;
            for edge_id in node.outgoing() {
                if let Some(edge) = self.edges.get(edge_id) {
                    writeln!(f, "    To: {}, {}", self.node_label(edge.head()), edge.data())?;
                }
            }
        }
        writeln!(f, "Edges:")?;
        for edge in self.edges() {
            writeln!(
                f,
                "  {}: {} -> {}, {}",
                edge.id(),
                self.node_label(edge.tail()),
                self.node_label(edge.head()),
                edge.data()
            )?;
        }
        Ok(())
    }
}
