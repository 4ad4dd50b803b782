//! Breadth-first and depth-first traversal with early exit.
//!
//! A traversal walks the nodes reachable from a start node and calls back
//! into a [`Processor`]. Any callback returning [`ControlFlow::Break`] stops
//! the traversal at once; the remaining frontier is dropped.
//!
//! Both orders run the same loop and differ only in the frontier discipline:
//! a FIFO queue for breadth-first, a LIFO stack for depth-first. Heads of
//! processed edges are pushed without checking whether they were already
//! visited; stale entries are skipped when they come off the frontier.
//!
//! Outgoing edges are examined in insertion order.

use super::digraph::Digraph;
use super::handle::{EdgeId, ElementKind, NodeId};
use super::types::{Edge, Node};
use crate::error::{GraphError, Result};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::ops::ControlFlow;

/// Callbacks invoked by a traversal.
///
/// Every callback defaults to `Continue`, so implementors override only the
/// hooks they care about.
pub trait Processor<N, E> {
    /// Called once per node, right after it is marked visited and before any
    /// of its outgoing edges.
    fn pre_process_node(&mut self, _node: &Node<N>) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// Called once per outgoing edge of the node being processed, before the
    /// edge's head is added to the frontier.
    fn process_edge(&mut self, _edge: &Edge<E>) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// Called after all of a node's outgoing edges were processed.
    ///
    /// Depth-first traversal only; breadth-first never calls this.
    fn post_process_node(&mut self, _node: &Node<N>) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Order {
    /// FIFO frontier
    BreadthFirst,
    /// LIFO frontier, with post-processing
    DepthFirst,
}

/// How a traversal ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// The frontier emptied without any callback asking to stop.
    Completed,
    /// A callback returned `Break`.
    Aborted,
}

impl Traversal {
    /// True if a processor callback stopped the traversal.
    pub fn is_aborted(&self) -> bool {
        matches!(self, Traversal::Aborted)
    }

    /// True if every reachable node was processed.
    pub fn is_completed(&self) -> bool {
        matches!(self, Traversal::Completed)
    }
}

/// Pending nodes of a traversal.
trait Frontier {
    fn put(&mut self, node: NodeId);
    fn take(&mut self) -> Option<NodeId>;
}

impl Frontier for VecDeque<NodeId> {
    fn put(&mut self, node: NodeId) {
        self.push_back(node);
    }

    fn take(&mut self) -> Option<NodeId> {
        self.pop_front()
    }
}

impl Frontier for Vec<NodeId> {
    fn put(&mut self, node: NodeId) {
        self.push(node);
    }

    fn take(&mut self) -> Option<NodeId> {
        self.pop()
    }
}

/// Breadth-First traversal from `start`.
///
/// `post_process_node` is never called.
///
/// # Errors
///
/// Returns [`GraphError::NotInGraph`] if `start` is not a node of `graph`.
pub fn breadth_first<N, E, P>(
    graph: &Digraph<N, E>,
    start: NodeId,
    processor: &mut P,
) -> Result<Traversal>
where
    P: Processor<N, E> + ?Sized,
{
    debug!("Starting breadth-first traversal from {start}");
    run(graph, start, VecDeque::new(), processor, false)
}

/// Depth-First traversal from `start` (iterative, explicit stack).
///
/// `post_process_node` is called once a node's outgoing edges are done.
///
/// # Errors
///
/// Returns [`GraphError::NotInGraph`] if `start` is not a node of `graph`.
pub fn depth_first<N, E, P>(
    graph: &Digraph<N, E>,
    start: NodeId,
    processor: &mut P,
) -> Result<Traversal>
where
    P: Processor<N, E> + ?Sized,
{
    debug!("Starting depth-first traversal from {start}");
    run(graph, start, Vec::new(), processor, true)
}

/// Traverse in the given order.
pub fn traverse<N, E, P>(
    graph: &Digraph<N, E>,
    start: NodeId,
    order: Order,
    processor: &mut P,
) -> Result<Traversal>
where
    P: Processor<N, E> + ?Sized,
{
    match order {
        Order::BreadthFirst => breadth_first(graph, start, processor),
        Order::DepthFirst => depth_first(graph, start, processor),
    }
}

fn run<N, E, F, P>(
    graph: &Digraph<N, E>,
    start: NodeId,
    mut frontier: F,
    processor: &mut P,
    post_process: bool,
) -> Result<Traversal>
where
    F: Frontier,
    P: Processor<N, E> + ?Sized,
{
    if !graph.contains_node(start) {
        return Err(GraphError::not_in_graph(ElementKind::Node, start));
    }

    let mut visited = HashSet::new();
    frontier.put(start);

    while let Some(current) = frontier.take() {
        if !visited.insert(current) {
            trace!("Skipping already visited node {current}");
            continue;
        }

        let node = graph.node(current)?;
        trace!("Processing node {current}");
        if processor.pre_process_node(node).is_break() {
            debug!("Traversal stopped in pre-processing of {current}");
            return Ok(Traversal::Aborted);
        }

        for edge_id in node.outgoing() {
            let edge = graph.edge(*edge_id)?;
            if processor.process_edge(edge).is_break() {
                debug!("Traversal stopped on edge {edge_id}");
                return Ok(Traversal::Aborted);
            }
            frontier.put(edge.head());
        }

        if post_process && processor.post_process_node(node).is_break() {
            debug!("Traversal stopped in post-processing of {current}");
            return Ok(Traversal::Aborted);
        }
    }

    debug!("Traversal complete: {} nodes visited", visited.len());
    Ok(Traversal::Completed)
}

/// One processor callback, as seen by [`VisitRecorder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitEvent {
    /// `pre_process_node` was called
    PreNode(NodeId),
    /// `process_edge` was called
    Edge(EdgeId),
    /// `post_process_node` was called
    PostNode(NodeId),
}

/// A processor that records every callback it receives.
///
/// Optionally stops as soon as a given node is pre-processed.
#[derive(Debug, Clone, Default)]
pub struct VisitRecorder {
    events: Vec<VisitEvent>,
    target: Option<NodeId>,
}

impl VisitRecorder {
    /// Recorder that never stops a traversal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the traversal when `node` is reached.
    pub fn stop_at(mut self, node: NodeId) -> Self {
        self.target = Some(node);
        self
    }

    /// Every callback in the order received.
    pub fn events(&self) -> &[VisitEvent] {
        &self.events
    }

    /// Nodes in pre-processing order.
    pub fn pre_order(&self) -> Vec<NodeId> {
        self.events
            .iter()
            .filter_map(|event| match event {
                VisitEvent::PreNode(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Nodes in post-processing order (empty for breadth-first).
    pub fn post_order(&self) -> Vec<NodeId> {
        self.events
            .iter()
            .filter_map(|event| match event {
                VisitEvent::PostNode(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Edges in processing order.
    pub fn edges(&self) -> Vec<EdgeId> {
        self.events
            .iter()
            .filter_map(|event| match event {
                VisitEvent::Edge(id) => Some(*id),
                _ => None,
            })
            .collect()
    }
}

impl<N, E> Processor<N, E> for VisitRecorder {
    fn pre_process_node(&mut self, node: &Node<N>) -> ControlFlow<()> {
        self.events.push(VisitEvent::PreNode(node.id()));
        if self.target == Some(node.id()) {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    fn process_edge(&mut self, edge: &Edge<E>) -> ControlFlow<()> {
        self.events.push(VisitEvent::Edge(edge.id()));
        ControlFlow::Continue(())
    }

    fn post_process_node(&mut self, node: &Node<N>) -> ControlFlow<()> {
        self.events.push(VisitEvent::PostNode(node.id()));
        ControlFlow::Continue(())
    }
}
