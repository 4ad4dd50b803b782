//! Query builder for fluent node queries.
//!
//! Filters combine with AND semantics and are evaluated against each node in
//! creation order.

use crate::graph::{Digraph, Node, NodeId};
use std::collections::HashSet;

/// A filter predicate that can be applied to nodes.
type FilterFn<'a, N> = Box<dyn Fn(&Node<N>) -> bool + 'a>;

/// Fluent query builder over a graph's nodes.
///
/// # Examples
///
/// ```
/// use digraph::Digraph;
///
/// # fn example() -> digraph::Result<()> {
/// let mut graph: Digraph<u32, ()> = Digraph::new();
/// let a = graph.add_node(10);
/// let b = graph.add_node(25);
/// graph.add_node(40);
/// graph.add_edge((), a, b)?;
///
/// // Nodes with a payload above 20 that have at least one incoming edge
/// let results = graph.query()
///     .filter(|value| *value > 20)
///     .min_in_degree(1)
///     .execute();
/// assert_eq!(results, vec![b]);
/// # Ok(())
/// # }
/// ```
pub struct NodeQuery<'a, N, E> {
    graph: &'a Digraph<N, E>,
    filters: Vec<FilterFn<'a, N>>,
    limit_value: Option<usize>,
}

impl<'a, N, E> NodeQuery<'a, N, E> {
    /// Create a new query builder for the given graph.
    pub fn new(graph: &'a Digraph<N, E>) -> Self {
        Self {
            graph,
            filters: Vec::new(),
            limit_value: None,
        }
    }

    /// Filter nodes by a predicate over their payload.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&N) -> bool + 'a,
    {
        self.filters.push(Box::new(move |node| predicate(node.data())));
        self
    }

    /// Filter nodes using a predicate over the whole node.
    pub fn custom<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Node<N>) -> bool + 'a,
    {
        self.filters.push(Box::new(predicate));
        self
    }

    /// Keep nodes with at least `n` outgoing edges.
    pub fn min_out_degree(mut self, n: usize) -> Self {
        self.filters.push(Box::new(move |node| node.out_degree() >= n));
        self
    }

    /// Keep nodes with at least `n` incoming edges.
    pub fn min_in_degree(mut self, n: usize) -> Self {
        self.filters.push(Box::new(move |node| node.in_degree() >= n));
        self
    }

    /// Keep nodes that no edge touches.
    pub fn isolated(mut self) -> Self {
        self.filters.push(Box::new(|node| node.is_isolated()));
        self
    }

    /// Restrict the search to the given nodes.
    pub fn within<I>(mut self, group: I) -> Self
    where
        I: IntoIterator<Item = NodeId>,
    {
        let group: HashSet<NodeId> = group.into_iter().collect();
        self.filters.push(Box::new(move |node| group.contains(&node.id())));
        self
    }

    /// Limit the number of results returned.
    pub fn limit(mut self, n: usize) -> Self {
        self.limit_value = Some(n);
        self
    }

    /// Execute the query and return matching node handles in creation order.
    pub fn execute(&self) -> Vec<NodeId> {
        let limit = self.limit_value.unwrap_or(usize::MAX);
        self.graph
            .nodes()
            .filter(|node| self.matches_filters(node))
            .take(limit)
            .map(Node::id)
            .collect()
    }

    /// Count the matching nodes.
    ///
    /// The limit is ignored.
    pub fn count(&self) -> usize {
        self.graph
            .nodes()
            .filter(|node| self.matches_filters(node))
            .count()
    }

    /// Check if any node matches the query.
    ///
    /// Filters stop running at the first match in creation order.
    pub fn exists(&self) -> bool {
        self.graph.nodes().any(|node| self.matches_filters(node))
    }

    fn matches_filters(&self, node: &Node<N>) -> bool {
        self.filters.iter().all(|filter| filter(node))
    }
}
