//! JSON format export for D3.js and web visualization tools.
//!
//! Generates JSON with "nodes" and "links" arrays compatible with D3.js
//! force-directed layouts. Node and link ids are handle indices; labels are
//! the payloads' `Display` output.

use crate::error::{GraphError, Result};
use crate::graph::{Digraph, Edge, Node};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::fmt::Display;

/// Export graph to D3.js-compatible JSON format
pub fn export_json<N: Display, E: Display>(graph: &Digraph<N, E>) -> Result<String> {
    export_json_filtered(graph, |_| true, true)
}

/// Export filtered subset of graph to JSON
///
/// Only edges whose tail and head both pass the filter are included, and only
/// when `include_edges` is set.
pub fn export_json_filtered<N: Display, E: Display>(
    graph: &Digraph<N, E>,
    node_filter: impl Fn(&Node<N>) -> bool,
    include_edges: bool,
) -> Result<String> {
    let mut nodes_array = Vec::new();
    let mut filtered_ids = HashSet::new();

    for node in graph.nodes() {
        if node_filter(node) {
            nodes_array.push(node_to_json(node));
            filtered_ids.insert(node.id());
        }
    }

    let mut links_array = Vec::new();
    if include_edges {
        for edge in graph.edges() {
            // Only include edges between filtered nodes
            if filtered_ids.contains(&edge.tail()) && filtered_ids.contains(&edge.head()) {
                links_array.push(edge_to_json(edge));
            }
        }
    }

    let result = json!({
        "graph": graph.id().to_string(),
        "nodes": nodes_array,
        "links": links_array,
    });

    serde_json::to_string_pretty(&result)
        .map_err(|e| GraphError::serialization("Failed to serialize graph", Some(e)))
}

/// Convert node to JSON object
fn node_to_json<N: Display>(node: &Node<N>) -> Value {
    json!({
        "id": node.id().index(),
        "label": node.data().to_string(),
        "out_degree": node.out_degree(),
        "in_degree": node.in_degree(),
    })
}

/// Convert edge to JSON object
fn edge_to_json<E: Display>(edge: &Edge<E>) -> Value {
    json!({
        "id": edge.id().index(),
        "source": edge.tail().index(),
        "target": edge.head().index(),
        "label": edge.data().to_string(),
    })
}
