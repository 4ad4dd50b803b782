//! DOT format export for Graphviz visualization.

use crate::error::Result;
use crate::graph::Digraph;
use std::fmt::Display;

/// Options for styling DOT export
#[derive(Debug, Clone)]
pub struct DotOptions {
    /// Name written after the `digraph` keyword
    pub graph_name: String,
    /// Graph layout direction: LR, TB, RL, BT
    pub rankdir: String,
    /// Node shape (box, circle, ellipse, etc.)
    pub node_shape: String,
    /// Write edge payloads as edge labels
    pub show_edge_labels: bool,
}

impl Default for DotOptions {
    fn default() -> Self {
        DotOptions {
            graph_name: "digraph".to_string(),
            rankdir: "LR".to_string(),
            node_shape: "ellipse".to_string(),
            show_edge_labels: true,
        }
    }
}

/// Export graph to Graphviz DOT format
pub fn export_dot<N: Display, E: Display>(graph: &Digraph<N, E>) -> Result<String> {
    export_dot_styled(graph, &DotOptions::default())
}

/// Export graph to Graphviz DOT format with custom styling
pub fn export_dot_styled<N: Display, E: Display>(
    graph: &Digraph<N, E>,
    options: &DotOptions,
) -> Result<String> {
    let mut output = String::new();

    output.push_str(&format!("digraph {} {{\n", escape_dot_id(&options.graph_name)));
    output.push_str(&format!("    rankdir={};\n", options.rankdir));
    output.push_str(&format!("    node [shape={}];\n\n", options.node_shape));

    for node in graph.nodes() {
        let label = escape_dot_label(&node.data().to_string());
        output.push_str(&format!("    {} [label=\"{label}\"];\n", node.id()));
    }

    output.push('\n');

    for edge in graph.edges() {
        if options.show_edge_labels {
            let label = escape_dot_label(&edge.data().to_string());
            output.push_str(&format!(
                "    {} -> {} [label=\"{label}\"];\n",
                edge.tail(),
                edge.head()
            ));
        } else {
            output.push_str(&format!("    {} -> {};\n", edge.tail(), edge.head()));
        }
    }

    output.push_str("}\n");

    Ok(output)
}

/// Escape special characters for DOT labels
fn escape_dot_label(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Quote a graph name unless it is a plain identifier
fn escape_dot_id(s: &str) -> String {
    let plain = !s.is_empty()
        && !s.starts_with(|c: char| c.is_ascii_digit())
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if plain {
        s.to_string()
    } else {
        format!("\"{}\"", escape_dot_label(s))
    }
}
