//! Basic usage example for digraph
//!
//! This example demonstrates:
//! - Creating a graph
//! - Adding and removing nodes and edges
//! - Running traversals with a custom processor

use digraph::{Digraph, Direction, Edge, Node, Processor};
use std::ops::ControlFlow;

/// Prints each step and stops once it reaches the named node.
struct Tracer {
    target: &'static str,
}

impl Processor<&'static str, &'static str> for Tracer {
    fn pre_process_node(&mut self, node: &Node<&'static str>) -> ControlFlow<()> {
        println!("  visit {}", node.data());
        if *node.data() == self.target {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    fn process_edge(&mut self, edge: &Edge<&'static str>) -> ControlFlow<()> {
        println!("    edge {}", edge.data());
        ControlFlow::Continue(())
    }

    fn post_process_node(&mut self, node: &Node<&'static str>) -> ControlFlow<()> {
        println!("  done  {}", node.data());
        ControlFlow::Continue(())
    }
}

fn main() -> digraph::Result<()> {
    let mut graph: Digraph<&'static str, &'static str> = Digraph::new();

    println!("Creating a simple graph...\n");

    let parse = graph.add_node("parse");
    let check = graph.add_node("check");
    let lower = graph.add_node("lower");
    let emit = graph.add_node("emit");
    let scratch = graph.add_node("scratch");

    graph.add_edge("parse->check", parse, check)?;
    graph.add_edge("parse->lower", parse, lower)?;
    graph.add_edge("check->lower", check, lower)?;
    graph.add_edge("lower->emit", lower, emit)?;
    graph.add_edge("emit->scratch", emit, scratch)?;
    println!("✓ Added {} nodes and {} edges", graph.node_count(), graph.edge_count());

    graph.remove_node(scratch)?;
    println!("✓ Removed scratch node (edges left: {})", graph.edge_count());

    let preds = graph.neighbors(lower, Direction::Incoming)?;
    println!("\nlower has {} predecessors", preds.len());

    println!("\n--- Breadth-first until emit ---\n");
    let outcome = graph.breadth_first_traversal(parse, &mut Tracer { target: "emit" })?;
    println!("aborted: {}", outcome.is_aborted());

    println!("\n--- Depth-first, full walk ---\n");
    let outcome = graph.depth_first_traversal(parse, &mut Tracer { target: "" })?;
    println!("completed: {}", outcome.is_completed());

    println!("\n--- Dump ---");
    print!("{graph}");
    println!("valid: {}", graph.validate());

    Ok(())
}
