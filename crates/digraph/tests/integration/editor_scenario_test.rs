//! Integration tests replaying the mutation sequences an editor front-end issues.

use digraph::{Digraph, NodeId, Order};

// Nodes {0, 8, 29, 133, 42} with edges 0->8, 0->29, 0->133, 8->0, 8->29,
// 8->133 (twice), 29->133, 133->42
fn build_scenario() -> (Digraph<u32, String>, [NodeId; 5]) {
    let mut graph = Digraph::new();
    let n0 = graph.add_node(0);
    let n8 = graph.add_node(8);
    let n29 = graph.add_node(29);
    let n133 = graph.add_node(133);
    let n42 = graph.add_node(42);

    for (tail, head) in [
        (n0, n8),
        (n0, n29),
        (n0, n133),
        (n8, n0),
        (n8, n29),
        (n8, n133),
        (n8, n133),
        (n29, n133),
        (n133, n42),
    ] {
        let label = format!(
            "{}->{}",
            graph.node_data(tail).unwrap(),
            graph.node_data(head).unwrap()
        );
        graph.add_edge(label, tail, head).unwrap();
    }

    (graph, [n0, n8, n29, n133, n42])
}

#[test]
fn test_scenario_remove_one_parallel_edge_then_node() {
    let (mut graph, [_, n8, _, n133, n42]) = build_scenario();
    assert_eq!(graph.node_count(), 5);
    assert_eq!(graph.edge_count(), 9);

    let edge = graph.find_edge(n8, n133).unwrap();
    graph.remove_edge(edge).unwrap();
    graph.remove_node(n42).unwrap();

    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 7);
    assert!(graph.validate());
    assert!(graph
        .edges()
        .all(|edge| edge.tail() != n42 && edge.head() != n42));

    // The second parallel edge survives
    assert_eq!(graph.edges_between(n8, n133).unwrap().len(), 1);
}

#[test]
fn test_scenario_remove_all_parallel_edges_then_node() {
    let (mut graph, [_, n8, _, n133, n42]) = build_scenario();

    assert_eq!(graph.remove_edges_between(n8, n133).unwrap(), 2);
    graph.remove_node(n42).unwrap();

    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 6);
    assert!(graph.find_edge(n8, n133).is_none());
    assert!(graph.validate());
}

#[test]
fn test_scenario_dump() {
    let (mut graph, [_, n8, _, n133, n42]) = build_scenario();
    let edge = graph.find_edge(n8, n133).unwrap();
    graph.remove_edge(edge).unwrap();
    graph.remove_node(n42).unwrap();

    let expected = "\
Graph
  Node n0: 0
    To: 8, 0->8
    To: 29, 0->29
    To: 133, 0->133
  Node n1: 8
    To: 0, 8->0
    To: 29, 8->29
    To: 133, 8->133
  Node n2: 29
    To: 133, 29->133
  Node n3: 133
Edges:
  e0: 0 -> 8, 0->8
  e1: 0 -> 29, 0->29
  e2: 0 -> 133, 0->133
  e3: 8 -> 0, 8->0
  e4: 8 -> 29, 8->29
  e6: 8 -> 133, 8->133
  e7: 29 -> 133, 29->133
";
    assert_eq!(graph.to_string(), expected);
}

#[test]
fn test_scenario_traversals() {
    let (graph, [n0, n8, n29, n133, n42]) = build_scenario();

    let bfs = graph.reachable(n0, Order::BreadthFirst).unwrap();
    assert_eq!(bfs, vec![n0, n8, n29, n133, n42]);

    let dfs = graph.reachable(n0, Order::DepthFirst).unwrap();
    assert_eq!(dfs.len(), 5);
    assert_eq!(dfs[0], n0);

    // 42 is a sink
    assert_eq!(graph.reachable(n42, Order::DepthFirst).unwrap(), vec![n42]);
    assert!(!graph.is_reachable(n42, n0).unwrap());
}

#[test]
fn test_find_edge_after_add() {
    let (mut graph, [n0, _, _, _, n42]) = build_scenario();

    assert!(graph.find_edge(n42, n0).is_none());
    graph.add_edge("x".to_string(), n42, n0).unwrap();

    let found = graph.find_edge(n42, n0).unwrap();
    assert_eq!(graph.edge_data(found).unwrap(), "x");
}

#[test]
fn test_drag_edge_to_new_endpoint() {
    let (mut graph, [n0, n8, n29, _, _]) = build_scenario();

    // Re-target 0->8 to 0->29 the way an editor drag would
    let edge = graph.find_edge(n0, n8).unwrap();
    graph.set_edge_head(edge, n29).unwrap();

    assert_eq!(graph.edges_between(n0, n29).unwrap().len(), 2);
    assert!(graph.find_edge(n0, n8).is_none());
    assert_eq!(graph.in_degree(n8).unwrap(), 0);
    assert!(graph.validate());
}
