//! Unit tests for core graph operations (add/remove node and edge, lookups, adjacency).

use digraph::{Digraph, Direction, GraphError};
use std::collections::BTreeSet;

#[test]
fn test_add_node() {
    let mut graph: Digraph<&str, u32> = Digraph::new();

    let node_id = graph.add_node("main");

    assert_eq!(node_id.index(), 0); // First node should have index 0
    assert_eq!(graph.node_count(), 1);

    let node = graph.node(node_id).unwrap();
    assert_eq!(*node.data(), "main");
    assert!(node.is_isolated());
}

#[test]
fn test_add_node_increments_count_by_one() {
    let mut graph: Digraph<u32, ()> = Digraph::new();

    for i in 0..10 {
        let before = graph.node_count();
        graph.add_node(i);
        assert_eq!(graph.node_count(), before + 1);
    }
}

#[test]
fn test_add_edge_registers_incidence() {
    let mut graph: Digraph<&str, u32> = Digraph::new();
    let tail = graph.add_node("tail");
    let head = graph.add_node("head");

    let edge_id = graph.add_edge(42, tail, head).unwrap();

    assert_eq!(edge_id.index(), 0); // First edge should have index 0
    let edge = graph.edge(edge_id).unwrap();
    assert_eq!(edge.tail(), tail);
    assert_eq!(edge.head(), head);
    assert_eq!(*edge.data(), 42);

    assert!(graph.outgoing_edges(tail).unwrap().contains(&edge_id));
    assert!(graph.incoming_edges(head).unwrap().contains(&edge_id));
    assert!(graph.incoming_edges(tail).unwrap().is_empty());
    assert!(graph.outgoing_edges(head).unwrap().is_empty());
}

#[test]
fn test_parallel_edges_are_not_deduplicated() {
    let mut graph: Digraph<u32, &str> = Digraph::new();
    let a = graph.add_node(1);
    let b = graph.add_node(2);

    let first = graph.add_edge("same", a, b).unwrap();
    let second = graph.add_edge("same", a, b).unwrap();

    assert_ne!(first, second);
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.edges_between(a, b).unwrap(), vec![first, second]);
    assert_eq!(graph.out_degree(a).unwrap(), 2);
    assert!(graph.validate());
}

#[test]
fn test_add_edge_with_foreign_node() {
    let mut graph: Digraph<u32, ()> = Digraph::new();
    let local = graph.add_node(1);

    let mut other: Digraph<u32, ()> = Digraph::new();
    let foreign = other.add_node(1);

    let err = graph.add_edge((), local, foreign).unwrap_err();
    assert!(matches!(err, GraphError::InvalidHandle { .. }));
    let err = graph.add_edge((), foreign, local).unwrap_err();
    assert!(err.is_invalid_handle());

    // Nothing was registered
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.node(local).unwrap().is_isolated());
    assert!(graph.validate());
}

#[test]
fn test_add_edge_with_removed_node() {
    let mut graph: Digraph<u32, ()> = Digraph::new();
    let a = graph.add_node(1);
    let b = graph.add_node(2);
    graph.remove_node(b).unwrap();

    assert!(graph.add_edge((), a, b).unwrap_err().is_invalid_handle());
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_add_edges_batch_is_all_or_nothing() {
    let mut graph: Digraph<u32, u32> = Digraph::new();
    let a = graph.add_node(1);
    let b = graph.add_node(2);
    let c = graph.add_node(3);
    graph.remove_node(c).unwrap();

    let result = graph.add_edges(vec![(1, a, b), (2, b, a), (3, a, c)]);
    assert!(result.unwrap_err().is_invalid_handle());
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.validate());

    let ids = graph.add_edges(vec![(1, a, b), (2, b, a)]).unwrap();
    assert_eq!(ids.len(), 2);
    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn test_add_nodes_batch() {
    let mut graph: Digraph<&str, ()> = Digraph::new();

    let ids = graph.add_nodes(["a", "b", "c"]);

    assert_eq!(ids.len(), 3);
    assert_eq!(graph.node_count(), 3);
    assert_eq!(*graph.node_data(ids[1]).unwrap(), "b");
}

#[test]
fn test_remove_node_cascades_to_edges() {
    let mut graph: Digraph<&str, &str> = Digraph::new();
    let a = graph.add_node("a");
    let b = graph.add_node("b");
    let c = graph.add_node("c");

    let edge1 = graph.add_edge("a->b", a, b).unwrap();
    let edge2 = graph.add_edge("c->a", c, a).unwrap();
    let edge3 = graph.add_edge("b->c", b, c).unwrap();

    let data = graph.remove_node(a).unwrap();
    assert_eq!(data, "a");

    assert!(graph.node(a).is_err());
    assert!(graph.edge(edge1).is_err());
    assert!(graph.edge(edge2).is_err());
    assert!(graph.edge(edge3).is_ok());

    // Other endpoints no longer reference the removed edges
    assert!(graph.incoming_edges(b).unwrap().is_empty());
    assert!(graph.outgoing_edges(c).unwrap().is_empty());
    assert!(graph.validate());
}

#[test]
fn test_remove_node_drops_exactly_its_degree() {
    let mut graph: Digraph<u32, ()> = Digraph::new();
    let hub = graph.add_node(0);
    let spokes = graph.add_nodes(1..=4);
    for spoke in &spokes {
        graph.add_edge((), hub, *spoke).unwrap();
        graph.add_edge((), *spoke, hub).unwrap();
    }
    graph.add_edge((), hub, hub).unwrap();
    graph.add_edge((), spokes[0], spokes[1]).unwrap();

    let before = graph.edge_count();
    let degree = graph.degree(hub).unwrap();
    // The self loop is counted on both sides but is a single edge
    let incident = degree - 1;

    graph.remove_node(hub).unwrap();

    assert_eq!(graph.edge_count(), before - incident);
    assert_eq!(graph.edge_count(), 1);
    assert!(graph.validate());
}

#[test]
fn test_remove_node_not_in_graph() {
    let mut graph: Digraph<u32, ()> = Digraph::new();
    let a = graph.add_node(1);
    graph.remove_node(a).unwrap();

    let err = graph.remove_node(a).unwrap_err();
    assert!(err.is_not_in_graph());
}

#[test]
fn test_remove_edge() {
    let mut graph: Digraph<u32, &str> = Digraph::new();
    let a = graph.add_node(1);
    let b = graph.add_node(2);
    let edge = graph.add_edge("x", a, b).unwrap();

    assert_eq!(graph.remove_edge(edge).unwrap(), "x");
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.outgoing_edges(a).unwrap().is_empty());
    assert!(graph.incoming_edges(b).unwrap().is_empty());

    assert!(graph.remove_edge(edge).unwrap_err().is_not_in_graph());
}

#[test]
fn test_remove_edge_from_other_graph() {
    let mut graph: Digraph<u32, ()> = Digraph::new();
    let mut other: Digraph<u32, ()> = Digraph::new();
    let a = other.add_node(1);
    let foreign = other.add_edge((), a, a).unwrap();

    // Same index 0 in both graphs, but different identity
    let x = graph.add_node(1);
    graph.add_edge((), x, x).unwrap();

    assert!(graph.remove_edge(foreign).unwrap_err().is_not_in_graph());
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn test_remove_edges_between_removes_all_matches() {
    let mut graph: Digraph<u32, u32> = Digraph::new();
    let a = graph.add_node(1);
    let b = graph.add_node(2);
    graph.add_edge(1, a, b).unwrap();
    graph.add_edge(2, a, b).unwrap();
    let reverse = graph.add_edge(3, b, a).unwrap();

    let removed = graph.remove_edges_between(a, b).unwrap();

    assert_eq!(removed, 2);
    assert_eq!(graph.edge_count(), 1);
    assert!(graph.find_edge(a, b).is_none());
    assert_eq!(graph.find_edge(b, a), Some(reverse));
    assert!(graph.validate());
}

#[test]
fn test_remove_edges_between_unknown_node() {
    let mut graph: Digraph<u32, u32> = Digraph::new();
    let a = graph.add_node(1);
    let b = graph.add_node(2);
    graph.add_edge(1, a, b).unwrap();
    graph.remove_node(b).unwrap();

    assert!(graph.remove_edges_between(a, b).unwrap_err().is_not_in_graph());
}

#[test]
fn test_remove_edges_between_with_no_match() {
    let mut graph: Digraph<u32, u32> = Digraph::new();
    let a = graph.add_node(1);
    let b = graph.add_node(2);

    assert_eq!(graph.remove_edges_between(a, b).unwrap(), 0);
}

#[test]
fn test_find_edge() {
    let mut graph: Digraph<u32, &str> = Digraph::new();
    let tail = graph.add_node(1);
    let head = graph.add_node(2);

    assert!(graph.find_edge(tail, head).is_none());

    graph.add_edge("x", tail, head).unwrap();
    let found = graph.find_edge(tail, head).unwrap();
    assert_eq!(*graph.edge_data(found).unwrap(), "x");

    // Direction matters
    assert!(graph.find_edge(head, tail).is_none());
}

#[test]
fn test_snapshots_are_independent() {
    let mut graph: Digraph<u32, ()> = Digraph::new();
    let a = graph.add_node(1);
    let b = graph.add_node(2);
    graph.add_edge((), a, b).unwrap();

    let mut nodes = graph.node_ids();
    let mut edges = graph.edge_ids();
    nodes.clear();
    edges.clear();

    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.node_ids().len(), 2);
}

#[test]
fn test_payload_mutation() {
    let mut graph: Digraph<String, u32> = Digraph::new();
    let a = graph.add_node("before".to_string());
    let b = graph.add_node("other".to_string());
    let e = graph.add_edge(1, a, b).unwrap();

    let old = graph.set_node_data(a, "after".to_string()).unwrap();
    assert_eq!(old, "before");
    assert_eq!(graph.node_data(a).unwrap(), "after");

    graph.node_data_mut(b).unwrap().push('!');
    assert_eq!(graph.node_data(b).unwrap(), "other!");

    assert_eq!(graph.set_edge_data(e, 2).unwrap(), 1);
    *graph.edge_data_mut(e).unwrap() += 10;
    assert_eq!(*graph.edge_data(e).unwrap(), 12);
}

#[test]
fn test_set_edge_tail_and_head() {
    let mut graph: Digraph<u32, ()> = Digraph::new();
    let a = graph.add_node(1);
    let b = graph.add_node(2);
    let c = graph.add_node(3);
    let e = graph.add_edge((), a, b).unwrap();

    graph.set_edge_tail(e, c).unwrap();
    assert_eq!(graph.edge(e).unwrap().tail(), c);
    assert!(graph.outgoing_edges(a).unwrap().is_empty());
    assert!(graph.outgoing_edges(c).unwrap().contains(&e));

    graph.set_edge_head(e, c).unwrap();
    assert!(graph.edge(e).unwrap().is_self_loop());
    assert!(graph.incoming_edges(b).unwrap().is_empty());
    assert!(graph.incoming_edges(c).unwrap().contains(&e));
    assert!(graph.validate());

    graph.remove_node(c).unwrap();
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.validate());
}

#[test]
fn test_neighbors() {
    let mut graph: Digraph<&str, ()> = Digraph::new();
    let a = graph.add_node("a");
    let b = graph.add_node("b");
    let c = graph.add_node("c");
    graph.add_edge((), a, b).unwrap();
    graph.add_edge((), a, b).unwrap();
    graph.add_edge((), c, a).unwrap();

    assert_eq!(graph.neighbors(a, Direction::Outgoing).unwrap(), vec![b]);
    assert_eq!(graph.neighbors(a, Direction::Incoming).unwrap(), vec![c]);
    assert_eq!(graph.neighbors(a, Direction::Both).unwrap(), vec![b, c]);
}

#[test]
fn test_other_nodes() {
    let mut graph: Digraph<u32, ()> = Digraph::new();
    let ids = graph.add_nodes(0..5);

    let group: BTreeSet<_> = [ids[0], ids[3]].into_iter().collect();
    let others = graph.other_nodes(&group);

    let expected: BTreeSet<_> = [ids[1], ids[2], ids[4]].into_iter().collect();
    assert_eq!(others, expected);
    assert_eq!(graph.other_nodes(&graph.node_ids()), BTreeSet::new());
}

#[test]
fn test_endpoints() {
    let mut graph: Digraph<u32, ()> = Digraph::new();
    let ids = graph.add_nodes(0..4);
    let e1 = graph.add_edge((), ids[0], ids[1]).unwrap();
    let e2 = graph.add_edge((), ids[1], ids[2]).unwrap();
    graph.add_edge((), ids[3], ids[3]).unwrap();

    let ends = graph.endpoints(&[e1, e2]).unwrap();
    let expected: BTreeSet<_> = [ids[0], ids[1], ids[2]].into_iter().collect();
    assert_eq!(ends, expected);

    graph.remove_edge(e2).unwrap();
    assert!(graph.endpoints(&[e1, e2]).unwrap_err().is_not_in_graph());
}

#[test]
fn test_payload_equality_helpers() {
    let mut graph: Digraph<u32, &str> = Digraph::new();
    let a = graph.add_node(7);
    let b = graph.add_node(7);
    let c = graph.add_node(8);
    let e = graph.add_edge("x", a, c).unwrap();
    graph.add_edge("y", b, c).unwrap();

    // Equal payloads, distinct nodes
    assert_ne!(a, b);
    assert_eq!(graph.nodes_with_data(&7), vec![a, b]);
    assert_eq!(graph.edges_with_data(&"x"), vec![e]);
    assert!(graph.nodes_with_data(&99).is_empty());
}

#[test]
fn test_clear_invalidates_old_handles() {
    let mut graph: Digraph<u32, ()> = Digraph::new();
    let a = graph.add_node(1);
    graph.add_edge((), a, a).unwrap();

    graph.clear();
    assert!(graph.is_empty());
    assert_eq!(graph.edge_count(), 0);

    let fresh = graph.add_node(1);
    assert_ne!(fresh, a);
    assert!(graph.node(a).is_err());
}

#[test]
fn test_display_dump() {
    let mut graph: Digraph<u32, &str> = Digraph::new();
    let a = graph.add_node(1);
    let b = graph.add_node(2);
    graph.add_edge("1->2", a, b).unwrap();

    let expected = "\
Graph
  Node n0: 1
    To: 2, 1->2
  Node n1: 2
Edges:
  e0: 1 -> 2, 1->2
";
    assert_eq!(graph.to_string(), expected);
}

#[test]
fn test_nodes_and_edges_iterate_in_creation_order() {
    let mut graph: Digraph<u32, u32> = Digraph::new();
    let ids = graph.add_nodes(0..20);
    for pair in ids.windows(2) {
        graph.add_edge(pair[0].index() as u32, pair[0], pair[1]).unwrap();
    }

    let node_order: Vec<u32> = graph.nodes().map(|n| *n.data()).collect();
    assert_eq!(node_order, (0..20).collect::<Vec<_>>());
    let edge_order: Vec<u32> = graph.edges().map(|e| *e.data()).collect();
    assert_eq!(edge_order, (0..19).collect::<Vec<_>>());
}

#[test]
fn test_diverged_clones_reject_each_others_handles() {
    let mut original: Digraph<&str, ()> = Digraph::new();
    let shared = original.add_node("shared");

    let mut copy = original.clone();
    assert_ne!(copy.id(), original.id());

    let x = original.add_node("only-in-original");
    let y = copy.add_node("only-in-copy");
    assert_eq!(x.index(), y.index());
    assert_ne!(x, y);

    // Handles issued after the clone never cross over
    assert!(copy.node_data(x).unwrap_err().is_not_in_graph());
    assert!(original.node_data(y).unwrap_err().is_not_in_graph());
    assert!(copy.remove_node(x).unwrap_err().is_not_in_graph());
    assert!(copy.add_edge((), y, x).unwrap_err().is_invalid_handle());
    assert_eq!(copy.node_count(), 2);
    assert_eq!(*copy.node_data(y).unwrap(), "only-in-copy");

    // Neither do handles issued before it
    assert!(copy.node(shared).unwrap_err().is_not_in_graph());
    assert!(original.validate());
    assert!(copy.validate());
}

#[test]
fn test_clone_with_map_translates_handles() {
    let mut original: Digraph<&str, u32> = Digraph::new();
    let a = original.add_node("a");
    let b = original.add_node("b");
    let e = original.add_edge(7, a, b).unwrap();

    let (mut copy, map) = original.clone_with_map();
    assert_eq!(map.source(), original.id());
    assert_eq!(map.target(), copy.id());

    let copy_a = map.node(a).unwrap();
    let copy_b = map.node(b).unwrap();
    let copy_e = map.edge(e).unwrap();
    assert_eq!(*copy.node_data(copy_a).unwrap(), "a");
    assert_eq!(copy.find_edge(copy_a, copy_b), Some(copy_e));
    assert_eq!(*copy.edge_data(copy_e).unwrap(), 7);

    // Removing from the copy leaves the original intact
    copy.remove_node(copy_a).unwrap();
    assert_eq!(original.edge_count(), 1);
    assert_eq!(copy.edge_count(), 0);

    // Handles issued after the clone, or by the copy, have no translation
    let late = original.add_node("late");
    assert!(map.node(late).is_none());
    assert!(map.node(copy_b).is_none());
}
