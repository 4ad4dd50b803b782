//! # digraph
//!
//! A generic directed graph with bidirectional adjacency and early-exit
//! breadth-first and depth-first traversal.
//!
//! ## Core Principles
//!
//! - **Opaque Payloads**: nodes carry any `N`, edges any `E`
//! - **Handles, Not References**: elements are addressed by [`NodeId`] and [`EdgeId`]
//! - **Consistent Incidence**: every edge is indexed by its tail and head, always
//! - **Fail Fast**: bad handles are reported before anything is mutated
//!
//! ## Architecture
//!
//! ```text
//! Callers (editor front-end, tools)
//!     ↓
//! Query Builder / Export
//!     ↓
//! Traversal (BFS, DFS, Processor callbacks)
//!     ↓
//! Digraph store (nodes, edges, incidence sets)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use digraph::{Digraph, VisitRecorder};
//!
//! # fn main() -> digraph::Result<()> {
//! let mut graph: Digraph<&str, &str> = Digraph::new();
//! let a = graph.add_node("a");
//! let b = graph.add_node("b");
//! let c = graph.add_node("c");
//! graph.add_edge("a->b", a, b)?;
//! graph.add_edge("b->c", b, c)?;
//!
//! let mut recorder = VisitRecorder::new();
//! let outcome = graph.depth_first_traversal(a, &mut recorder)?;
//! assert!(outcome.is_completed());
//! assert_eq!(recorder.pre_order(), vec![a, b, c]);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod export;
pub mod graph;
pub mod query;

// Re-export main types
pub use error::{GraphError, Result};
pub use graph::{
    traversal, Digraph, Direction, Edge, EdgeId, ElementKind, GraphId, HandleMap, Node, NodeId,
    Order, Processor, Traversal, VisitEvent, VisitRecorder,
};
pub use query::NodeQuery;
