//! Core graph types and operations.
//!
//! This module defines the fundamental building blocks:
//! - [`NodeId`] / [`EdgeId`]: opaque handles to graph elements
//! - [`Node`] / [`Edge`]: payload plus incidence information
//! - [`Digraph`]: the graph store
//! - [`traversal`]: breadth-first and depth-first search with early exit

mod handle;
mod types;
mod digraph;
pub mod traversal;

pub use handle::{EdgeId, ElementKind, GraphId, HandleMap, NodeId};
pub use types::{Direction, Edge, Node};
pub use digraph::Digraph;
pub use traversal::{Order, Processor, Traversal, VisitEvent, VisitRecorder};
