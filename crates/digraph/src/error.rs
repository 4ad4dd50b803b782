//! Error types for digraph operations.
//!
//! All fallible operations return [`Result<T>`]. Errors are raised before any
//! mutation happens, so a failed call never leaves the graph half-updated.

use crate::graph::ElementKind;
use thiserror::Error;

/// Result type alias for digraph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Comprehensive error type for all graph operations.
#[derive(Error, Debug)]
pub enum GraphError {
    /// A node or edge handle does not belong to the graph it was passed to.
    ///
    /// Raised by removals, lookups and by traversals whose start node is
    /// not a member.
    #[error("{kind} {id} is not in the graph")]
    NotInGraph {
        /// Whether the handle names a node or an edge
        kind: ElementKind,
        /// Display form of the offending handle
        id: String,
    },

    /// A handle passed as an endpoint was never issued by this graph, or
    /// its element has since been removed.
    #[error("Invalid handle: {kind} {id} is not owned by this graph")]
    InvalidHandle {
        /// Whether the handle names a node or an edge
        kind: ElementKind,
        /// Display form of the offending handle
        id: String,
    },

    /// Serialization error while exporting
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error details
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl GraphError {
    /// Build a [`GraphError::NotInGraph`] for a node or edge handle.
    pub fn not_in_graph(kind: ElementKind, id: impl std::fmt::Display) -> Self {
        Self::NotInGraph {
            kind,
            id: id.to_string(),
        }
    }

    /// Build a [`GraphError::InvalidHandle`] for a node or edge handle.
    pub fn invalid_handle(kind: ElementKind, id: impl std::fmt::Display) -> Self {
        Self::InvalidHandle {
            kind,
            id: id.to_string(),
        }
    }

    /// Create a serialization error from a message and optional source.
    pub fn serialization<E>(message: impl Into<String>, source: Option<E>) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Serialization {
            message: message.into(),
            source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }

    /// Returns true for [`GraphError::NotInGraph`].
    pub fn is_not_in_graph(&self) -> bool {
        matches!(self, Self::NotInGraph { .. })
    }

    /// Returns true for [`GraphError::InvalidHandle`].
    pub fn is_invalid_handle(&self) -> bool {
        matches!(self, Self::InvalidHandle { .. })
    }
}
