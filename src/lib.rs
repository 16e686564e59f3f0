//! propgraph: an in-memory labeled property graph
//!
//! A [`PropertyGraph`] owns all of its vertices and edges. Callers hold plain
//! [`VertexId`] / [`EdgeId`] handles and borrow records for inspection.
//!
//! # Data model
//!
//! - Vertices carry an ordered set of labels and string-keyed metadata
//! - Edges are directed, carry exactly one non-empty label and metadata
//! - Several edges may join the same pair of vertices
//! - Ids are dense; a removed id is reused, smallest first
//!
//! Removing a vertex removes every edge touching it, then its label
//! memberships, then the vertex itself.
//!
//! ## Example Usage
//!
//! ```rust
//! use propgraph::graph::{metadata, Metadata, PropertyGraph};
//!
//! let mut graph = PropertyGraph::new();
//!
//! let root = graph.create_vertex(Vec::<&str>::new(), Metadata::new());
//! let alice = graph.create_vertex(["Person"], metadata([("name", "Alice")]));
//! let knows = graph.create_edge(root, alice, "knows", Metadata::new()).unwrap();
//!
//! assert_eq!(graph.out_edges(root).unwrap(), &[knows]);
//! assert!(graph.vertices_with_label("Person").contains(&alice));
//!
//! graph.remove_vertex(alice).unwrap();
//! assert!(graph.get_edge(knows).is_none());
//! assert_eq!(graph.count_vertices(), 1);
//! assert_eq!(graph.count_edges(), 0);
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod graph;

// Re-export main types for convenience
pub use config::{ConfigError, ConfigResult, GraphConfig, MAX_CAPACITY};
pub use graph::{
    Edge, EdgeId, EdgePattern, GraphError, GraphResult, GraphStatistics, Label, Matches, Metadata,
    PropertyGraph, Value, Vertex, VertexId, VertexPattern,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
