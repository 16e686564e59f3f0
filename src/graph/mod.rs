//! Core property graph implementation
//!
//! This module implements the property graph data model with:
//! - Vertices with ordered, indexed labels and metadata
//! - Directed, labeled edges with metadata; self-loops and parallel edges allowed
//! - Dense id arenas that recycle the smallest free id
//! - Label and adjacency indices kept consistent on every mutation

mod adjacency;
mod label_index;
mod registry;

pub mod edge;
pub mod pattern;
pub mod store;
pub mod types;
pub mod value;
pub mod vertex;

// Re-export main types
pub use edge::Edge;
pub use pattern::{EdgePattern, Matches, VertexPattern};
pub use store::{GraphError, GraphResult, GraphStatistics, PropertyGraph};
pub use types::{EdgeId, Label, VertexId};
pub use value::{metadata, Metadata, Value};
pub use vertex::Vertex;
