//! Directed edge record for the property graph
//!
//! Edges always point from `start` to `end`. Several edges may join the same
//! pair of vertices, with the same or different labels.

use super::types::{EdgeId, Label, VertexId};
use super::value::{Metadata, Value};

#[derive(Debug, Clone)]
pub struct Edge {
    id: EdgeId,

    /// Edge goes FROM this vertex
    start: VertexId,

    /// Edge goes TO this vertex
    end: VertexId,

    /// Kind of connection (e.g. "knows"); never empty
    label: Label,

    metadata: Metadata,
}

impl Edge {
    pub(crate) fn new(id: EdgeId, start: VertexId, end: VertexId, label: Label, metadata: Metadata) -> Self {
        Edge {
            id,
            start,
            end,
            label,
            metadata,
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn start(&self) -> VertexId {
        self.start
    }

    pub fn end(&self) -> VertexId {
        self.end
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    pub fn has_property(&self, key: &str) -> bool {
        self.metadata.contains_key(key)
    }

    /// Check if this edge joins two vertices, in either direction
    pub fn connects(&self, a: VertexId, b: VertexId) -> bool {
        (self.start == a && self.end == b) || (self.start == b && self.end == a)
    }

    pub fn starts_from(&self, vertex: VertexId) -> bool {
        self.start == vertex
    }

    pub fn ends_at(&self, vertex: VertexId) -> bool {
        self.end == vertex
    }

    pub fn is_self_loop(&self) -> bool {
        self.start == self.end
    }

    /// The endpoint across from `vertex`, if `vertex` is an endpoint at all
    pub fn opposite(&self, vertex: VertexId) -> Option<VertexId> {
        if self.start == vertex {
            Some(self.end)
        } else if self.end == vertex {
            Some(self.start)
        } else {
            None
        }
    }

    pub(crate) fn set_metadata(&mut self, metadata: Metadata) -> Metadata {
        std::mem::replace(&mut self.metadata, metadata)
    }

    pub(crate) fn set_property(&mut self, key: String, value: Value) -> Option<Value> {
        self.metadata.insert(key, value)
    }

    pub(crate) fn remove_property(&mut self, key: &str) -> Option<Value> {
        self.metadata.remove(key)
    }
}
