//! Vertex record for the property graph
//!
//! A vertex carries:
//! - An id issued by its owning graph
//! - An ordered, duplicate-free list of labels
//! - Metadata (key/value pairs)
//!
//! Callers only ever see `&Vertex` borrowed from a [`PropertyGraph`](super::PropertyGraph).
//! Label changes go through the graph so the label index stays in step.

use super::types::{Label, VertexId};
use super::value::{Metadata, Value};
use indexmap::IndexSet;

#[derive(Debug, Clone)]
pub struct Vertex {
    id: VertexId,

    /// Insertion-ordered labels
    labels: IndexSet<Label>,

    metadata: Metadata,
}

impl Vertex {
    /// Build a vertex record; empty and repeated labels are dropped
    pub(crate) fn new(id: VertexId, labels: impl IntoIterator<Item = Label>, metadata: Metadata) -> Self {
        let labels = labels.into_iter().filter(|l| !l.is_empty()).collect();
        Vertex { id, labels, metadata }
    }

    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Labels in the order they were added
    pub fn labels(&self) -> impl ExactSizeIterator<Item = &Label> + '_ {
        self.labels.iter()
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Get a metadata value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    pub fn has_property(&self, key: &str) -> bool {
        self.metadata.contains_key(key)
    }

    /// Returns false if the label was already present
    pub(crate) fn add_label(&mut self, label: Label) -> bool {
        self.labels.insert(label)
    }

    /// Returns false if the label was absent
    pub(crate) fn remove_label(&mut self, label: &str) -> bool {
        // shift_remove keeps the remaining labels in insertion order
        self.labels.shift_remove(label)
    }

    pub(crate) fn take_labels(&mut self) -> IndexSet<Label> {
        std::mem::take(&mut self.labels)
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
