//! Containment predicates over vertices and edges
//!
//! `a.matches(b)` asks whether `a` satisfies everything `b` asks for: every
//! label `b` names and every metadata entry `b` carries. `a` may carry more.
//! The check is one-directional, so `a.matches(b)` says nothing about
//! `b.matches(a)`.

use super::edge::Edge;
use super::types::{Label, VertexId};
use super::value::{metadata_contains, Metadata, Value};
use super::vertex::Vertex;

/// Containment check of `Self` against a candidate description
pub trait Matches<Candidate: ?Sized> {
    fn matches(&self, candidate: &Candidate) -> bool;
}

/// Requirements a vertex must satisfy
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexPattern {
    pub labels: Vec<Label>,
    pub metadata: Metadata,
}

impl VertexPattern {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<Label>) -> Self {
        self.labels.push(label.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl From<&Vertex> for VertexPattern {
    fn from(vertex: &Vertex) -> Self {
        VertexPattern {
            labels: vertex.labels().cloned().collect(),
            metadata: vertex.metadata().clone(),
        }
    }
}

/// Requirements an edge must satisfy; `None` fields accept anything
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgePattern {
    pub start: Option<VertexId>,
    pub end: Option<VertexId>,
    pub label: Option<Label>,
    pub metadata: Metadata,
}

impl EdgePattern {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(mut self, start: VertexId) -> Self {
        self.start = Some(start);
        self
    }

    pub fn ending_at(mut self, end: VertexId) -> Self {
        self.end = Some(end);
        self
    }

    pub fn with_label(mut self, label: impl Into<Label>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl From<&Edge> for EdgePattern {
    fn from(edge: &Edge) -> Self {
        EdgePattern {
            start: Some(edge.start()),
            end: Some(edge.end()),
            label: Some(edge.label().clone()),
            metadata: edge.metadata().clone(),
        }
    }
}

impl Matches<VertexPattern> for Vertex {
    fn matches(&self, candidate: &VertexPattern) -> bool {
        candidate.labels.iter().all(|l| self.has_label(l.as_str()))
            && metadata_contains(self.metadata(), &candidate.metadata)
    }
}

impl Matches<Vertex> for Vertex {
    fn matches(&self, candidate: &Vertex) -> bool {
        candidate.labels().all(|l| self.has_label(l.as_str()))
            && metadata_contains(self.metadata(), candidate.metadata())
    }
}

impl Matches<EdgePattern> for Edge {
    fn matches(&self, candidate: &EdgePattern) -> bool {
        candidate.start.map_or(true, |s| s == self.start())
            && candidate.end.map_or(true, |e| e == self.end())
            && candidate.label.as_ref().map_or(true, |l| l == self.label())
            && metadata_contains(self.metadata(), &candidate.metadata)
    }
}

impl Matches<Edge> for Edge {
    fn matches(&self, candidate: &Edge) -> bool {
        candidate.start() == self.start()
            && candidate.end() == self.end()
            && candidate.label() == self.label()
            && metadata_contains(self.metadata(), candidate.metadata())
    }
}
