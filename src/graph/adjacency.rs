//! Per-vertex incoming/outgoing edge lists
//!
//! Lists are indexed by vertex slot, parallel to the vertex registry. Edge ids
//! appear in insertion order; removal is by id and keeps the order of the rest.

use super::types::{EdgeId, VertexId};
use tracing::{trace, warn};

#[derive(Debug, Clone, Default)]
pub(crate) struct AdjacencyIndex {
    outgoing: Vec<Vec<EdgeId>>,
    incoming: Vec<Vec<EdgeId>>,
}

impl AdjacencyIndex {
    pub fn with_capacity(vertices: usize) -> Self {
        let mut outgoing: Vec<Vec<EdgeId>> = Vec::new();
        let mut incoming: Vec<Vec<EdgeId>> = Vec::new();
        if outgoing.try_reserve_exact(vertices).is_err() || incoming.try_reserve_exact(vertices).is_err() {
            warn!("Could not reserve adjacency for {} vertices, growing on demand", vertices);
        }
        AdjacencyIndex { outgoing, incoming }
    }

    /// Make room for a vertex slot; a reused slot must already be empty
    pub fn add_vertex(&mut self, vertex: VertexId) {
        let idx = vertex.index();
        if idx >= self.outgoing.len() {
            self.outgoing.resize_with(idx + 1, Vec::new);
            self.incoming.resize_with(idx + 1, Vec::new);
        }
        debug_assert!(
            self.outgoing[idx].is_empty() && self.incoming[idx].is_empty(),
            "stale adjacency for reused {}",
            vertex
        );
    }

    pub fn add_edge(&mut self, edge: EdgeId, start: VertexId, end: VertexId) {
        trace!("Adjacency: {} -[{}]-> {}", start, edge, end);
        self.outgoing[start.index()].push(edge);
        self.incoming[end.index()].push(edge);
    }

    pub fn remove_edge(&mut self, edge: EdgeId, start: VertexId, end: VertexId) {
        trace!("Adjacency: drop {} -[{}]-> {}", start, edge, end);
        if let Some(adj) = self.outgoing.get_mut(start.index()) {
            adj.retain(|&eid| eid != edge);
        }
        if let Some(adj) = self.incoming.get_mut(end.index()) {
            adj.retain(|&eid| eid != edge);
        }
    }

    /// Every edge touching `vertex`, each listed once (self-loops appear on both sides)
    pub fn incident(&self, vertex: VertexId) -> Vec<EdgeId> {
        let mut edges: Vec<EdgeId> = self
            .outgoing(vertex)
            .iter()
            .chain(self.incoming(vertex))
            .copied()
            .collect();
        edges.sort_unstable();
        edges.dedup();
        edges
    }

    pub fn outgoing(&self, vertex: VertexId) -> &[EdgeId] {
        self.outgoing.get(vertex.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn incoming(&self, vertex: VertexId) -> &[EdgeId] {
        self.incoming.get(vertex.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn clear(&mut self) {
        self.outgoing.clear();
        self.incoming.clear();
    }
}
