//! In-memory property graph
//!
//! `PropertyGraph` owns every vertex and edge and keeps three structures in
//! step on each mutation:
//! - entity registries: dense arenas of vertex and edge records
//! - label index: label -> vertex ids / edge ids
//! - adjacency index: vertex -> outgoing / incoming edge ids
//!
//! Mutations update the registry, then the label index, then the adjacency
//! index. All ids and labels a call refers to are validated before anything
//! changes, so a call that returns `Err` leaves the graph as it was.

use super::adjacency::AdjacencyIndex;
use super::edge::Edge;
use super::label_index::LabelIndex;
use super::pattern::{EdgePattern, Matches, VertexPattern};
use super::registry::Registry;
use super::types::{EdgeId, Label, VertexId};
use super::value::{Metadata, Value};
use super::vertex::Vertex;
use crate::config::GraphConfig;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Vertex {0} not found")]
    VertexNotFound(VertexId),

    #[error("Edge {0} not found")]
    EdgeNotFound(EdgeId),

    #[error("Invalid label: {0:?}")]
    InvalidLabel(String),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Live entity counts, overall and per label
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphStatistics {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub vertex_labels: BTreeMap<Label, usize>,
    pub edge_labels: BTreeMap<Label, usize>,
}

/// Labeled, attributed, directed multigraph
///
/// Vertices and edges are reached only through their ids. A removed entity's
/// id goes back into circulation and the smallest free id is handed out first.
#[derive(Debug, Clone)]
pub struct PropertyGraph {
    vertices: Registry<VertexId, Vertex>,
    edges: Registry<EdgeId, Edge>,
    labels: LabelIndex,
    adjacency: AdjacencyIndex,
}

impl PropertyGraph {
    /// Create an empty graph with default capacities
    pub fn new() -> Self {
        Self::with_config(&GraphConfig::default())
    }

    pub fn with_config(config: &GraphConfig) -> Self {
        PropertyGraph {
            vertices: Registry::with_capacity(config.vertex_capacity),
            edges: Registry::with_capacity(config.edge_capacity),
            labels: LabelIndex::with_capacity(config.label_capacity),
            adjacency: AdjacencyIndex::with_capacity(config.vertex_capacity),
        }
    }

    // ============================================================
    // Entity lifecycle
    // ============================================================

    /// Create a vertex; never fails
    ///
    /// Labels keep their order. Repeated and empty labels are dropped.
    pub fn create_vertex<I>(&mut self, labels: I, metadata: Metadata) -> VertexId
    where
        I: IntoIterator,
        I::Item: Into<Label>,
    {
        let id = self
            .vertices
            .insert_with(|id| Vertex::new(id, labels.into_iter().map(Into::<Label>::into), metadata));

        if let Some(vertex) = self.vertices.get(id) {
            for label in vertex.labels() {
                self.labels.insert_vertex(label, id);
            }
        }
        self.adjacency.add_vertex(id);

        debug!("Created vertex {}", id);
        id
    }

    /// Create a directed edge `start -> end`
    ///
    /// Self-loops and parallel edges are allowed; every call yields a new id.
    pub fn create_edge(
        &mut self,
        start: VertexId,
        end: VertexId,
        label: impl Into<Label>,
        metadata: Metadata,
    ) -> GraphResult<EdgeId> {
        if !self.vertices.contains(start) {
            return Err(rejected_vertex(start));
        }
        if !self.vertices.contains(end) {
            return Err(rejected_vertex(end));
        }
        let label = label.into();
        if label.is_empty() {
            warn!("Rejected edge {} -> {}: empty label", start, end);
            return Err(GraphError::InvalidLabel(label.as_str().to_string()));
        }

        let id = self
            .edges
            .insert_with(|id| Edge::new(id, start, end, label, metadata));

        if let Some(edge) = self.edges.get(id) {
            self.labels.insert_edge(edge.label(), id);
        }
        self.adjacency.add_edge(id, start, end);

        debug!("Created edge {}: {} -> {}", id, start, end);
        Ok(id)
    }

    /// Remove a vertex together with every edge touching it
    pub fn remove_vertex(&mut self, id: VertexId) -> GraphResult<()> {
        if !self.vertices.contains(id) {
            return Err(rejected_vertex(id));
        }

        // Incident edges first, in both directions
        let incident = self.adjacency.incident(id);
        debug!("Removing vertex {} with {} incident edges", id, incident.len());
        for edge_id in incident {
            let detached = self.detach_edge(edge_id);
            debug_assert!(detached.is_some(), "adjacency of {} lists dead {}", id, edge_id);
        }
        debug_assert!(self.adjacency.outgoing(id).is_empty() && self.adjacency.incoming(id).is_empty());

        // Then label memberships, then the slot itself
        if let Some(vertex) = self.vertices.get_mut(id) {
            for label in vertex.take_labels() {
                self.labels.remove_vertex(label.as_str(), id);
            }
        }
        self.vertices.remove(id);

        debug!("Removed vertex {}", id);
        Ok(())
    }

    pub fn remove_edge(&mut self, id: EdgeId) -> GraphResult<()> {
        self.detach_edge(id).ok_or_else(|| rejected_edge(id))?;
        debug!("Removed edge {}", id);
        Ok(())
    }

    fn detach_edge(&mut self, id: EdgeId) -> Option<Edge> {
        let edge = self.edges.remove(id)?;
        self.labels.remove_edge(edge.label().as_str(), id);
        self.adjacency.remove_edge(id, edge.start(), edge.end());
        Some(edge)
    }

    /// Remove everything and restart id issuance from zero
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
        self.labels.clear();
        self.adjacency.clear();
        debug!("Cleared graph");
    }

    // ============================================================
    // Lookup
    // ============================================================

    pub fn get_vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    pub fn has_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains(id)
    }

    pub fn has_edge(&self, id: EdgeId) -> bool {
        self.edges.contains(id)
    }

    pub fn count_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn count_edges(&self) -> usize {
        self.edges.len()
    }

    /// Live vertices in ascending id order
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.vertices.iter()
    }

    /// Live edges in ascending id order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter()
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.ids()
    }

    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.ids()
    }

    // ============================================================
    // Labels
    // ============================================================

    /// Add a label to a vertex and index it
    ///
    /// Returns `Ok(false)` if the vertex already carried the label.
    pub fn add_vertex_label(&mut self, id: VertexId, label: impl Into<Label>) -> GraphResult<bool> {
        let label = label.into();
        let vertex = self.vertices.get_mut(id).ok_or_else(|| rejected_vertex(id))?;
        if label.is_empty() {
            warn!("Rejected empty label for vertex {}", id);
            return Err(GraphError::InvalidLabel(label.as_str().to_string()));
        }
        if vertex.has_label(label.as_str()) {
            return Ok(false);
        }

        self.labels.insert_vertex(&label, id);
        vertex.add_label(label);
        Ok(true)
    }

    /// Remove a label from a vertex and from the index
    ///
    /// Returns `Ok(false)` if the vertex did not carry the label.
    pub fn remove_vertex_label(&mut self, id: VertexId, label: &str) -> GraphResult<bool> {
        let vertex = self.vertices.get_mut(id).ok_or_else(|| rejected_vertex(id))?;
        if !vertex.remove_label(label) {
            return Ok(false);
        }
        self.labels.remove_vertex(label, id);
        Ok(true)
    }

    /// Drop every label of a vertex
    pub fn clear_vertex_labels(&mut self, id: VertexId) -> GraphResult<()> {
        let vertex = self.vertices.get_mut(id).ok_or_else(|| rejected_vertex(id))?;
        for label in vertex.take_labels() {
            self.labels.remove_vertex(label.as_str(), id);
        }
        Ok(())
    }

    pub fn has_vertex_label(&self, id: VertexId, label: &str) -> GraphResult<bool> {
        self.vertices
            .get(id)
            .map(|v| v.has_label(label))
            .ok_or(GraphError::VertexNotFound(id))
    }

    /// Vertices carrying `label`; empty for labels nobody carries
    pub fn vertices_with_label(&self, label: &str) -> HashSet<VertexId> {
        self.labels
            .vertices(label)
            .map(|bucket| bucket.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Vertices carrying at least one of `labels`
    pub fn vertices_with_labels<I>(&self, labels: I) -> HashSet<VertexId>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        labels
            .into_iter()
            .filter_map(|label| self.labels.vertices(label.as_ref()))
            .flat_map(|bucket| bucket.iter().copied())
            .collect()
    }

    /// Edges labeled `label`; empty for labels nobody carries
    pub fn edges_with_label(&self, label: &str) -> HashSet<EdgeId> {
        self.labels
            .edges(label)
            .map(|bucket| bucket.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Labels carried by at least one live vertex
    pub fn all_vertex_labels(&self) -> BTreeSet<Label> {
        self.labels.vertex_labels().map(|(l, _)| l.clone()).collect()
    }

    /// Labels carried by at least one live edge
    pub fn all_edge_labels(&self) -> BTreeSet<Label> {
        self.labels.edge_labels().map(|(l, _)| l.clone()).collect()
    }

    // ============================================================
    // Adjacency
    // ============================================================

    /// Edges leaving `id`, oldest first
    pub fn out_edges(&self, id: VertexId) -> GraphResult<&[EdgeId]> {
        self.require_vertex(id)?;
        Ok(self.adjacency.outgoing(id))
    }

    /// Edges entering `id`, oldest first
    pub fn in_edges(&self, id: VertexId) -> GraphResult<&[EdgeId]> {
        self.require_vertex(id)?;
        Ok(self.adjacency.incoming(id))
    }

    pub fn out_edges_with_label(&self, id: VertexId, label: &str) -> GraphResult<Vec<EdgeId>> {
        Ok(self.filter_by_label(self.out_edges(id)?, label))
    }

    pub fn in_edges_with_label(&self, id: VertexId, label: &str) -> GraphResult<Vec<EdgeId>> {
        Ok(self.filter_by_label(self.in_edges(id)?, label))
    }

    /// (in, out) edge counts; a self-loop counts once on each side
    pub fn degree(&self, id: VertexId) -> GraphResult<(usize, usize)> {
        Ok((self.in_edges(id)?.len(), self.out_edges(id)?.len()))
    }

    /// First edge found in `start`'s out-adjacency that ends at `end`
    ///
    /// Out-adjacency is kept in creation order, so among parallel edges this
    /// is the oldest one still alive.
    pub fn edge_between(&self, start: VertexId, end: VertexId) -> Option<EdgeId> {
        self.adjacency
            .outgoing(start)
            .iter()
            .copied()
            .find(|&eid| self.edges.get(eid).is_some_and(|e| e.end() == end))
    }

    /// Every edge `start -> end`, oldest first
    pub fn edges_between(&self, start: VertexId, end: VertexId) -> GraphResult<Vec<EdgeId>> {
        self.require_vertex(end)?;
        Ok(self
            .out_edges(start)?
            .iter()
            .copied()
            .filter(|&eid| self.edges.get(eid).is_some_and(|e| e.end() == end))
            .collect())
    }

    fn filter_by_label(&self, edges: &[EdgeId], label: &str) -> Vec<EdgeId> {
        edges
            .iter()
            .copied()
            .filter(|&eid| self.edges.get(eid).is_some_and(|e| e.label().as_str() == label))
            .collect()
    }

    // ============================================================
    // Metadata
    // ============================================================

    /// Replace a vertex's metadata, returning the previous map
    pub fn set_vertex_metadata(&mut self, id: VertexId, metadata: Metadata) -> GraphResult<Metadata> {
        let vertex = self.vertices.get_mut(id).ok_or_else(|| rejected_vertex(id))?;
        Ok(vertex.set_metadata(metadata))
    }

    pub fn set_vertex_property(
        &mut self,
        id: VertexId,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> GraphResult<Option<Value>> {
        let vertex = self.vertices.get_mut(id).ok_or_else(|| rejected_vertex(id))?;
        Ok(vertex.set_property(key.into(), value.into()))
    }

    pub fn remove_vertex_property(&mut self, id: VertexId, key: &str) -> GraphResult<Option<Value>> {
        let vertex = self.vertices.get_mut(id).ok_or_else(|| rejected_vertex(id))?;
        Ok(vertex.remove_property(key))
    }

    /// Replace an edge's metadata, returning the previous map
    pub fn set_edge_metadata(&mut self, id: EdgeId, metadata: Metadata) -> GraphResult<Metadata> {
        let edge = self.edges.get_mut(id).ok_or_else(|| rejected_edge(id))?;
        Ok(edge.set_metadata(metadata))
    }

    pub fn set_edge_property(
        &mut self,
        id: EdgeId,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> GraphResult<Option<Value>> {
        let edge = self.edges.get_mut(id).ok_or_else(|| rejected_edge(id))?;
        Ok(edge.set_property(key.into(), value.into()))
    }

    pub fn remove_edge_property(&mut self, id: EdgeId, key: &str) -> GraphResult<Option<Value>> {
        let edge = self.edges.get_mut(id).ok_or_else(|| rejected_edge(id))?;
        Ok(edge.remove_property(key))
    }

    // ============================================================
    // Matching
    // ============================================================

    /// Vertices satisfying `pattern`, ascending by id
    ///
    /// Only the smallest label bucket the pattern names is scanned.
    pub fn find_vertices(&self, pattern: &VertexPattern) -> Vec<VertexId> {
        let mut found: Vec<VertexId> = if pattern.labels.is_empty() {
            self.vertices
                .iter()
                .filter(|v| v.matches(pattern))
                .map(Vertex::id)
                .collect()
        } else {
            let buckets: Option<Vec<_>> = pattern
                .labels
                .iter()
                .map(|l| self.labels.vertices(l.as_str()))
                .collect();
            // A label nobody carries rules out every vertex
            let Some(smallest) = buckets.and_then(|b| b.into_iter().min_by_key(|set| set.len())) else {
                return Vec::new();
            };
            smallest
                .iter()
                .filter_map(|&id| self.vertices.get(id))
                .filter(|v| v.matches(pattern))
                .map(Vertex::id)
                .collect()
        };
        found.sort_unstable();
        found
    }

    /// Edges satisfying `pattern`, ascending by id
    pub fn find_edges(&self, pattern: &EdgePattern) -> Vec<EdgeId> {
        let candidates: Vec<EdgeId> = if let Some(label) = &pattern.label {
            self.labels
                .edges(label.as_str())
                .map(|bucket| bucket.iter().copied().collect())
                .unwrap_or_default()
        } else if let Some(start) = pattern.start {
            self.adjacency.outgoing(start).to_vec()
        } else if let Some(end) = pattern.end {
            self.adjacency.incoming(end).to_vec()
        } else {
            self.edges.ids().collect()
        };

        let mut found: Vec<EdgeId> = candidates
            .into_iter()
            .filter(|&eid| self.edges.get(eid).is_some_and(|e| e.matches(pattern)))
            .collect();
        found.sort_unstable();
        found
    }

    pub fn statistics(&self) -> GraphStatistics {
        GraphStatistics {
            vertex_count: self.count_vertices(),
            edge_count: self.count_edges(),
            vertex_labels: self
                .labels
                .vertex_labels()
                .map(|(l, n)| (l.clone(), n))
                .collect(),
            edge_labels: self
                .labels
                .edge_labels()
                .map(|(l, n)| (l.clone(), n))
                .collect(),
        }
    }

    fn require_vertex(&self, id: VertexId) -> GraphResult<&Vertex> {
        self.vertices.get(id).ok_or(GraphError::VertexNotFound(id))
    }
}

impl Default for PropertyGraph {
    fn default() -> Self {
        Self::new()
    }
}

fn rejected_vertex(id: VertexId) -> GraphError {
    warn!("Rejected mutation: vertex {} does not exist", id);
    GraphError::VertexNotFound(id)
}

fn rejected_edge(id: EdgeId) -> GraphError {
    warn!("Rejected mutation: edge {} does not exist", id);
    GraphError::EdgeNotFound(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::value::metadata;

    fn person(graph: &mut PropertyGraph) -> VertexId {
        graph.create_vertex(["Person"], Metadata::new())
    }

    #[test]
    fn test_create_and_get_vertex() {
        let mut graph = PropertyGraph::new();
        let id = graph.create_vertex(["Person", "Employee"], metadata([("name", "Alice"), ("team", "db")]));

        assert_eq!(graph.count_vertices(), 1);
        let vertex = graph.get_vertex(id).unwrap();
        assert_eq!(vertex.id(), id);
        assert_eq!(vertex.label_count(), 2);
        assert_eq!(vertex.get("name").and_then(Value::as_str), Some("Alice"));
    }

    #[test]
    fn test_create_and_get_edge() {
        let mut graph = PropertyGraph::new();
        let a = person(&mut graph);
        let b = person(&mut graph);

        let edge_id = graph.create_edge(a, b, "knows", metadata([("since", 2020)])).unwrap();

        assert_eq!(graph.count_edges(), 1);
        let edge = graph.get_edge(edge_id).unwrap();
        assert_eq!(edge.start(), a);
        assert_eq!(edge.end(), b);
        assert_eq!(edge.label().as_str(), "knows");
        assert_eq!(edge.get("since").and_then(Value::as_integer), Some(2020));
    }

    #[test]
    fn test_edge_validation() {
        let mut graph = PropertyGraph::new();
        let a = person(&mut graph);
        let missing = VertexId::new(999);

        assert_eq!(
            graph.create_edge(missing, a, "knows", Metadata::new()),
            Err(GraphError::VertexNotFound(missing))
        );
        assert_eq!(
            graph.create_edge(a, missing, "knows", Metadata::new()),
            Err(GraphError::VertexNotFound(missing))
        );
        assert_eq!(
            graph.create_edge(a, a, "", Metadata::new()),
            Err(GraphError::InvalidLabel(String::new()))
        );
        assert_eq!(graph.count_edges(), 0);
        assert!(graph.out_edges(a).unwrap().is_empty());
        assert!(graph.all_edge_labels().is_empty());
    }

    #[test]
    fn test_failed_edge_does_not_consume_id() {
        let mut graph = PropertyGraph::new();
        let a = person(&mut graph);
        let _ = graph.create_edge(a, VertexId::new(7), "x", Metadata::new());
        assert_eq!(graph.create_edge(a, a, "x", Metadata::new()), Ok(EdgeId::new(0)));
    }

    #[test]
    fn test_adjacency_lists() {
        let mut graph = PropertyGraph::new();
        let n1 = person(&mut graph);
        let n2 = person(&mut graph);
        let n3 = person(&mut graph);

        let e1 = graph.create_edge(n1, n2, "knows", Metadata::new()).unwrap();
        let e2 = graph.create_edge(n1, n3, "knows", Metadata::new()).unwrap();
        let e3 = graph.create_edge(n2, n3, "follows", Metadata::new()).unwrap();

        assert_eq!(graph.out_edges(n1).unwrap(), &[e1, e2]);
        assert_eq!(graph.in_edges(n2).unwrap(), &[e1]);
        assert_eq!(graph.out_edges(n2).unwrap(), &[e3]);
        assert!(graph.out_edges(n3).unwrap().is_empty());
        assert_eq!(graph.in_edges(n3).unwrap(), &[e2, e3]);
        assert_eq!(graph.degree(n3).unwrap(), (2, 0));

        assert_eq!(graph.out_edges_with_label(n1, "knows").unwrap(), vec![e1, e2]);
        assert_eq!(graph.in_edges_with_label(n3, "follows").unwrap(), vec![e3]);
        assert!(graph.out_edges_with_label(n1, "follows").unwrap().is_empty());
    }

    #[test]
    fn test_adjacency_of_dead_vertex() {
        let mut graph = PropertyGraph::new();
        let a = person(&mut graph);
        graph.remove_vertex(a).unwrap();

        assert_eq!(graph.out_edges(a), Err(GraphError::VertexNotFound(a)));
        assert_eq!(graph.in_edges(a), Err(GraphError::VertexNotFound(a)));
        assert_eq!(graph.degree(a), Err(GraphError::VertexNotFound(a)));
    }

    #[test]
    fn test_label_index() {
        let mut graph = PropertyGraph::new();
        person(&mut graph);
        person(&mut graph);
        let acme = graph.create_vertex(["Company"], Metadata::new());

        assert_eq!(graph.vertices_with_label("Person").len(), 2);
        assert_eq!(graph.vertices_with_label("Company"), HashSet::from([acme]));
        assert!(graph.vertices_with_label("Planet").is_empty());
        assert_eq!(graph.vertices_with_labels(["Company", "Planet"]), HashSet::from([acme]));
        assert_eq!(graph.vertices_with_labels(["Company", "Person"]).len(), 3);
    }

    #[test]
    fn test_edge_label_index() {
        let mut graph = PropertyGraph::new();
        let n1 = person(&mut graph);
        let n2 = person(&mut graph);
        let n3 = person(&mut graph);

        graph.create_edge(n1, n2, "knows", Metadata::new()).unwrap();
        graph.create_edge(n2, n3, "knows", Metadata::new()).unwrap();
        let f = graph.create_edge(n1, n3, "follows", Metadata::new()).unwrap();

        assert_eq!(graph.edges_with_label("knows").len(), 2);
        assert_eq!(graph.edges_with_label("follows"), HashSet::from([f]));

        graph.remove_edge(f).unwrap();
        assert!(graph.edges_with_label("follows").is_empty());
        assert_eq!(
            graph.all_edge_labels().into_iter().collect::<Vec<_>>(),
            vec![Label::new("knows")]
        );
    }

    #[test]
    fn test_add_and_remove_vertex_label() {
        let mut graph = PropertyGraph::new();
        let id = person(&mut graph);

        assert_eq!(graph.add_vertex_label(id, "Employee"), Ok(true));
        assert_eq!(graph.add_vertex_label(id, "Employee"), Ok(false));
        assert_eq!(graph.vertices_with_label("Employee"), HashSet::from([id]));
        assert_eq!(graph.has_vertex_label(id, "Employee"), Ok(true));

        assert_eq!(graph.remove_vertex_label(id, "Employee"), Ok(true));
        assert_eq!(graph.remove_vertex_label(id, "Employee"), Ok(false));
        assert!(graph.vertices_with_label("Employee").is_empty());
        assert!(!graph.all_vertex_labels().contains("Employee"));
    }

    #[test]
    fn test_label_ops_on_missing_vertex() {
        let mut graph = PropertyGraph::new();
        let missing = VertexId::new(999);

        assert_eq!(graph.add_vertex_label(missing, "A"), Err(GraphError::VertexNotFound(missing)));
        assert_eq!(graph.remove_vertex_label(missing, "A"), Err(GraphError::VertexNotFound(missing)));
        assert_eq!(graph.clear_vertex_labels(missing), Err(GraphError::VertexNotFound(missing)));
        assert!(graph.all_vertex_labels().is_empty());
    }

    #[test]
    fn test_empty_label_rejected() {
        let mut graph = PropertyGraph::new();
        let id = person(&mut graph);
        assert_eq!(graph.add_vertex_label(id, ""), Err(GraphError::InvalidLabel(String::new())));
        assert_eq!(graph.get_vertex(id).unwrap().label_count(), 1);
    }

    #[test]
    fn test_clear_vertex_labels() {
        let mut graph = PropertyGraph::new();
        let id = graph.create_vertex(["A", "B"], Metadata::new());
        let other = graph.create_vertex(["A"], Metadata::new());

        graph.clear_vertex_labels(id).unwrap();
        assert_eq!(graph.get_vertex(id).unwrap().label_count(), 0);
        assert_eq!(graph.vertices_with_label("A"), HashSet::from([other]));
        assert!(graph.vertices_with_label("B").is_empty());
    }

    #[test]
    fn test_delete_vertex_cascades() {
        let mut graph = PropertyGraph::new();
        let a = person(&mut graph);
        let b = person(&mut graph);
        let c = person(&mut graph);
        graph.create_edge(a, b, "knows", Metadata::new()).unwrap();
        graph.create_edge(c, a, "knows", Metadata::new()).unwrap();
        let keep = graph.create_edge(b, c, "likes", Metadata::new()).unwrap();

        graph.remove_vertex(a).unwrap();

        assert_eq!(graph.count_vertices(), 2);
        assert_eq!(graph.count_edges(), 1);
        assert!(graph.in_edges(b).unwrap().is_empty());
        assert!(graph.out_edges(c).unwrap().is_empty());
        assert_eq!(graph.out_edges(b).unwrap(), &[keep]);
        assert!(graph.edges_with_label("knows").is_empty());
        assert_eq!(graph.vertices_with_label("Person").len(), 2);
    }

    #[test]
    fn test_delete_vertex_with_self_loop() {
        let mut graph = PropertyGraph::new();
        let a = person(&mut graph);
        graph.create_edge(a, a, "self", Metadata::new()).unwrap();
        assert_eq!(graph.degree(a).unwrap(), (1, 1));

        graph.remove_vertex(a).unwrap();
        assert_eq!(graph.count_edges(), 0);
        assert!(graph.all_edge_labels().is_empty());
    }

    #[test]
    fn test_delete_edge() {
        let mut graph = PropertyGraph::new();
        let a = person(&mut graph);
        let b = person(&mut graph);
        let edge_id = graph.create_edge(a, b, "knows", Metadata::new()).unwrap();

        graph.remove_edge(edge_id).unwrap();
        assert_eq!(graph.count_edges(), 0);
        assert!(graph.out_edges(a).unwrap().is_empty());
        assert!(graph.in_edges(b).unwrap().is_empty());
        assert_eq!(graph.remove_edge(edge_id), Err(GraphError::EdgeNotFound(edge_id)));
    }

    #[test]
    fn test_remove_missing_vertex() {
        let mut graph = PropertyGraph::new();
        assert_eq!(
            graph.remove_vertex(VertexId::new(3)),
            Err(GraphError::VertexNotFound(VertexId::new(3)))
        );
    }

    #[test]
    fn test_multiple_edges_between_vertices() {
        let mut graph = PropertyGraph::new();
        let a = person(&mut graph);
        let b = person(&mut graph);

        let e1 = graph.create_edge(a, b, "knows", Metadata::new()).unwrap();
        let e2 = graph.create_edge(a, b, "works_with", Metadata::new()).unwrap();
        let e3 = graph.create_edge(a, b, "knows", Metadata::new()).unwrap();

        assert_eq!(graph.count_edges(), 3);
        assert_ne!(e1, e3);
        assert_eq!(graph.edges_between(a, b).unwrap(), vec![e1, e2, e3]);
        assert!(graph.edges_between(b, a).unwrap().is_empty());
        assert_eq!(graph.edge_between(a, b), Some(e1));
        assert_eq!(graph.edge_between(b, a), None);

        graph.remove_edge(e1).unwrap();
        assert_eq!(graph.edge_between(a, b), Some(e2));
    }

    #[test]
    fn test_metadata_mutation() {
        let mut graph = PropertyGraph::new();
        let a = person(&mut graph);
        let b = person(&mut graph);
        let e = graph.create_edge(a, b, "knows", Metadata::new()).unwrap();

        assert_eq!(graph.set_vertex_property(a, "name", "Alice"), Ok(None));
        assert_eq!(graph.set_vertex_property(a, "name", "Alicia"), Ok(Some(Value::from("Alice"))));
        assert_eq!(graph.remove_vertex_property(a, "name"), Ok(Some(Value::from("Alicia"))));
        assert_eq!(graph.remove_vertex_property(a, "name"), Ok(None));

        let old = graph.set_vertex_metadata(b, metadata([("age", 30)])).unwrap();
        assert!(old.is_empty());
        assert_eq!(graph.get_vertex(b).unwrap().get("age"), Some(&Value::from(30)));

        graph.set_edge_property(e, "weight", 0.5).unwrap();
        assert_eq!(graph.get_edge(e).unwrap().get("weight"), Some(&Value::Number(0.5)));
        let old = graph.set_edge_metadata(e, Metadata::new()).unwrap();
        assert_eq!(old.len(), 1);
        assert_eq!(graph.remove_edge_property(e, "weight"), Ok(None));

        let dead = EdgeId::new(50);
        assert_eq!(graph.set_edge_property(dead, "k", 1), Err(GraphError::EdgeNotFound(dead)));
    }

    #[test]
    fn test_find_vertices() {
        let mut graph = PropertyGraph::new();
        let alice = graph.create_vertex(
            ["Person", "Admin"],
            metadata([("name", Value::from("Alice")), ("age", Value::from(30))]),
        );
        let bob = graph.create_vertex(["Person"], metadata([("name", Value::from("Bob")), ("age", Value::from(30))]));
        graph.create_vertex(["Company"], metadata([("age", 30)]));

        let thirty = VertexPattern::new().with_label("Person").with_property("age", 30);
        assert_eq!(graph.find_vertices(&thirty), vec![alice, bob]);

        let admins = VertexPattern::new().with_label("Person").with_label("Admin");
        assert_eq!(graph.find_vertices(&admins), vec![alice]);

        assert_eq!(graph.find_vertices(&VertexPattern::new().with_property("age", 30)).len(), 3);
        assert!(graph.find_vertices(&VertexPattern::new().with_label("Planet")).is_empty());
    }

    #[test]
    fn test_find_edges() {
        let mut graph = PropertyGraph::new();
        let a = person(&mut graph);
        let b = person(&mut graph);
        let e1 = graph.create_edge(a, b, "knows", metadata([("since", 2020)])).unwrap();
        let e2 = graph.create_edge(b, a, "knows", Metadata::new()).unwrap();
        let e3 = graph.create_edge(a, a, "likes", Metadata::new()).unwrap();

        assert_eq!(graph.find_edges(&EdgePattern::new().with_label("knows")), vec![e1, e2]);
        assert_eq!(graph.find_edges(&EdgePattern::new().starting_at(a)), vec![e1, e3]);
        assert_eq!(graph.find_edges(&EdgePattern::new().ending_at(a)), vec![e2, e3]);
        assert_eq!(graph.find_edges(&EdgePattern::new().with_property("since", 2020)), vec![e1]);
        assert_eq!(graph.find_edges(&EdgePattern::new()).len(), 3);
    }

    #[test]
    fn test_statistics() {
        let mut graph = PropertyGraph::new();
        let a = graph.create_vertex(["Person", "Admin"], Metadata::new());
        let b = person(&mut graph);
        graph.create_edge(a, b, "knows", Metadata::new()).unwrap();

        let stats = graph.statistics();
        assert_eq!(stats.vertex_count, 2);
        assert_eq!(stats.edge_count, 1);
        assert_eq!(stats.vertex_labels.get("Person"), Some(&2));
        assert_eq!(stats.vertex_labels.get("Admin"), Some(&1));
        assert_eq!(stats.edge_labels.get("knows"), Some(&1));
    }

    #[test]
    fn test_clear() {
        let mut graph = PropertyGraph::new();
        let a = person(&mut graph);
        let b = person(&mut graph);
        graph.create_edge(a, b, "knows", Metadata::new()).unwrap();

        graph.clear();
        assert_eq!(graph.count_vertices(), 0);
        assert_eq!(graph.count_edges(), 0);
        assert!(graph.all_vertex_labels().is_empty());
        assert!(graph.all_edge_labels().is_empty());
        assert_eq!(person(&mut graph), VertexId::new(0));
    }

    #[test]
    fn test_arena_growth_past_capacity() {
        let config = GraphConfig {
            vertex_capacity: 4,
            edge_capacity: 4,
            label_capacity: 1,
        };
        let mut graph = PropertyGraph::with_config(&config);
        for _ in 0..100 {
            graph.create_vertex(["Item"], Metadata::new());
        }

        assert_eq!(graph.count_vertices(), 100);
        assert!(graph.has_vertex(VertexId::new(99)));
        assert!(!graph.has_vertex(VertexId::new(100)));
    }

    #[test]
    fn test_unreservable_config_does_not_panic() {
        let config = GraphConfig {
            vertex_capacity: usize::MAX,
            edge_capacity: usize::MAX,
            label_capacity: usize::MAX,
        };
        assert!(config.validate().is_err());

        let mut graph = PropertyGraph::with_config(&config);
        let a = person(&mut graph);
        let e = graph.create_edge(a, a, "self", Metadata::new()).unwrap();
        assert_eq!(graph.out_edges(a).unwrap(), &[e]);
        assert_eq!(graph.vertices_with_label("Person"), HashSet::from([a]));
    }

    #[test]
    fn test_nan_metadata_matches_itself() {
        let mut graph = PropertyGraph::new();
        let id = graph.create_vertex(["Sensor"], metadata([("reading", f64::NAN)]));
        graph.create_vertex(["Sensor"], metadata([("reading", 1.0)]));

        let vertex = graph.get_vertex(id).unwrap();
        assert!(vertex.matches(vertex));
        assert_eq!(graph.find_vertices(&VertexPattern::from(vertex)), vec![id]);
    }

    #[test]
    fn test_id_reuse() {
        let mut graph = PropertyGraph::new();
        let n1 = graph.create_vertex(["A"], Metadata::new());
        let _n2 = graph.create_vertex(["B"], Metadata::new());

        graph.remove_vertex(n1).unwrap();
        let n3 = graph.create_vertex(["C"], Metadata::new());

        assert_eq!(n3, n1);
        assert_eq!(graph.count_vertices(), 2);
        let reused = graph.get_vertex(n3).unwrap();
        assert!(reused.has_label("C"));
        assert!(!reused.has_label("A"));
        assert!(graph.vertices_with_label("A").is_empty());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut graph = PropertyGraph::new();
        let a = person(&mut graph);
        let copy = graph.clone();

        graph.remove_vertex(a).unwrap();
        assert!(copy.has_vertex(a));
        assert_eq!(copy.vertices_with_label("Person"), HashSet::from([a]));
    }
}
