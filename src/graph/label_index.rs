//! Reverse index from label to the vertices and edges carrying it
//!
//! Buckets are pruned as soon as they become empty, so every label the index
//! enumerates has at least one live member.

use super::types::{EdgeId, Label, VertexId};
use rustc_hash::{FxHashMap, FxHashSet};
use std::hash::Hash;
use tracing::{trace, warn};

#[derive(Debug, Clone, Default)]
pub(crate) struct LabelIndex {
    vertices: Buckets<VertexId>,
    edges: Buckets<EdgeId>,
}

impl LabelIndex {
    pub fn with_capacity(labels: usize) -> Self {
        LabelIndex {
            vertices: Buckets::with_capacity(labels),
            edges: Buckets::with_capacity(labels),
        }
    }

    pub fn insert_vertex(&mut self, label: &Label, id: VertexId) {
        trace!("Label index: {} += {}", label, id);
        self.vertices.insert(label, id);
    }

    pub fn remove_vertex(&mut self, label: &str, id: VertexId) {
        trace!("Label index: {} -= {}", label, id);
        let removed = self.vertices.remove(label, id);
        debug_assert!(removed, "{} missing from label bucket {}", id, label);
    }

    pub fn insert_edge(&mut self, label: &Label, id: EdgeId) {
        trace!("Label index: {} += {}", label, id);
        self.edges.insert(label, id);
    }

    pub fn remove_edge(&mut self, label: &str, id: EdgeId) {
        trace!("Label index: {} -= {}", label, id);
        let removed = self.edges.remove(label, id);
        debug_assert!(removed, "{} missing from label bucket {}", id, label);
    }

    pub fn vertices(&self, label: &str) -> Option<&FxHashSet<VertexId>> {
        self.vertices.get(label)
    }

    pub fn edges(&self, label: &str) -> Option<&FxHashSet<EdgeId>> {
        self.edges.get(label)
    }

    pub fn vertex_labels(&self) -> impl Iterator<Item = (&Label, usize)> + '_ {
        self.vertices.iter()
    }

    pub fn edge_labels(&self) -> impl Iterator<Item = (&Label, usize)> + '_ {
        self.edges.iter()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
    }
}

/// Label -> member set, one instance per entity kind
#[derive(Debug, Clone)]
struct Buckets<I> {
    map: FxHashMap<Label, FxHashSet<I>>,
}

impl<I> Default for Buckets<I> {
    fn default() -> Self {
        Buckets {
            map: FxHashMap::default(),
        }
    }
}

impl<I: Copy + Eq + Hash> Buckets<I> {
    fn with_capacity(capacity: usize) -> Self {
        let mut map: FxHashMap<Label, FxHashSet<I>> = FxHashMap::default();
        if map.try_reserve(capacity).is_err() {
            warn!("Could not reserve {} label buckets, growing on demand", capacity);
        }
        Buckets { map }
    }

    fn insert(&mut self, label: &Label, id: I) {
        match self.map.get_mut(label.as_str()) {
            Some(bucket) => {
                bucket.insert(id);
            }
            None => {
                let mut bucket = FxHashSet::default();
                bucket.insert(id);
                self.map.insert(label.clone(), bucket);
            }
        }
    }

    /// Returns false if `id` was not in the bucket
    fn remove(&mut self, label: &str, id: I) -> bool {
        let Some(bucket) = self.map.get_mut(label) else {
            return false;
        };
        let removed = bucket.remove(&id);
        if bucket.is_empty() {
            self.map.remove(label);
        }
        removed
    }

    fn get(&self, label: &str) -> Option<&FxHashSet<I>> {
        self.map.get(label)
    }

    fn iter(&self) -> impl Iterator<Item = (&Label, usize)> + '_ {
        self.map.iter().map(|(label, bucket)| (label, bucket.len()))
    }

    fn clear(&mut self) {
        self.map.clear();
    }
}
