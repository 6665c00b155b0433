use std::collections::HashMap;

use common::error::Error;
use common::types::{Edge, Trip, VertexId, Weight};
use tracing::debug;

use crate::adjacency::Neighbors;

/// Accumulates vertices and edges for a [`GraphCSR`].
///
/// Labels are interned into dense `VertexId`s in registration order. Edges are
/// buffered in insertion order and only laid out as CSR when [`build`] is
/// called, after which the graph can no longer change.
///
/// A second edge for an ordered pair that already has one replaces its weight
/// in place (last write wins) and keeps the original adjacency position.
///
/// [`build`]: GraphBuilder::build
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    labels: Vec<String>,
    index: HashMap<String, VertexId>,
    pending_edges: Vec<Edge>,
    edge_slots: HashMap<(VertexId, VertexId), usize>,
    overwritten_edges: usize,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new vertex.
    ///
    /// # Errors
    /// Returns `Error::DuplicateVertex` if the label is already registered.
    pub fn add_vertex(&mut self, label: &str) -> Result<VertexId, Error> {
        if self.index.contains_key(label) {
            return Err(Error::DuplicateVertex(label.to_string()));
        }
        Ok(self.intern(label))
    }

    /// Returns the id of `label`, registering it first if this is its first reference.
    pub fn ensure_vertex(&mut self, label: &str) -> VertexId {
        match self.index.get(label) {
            Some(&id) => id,
            None => self.intern(label),
        }
    }

    fn intern(&mut self, label: &str) -> VertexId {
        let id = self.labels.len();
        self.labels.push(label.to_string());
        self.index.insert(label.to_string(), id);
        id
    }

    pub fn vertex_id(&self, label: &str) -> Option<VertexId> {
        self.index.get(label).copied()
    }

    /// Adds a directed edge between two registered vertices.
    ///
    /// # Errors
    /// Returns `Error::UnknownVertex` naming the first endpoint that was never registered.
    pub fn add_edge(&mut self, origin: &str, destination: &str, weight: Weight) -> Result<(), Error> {
        let u = self
            .vertex_id(origin)
            .ok_or_else(|| Error::UnknownVertex(origin.to_string()))?;
        let v = self
            .vertex_id(destination)
            .ok_or_else(|| Error::UnknownVertex(destination.to_string()))?;

        self.push_edge(u, v, weight);
        Ok(())
    }

    /// Registers both endpoints on first reference, then adds the edge.
    pub fn add_trip(&mut self, trip: &Trip) {
        let u = self.ensure_vertex(&trip.origin);
        let v = self.ensure_vertex(&trip.destination);
        self.push_edge(u, v, trip.weight);
    }

    fn push_edge(&mut self, u: VertexId, v: VertexId, weight: Weight) {
        match self.edge_slots.get(&(u, v)) {
            Some(&slot) => {
                self.pending_edges[slot].2 = weight;
                self.overwritten_edges += 1;
            }
            None => {
                self.edge_slots.insert((u, v), self.pending_edges.len());
                self.pending_edges.push((u, v, weight));
            }
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.labels.len()
    }

    pub fn edge_count(&self) -> usize {
        self.pending_edges.len()
    }

    /// Number of edges whose weight was replaced by a later duplicate.
    pub fn overwritten_edges(&self) -> usize {
        self.overwritten_edges
    }

    /// Freezes the builder into an immutable CSR graph.
    pub fn build(self) -> GraphCSR {
        let num_nodes = self.labels.len();
        let (node_pointers, edge_targets, edge_weights, edge_source_by_index) =
            GraphCSR::build_csr_from_edges(num_nodes, &self.pending_edges);

        debug!(
            vertices = num_nodes,
            edges = edge_targets.len(),
            overwritten = self.overwritten_edges,
            "CSR graph built"
        );

        GraphCSR {
            labels: self.labels,
            index: self.index,
            node_pointers,
            edge_targets,
            edge_weights,
            edge_source_by_index,
        }
    }
}

/// Graph in Compressed Sparse Row (CSR) format for fast graph traversal.
///
/// CSR format stores outgoing edges of each node contiguously in memory:
/// - `node_pointers[u]..node_pointers[u+1]` → edges from node `u`
/// - `edge_targets[i]` -> target node of edge `i`
/// - `edge_weights[i]` -> weight of edge `i`
/// - `edge_source_by_index[i]` -> source node of edge `i`
///
/// Within a row, edges keep the order in which they were first added.
/// Vertex labels map to ids through a hash index, so lookups by label are O(1).
#[derive(Debug, Clone)]
pub struct GraphCSR {
    labels: Vec<String>,
    index: HashMap<String, VertexId>,
    node_pointers: Vec<usize>,
    edge_targets: Vec<VertexId>,
    edge_weights: Vec<Weight>,
    edge_source_by_index: Vec<VertexId>,
}

impl GraphCSR {
    /// Builds a graph directly from labelled trips, registering endpoints on first reference.
    pub fn from_trips<'a>(trips: impl IntoIterator<Item = &'a Trip>) -> Self {
        let mut builder = GraphBuilder::new();
        for trip in trips {
            builder.add_trip(trip);
        }
        builder.build()
    }

    /// Internal helper to construct all necessary arrays for the Compressed Sparse Row (CSR) format.
    ///
    /// Uses the two-pass counting technique: the first pass counts out-degrees
    /// into `node_pointers`, the second places each edge at its source's cursor.
    /// Placement walks `edges` in order, so each row keeps insertion order
    /// without a sort.
    ///
    /// # Returns
    /// 1. `node_pointers`: starting index of each node's outgoing edges (size |V| + 1).
    /// 2. `edge_targets`: destination node `v` for each edge.
    /// 3. `edge_weights`: weight for each edge.
    /// 4. `edge_source_by_index`: source node `u` for each edge, used by `edges()`.
    fn build_csr_from_edges(
        num_nodes: usize,
        edges: &[Edge],
    ) -> (Vec<usize>, Vec<VertexId>, Vec<Weight>, Vec<VertexId>) {
        let m = edges.len();
        let mut node_pointers = vec![0; num_nodes + 1];

        for &(u, _, _) in edges {
            node_pointers[u + 1] += 1;
        }

        for i in 1..=num_nodes {
            node_pointers[i] += node_pointers[i - 1];
        }

        let mut edge_targets = vec![0; m];
        let mut edge_weights = vec![0; m];
        let mut edge_source_by_index = vec![0; m];

        let mut cursor = node_pointers.clone();

        for &(u, v, weight) in edges {
            let pos = cursor[u]; // Get the next available position for node 'u'
            edge_weights[pos] = weight;
            edge_targets[pos] = v;
            edge_source_by_index[pos] = u;

            cursor[u] += 1;
        }

        (
            node_pointers,
            edge_targets,
            edge_weights,
            edge_source_by_index,
        )
    }

    pub fn vertex_count(&self) -> usize {
        self.labels.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Vertex labels in registration order (index == `VertexId`).
    pub fn vertices(&self) -> &[String] {
        &self.labels
    }

    pub fn label(&self, vertex: VertexId) -> Option<&str> {
        self.labels.get(vertex).map(String::as_str)
    }

    pub fn vertex_id(&self, label: &str) -> Option<VertexId> {
        self.index.get(label).copied()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// Returns every vertex reachable by one outgoing edge from `vertex`, in
    /// the order the edges were added.
    ///
    /// # Errors
    /// Returns `Error::VertexOutOfBounds` if `vertex` is not a valid id.
    pub fn adjacent_vertices(&self, vertex: VertexId) -> Result<Neighbors<'_>, Error> {
        self.check_bounds(vertex)?;
        Ok(self.neighbors_of(vertex))
    }

    /// Unchecked row access for ids already known to belong to this graph.
    pub(crate) fn neighbors_of(&self, vertex: VertexId) -> Neighbors<'_> {
        let start = self.node_pointers[vertex];
        let end = self.node_pointers[vertex + 1];
        Neighbors::new(&self.edge_targets[start..end], &self.edge_weights[start..end])
    }

    /// Returns the weight of the edge `origin -> destination`.
    ///
    /// # Errors
    /// Returns `Error::VertexOutOfBounds` for an invalid id, or
    /// `Error::EdgeNotFound` if the pair is not connected.
    pub fn weight(&self, origin: VertexId, destination: VertexId) -> Result<Weight, Error> {
        self.check_bounds(origin)?;
        self.check_bounds(destination)?;

        self.neighbors_of(origin)
            .find(|adjacent| adjacent.vertex == destination)
            .map(|adjacent| adjacent.weight)
            .ok_or(Error::EdgeNotFound {
                origin,
                destination,
            })
    }

    /// All edges as `(from, to, weight)`, grouped by source in CSR order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edge_source_by_index
            .iter()
            .zip(&self.edge_targets)
            .zip(&self.edge_weights)
            .map(|((&u, &v), &w)| (u, v, w))
    }

    fn check_bounds(&self, vertex: VertexId) -> Result<(), Error> {
        if vertex >= self.vertex_count() {
            return Err(Error::VertexOutOfBounds(vertex));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder_with(labels: &[&str]) -> GraphBuilder {
        let mut builder = GraphBuilder::new();
        for label in labels {
            builder.add_vertex(label).unwrap();
        }
        builder
    }

    #[test]
    fn from_trips_creates_correct_csr_for_small_graph() {
        let trips = vec![
            Trip::new("C", "B", 1),
            Trip::new("A", "C", 7),
            Trip::new("A", "B", 3),
        ];
        let graph = GraphCSR::from_trips(&trips);

        assert_eq!(graph.vertices(), ["C", "B", "A"]);
        assert_eq!(graph.node_pointers, vec![0, 1, 1, 3]);
        assert_eq!(graph.edge_targets, vec![1, 0, 1]);
        assert_eq!(graph.edge_weights, vec![1, 7, 3]);
        assert_eq!(graph.edge_source_by_index, vec![0, 2, 2]);
    }

    #[test]
    fn node_with_no_outgoing_edges() {
        let graph = GraphCSR::from_trips(&[Trip::new("A", "B", 2)]);
        let b = graph.vertex_id("B").unwrap();

        assert_eq!(graph.node_pointers, vec![0, 1, 1]);
        assert_eq!(graph.adjacent_vertices(b).unwrap().len(), 0);
    }

    #[test]
    fn single_node_graph() {
        let graph = builder_with(&["Solo"]).build();

        assert_eq!(graph.vertex_count(), 1);
        assert_eq!(graph.node_pointers, vec![0, 0]);
        assert!(graph.edge_targets.is_empty());
    }

    #[test]
    fn empty_graph() {
        let graph = GraphBuilder::new().build();

        assert!(graph.is_empty());
        assert_eq!(graph.node_pointers, vec![0]);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn adjacency_keeps_insertion_order() {
        let mut builder = builder_with(&["A", "B", "C", "D"]);
        builder.add_edge("A", "D", 1).unwrap();
        builder.add_edge("B", "A", 1).unwrap();
        builder.add_edge("A", "B", 1).unwrap();
        builder.add_edge("A", "C", 1).unwrap();
        let graph = builder.build();

        let order: Vec<_> = graph.adjacent_vertices(0).unwrap().vertices().collect();
        assert_eq!(order, vec![3, 1, 2]);
    }

    #[test]
    fn add_edge_rejects_unknown_vertex() {
        let mut builder = builder_with(&["A"]);

        assert_eq!(
            builder.add_edge("A", "Nowhere", 5),
            Err(Error::UnknownVertex("Nowhere".to_string()))
        );
        assert_eq!(
            builder.add_edge("Ghost", "A", 5),
            Err(Error::UnknownVertex("Ghost".to_string()))
        );
        assert_eq!(builder.edge_count(), 0);
    }

    #[test]
    fn add_vertex_rejects_duplicates() {
        let mut builder = builder_with(&["A"]);

        assert_eq!(
            builder.add_vertex("A"),
            Err(Error::DuplicateVertex("A".to_string()))
        );
        assert_eq!(builder.ensure_vertex("A"), 0);
        assert_eq!(builder.vertex_count(), 1);
    }

    #[test]
    fn duplicate_edge_keeps_latest_weight_and_first_position() {
        let mut builder = builder_with(&["A", "B", "C"]);
        builder.add_edge("A", "B", 9).unwrap();
        builder.add_edge("A", "C", 4).unwrap();
        builder.add_edge("A", "B", 2).unwrap();
        assert_eq!(builder.overwritten_edges(), 1);

        let graph = builder.build();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.weight(0, 1), Ok(2));

        let order: Vec<_> = graph.adjacent_vertices(0).unwrap().vertices().collect();
        assert_eq!(order, vec![1, 2]);
    }

    #[test]
    fn weight_lookup_errors() {
        let graph = GraphCSR::from_trips(&[Trip::new("A", "B", 2)]);

        assert_eq!(graph.weight(0, 1), Ok(2));
        assert_eq!(
            graph.weight(1, 0),
            Err(Error::EdgeNotFound {
                origin: 1,
                destination: 0
            })
        );
        assert_eq!(graph.weight(0, 7), Err(Error::VertexOutOfBounds(7)));
        assert!(graph.adjacent_vertices(2).is_err());
    }

    #[test]
    fn self_loop_is_stored_like_any_edge() {
        let graph = GraphCSR::from_trips(&[Trip::new("A", "A", 3)]);

        assert_eq!(graph.vertex_count(), 1);
        assert_eq!(graph.weight(0, 0), Ok(3));
    }

    #[test]
    fn edges_are_grouped_by_source() {
        let trips = vec![
            Trip::new("A", "B", 4),
            Trip::new("B", "C", 2),
            Trip::new("A", "C", 10),
        ];
        let graph = GraphCSR::from_trips(&trips);

        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges, vec![(0, 1, 4), (0, 2, 10), (1, 2, 2)]);
    }

    #[test]
    fn large_ring_builds_one_edge_per_row() {
        let trips: Vec<_> = (0..1000)
            .map(|i| Trip::new(format!("V{i}"), format!("V{}", (i + 1) % 1000), 1))
            .collect();
        let graph = GraphCSR::from_trips(&trips);

        assert_eq!(graph.vertex_count(), 1000);
        assert_eq!(graph.edge_count(), 1000);
        assert!(graph.node_pointers.windows(2).all(|w| w[1] - w[0] == 1));
    }
}
