use std::iter::FusedIterator;

use common::error::Error;
use common::types::{Distance, VertexId};
use tracing::{debug, trace};

use super::adjacency::Adjacent;
use super::csr::GraphCSR;
use super::traits::ShortestPathSolver;

/// Solver implementing Dijkstra's single-source shortest paths with a linear
/// minimum scan over the whole vertex set (O(V²) overall, no priority queue).
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearScanDijkstra;

/// A vertex whose shortest distance from the start has become final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub vertex: VertexId,
    pub distance: Distance,
    /// `None` only for the start vertex.
    pub predecessor: Option<VertexId>,
}

/// Lazy sequence of settlements, in settlement order.
///
/// The first item is always the start vertex at distance 0. Each further call
/// to `next` relaxes the edges of the previously settled vertex, then settles
/// the unsettled vertex with the smallest finite distance. Iteration ends when
/// every remaining vertex is unreachable.
///
/// Per-vertex state is kept struct-of-arrays, indexed by `VertexId`.
#[derive(Debug, Clone)]
pub struct Settlements<'g> {
    graph: &'g GraphCSR,
    start: VertexId,
    settled: Vec<bool>,
    distance: Vec<Option<Distance>>,
    predecessor: Vec<Option<VertexId>>,
    order: Vec<VertexId>,
    // Last settled vertex whose outgoing edges have not been relaxed yet.
    current: Option<VertexId>,
    started: bool,
}

impl<'g> Settlements<'g> {
    fn new(graph: &'g GraphCSR, start: VertexId) -> Self {
        let num_nodes = graph.vertex_count();
        let mut settled = vec![false; num_nodes];
        let mut distance = vec![None; num_nodes];

        settled[start] = true;
        distance[start] = Some(0);

        Self {
            graph,
            start,
            settled,
            distance,
            predecessor: vec![None; num_nodes],
            order: Vec::with_capacity(num_nodes),
            current: None,
            started: false,
        }
    }

    /// Relaxes every edge `u -> v` with `v` unsettled.
    ///
    /// Only a strictly shorter candidate replaces the tentative distance, so on
    /// ties the first predecessor found is kept.
    fn relax_from(&mut self, u: VertexId) {
        let Some(du) = self.distance[u] else {
            return;
        };

        for Adjacent { vertex: v, weight } in self.graph.neighbors_of(u) {
            if self.settled[v] {
                continue;
            }

            let candidate = du + Distance::from(weight);
            if self.distance[v].is_none_or(|dv| candidate < dv) {
                trace!(from = u, to = v, distance = candidate, "relaxed");
                self.distance[v] = Some(candidate);
                self.predecessor[v] = Some(u);
            }
        }
    }

    /// Linear scan for the unsettled vertex with the minimum finite distance.
    /// The lowest index wins among equal distances.
    fn min_unsettled(&self) -> Option<VertexId> {
        let mut best: Option<(VertexId, Distance)> = None;

        for (v, distance) in self.distance.iter().enumerate() {
            if self.settled[v] {
                continue;
            }
            if let Some(d) = *distance {
                if best.is_none_or(|(_, best_d)| d < best_d) {
                    best = Some((v, d));
                }
            }
        }

        best.map(|(v, _)| v)
    }

    fn settlement(&self, vertex: VertexId) -> Settlement {
        Settlement {
            vertex,
            distance: self.distance[vertex].unwrap_or_default(),
            predecessor: self.predecessor[vertex],
        }
    }

    /// Drains the remaining settlements and returns the full distance/predecessor table.
    pub fn into_tree(mut self) -> ShortestPathTree {
        while self.next().is_some() {}

        ShortestPathTree {
            start: self.start,
            distance: self.distance,
            predecessor: self.predecessor,
            order: self.order,
        }
    }
}

impl Iterator for Settlements<'_> {
    type Item = Settlement;

    fn next(&mut self) -> Option<Settlement> {
        if !self.started {
            self.started = true;
            self.order.push(self.start);
            self.current = Some(self.start);
            return Some(self.settlement(self.start));
        }

        let current = self.current.take()?;
        self.relax_from(current);

        let Some(next) = self.min_unsettled() else {
            let unreachable = self.graph.vertex_count() - self.order.len();
            if unreachable > 0 {
                debug!(unreachable, "no further reachable vertex, stopping early");
            }
            return None;
        };

        self.settled[next] = true;
        self.order.push(next);
        self.current = Some(next);

        let settlement = self.settlement(next);
        debug!(
            vertex = settlement.vertex,
            distance = settlement.distance,
            "settled"
        );
        Some(settlement)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.graph.vertex_count() - self.order.len();
        if self.started && self.current.is_none() {
            (0, Some(0))
        } else if !self.started {
            (1, Some(remaining))
        } else {
            (0, Some(remaining))
        }
    }
}

impl FusedIterator for Settlements<'_> {}

/// Final distances and predecessors of a completed shortest-path run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPathTree {
    start: VertexId,
    distance: Vec<Option<Distance>>,
    predecessor: Vec<Option<VertexId>>,
    order: Vec<VertexId>,
}

impl ShortestPathTree {
    pub fn start(&self) -> VertexId {
        self.start
    }

    /// Shortest distance from the start, or `None` if `vertex` is unreachable.
    pub fn distance(&self, vertex: VertexId) -> Option<Distance> {
        self.distance.get(vertex).copied().flatten()
    }

    pub fn predecessor(&self, vertex: VertexId) -> Option<VertexId> {
        self.predecessor.get(vertex).copied().flatten()
    }

    pub fn is_reachable(&self, vertex: VertexId) -> bool {
        self.distance(vertex).is_some()
    }

    /// Vertices in the order they were settled, start first.
    pub fn settled_order(&self) -> &[VertexId] {
        &self.order
    }

    /// Vertices never reached from the start, in id order.
    pub fn unreachable(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.distance
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_none())
            .map(|(v, _)| v)
    }

    /// Reconstructs the route `start -> ... -> vertex` by walking predecessors.
    pub fn path_to(&self, vertex: VertexId) -> Option<Vec<VertexId>> {
        if !self.is_reachable(vertex) {
            return None;
        }

        let mut path = vec![vertex];
        let mut current = vertex;
        while let Some(prev) = self.predecessor(current) {
            path.push(prev);
            current = prev;
        }
        path.reverse();

        Some(path)
    }
}

impl ShortestPathSolver for LinearScanDijkstra {
    /// Starts a lazy settlement sequence from `start`.
    ///
    /// # Errors
    /// Returns `Error::VertexOutOfBounds` if `start` is not a vertex of `graph`.
    fn settlements<'g>(
        &self,
        graph: &'g GraphCSR,
        start: VertexId,
    ) -> Result<Settlements<'g>, Error> {
        if start >= graph.vertex_count() {
            return Err(Error::VertexOutOfBounds(start));
        }

        Ok(Settlements::new(graph, start))
    }
}
