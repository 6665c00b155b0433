use super::csr::GraphCSR;
use super::dijkstra::{Settlements, ShortestPathTree};
use common::{
    error::Error,
    types::{Cycle, VertexId},
};

/// Trait for single-source shortest-path solvers over a built graph.
pub trait ShortestPathSolver {
    /// Returns the lazy settlement sequence starting at `start`.
    fn settlements<'g>(
        &self,
        graph: &'g GraphCSR,
        start: VertexId,
    ) -> Result<Settlements<'g>, Error>;

    /// Like [`settlements`](Self::settlements), resolving the start vertex by label.
    ///
    /// Returns `Err(Error::StartVertexNotFound)` if no vertex carries `start`.
    fn settlements_from_label<'g>(
        &self,
        graph: &'g GraphCSR,
        start: &str,
    ) -> Result<Settlements<'g>, Error> {
        let id = graph
            .vertex_id(start)
            .ok_or_else(|| Error::StartVertexNotFound(start.to_string()))?;
        self.settlements(graph, id)
    }

    /// Runs to completion and returns the full distance/predecessor table.
    fn solve(&self, graph: &GraphCSR, start: VertexId) -> Result<ShortestPathTree, Error> {
        Ok(self.settlements(graph, start)?.into_tree())
    }
}

/// Trait for detectors of directed cycles.
pub trait CycleDetector {
    /// Returns `Some(cycle)` for the first back edge found, `None` if the graph is acyclic.
    fn find_cycle(&self, graph: &GraphCSR) -> Option<Cycle>;

    fn has_cycle(&self, graph: &GraphCSR) -> bool {
        self.find_cycle(graph).is_some()
    }
}
