use std::io::Write;
use tracing::{debug, info};

use super::error::Error;
use super::report::ReportWriter;
use common::types::Cycle;
use route_core::{CycleDetector, ShortestPathSolver, ShortestPathTree};

/// Runs the shortest-path and cycle analyses against a built graph and
/// reports the results.
pub struct RouteSearcher<S, C> {
    solver: S,
    detector: C,
}

impl<S, C> RouteSearcher<S, C>
where
    S: ShortestPathSolver,
    C: CycleDetector,
{
    pub fn new(solver: S, detector: C) -> Self {
        RouteSearcher { solver, detector }
    }

    /// Prints the summary table for `start`, plus routes when `show_paths` is set.
    ///
    /// # Errors
    /// `StartVertexNotFound` (wrapped in `Error::GraphError`) if `start` is not
    /// a city of the graph; nothing is written in that case.
    pub fn shortest_paths<W: Write>(
        &self,
        start: &str,
        report: &mut ReportWriter<'_, W>,
        show_paths: bool,
    ) -> Result<ShortestPathTree, Error> {
        let graph = report.graph();
        let settlements = self.solver.settlements_from_label(graph, start)?;
        info!(start, "Computing shortest paths.");

        let tree = report.write_summary_table(settlements)?;
        report.write_unreachable(&tree)?;
        if show_paths {
            report.write_paths(&tree)?;
        }

        debug!(
            settled = tree.settled_order().len(),
            total = graph.vertex_count(),
            "Shortest-path run complete."
        );
        Ok(tree)
    }

    /// Prints the cycle verdict and returns the detected cycle, if any.
    pub fn cycle_check<W: Write>(
        &self,
        report: &mut ReportWriter<'_, W>,
        show_cycle: bool,
    ) -> Result<Option<Cycle>, Error> {
        let cycle = self.detector.find_cycle(report.graph());

        match &cycle {
            Some(cycle) => info!(length = cycle.len(), "Cycle found."),
            None => info!("No cycle found."),
        }

        report.write_cycle_verdict(cycle.as_ref(), show_cycle)?;
        Ok(cycle)
    }
}
