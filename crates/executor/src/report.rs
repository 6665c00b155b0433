use std::io::Write;

use super::config::ReportConfig;
use super::error::Error;
use super::prompt::SEPARATOR;
use common::types::{Cycle, VertexId};
use route_core::{GraphCSR, Settlement, Settlements, ShortestPathTree};

/// Label printed in the `Previous` column for the start vertex.
pub const NO_PREDECESSOR: &str = "N/A";

/// Formats algorithm results for a terminal.
///
/// Rows are written as the settlement sequence produces them, so the table
/// streams out while the relaxation loop runs.
pub struct ReportWriter<'g, W: Write> {
    out: W,
    graph: &'g GraphCSR,
    config: ReportConfig,
}

impl<'g, W: Write> ReportWriter<'g, W> {
    pub fn new(out: W, graph: &'g GraphCSR, config: ReportConfig) -> Self {
        Self { out, graph, config }
    }

    pub fn graph(&self) -> &'g GraphCSR {
        self.graph
    }

    fn label(&self, vertex: VertexId) -> &'g str {
        self.graph.label(vertex).unwrap_or("?")
    }

    fn write_row(&mut self, vertex: &str, distance: &str, previous: &str) -> Result<(), Error> {
        let width = self.config.column_width;
        let row = format!("{vertex:<width$}{distance:<width$}{previous:<width$}");
        writeln!(self.out, "{}", row.trim_end())?;
        Ok(())
    }

    pub fn write_settlement(&mut self, settlement: &Settlement) -> Result<(), Error> {
        let previous = settlement
            .predecessor
            .map_or(NO_PREDECESSOR, |p| self.label(p));
        let vertex = self.label(settlement.vertex);
        self.write_row(vertex, &settlement.distance.to_string(), previous)
    }

    /// Writes the summary table, one row per settlement, and returns the
    /// completed distance/predecessor table.
    pub fn write_summary_table(
        &mut self,
        mut settlements: Settlements<'_>,
    ) -> Result<ShortestPathTree, Error> {
        self.write_row("Vertex", "Distance", "Previous")?;
        writeln!(self.out)?;

        for settlement in settlements.by_ref() {
            self.write_settlement(&settlement)?;
        }

        writeln!(self.out, "\n{SEPARATOR}")?;
        Ok(settlements.into_tree())
    }

    /// Lists cities the start vertex cannot reach; writes nothing if all were settled.
    pub fn write_unreachable(&mut self, tree: &ShortestPathTree) -> Result<(), Error> {
        let unreachable: Vec<&str> = tree.unreachable().map(|v| self.label(v)).collect();
        if unreachable.is_empty() {
            return Ok(());
        }

        writeln!(
            self.out,
            "Unreachable from {}: {}",
            self.label(tree.start()),
            unreachable.join(", ")
        )?;
        Ok(())
    }

    /// Writes the full route to every settled vertex, in settlement order.
    pub fn write_paths(&mut self, tree: &ShortestPathTree) -> Result<(), Error> {
        writeln!(self.out, "Routes:")?;
        for &vertex in tree.settled_order() {
            let Some(path) = tree.path_to(vertex) else {
                continue;
            };
            let route = self.join_labels(&path);
            let distance = tree.distance(vertex).unwrap_or_default();
            writeln!(self.out, "  {route} ({distance})")?;
        }
        Ok(())
    }

    pub fn write_cycle_verdict(&mut self, cycle: Option<&Cycle>, show_cycle: bool) -> Result<(), Error> {
        match cycle {
            Some(cycle) => {
                writeln!(self.out, "The graph contains a cycle.")?;
                if show_cycle {
                    let mut vertices = cycle.vertices.clone();
                    vertices.extend(cycle.vertices.first().copied());
                    let route = self.join_labels(&vertices);
                    writeln!(self.out, "Cycle: {route}")?;
                }
            }
            None => writeln!(self.out, "The graph does not contain a cycle.")?,
        }
        Ok(())
    }

    fn join_labels(&self, vertices: &[VertexId]) -> String {
        vertices
            .iter()
            .map(|&v| self.label(v))
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
