use tokio::sync::mpsc::Receiver;
use tracing::{debug, info, warn};

use super::error::Error;
use super::types::JoinHandleResult;
use common::types::Trip;
use route_core::{GraphBuilder, GraphCSR};

/// Async consumer that owns the graph during its build phase.
///
/// Registers each trip's cities on first reference and adds its edge. When
/// every producer has dropped its sender the builder is frozen and the
/// immutable graph is returned.
pub struct GraphWriter {
    builder: GraphBuilder,
    receiver: Receiver<Vec<Trip>>,
}

impl GraphWriter {
    pub fn new(receiver: Receiver<Vec<Trip>>) -> Self {
        Self {
            builder: GraphBuilder::new(),
            receiver,
        }
    }

    /// Consumes batches until the channel closes, then builds the graph.
    pub async fn process_updates(mut self) -> Result<GraphCSR, Error> {
        debug!("Writer ready.");

        while let Some(trips) = self.receiver.recv().await {
            debug!("Writer received {} trips.", trips.len());
            for trip in &trips {
                self.builder.add_trip(trip);
            }
        }

        let overwritten = self.builder.overwritten_edges();
        if overwritten > 0 {
            warn!(
                overwritten,
                "Duplicate trips found; the last weight for each city pair was kept."
            );
        }

        let graph = self.builder.build();
        info!(
            cities = graph.vertex_count(),
            trips = graph.edge_count(),
            "Graph built."
        );

        Ok(graph)
    }

    /// Spawns the Writer task onto the Tokio runtime.
    pub fn spawn_task(self) -> JoinHandleResult<GraphCSR> {
        tokio::spawn(self.process_updates())
    }
}
