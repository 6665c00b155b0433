use std::path::PathBuf;

use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;

use super::error::Error;
use common::types::Trip;

/// A trait defining the contract for any source that streams trip records
/// into the graph-building pipeline.
///
/// Decouples the Producer task from the specific data source (trip file vs.
/// simulated trips). The bounds let implementations run on the Tokio runtime.
#[async_trait::async_trait]
pub trait TripSource: Send + Sync + 'static {
    /// Streams every trip in batches and returns how many trips were sent.
    async fn run_stream(self, sender: Sender<Vec<Trip>>) -> Result<usize, Error>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Simulated,
}

pub type JoinHandleResult<T> = JoinHandle<Result<T, Error>>;
