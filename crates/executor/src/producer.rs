use tokio::sync::mpsc::Sender;
use tracing::debug;

use super::types::{JoinHandleResult, TripSource};
use common::types::Trip;

pub struct Producer<S: TripSource> {
    streamer: S,
}

impl<S> Producer<S>
where
    S: TripSource,
{
    pub fn new(streamer: S) -> Self {
        Producer { streamer }
    }

    /// Spawns the streamer on the runtime; the handle resolves to the number of trips sent.
    pub fn spawn(self, sender: Sender<Vec<Trip>>) -> JoinHandleResult<usize> {
        debug!("Producer ready.");
        tokio::spawn(async move { self.streamer.run_stream(sender).await })
    }
}
