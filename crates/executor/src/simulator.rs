use async_trait::async_trait;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc::Sender;
use tracing::{debug, info, warn};

use super::config::SimulatorConfig;
use super::error::Error;
use super::types::TripSource;
use common::types::{Trip, Weight};

/// Produces a finite set of random trips between synthetic cities.
///
/// Cities are labelled `City00`, `City01`, ... and each trip picks an origin,
/// a destination (possibly the same city) and a weight in `0..=max_weight`.
/// A fixed `seed` makes the generated graph reproducible.
pub struct SimulatorStreamer {
    pub total_cities: usize,
    pub total_trips: usize,
    pub max_weight: Weight,
    pub batch_size: usize,
    pub seed: Option<u64>,
}

impl SimulatorStreamer {
    pub fn new(config: SimulatorConfig, batch_size: usize) -> Self {
        SimulatorStreamer {
            total_cities: config.total_cities,
            total_trips: config.total_trips,
            max_weight: config.max_weight,
            batch_size: batch_size.max(1),
            seed: config.seed,
        }
    }

    pub fn city_label(index: usize) -> String {
        format!("City{index:02}")
    }

    fn generate_trips(&self) -> Vec<Trip> {
        if self.total_cities == 0 {
            warn!("Simulator configured with zero cities; no trips generated.");
            return Vec::new();
        }

        let mut rng: SmallRng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        let city_range = 0..self.total_cities;
        let weight_range = 0..=self.max_weight;

        (0..self.total_trips)
            .map(|_| {
                let from = rng.random_range(city_range.clone());
                let to = rng.random_range(city_range.clone());
                let weight = rng.random_range(weight_range.clone());

                Trip::new(Self::city_label(from), Self::city_label(to), weight)
            })
            .collect()
    }
}

#[async_trait]
impl TripSource for SimulatorStreamer {
    /// Generates every trip up front, then sends them in batches.
    /// Exits with `ChannelSendFailed` if the receiver is dropped.
    async fn run_stream(self, sender: Sender<Vec<Trip>>) -> Result<usize, Error> {
        let trips = self.generate_trips();
        let mut trips_sent = 0;

        for chunk in trips.chunks(self.batch_size) {
            debug!("Simulator sent {} trips.", chunk.len());
            if sender.send(chunk.to_vec()).await.is_err() {
                warn!("Simulator shutting down: Writer receiver dropped.");
                return Err(Error::ChannelSendFailed);
            }
            trips_sent += chunk.len();
        }

        info!(
            cities = self.total_cities,
            "Simulator generated {} trips.", trips_sent
        );
        Ok(trips_sent)
    }
}
