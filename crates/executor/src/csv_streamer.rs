use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use tokio::sync::mpsc::Sender;
use tracing::{error, info};

use super::error::Error;
use super::types::TripSource;
use common::types::{Trip, Weight};

/// Field separator of a trip record: `origin;destination;weight`.
const TRIP_DELIMITER: u8 = b';';

/// Number of fields in a trip record.
pub const TRIP_FIELDS: usize = 3;

// Helper struct for CSV parsing. The weight stays textual so a bad value can
// be reported with its line instead of a generic deserialize error.
#[derive(Debug, Deserialize, Default)]
pub struct TripRecord {
    pub origin: String,
    pub destination: String,
    pub weight: String,
}

impl TripRecord {
    fn into_trip(self, line: u64) -> Result<Trip, Error> {
        if self.origin.is_empty() || self.destination.is_empty() {
            return Err(Error::EmptyLabel { line });
        }

        let weight: Weight = self.weight.parse().map_err(|_| Error::InvalidWeight {
            line,
            value: self.weight.clone(),
        })?;

        Ok(Trip::new(self.origin, self.destination, weight))
    }
}

/// Streams trips from a `;`-delimited file, one `origin;destination;weight` per line.
pub struct TripFileStreamer {
    path: PathBuf,
    batch_size: usize,
}

impl TripFileStreamer {
    pub fn new(path: impl Into<PathBuf>, batch_size: usize) -> Self {
        TripFileStreamer {
            path: path.into(),
            batch_size: batch_size.max(1),
        }
    }

    fn parse_file_to_trips(&self) -> Result<Vec<Trip>, Error> {
        let file = File::open(&self.path).map_err(|e| {
            error!(path = %self.path.display(), "Failed to read trips file: {e}");
            Error::IoError(e)
        })?;

        parse_trips(file)
    }
}

/// Parses trip records from any reader. Blank and whitespace-only lines are
/// skipped and fields are trimmed; records with the wrong number of fields, an
/// empty city or a weight that is not a non-negative integer abort the parse.
pub fn parse_trips<R: Read>(reader: R) -> Result<Vec<Trip>, Error> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(TRIP_DELIMITER)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut trips = Vec::new();

    for result in rdr.records() {
        let record = result?;
        // Whitespace-only lines survive as a single trimmed-empty field.
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = record.position().map_or(0, |p| p.line());
        if record.len() != TRIP_FIELDS {
            return Err(Error::FieldCount {
                line,
                found: record.len(),
            });
        }
        let parsed: TripRecord = record.deserialize(None)?;
        trips.push(parsed.into_trip(line)?);
    }
    Ok(trips)
}

#[async_trait::async_trait]
impl TripSource for TripFileStreamer {
    async fn run_stream(self, sender: Sender<Vec<Trip>>) -> Result<usize, Error> {
        let all_trips = self.parse_file_to_trips()?;
        let total_trips = all_trips.len();
        let mut trips_sent = 0;

        info!(
            path = %self.path.display(),
            "TripFileStreamer: Starting transfer of {} trips...",
            total_trips
        );

        for chunk in all_trips.chunks(self.batch_size) {
            let batch: Vec<Trip> = chunk.to_vec();
            if let Err(e) = sender.send(batch).await {
                error!("TripFileStreamer shutting down: Writer receiver dropped during send. Error: {e}");
                return Err(Error::ChannelSendFailed);
            }

            trips_sent += chunk.len();
        }

        info!(
            "TripFileStreamer: Successfully transferred {} trips in batches.",
            trips_sent
        );
        Ok(trips_sent)
    }
}
