use std::path::PathBuf;

use clap::Parser;

use super::types::DataSource;

/// Shortest trips and cycle detection over a graph of city-to-city trips.
///
/// Reads `origin;destination;weight` records, prints Dijkstra's summary table
/// from a chosen start city and reports whether the trips form a cycle.
#[derive(Parser, Debug)]
#[command(name = "route_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Trip file with one `origin;destination;weight` record per line
    #[arg(required_unless_present = "simulate")]
    pub trips_file: Option<PathBuf>,

    /// Generate random trips instead of reading a file
    #[arg(long, conflicts_with = "trips_file")]
    pub simulate: bool,

    /// Start city; skips the interactive prompt
    #[arg(long, value_name = "LABEL")]
    pub start: Option<String>,

    /// Configuration file (TOML)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the full route to every reachable city
    #[arg(long)]
    pub paths: bool,

    /// Print the vertices of the detected cycle
    #[arg(long)]
    pub show_cycle: bool,
}

impl Cli {
    pub fn data_source(&self) -> DataSource {
        match &self.trips_file {
            Some(path) if !self.simulate => DataSource::File(path.clone()),
            _ => DataSource::Simulated,
        }
    }
}
