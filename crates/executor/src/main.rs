pub mod cli;
pub mod config;
pub mod csv_streamer;
pub mod error;
pub mod producer;
pub mod prompt;
pub mod report;
pub mod searcher;
pub mod simulator;
pub mod types;
pub mod writer;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use tokio::sync::{mpsc, mpsc::Sender};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use common::error::Error as GraphError;
use common::types::Trip;
use route_core::{DfsCycleDetector, GraphCSR, LinearScanDijkstra};

use crate::cli::Cli;
use crate::config::Config;
use crate::csv_streamer::TripFileStreamer;
use crate::error::Error;
use crate::producer::Producer;
use crate::report::ReportWriter;
use crate::searcher::RouteSearcher;
use crate::simulator::SimulatorStreamer;
use crate::types::{DataSource, JoinHandleResult};
use crate::writer::GraphWriter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match crate::config::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.log.filter);

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout carries only the report.
/// `RUST_LOG` overrides the configured filter.
fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

async fn run(cli: Cli, config: Config) -> Result<(), Error> {
    let graph = load_graph(&cli.data_source(), &config).await?;
    if graph.is_empty() {
        return Err(Error::EmptyGraph);
    }

    analyze(&cli, &config, &graph)
}

/// Streams trips from `source` through the producer/writer pipeline and
/// returns the frozen graph.
async fn load_graph(source: &DataSource, config: &Config) -> Result<GraphCSR, Error> {
    let (sender, receiver) = mpsc::channel::<Vec<Trip>>(config.pipeline.channel_capacity.max(1));

    let producer_handle = spawn_producer(source, sender, config);
    let writer_handle = GraphWriter::new(receiver).spawn_task();

    let (produced, built) = tokio::join!(producer_handle, writer_handle);
    let trips = produced??;
    let graph = built??;

    info!(trips, "Pipeline finished.");
    Ok(graph)
}

pub fn spawn_producer(
    source: &DataSource,
    sender: Sender<Vec<Trip>>,
    config: &Config,
) -> JoinHandleResult<usize> {
    match source {
        DataSource::Simulated => {
            info!("Starting SimulatorStreamer producer task...");
            let streamer =
                SimulatorStreamer::new(config.simulator.clone(), config.pipeline.batch_size);
            Producer::new(streamer).spawn(sender)
        }
        DataSource::File(path) => {
            info!(path = %path.display(), "Starting TripFileStreamer producer task...");
            let streamer = TripFileStreamer::new(path.clone(), config.pipeline.batch_size);
            Producer::new(streamer).spawn(sender)
        }
    }
}

/// Lists the cities, settles on a start vertex, then runs both analyses.
///
/// An unknown start city aborts only the shortest-path run; cycle detection
/// still runs and the error is returned afterwards.
fn analyze(cli: &Cli, config: &Config, graph: &GraphCSR) -> Result<(), Error> {
    let mut stdout = io::stdout().lock();
    prompt::write_city_listing(&mut stdout, graph, &config.report)?;

    let start = match &cli.start {
        Some(start) => {
            writeln!(stdout, "{}", prompt::SEPARATOR)?;
            start.clone()
        }
        None => prompt::read_start_vertex(io::stdin().lock(), &mut stdout, graph)?,
    };

    let searcher = RouteSearcher::new(LinearScanDijkstra, DfsCycleDetector);
    let mut report = ReportWriter::new(&mut stdout, graph, config.report.clone());

    let shortest = searcher.shortest_paths(&start, &mut report, cli.paths);
    if let Err(Error::GraphError(GraphError::StartVertexNotFound(vertex))) = &shortest {
        warn!(vertex = %vertex, "Skipping shortest paths; continuing with cycle detection.");
    }

    searcher.cycle_check(&mut report, cli.show_cycle)?;
    report.into_inner().flush()?;

    shortest.map(|_| ())
}
