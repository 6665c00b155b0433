use config::{Config as ConfigLoader, ConfigBuilder, Environment, File, builder::DefaultState};
use serde::Deserialize;
use std::path::Path;

use super::error::Error;

/// Default config file looked up in the working directory when `--config` is absent.
const DEFAULT_CONFIG_FILE: &str = "Config";

/// Environment overrides, e.g. `ROUTE_PLANNER_PIPELINE__BATCH_SIZE=64`.
const ENV_PREFIX: &str = "ROUTE_PLANNER";

#[derive(Debug, Deserialize, Clone)]
pub struct PipelineConfig {
    pub channel_capacity: usize,
    pub batch_size: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    pub column_width: usize,
    pub city_column_width: usize,
    pub cities_per_line: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SimulatorConfig {
    pub total_cities: usize,
    pub total_trips: usize,
    pub max_weight: u32,
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    pub filter: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub pipeline: PipelineConfig,
    pub report: ReportConfig,
    pub simulator: SimulatorConfig,
    pub log: LogConfig,
}

fn with_defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    ConfigLoader::builder()
        .set_default("pipeline.channel_capacity", 16_i64)?
        .set_default("pipeline.batch_size", 128_i64)?
        .set_default("report.column_width", 25_i64)?
        .set_default("report.city_column_width", 15_i64)?
        .set_default("report.cities_per_line", 3_i64)?
        .set_default("simulator.total_cities", 8_i64)?
        .set_default("simulator.total_trips", 20_i64)?
        .set_default("simulator.max_weight", 100_i64)?
        .set_default("log.filter", "route_planner=info,route_core=warn")
}

/// Loads configuration from built-in defaults, a TOML file and environment variables.
///
/// An explicit `path` must exist; without one, `Config.toml` in the working
/// directory is used when present.
pub fn load_config(path: Option<&Path>) -> Result<Config, Error> {
    let mut builder = with_defaults().map_err(|e| Error::ConfigLoadError(e.to_string()))?;

    builder = match path {
        Some(path) => {
            if !path.exists() {
                return Err(Error::ConfigLoadError(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            builder.add_source(File::from(path).required(true))
        }
        None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
    };

    let s = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(|e| Error::ConfigLoadError(e.to_string()))?;

    let app_config: Config = s
        .try_deserialize()
        .map_err(|e| Error::ConfigLoadError(format!("Failed to deserialize config: {}", e)))?;

    Ok(app_config)
}
