use thiserror::Error;

use common::error::Error as GraphError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Channel sender failed: Receiver has been dropped.")]
    ChannelSendFailed,

    #[error("Graph processing error: {0}")]
    GraphError(#[from] GraphError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Malformed trip record: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Line {line}: invalid trip weight '{value}', expected a non-negative integer.")]
    InvalidWeight { line: u64, value: String },

    #[error("Line {line}: expected 3 fields (origin;destination;weight), found {found}.")]
    FieldCount { line: u64, found: usize },

    #[error("Line {line}: trip record has an empty city name.")]
    EmptyLabel { line: u64 },

    #[error("Configuration error: {0}")]
    ConfigLoadError(String),

    #[error("Pipeline task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),

    #[error("Input contained no trips; nothing to analyse.")]
    EmptyGraph,

    #[error("Input ended before a start vertex was entered.")]
    NoStartVertex,
}
