//! Error types for derivation chain discovery and reporting
//!
//! Every failure to retrieve data is fatal to the report request; there is
//! no partial-graph fallback. Missing descriptions or reverse entries at
//! assembly time are not errors and never reach these types.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::SeriesId;

/// Failure to retrieve something the derivation chain depends on
#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Failed to retrieve all requested upchain processors: {source}")]
    UpchainProcessors {
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to retrieve all requested downchain processors: {source}")]
    DownchainProcessors {
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to retrieve time series descriptions: {source}")]
    Descriptions {
        #[source]
        source: anyhow::Error,
    },

    #[error(
        "Did not receive all requested time series descriptions! Requested: {requested} | Received: {received}"
    )]
    DescriptionCount { requested: usize, received: usize },

    #[error("Received a time series description that was not requested: {0}")]
    UnrequestedDescription(SeriesId),

    #[error("No time series description found for primary series {0}")]
    PrimaryNotFound(SeriesId),

    #[error("Failed to retrieve time series at location '{location}': {source}")]
    SiteSeries {
        location: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to retrieve location '{location}': {source}")]
    Location {
        location: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid value '{value}' for {var}")]
    InvalidEnv { var: String, value: String },

    #[error("Description batch size must be at least 1")]
    ZeroBatchSize,

    #[error("AQUARIUS concurrent request limit must be at least 1")]
    ZeroConcurrency,

    #[error("Missing required setting: {0}")]
    Missing(&'static str),
}

pub type Result<T> = std::result::Result<T, RetrievalError>;
