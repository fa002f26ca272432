//! Derivation chain discovery and reporting for AQUARIUS time series
//!
//! Given a primary time series, discovers every series connected to it
//! through processors (upchain toward its inputs, downchain toward series
//! derived at the same site) and assembles one report row per processor.
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! use std::sync::Arc;
//! use derivation_chain::{AquariusClient, Config, ReportBuilder, RequestParameters};
//!
//! let config = Config::load(None)?;
//! let client = Arc::new(AquariusClient::new(&config.aquarius)?);
//! let builder = ReportBuilder::with_source(client, config.report);
//! let report = builder
//!     .build_report(&RequestParameters::new("a1b2c3"), "jdoe")
//!     .await?;
//! println!("{} nodes", report.derivations_in_chain.len());
//! # Ok(())
//! # }
//! ```

pub mod aquarius;
pub mod config;
pub mod derivation;
pub mod error;
pub mod report;
pub mod sources;
pub mod types;

pub use aquarius::AquariusClient;
pub use config::{AquariusConfig, Config, ReportConfig};
pub use derivation::DerivationNode;
pub use error::{ConfigError, RetrievalError};
pub use report::{DerivationChainReport, ReportBuilder, ReportMetadata, RequestParameters};
pub use types::{
    LocationDescription, Processor, ProcessorMap, ReverseDerivationMap, SeriesId, SiteSeriesSet,
    TimeInterval, TimeSeriesDescription,
};
