//! Collaborator traits for derivation chain discovery
//!
//! The traversal and report builder only ever see these traits; the AQUARIUS
//! client and the in-memory source both implement all three.

use anyhow::Result;
use async_trait::async_trait;

use crate::types::{LocationDescription, Processor, SeriesId, TimeSeriesDescription};

/// Source of processor facts
///
/// # Implementation Notes
///
/// - Return an empty Vec rather than an error for "no processors"
/// - Retry, backoff and timeouts are the implementation's policy; the
///   traversal never retries
#[async_trait]
pub trait ProcessorSource: Send + Sync {
    /// Processors whose output is `id`
    async fn upchain_processors(&self, id: &SeriesId) -> Result<Vec<Processor>>;

    /// Processors whose inputs include `id`
    async fn downchain_processors(&self, id: &SeriesId) -> Result<Vec<Processor>>;
}

/// Source of time series descriptions
#[async_trait]
pub trait DescriptionSource: Send + Sync {
    /// Descriptions for a batch of ids
    ///
    /// Callers keep batches within the vendor ceiling. Ids without a
    /// description are simply absent from the result.
    async fn descriptions(&self, ids: &[SeriesId]) -> Result<Vec<TimeSeriesDescription>>;
}

/// Source of location (site) metadata
#[async_trait]
pub trait LocationSource: Send + Sync {
    /// Unique ids of every time series at the location
    async fn site_series_ids(&self, location_identifier: &str) -> Result<Vec<SeriesId>>;

    async fn location_description(&self, location_identifier: &str)
        -> Result<LocationDescription>;
}

/// Distinct output ids of a batch of processors, in first-seen order
pub fn downchain_output_ids(processors: &[Processor]) -> Vec<SeriesId> {
    let mut seen = std::collections::HashSet::new();
    processors
        .iter()
        .filter(|p| seen.insert(&p.output))
        .map(|p| p.output.clone())
        .collect()
}
