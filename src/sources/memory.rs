//! In-memory source
//!
//! Serves a fixed set of processors, descriptions and locations to the unit
//! and integration tests. Every call is recorded so tests can assert how many
//! fetches were issued.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, PoisonError};

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use super::traits::{DescriptionSource, LocationSource, ProcessorSource};
use crate::types::{LocationDescription, Processor, SeriesId, TimeSeriesDescription};

/// Kind of call recorded by [`InMemorySource`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceCall {
    Upchain(SeriesId),
    Downchain(SeriesId),
    Descriptions(usize),
    SiteSeries(String),
    Location(String),
}

#[derive(Default)]
pub struct InMemorySource {
    processors: Vec<Processor>,
    descriptions: HashMap<SeriesId, TimeSeriesDescription>,
    locations: HashMap<String, (LocationDescription, Vec<SeriesId>)>,
    failing_upchain: HashSet<SeriesId>,
    failing_downchain: HashSet<SeriesId>,
    calls: Mutex<Vec<SourceCall>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_processor(mut self, processor: Processor) -> Self {
        self.processors.push(processor);
        self
    }

    pub fn with_description(mut self, description: TimeSeriesDescription) -> Self {
        self.descriptions
            .insert(description.unique_id.clone(), description);
        self
    }

    pub fn with_location(
        mut self,
        location: LocationDescription,
        series: impl IntoIterator<Item = SeriesId>,
    ) -> Self {
        self.locations.insert(
            location.identifier.clone(),
            (location, series.into_iter().collect()),
        );
        self
    }

    /// Upchain fetches for `id` fail
    pub fn failing_upchain_on(mut self, id: impl Into<SeriesId>) -> Self {
        self.failing_upchain.insert(id.into());
        self
    }

    /// Downchain fetches for `id` fail
    pub fn failing_downchain_on(mut self, id: impl Into<SeriesId>) -> Self {
        self.failing_downchain.insert(id.into());
        self
    }

    pub fn calls(&self) -> Vec<SourceCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of recorded calls matching `call`
    pub fn call_count(&self, call: &SourceCall) -> usize {
        self.calls().iter().filter(|c| *c == call).count()
    }

    fn record(&self, call: SourceCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }

    fn check_failing(failing: &HashSet<SeriesId>, id: &SeriesId) -> Result<()> {
        if failing.contains(id) {
            return Err(anyhow!("simulated retrieval failure for {}", id));
        }
        Ok(())
    }
}

#[async_trait]
impl ProcessorSource for InMemorySource {
    async fn upchain_processors(&self, id: &SeriesId) -> Result<Vec<Processor>> {
        self.record(SourceCall::Upchain(id.clone()));
        Self::check_failing(&self.failing_upchain, id)?;
        Ok(self
            .processors
            .iter()
            .filter(|p| &p.output == id)
            .cloned()
            .collect())
    }

    async fn downchain_processors(&self, id: &SeriesId) -> Result<Vec<Processor>> {
        self.record(SourceCall::Downchain(id.clone()));
        Self::check_failing(&self.failing_downchain, id)?;
        Ok(self
            .processors
            .iter()
            .filter(|p| p.inputs.contains(id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl DescriptionSource for InMemorySource {
    async fn descriptions(&self, ids: &[SeriesId]) -> Result<Vec<TimeSeriesDescription>> {
        self.record(SourceCall::Descriptions(ids.len()));
        Ok(ids
            .iter()
            .filter_map(|id| self.descriptions.get(id).cloned())
            .collect())
    }
}

#[async_trait]
impl LocationSource for InMemorySource {
    async fn site_series_ids(&self, location_identifier: &str) -> Result<Vec<SeriesId>> {
        self.record(SourceCall::SiteSeries(location_identifier.to_string()));
        self.locations
            .get(location_identifier)
            .map(|(_, series)| series.clone())
            .ok_or_else(|| anyhow!("unknown location {}", location_identifier))
    }

    async fn location_description(
        &self,
        location_identifier: &str,
    ) -> Result<LocationDescription> {
        self.record(SourceCall::Location(location_identifier.to_string()));
        self.locations
            .get(location_identifier)
            .map(|(location, _)| location.clone())
            .ok_or_else(|| anyhow!("unknown location {}", location_identifier))
    }
}
