//! Derivation chain report builder
//!
//! Orchestrates a single report request: primary description, site series,
//! traversal, batched descriptions, reverse index and node assembly.

use std::sync::Arc;

use tracing::info;

use super::metadata::build_metadata;
use super::types::{DerivationChainReport, RequestParameters};
use crate::config::ReportConfig;
use crate::derivation::{assemble_nodes, build_reverse_map, discover, fetch_descriptions};
use crate::error::{Result, RetrievalError};
use crate::sources::{DescriptionSource, LocationSource, ProcessorSource};
use crate::types::{SeriesId, SiteSeriesSet, TimeSeriesDescription};

pub struct ReportBuilder {
    processors: Arc<dyn ProcessorSource>,
    descriptions: Arc<dyn DescriptionSource>,
    locations: Arc<dyn LocationSource>,
    config: ReportConfig,
}

impl ReportBuilder {
    pub fn new(
        processors: Arc<dyn ProcessorSource>,
        descriptions: Arc<dyn DescriptionSource>,
        locations: Arc<dyn LocationSource>,
        config: ReportConfig,
    ) -> Self {
        Self {
            processors,
            descriptions,
            locations,
            config,
        }
    }

    /// Use one source for processors, descriptions and locations
    pub fn with_source<S>(source: Arc<S>, config: ReportConfig) -> Self
    where
        S: ProcessorSource + DescriptionSource + LocationSource + 'static,
    {
        Self::new(source.clone(), source.clone(), source, config)
    }

    pub async fn build_report(
        &self,
        request: &RequestParameters,
        requesting_user: &str,
    ) -> Result<DerivationChainReport> {
        let root = &request.primary_timeseries_identifier;
        info!(root = %root, user = requesting_user, "Building derivation chain report");

        // Primary series metadata
        let primary = self.primary_description(root).await?;
        let location_id = primary.location_identifier.as_str();
        let location = self
            .locations
            .location_description(location_id)
            .await
            .map_err(|err| RetrievalError::Location {
                location: location_id.to_string(),
                source: err,
            })?;
        let report_metadata = build_metadata(
            &self.config,
            request,
            requesting_user,
            &primary,
            &location,
        );

        // Series at the primary's site
        let site_series: SiteSeriesSet = self
            .locations
            .site_series_ids(location_id)
            .await
            .map_err(|err| RetrievalError::SiteSeries {
                location: location_id.to_string(),
                source: err,
            })?
            .into_iter()
            .collect();

        // Derivation chain data
        let proc_map = discover(self.processors.as_ref(), root, &site_series).await?;
        let ids: Vec<SeriesId> = proc_map.keys().cloned().collect();
        let descriptions = fetch_descriptions(
            self.descriptions.as_ref(),
            &ids,
            self.config.max_description_batch,
        )
        .await?;
        let reverse_map = build_reverse_map(&proc_map);

        let derivations_in_chain = assemble_nodes(&proc_map, &descriptions, &reverse_map);

        info!(
            root = %root,
            series = proc_map.len(),
            nodes = derivations_in_chain.len(),
            "Derivation chain report complete"
        );

        Ok(DerivationChainReport {
            report_metadata,
            derivations_in_chain,
        })
    }

    async fn primary_description(&self, root: &SeriesId) -> Result<TimeSeriesDescription> {
        self.descriptions
            .descriptions(std::slice::from_ref(root))
            .await
            .map_err(|err| RetrievalError::Descriptions { source: err })?
            .into_iter()
            .find(|desc| &desc.unique_id == root)
            .ok_or_else(|| RetrievalError::PrimaryNotFound(root.clone()))
    }
}
