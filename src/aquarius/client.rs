//! AQUARIUS Publish API client
//!
//! HTTP client for the Publish v2 endpoints the derivation chain needs.
//! In-flight requests are capped so a wide traversal frontier cannot flood
//! the server.

use anyhow::{anyhow, ensure, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::debug;

use super::types::{
    LocationDescriptionListResponse, ProcessorListResponse, TimeSeriesDescriptionListResponse,
    TimeSeriesUniqueIdListResponse,
};
use crate::config::AquariusConfig;
use crate::sources::{DescriptionSource, LocationSource, ProcessorSource};
use crate::types::{LocationDescription, Processor, SeriesId, TimeSeriesDescription};

const AUTH_HEADER: &str = "X-Authentication-Token";
const ERROR_BODY_LIMIT: usize = 200;

pub struct AquariusClient {
    http: Client,
    base_url: String,
    auth_token: Option<String>,
    permits: Semaphore,
}

impl AquariusClient {
    pub fn new(config: &AquariusConfig) -> Result<Self> {
        ensure!(
            config.max_concurrent_requests > 0,
            "AQUARIUS concurrent request limit must be at least 1"
        );

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
            permits: Semaphore::new(config.max_concurrent_requests),
        })
    }

    fn endpoint(&self, operation: &str) -> String {
        format!("{}/{}", self.base_url, operation)
    }

    /// GET an operation with query parameters and decode the JSON body
    async fn get<T: DeserializeOwned>(&self, operation: &str, query: &[(&str, &str)]) -> Result<T> {
        let _permit = self
            .permits
            .acquire()
            .await
            .context("AQUARIUS request limiter closed")?;

        let mut request = self
            .http
            .get(self.endpoint(operation))
            .query(query)
            .header("Accept", "application/json");
        if let Some(token) = &self.auth_token {
            request = request.header(AUTH_HEADER, token);
        }

        debug!(operation, "AQUARIUS request");
        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", operation))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "AQUARIUS API error {}: {}",
                status,
                error_excerpt(&body)
            ));
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse response from {}", operation))
    }
}

fn error_excerpt(body: &str) -> String {
    body.chars().take(ERROR_BODY_LIMIT).collect()
}

#[async_trait]
impl ProcessorSource for AquariusClient {
    async fn upchain_processors(&self, id: &SeriesId) -> Result<Vec<Processor>> {
        let response: ProcessorListResponse = self
            .get(
                "GetUpchainProcessorList",
                &[("TimeSeriesUniqueId", id.as_str())],
            )
            .await?;
        Ok(response.processors)
    }

    async fn downchain_processors(&self, id: &SeriesId) -> Result<Vec<Processor>> {
        let response: ProcessorListResponse = self
            .get(
                "GetDownchainProcessorList",
                &[("TimeSeriesUniqueId", id.as_str())],
            )
            .await?;
        Ok(response.processors)
    }
}

#[async_trait]
impl DescriptionSource for AquariusClient {
    async fn descriptions(&self, ids: &[SeriesId]) -> Result<Vec<TimeSeriesDescription>> {
        let joined = ids
            .iter()
            .map(SeriesId::as_str)
            .collect::<Vec<_>>()
            .join(",");
        let response: TimeSeriesDescriptionListResponse = self
            .get(
                "GetTimeSeriesDescriptionListByUniqueId",
                &[("TimeSeriesUniqueIds", joined.as_str())],
            )
            .await?;
        Ok(response.time_series_descriptions)
    }
}

#[async_trait]
impl LocationSource for AquariusClient {
    async fn site_series_ids(&self, location_identifier: &str) -> Result<Vec<SeriesId>> {
        let response: TimeSeriesUniqueIdListResponse = self
            .get(
                "GetTimeSeriesUniqueIdList",
                &[("LocationIdentifier", location_identifier)],
            )
            .await?;
        Ok(response
            .time_series_unique_ids
            .into_iter()
            .map(|u| u.unique_id)
            .collect())
    }

    async fn location_description(
        &self,
        location_identifier: &str,
    ) -> Result<LocationDescription> {
        let response: LocationDescriptionListResponse = self
            .get(
                "GetLocationDescriptionList",
                &[("LocationIdentifier", location_identifier)],
            )
            .await?;
        response
            .location_descriptions
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("No location found for identifier {}", location_identifier))
    }
}
