//! Derivation chain report types

use serde::{Deserialize, Serialize};

use crate::derivation::DerivationNode;
use crate::types::SeriesId;

/// Parameters of a report request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestParameters {
    /// Unique id of the root time series
    pub primary_timeseries_identifier: SeriesId,
}

impl RequestParameters {
    pub fn new(primary: impl Into<SeriesId>) -> Self {
        Self {
            primary_timeseries_identifier: primary.into(),
        }
    }
}

/// Descriptive header of a report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub title: String,
    pub report_type: String,
    pub requesting_user: String,
    pub request_parameters: RequestParameters,
    pub station_id: String,
    pub station_name: String,
    /// Hours from UTC of the primary series
    pub timezone: f64,
    pub primary_series_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivationChainReport {
    pub report_metadata: ReportMetadata,
    pub derivations_in_chain: Vec<DerivationNode>,
}
