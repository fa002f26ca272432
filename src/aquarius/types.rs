//! AQUARIUS Publish v2 response envelopes

use serde::Deserialize;

use crate::types::{LocationDescription, Processor, SeriesId, TimeSeriesDescription};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProcessorListResponse {
    #[serde(default)]
    pub processors: Vec<Processor>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimeSeriesDescriptionListResponse {
    #[serde(default)]
    pub time_series_descriptions: Vec<TimeSeriesDescription>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimeSeriesUniqueIds {
    pub unique_id: SeriesId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimeSeriesUniqueIdListResponse {
    #[serde(default)]
    pub time_series_unique_ids: Vec<TimeSeriesUniqueIds>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LocationDescriptionListResponse {
    #[serde(default)]
    pub location_descriptions: Vec<LocationDescription>,
}
