//! Time series derivation types
//!
//! Mirrors the AQUARIUS Publish service models the derivation chain is built
//! from. Field names follow Rust conventions; the serde attributes map them to
//! the PascalCase JSON the service speaks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Unique identifier of a time series
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesId(String);

impl SeriesId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SeriesId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SeriesId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Active period of a processor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeInterval {
    #[serde(rename = "StartTime")]
    pub start: DateTime<Utc>,
    #[serde(rename = "EndTime")]
    pub end: DateTime<Utc>,
}

impl TimeInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Exact match on both endpoints, no tolerance
    pub fn is_equivalent(&self, other: &TimeInterval) -> bool {
        self.start == other.start && self.end == other.end
    }
}

/// A derivation computation producing one output series from its inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Processor {
    #[serde(rename = "ProcessorType", default)]
    pub processor_type: String,
    #[serde(rename = "InputTimeSeriesUniqueIds")]
    pub inputs: Vec<SeriesId>,
    #[serde(rename = "OutputTimeSeriesUniqueId")]
    pub output: SeriesId,
    #[serde(rename = "ProcessorPeriod")]
    pub period: TimeInterval,
    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        rename = "InputRatingModelIdentifier",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub input_rating_model_identifier: Option<String>,
    #[serde(rename = "Settings", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub settings: BTreeMap<String, String>,
}

impl Processor {
    pub fn new(output: impl Into<SeriesId>, inputs: Vec<SeriesId>, period: TimeInterval) -> Self {
        Self {
            processor_type: String::new(),
            inputs,
            output: output.into(),
            period,
            description: None,
            input_rating_model_identifier: None,
            settings: BTreeMap::new(),
        }
    }

    pub fn with_type(mut self, processor_type: impl Into<String>) -> Self {
        self.processor_type = processor_type.into();
        self
    }

    /// Same output and an equivalent active period
    pub fn is_equivalent(&self, other: &Processor) -> bool {
        self.output == other.output && self.period.is_equivalent(&other.period)
    }
}

/// Descriptive metadata for a time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimeSeriesDescription {
    /// Human label, e.g. `Discharge.ft^3/s@01234567`
    pub identifier: String,
    pub unique_id: SeriesId,
    pub location_identifier: String,
    #[serde(default)]
    pub parameter: String,
    #[serde(default)]
    pub unit: String,
    /// Hours from UTC
    #[serde(default)]
    pub utc_offset: f64,
    #[serde(default)]
    pub time_series_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computation_identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computation_period_identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_location_identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub publish: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

impl TimeSeriesDescription {
    pub fn new(
        unique_id: impl Into<SeriesId>,
        identifier: impl Into<String>,
        location_identifier: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            unique_id: unique_id.into(),
            location_identifier: location_identifier.into(),
            parameter: String::new(),
            unit: String::new(),
            utc_offset: 0.0,
            time_series_type: String::new(),
            computation_identifier: None,
            computation_period_identifier: None,
            sub_location_identifier: None,
            label: None,
            description: None,
            publish: false,
            last_modified: None,
        }
    }
}

/// Station/location metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LocationDescription {
    pub identifier: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_id: Option<String>,
}

/// Output series → processors producing it, in sorted key order
pub type ProcessorMap = BTreeMap<SeriesId, Vec<Processor>>;

/// Input series → series derived from it
pub type ReverseDerivationMap = BTreeMap<SeriesId, BTreeSet<SeriesId>>;

/// Series at the root's site
pub type SiteSeriesSet = std::collections::HashSet<SeriesId>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant(year: i32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_interval_equivalence_is_exact() {
        let a = TimeInterval::new(instant(2000), instant(2010));
        let b = TimeInterval::new(instant(2000), instant(2010));
        let c = TimeInterval::new(instant(2000), instant(2010) + chrono::Duration::nanoseconds(100));

        assert!(a.is_equivalent(&b));
        assert!(!a.is_equivalent(&c));
    }

    #[test]
    fn test_processor_deserializes_from_publish_json() {
        let json = r#"{
            "ProcessorType": "ratingmodel",
            "InputTimeSeriesUniqueIds": ["gh-1"],
            "OutputTimeSeriesUniqueId": "q-1",
            "InputRatingModelIdentifier": "Gage height-Discharge.STGQ@01234567",
            "ProcessorPeriod": {
                "StartTime": "0001-01-01T00:00:00.0000000Z",
                "EndTime": "9999-12-31T23:59:59.9999999Z"
            },
            "Settings": {}
        }"#;

        let processor: Processor = serde_json::from_str(json).unwrap();
        assert_eq!(processor.processor_type, "ratingmodel");
        assert_eq!(processor.output, SeriesId::from("q-1"));
        assert_eq!(processor.inputs, vec![SeriesId::from("gh-1")]);
        assert_eq!(
            processor.input_rating_model_identifier.as_deref(),
            Some("Gage height-Discharge.STGQ@01234567")
        );
        assert!(processor.description.is_none());
    }

    #[test]
    fn test_description_defaults_optional_fields() {
        let json = r#"{
            "Identifier": "Discharge.ft^3/s@01234567",
            "UniqueId": "q-1",
            "LocationIdentifier": "01234567",
            "UtcOffset": -5.0
        }"#;

        let desc: TimeSeriesDescription = serde_json::from_str(json).unwrap();
        assert_eq!(desc.unique_id.as_str(), "q-1");
        assert_eq!(desc.utc_offset, -5.0);
        assert!(!desc.publish);
        assert!(desc.computation_identifier.is_none());
    }

    #[test]
    fn test_series_id_orders_lexicographically() {
        let mut ids = vec![SeriesId::from("c"), SeriesId::from("a"), SeriesId::from("b")];
        ids.sort();
        let sorted: Vec<&str> = ids.iter().map(SeriesId::as_str).collect();
        assert_eq!(sorted, vec!["a", "b", "c"]);
    }
}
