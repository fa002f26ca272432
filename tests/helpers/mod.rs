//! Builders shared by the derivation chain integration tests

#![allow(dead_code)]

use chrono::{TimeZone, Utc};

use derivation_chain::sources::InMemorySource;
use derivation_chain::{LocationDescription, Processor, SeriesId, TimeInterval, TimeSeriesDescription};

pub const STATION: &str = "05568500";

pub fn period(start_year: i32, end_year: i32) -> TimeInterval {
    TimeInterval::new(
        Utc.with_ymd_and_hms(start_year, 10, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(end_year, 10, 1, 0, 0, 0).unwrap(),
    )
}

pub fn ids(names: &[&str]) -> Vec<SeriesId> {
    names.iter().map(|n| SeriesId::from(*n)).collect()
}

pub fn processor(kind: &str, output: &str, inputs: &[&str], period: TimeInterval) -> Processor {
    Processor::new(output, ids(inputs), period).with_type(kind)
}

pub fn station() -> LocationDescription {
    LocationDescription {
        identifier: STATION.to_string(),
        name: "ILLINOIS RIVER AT KINGSTON MINES, IL".to_string(),
        unique_id: Some("b1a4c3e2".to_string()),
    }
}

pub fn description(id: &str, label: &str) -> TimeSeriesDescription {
    let mut desc = TimeSeriesDescription::new(id, format!("{}@{}", label, STATION), STATION);
    desc.parameter = label.split('.').next().unwrap_or(label).to_string();
    desc.utc_offset = -6.0;
    desc
}

/// Rating-curve chain at one station, plus an off-site comparison series
///
/// gh  --ratingmodel(2 periods)-->  q  --statistics-->  q_dv
///                                  q  + upstream_q --calculation--> q_diff
pub fn kingston_mines() -> InMemorySource {
    InMemorySource::new()
        .with_processor(processor("ratingmodel", "q", &["gh"], period(1990, 2015)))
        .with_processor(processor("ratingmodel", "q", &["gh"], period(2015, 2099)))
        .with_processor(processor("statistics", "q_dv", &["q"], period(1990, 2099)))
        .with_processor(processor(
            "calculation",
            "q_diff",
            &["q", "upstream_q"],
            period(1990, 2099),
        ))
        .with_processor(processor("pass-through", "upstream_q", &["upstream_raw"], period(1990, 2099)))
        .with_location(station(), ids(&["gh", "q", "q_dv", "q_diff"]))
        .with_description(description("gh", "Gage height.ft"))
        .with_description(description("q", "Discharge.ft^3/s"))
        .with_description(description("q_dv", "Discharge.ft^3/s.Mean"))
        .with_description(description("q_diff", "Discharge.ft^3/s.Difference"))
        .with_description(description("upstream_q", "Discharge.ft^3/s.Upstream"))
}
