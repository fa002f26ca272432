//! Shared builders for derivation unit tests

use chrono::{TimeZone, Utc};

use crate::types::{Processor, SeriesId, SiteSeriesSet, TimeInterval};

pub fn period(start_year: i32, end_year: i32) -> TimeInterval {
    TimeInterval::new(
        Utc.with_ymd_and_hms(start_year, 1, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(end_year, 1, 1, 0, 0, 0).unwrap(),
    )
}

pub fn ids(names: &[&str]) -> Vec<SeriesId> {
    names.iter().map(|n| SeriesId::from(*n)).collect()
}

pub fn processor(output: &str, inputs: &[&str], period: TimeInterval) -> Processor {
    Processor::new(output, ids(inputs), period).with_type("calculation")
}

pub fn site(names: &[&str]) -> SiteSeriesSet {
    ids(names).into_iter().collect()
}
