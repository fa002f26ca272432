//! Report header assembly

use super::types::{ReportMetadata, RequestParameters};
use crate::config::ReportConfig;
use crate::types::{LocationDescription, TimeSeriesDescription};

/// Header fields come from the configuration, the request and the primary
/// series' description and location
pub fn build_metadata(
    config: &ReportConfig,
    request: &RequestParameters,
    requesting_user: &str,
    primary: &TimeSeriesDescription,
    location: &LocationDescription,
) -> ReportMetadata {
    ReportMetadata {
        title: config.report_title.clone(),
        report_type: config.report_type.clone(),
        requesting_user: requesting_user.to_string(),
        request_parameters: request.clone(),
        station_id: primary.location_identifier.clone(),
        station_name: location.name.clone(),
        timezone: primary.utc_offset,
        primary_series_label: primary.identifier.clone(),
    }
}
