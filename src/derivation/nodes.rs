//! Derivation node assembly
//!
//! Joins processors, descriptions and the reverse index into report rows.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::warn;

use super::descriptions::DescriptionMap;
use crate::types::{Processor, ProcessorMap, ReverseDerivationMap, SeriesId, TimeSeriesDescription};

/// One row of the derivation chain
///
/// A series with several processors yields one node per processor; a raw
/// series with none yields a single node without a processor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivationNode {
    pub series_id: SeriesId,
    pub processor: Option<Processor>,
    /// Absent when the series had no description
    pub description: Option<TimeSeriesDescription>,
    pub derived_series: BTreeSet<SeriesId>,
}

impl DerivationNode {
    pub fn is_raw(&self) -> bool {
        self.processor.is_none()
    }
}

/// Build nodes in series id order; processors keep discovery order
pub fn assemble_nodes(
    proc_map: &ProcessorMap,
    descriptions: &DescriptionMap,
    reverse_map: &ReverseDerivationMap,
) -> Vec<DerivationNode> {
    let mut nodes = Vec::with_capacity(proc_map.len());

    for (series_id, processors) in proc_map {
        let description = descriptions.get(series_id).cloned();
        if description.is_none() {
            warn!(series = %series_id, "No description for time series in derivation chain");
        }
        let derived_series = reverse_map.get(series_id).cloned().unwrap_or_default();

        if processors.is_empty() {
            nodes.push(DerivationNode {
                series_id: series_id.clone(),
                processor: None,
                description,
                derived_series,
            });
            continue;
        }

        for processor in processors {
            nodes.push(DerivationNode {
                series_id: series_id.clone(),
                processor: Some(processor.clone()),
                description: description.clone(),
                derived_series: derived_series.clone(),
            });
        }
    }

    nodes
}
