//! Frontier traversal
//!
//! Level-synchronized breadth-first discovery of every processor connected
//! to a root series. Each round drains the whole frontier, fans out one
//! upchain fetch per unexplored id (plus a downchain fetch for ids at the
//! root's site) and waits on both groups before merging. The number of
//! round trips is bounded by the diameter of the derivation graph rather
//! than its size.

use std::collections::HashSet;

use futures::future::try_join_all;
use tracing::{debug, info};

use crate::error::{Result, RetrievalError};
use crate::sources::{downchain_output_ids, ProcessorSource};
use crate::types::{Processor, ProcessorMap, SeriesId, SiteSeriesSet};

/// Discover all processors connected to `root`
///
/// Upchain expansion continues through a processor's inputs only while its
/// output belongs to `site_series`; downchain expansion is only requested for
/// ids in `site_series`. Any failed fetch aborts the whole discovery.
pub async fn discover<S>(
    source: &S,
    root: &SeriesId,
    site_series: &SiteSeriesSet,
) -> Result<ProcessorMap>
where
    S: ProcessorSource + ?Sized,
{
    let mut proc_map = ProcessorMap::new();
    let mut explored: HashSet<SeriesId> = HashSet::new();
    let mut frontier: Vec<SeriesId> = vec![root.clone()];
    let mut rounds = 0usize;

    while !frontier.is_empty() {
        rounds += 1;

        // 1. Select unexplored ids and seed their map entries
        let mut upchain_ids = Vec::new();
        let mut downchain_ids = Vec::new();
        for id in frontier.drain(..) {
            if !explored.insert(id.clone()) {
                continue;
            }
            proc_map.entry(id.clone()).or_default();

            // Only request downchain if the series is at the root's site
            if site_series.contains(&id) {
                downchain_ids.push(id.clone());
            }
            upchain_ids.push(id);
        }

        if upchain_ids.is_empty() {
            break;
        }

        debug!(
            round = rounds,
            upchain = upchain_ids.len(),
            downchain = downchain_ids.len(),
            "Launching {} async processor requests",
            upchain_ids.len() + downchain_ids.len()
        );

        // 2. Fan out both groups, then wait on each barrier
        let (upchain, downchain) = futures::join!(
            try_join_all(upchain_ids.iter().map(|id| source.upchain_processors(id))),
            try_join_all(downchain_ids.iter().map(|id| source.downchain_processors(id)))
        );
        let upchain = upchain.map_err(|err| RetrievalError::UpchainProcessors { source: err })?;
        let downchain =
            downchain.map_err(|err| RetrievalError::DownchainProcessors { source: err })?;

        // 3. Merge upchain results
        let mut next = Vec::new();
        for processor in upchain.into_iter().flatten() {
            let output = processor.output.clone();

            // Same-site outputs keep walking upchain through their inputs
            if site_series.contains(&output) {
                next.extend(processor.inputs.iter().cloned());
            }
            if !explored.contains(&output) {
                next.push(output.clone());
            }

            insert_deduplicated(proc_map.entry(output).or_default(), processor);
        }

        // 4. Queue series derived downstream
        for processors in &downchain {
            next.extend(downchain_output_ids(processors));
        }

        frontier = next;
    }

    info!(
        root = %root,
        series = proc_map.len(),
        rounds,
        "Derivation chain discovery complete"
    );

    Ok(proc_map)
}

/// Add `processor` unless one with an equivalent period is already present
///
/// Several processors may produce the same series as long as their periods
/// differ. Returns whether the processor was added.
pub fn insert_deduplicated(processors: &mut Vec<Processor>, processor: Processor) -> bool {
    if processors.iter().any(|p| p.is_equivalent(&processor)) {
        return false;
    }
    processors.push(processor);
    true
}
