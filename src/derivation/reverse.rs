//! Reverse derivation index
//!
//! For each series, the set of series derived from it. Periods are ignored:
//! the index answers "is anything ever derived from this series".

use crate::types::{ProcessorMap, ReverseDerivationMap};

pub fn build_reverse_map(proc_map: &ProcessorMap) -> ReverseDerivationMap {
    let mut derived = ReverseDerivationMap::new();
    for processor in proc_map.values().flatten() {
        for input in &processor.inputs {
            derived
                .entry(input.clone())
                .or_default()
                .insert(processor.output.clone());
        }
    }
    derived
}
