//! Derivation chain discovery
//!
//! This module provides:
//! - Frontier traversal over a processor source
//! - Batched description lookup
//! - The reverse derivation index
//! - Node assembly

pub mod descriptions;
pub mod nodes;
pub mod reverse;
pub mod traversal;

#[cfg(test)]
pub(crate) mod fixtures;

pub use descriptions::{fetch_descriptions, DescriptionMap};
pub use nodes::{assemble_nodes, DerivationNode};
pub use reverse::build_reverse_map;
pub use traversal::{discover, insert_deduplicated};
