//! Data sources the derivation chain is discovered from
//!
//! This module provides:
//! - Collaborator traits for processors, descriptions and locations
//! - An in-memory implementation backing the tests

pub mod memory;
pub mod traits;

pub use memory::{InMemorySource, SourceCall};
pub use traits::{downchain_output_ids, DescriptionSource, LocationSource, ProcessorSource};
