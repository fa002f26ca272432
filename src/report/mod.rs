//! Derivation chain reporting
//!
//! This module provides:
//! - Report, metadata and request types
//! - The report builder that drives discovery for one request

pub mod builder;
pub mod metadata;
pub mod types;

pub use builder::ReportBuilder;
pub use metadata::build_metadata;
pub use types::{DerivationChainReport, ReportMetadata, RequestParameters};
