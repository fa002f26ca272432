//! AQUARIUS Publish integration
//!
//! This module provides:
//! - Response envelopes for the Publish v2 list endpoints
//! - A client implementing the processor, description and location sources

pub mod client;
pub mod types;

pub use client::AquariusClient;
