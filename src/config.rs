//! Report and AQUARIUS client configuration
//!
//! Settings are layered: built-in defaults, then an optional YAML file, then
//! environment variables:
//!   DERIVATION_CHAIN_REPORT_TITLE         : report title (default: "Derivation Chain")
//!   DERIVATION_CHAIN_REPORT_TYPE          : report type (default: "derivationchain")
//!   DERIVATION_CHAIN_MAX_DESCRIPTION_BATCH : ids per description request (default: 30)
//!   AQUARIUS_BASE_URL                     : Publish API root
//!   AQUARIUS_AUTH_TOKEN                   : session token (optional)
//!   AQUARIUS_TIMEOUT_SECS                 : per-request timeout (default: 30)
//!   AQUARIUS_MAX_CONCURRENT_REQUESTS      : in-flight request cap (default: 16)

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_REPORT_TITLE: &str = "Derivation Chain";
pub const DEFAULT_REPORT_TYPE: &str = "derivationchain";
/// The Publish API documents "roughly 60" ids per description request
pub const DEFAULT_MAX_DESCRIPTION_BATCH: usize = 30;

/// Settings for report assembly
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub report_title: String,
    pub report_type: String,
    pub max_description_batch: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            report_title: DEFAULT_REPORT_TITLE.to_string(),
            report_type: DEFAULT_REPORT_TYPE.to_string(),
            max_description_batch: DEFAULT_MAX_DESCRIPTION_BATCH,
        }
    }
}

/// Settings for the AQUARIUS Publish client
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AquariusConfig {
    pub base_url: String,
    pub auth_token: Option<String>,
    pub timeout_secs: u64,
    pub max_concurrent_requests: usize,
}

impl Default for AquariusConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost/AQUARIUS/Publish/v2".to_string(),
            auth_token: None,
            timeout_secs: 30,
            max_concurrent_requests: 16,
        }
    }
}

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub report: ReportConfig,
    pub aquarius: AquariusConfig,
}

impl Config {
    /// Load defaults, the optional YAML file and the process environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|var| std::env::var(var).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply overrides from a variable lookup (the environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(title) = lookup("DERIVATION_CHAIN_REPORT_TITLE") {
            self.report.report_title = title;
        }
        if let Some(report_type) = lookup("DERIVATION_CHAIN_REPORT_TYPE") {
            self.report.report_type = report_type;
        }
        if let Some(batch) = parse_var(&lookup, "DERIVATION_CHAIN_MAX_DESCRIPTION_BATCH")? {
            self.report.max_description_batch = batch;
        }
        if let Some(base_url) = lookup("AQUARIUS_BASE_URL") {
            self.aquarius.base_url = base_url;
        }
        if let Some(token) = lookup("AQUARIUS_AUTH_TOKEN") {
            self.aquarius.auth_token = Some(token);
        }
        if let Some(timeout) = parse_var(&lookup, "AQUARIUS_TIMEOUT_SECS")? {
            self.aquarius.timeout_secs = timeout;
        }
        if let Some(max) = parse_var(&lookup, "AQUARIUS_MAX_CONCURRENT_REQUESTS")? {
            self.aquarius.max_concurrent_requests = max;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.report.max_description_batch == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        if self.aquarius.max_concurrent_requests == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if self.aquarius.base_url.trim().is_empty() {
            return Err(ConfigError::Missing("AQUARIUS_BASE_URL"));
        }
        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, var: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv {
                var: var.to_string(),
                value,
            }),
        None => Ok(None),
    }
}
