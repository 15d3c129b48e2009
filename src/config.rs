//! Crate configuration.
//!
//! Covers the transport-level knobs the controller itself does not model:
//! base URL, per-mode endpoint paths, page size, the free-text debounce
//! window, and the HTTP request timeout. Loadable from a YAML file with
//! environment-variable overrides.

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::Mode;

/// Environment variable overriding the configured base URL.
pub const BASE_URL_ENV: &str = "LISTSYNC_BASE_URL";

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Base URL the per-mode endpoints are joined onto.
    pub base_url: String,

    /// Per-mode endpoint paths.
    #[serde(default)]
    pub endpoints: EndpointTable,

    /// Page size for paginated modes (default: 12).
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Quiet interval for free-text filter edits in milliseconds (default: 500).
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// HTTP request timeout in seconds (default: 30).
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

fn default_per_page() -> u32 {
    12
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api/v1".to_string(),
            endpoints: EndpointTable::default(),
            per_page: default_per_page(),
            debounce_ms: default_debounce_ms(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl SyncConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a YAML file, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let mut config: SyncConfig = serde_yaml_ng::from_str(&raw)?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var(BASE_URL_ENV)
            && !value.is_empty()
        {
            self.base_url = value;
        }
    }
}

/// Endpoint paths keyed by mode; the strategy table half that lives in
/// configuration rather than in [`Mode::strategy`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointTable {
    #[serde(default = "default_all_endpoint")]
    pub all: String,
    #[serde(default = "default_curated_endpoint")]
    pub curated: String,
}

fn default_all_endpoint() -> String {
    "jobs".to_string()
}

fn default_curated_endpoint() -> String {
    "jobs/eligible".to_string()
}

impl Default for EndpointTable {
    fn default() -> Self {
        Self {
            all: default_all_endpoint(),
            curated: default_curated_endpoint(),
        }
    }
}

impl EndpointTable {
    pub fn for_mode(&self, mode: Mode) -> &str {
        match mode {
            Mode::All => &self.all,
            Mode::Curated => &self.curated,
        }
    }
}
