//! Configuration management.

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use observatory_probe::{ProbeContext, WalkOptions, DEFAULT_SCAN_ROOTS};
use observatory_store::{StoreConfig, BUCKET_VAR, DEFAULT_API_KEY_VAR};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::output::OutputFormat;

/// Environment variable overriding the configured endpoint.
pub const ENDPOINT_VAR: &str = "OBSERVATORY_ENDPOINT";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservatoryConfig {
    /// Endpoint receiving the report POST.
    pub endpoint: Option<String>,

    /// Name of the environment variable holding the endpoint credential.
    pub api_key_env: String,

    /// Directory used when the POST is not possible or fails.
    pub bucket: Option<PathBuf>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Warm marker location.
    pub marker_path: Option<PathBuf>,

    /// Run the extended profile by default.
    pub extended: bool,

    /// Default collection deadline in seconds.
    pub deadline_secs: Option<u64>,

    /// Roots of the writable-path scan.
    pub scan_roots: Vec<PathBuf>,

    /// Maximum depth below each scan root.
    pub max_depth: usize,

    /// Descend through symlinked directories.
    pub follow_symlinks: bool,

    /// Output format when `--output` is not given.
    pub output: Option<OutputFormat>,
}

impl Default for ObservatoryConfig {
    fn default() -> Self {
        let walk = WalkOptions::default();
        Self {
            endpoint: None,
            api_key_env: DEFAULT_API_KEY_VAR.to_string(),
            bucket: None,
            timeout_secs: 5,
            marker_path: None,
            extended: false,
            deadline_secs: None,
            scan_roots: DEFAULT_SCAN_ROOTS.iter().map(PathBuf::from).collect(),
            max_depth: walk.max_depth,
            follow_symlinks: walk.follow_symlinks,
            output: None,
        }
    }
}

impl ObservatoryConfig {
    /// Get the default config file path.
    pub fn path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("org", "threatresponse", "observatory")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration and apply environment overrides.
    ///
    /// An explicit path must exist. The default path is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = Self::path()?;
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };
        Ok(config.with_env_overrides(|name| std::env::var(name).ok()))
    }

    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self =
            toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    #[must_use]
    pub fn with_env_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(endpoint) = var(ENDPOINT_VAR).filter(|v| !v.is_empty()) {
            self.endpoint = Some(endpoint);
        }
        if let Some(bucket) = var(BUCKET_VAR).filter(|v| !v.is_empty()) {
            self.bucket = Some(PathBuf::from(bucket));
        }
        self
    }

    #[must_use]
    pub const fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            max_depth: self.max_depth,
            follow_symlinks: self.follow_symlinks,
        }
    }

    /// Probe inputs for this process under this configuration.
    #[must_use]
    pub fn probe_context(&self) -> ProbeContext {
        let ctx = ProbeContext::from_process()
            .with_scan_roots(self.scan_roots.iter().cloned())
            .with_walk_options(self.walk_options());
        match &self.marker_path {
            Some(marker) => ctx.with_marker_path(marker.clone()),
            None => ctx,
        }
    }

    /// Delivery settings, reading the credential through `var`.
    pub fn to_store_config(&self, var: impl Fn(&str) -> Option<String>) -> Result<StoreConfig> {
        let mut store = StoreConfig::new().timeout(Duration::from_secs(self.timeout_secs));
        if let Some(endpoint) = &self.endpoint {
            store = store.endpoint(endpoint)?;
        }
        if let Some(key) = var(&self.api_key_env).filter(|v| !v.is_empty()) {
            store = store.api_key(key);
        }
        if let Some(bucket) = &self.bucket {
            store = store.bucket(bucket.clone());
        }
        Ok(store)
    }
}
