//! Report delivery with fallback.

use observatory_core::Report;
use reqwest::header::AUTHORIZATION;
use reqwest::Client as HttpClient;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use url::Url;

use crate::archive::write_object;
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};

/// What happened to a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOutcome {
    /// Accepted by the endpoint
    Posted {
        /// HTTP status code
        status: u16,
    },
    /// Written to the bucket as a compressed object
    Archived(PathBuf),
    /// Neither endpoint nor bucket configured
    NotConfigured,
    /// Every configured delivery failed
    Failed(String),
}

impl StoreOutcome {
    #[must_use]
    pub const fn is_stored(&self) -> bool {
        matches!(self, Self::Posted { .. } | Self::Archived(_))
    }
}

impl std::fmt::Display for StoreOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Posted { status } => write!(f, "posted ({status})"),
            Self::Archived(path) => write!(f, "archived to {}", path.display()),
            Self::NotConfigured => write!(f, "not stored (no endpoint or bucket)"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// Delivers reports: POST first, bucket second.
#[derive(Debug, Clone)]
pub struct ResultStore {
    http: HttpClient,
    config: StoreConfig,
}

impl ResultStore {
    pub fn new(config: StoreConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .user_agent(format!("observatory/{}", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .build()
            .map_err(|e| StoreError::Http(e.to_string()))?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Deliver `report`. Never fails; the outcome says what happened.
    pub async fn store(&self, report: &Report) -> StoreOutcome {
        let mut failure = None;

        match (&self.config.endpoint, &self.config.api_key) {
            (Some(endpoint), Some(key)) => match self.post(endpoint, key, report).await {
                Ok(status) => {
                    info!(endpoint = %endpoint, status, "report posted");
                    return StoreOutcome::Posted { status };
                }
                Err(e) => {
                    warn!(endpoint = %endpoint, error = %e, "POST failed, trying bucket");
                    failure = Some(e.to_string());
                }
            },
            (Some(endpoint), None) => {
                debug!(endpoint = %endpoint, "no API key, skipping POST");
            }
            _ => debug!("no endpoint configured"),
        }

        if let Some(bucket) = &self.config.bucket {
            match write_object(bucket, report).await {
                Ok(path) => {
                    info!(path = %path.display(), "report archived");
                    return StoreOutcome::Archived(path);
                }
                Err(e) => {
                    warn!(bucket = %bucket.display(), error = %e, "archive write failed");
                    let reason = match failure {
                        Some(post) => format!("{post}; {e}"),
                        None => e.to_string(),
                    };
                    return StoreOutcome::Failed(reason);
                }
            }
        }

        failure.map_or(StoreOutcome::NotConfigured, StoreOutcome::Failed)
    }

    async fn post(&self, endpoint: &Url, key: &str, report: &Report) -> Result<u16> {
        debug!(url = %endpoint, "POST request");
        let response = self
            .http
            .post(endpoint.clone())
            .header(AUTHORIZATION, format!("Basic {key}"))
            .json(report)
            .send()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(status.as_u16())
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(StoreError::Api {
                code: status.as_u16(),
                message,
            })
        }
    }
}
