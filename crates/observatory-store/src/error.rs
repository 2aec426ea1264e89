use thiserror::Error;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors from delivering a report
#[derive(Error, Debug)]
pub enum StoreError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Endpoint answered with a non-success status
    #[error("endpoint error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Response body
        message: String,
    },

    /// Invalid endpoint URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Writing the archive failed
    #[error("archive I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
