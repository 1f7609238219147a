//! Error types for the upstream clients.

/// Errors that can occur when calling an upstream data source.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The upstream answered with a non-success status.
    #[error("Upstream unavailable: HTTP {status}")]
    UpstreamUnavailable { status: u16, body: String },
    /// The response body did not have the expected shape.
    #[error("Malformed upstream response: {0}")]
    UpstreamMalformed(String),
    /// The request URL could not be built from the configured base URL.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
    /// Connection, timeout, or body read failure.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
}
