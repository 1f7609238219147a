//! Error types for remote repository operations.

use thiserror::Error;

/// Errors from reading or writing the remote snapshot.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Revision conflict on {path}: remote changed since it was read")]
    Conflict { path: String },
    #[error("{path} not found in repository")]
    NotFound { path: String },
    #[error("Unauthorized (HTTP {status}): check ACCESS_TOKEN")]
    Unauthorized { status: u16 },
    #[error("Remote error HTTP {status}: {body}")]
    Remote { status: u16, body: String },
    #[error("Failed to decode remote content: {0}")]
    Decode(String),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
