//! GitHub contents API client used as the remote store for the snapshot.

pub mod client;
pub mod error;
pub mod types;

pub use client::GitHubClient;
pub use error::PublishError;
pub use types::{RemoteFile, RepoTarget, RevisionToken};
