//! Request and response types for the GitHub contents API.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Repository and branch holding the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoTarget {
    pub owner: String,
    pub name: String,
    pub branch: String,
}

impl RepoTarget {
    /// Parses an `owner/name` slug.
    pub fn from_slug(slug: &str, branch: &str) -> Option<Self> {
        let (owner, name) = slug.trim().split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') || branch.is_empty() {
            return None;
        }
        Some(Self {
            owner: owner.to_string(),
            name: name.to_string(),
            branch: branch.to_string(),
        })
    }
}

impl fmt::Display for RepoTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.owner, self.name, self.branch)
    }
}

/// Blob sha of the last-read version of a remote file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RevisionToken(String);

impl RevisionToken {
    pub fn new(sha: impl Into<String>) -> Self {
        Self(sha.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RevisionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fetched remote file and the revision it was read at.
#[derive(Debug, Clone)]
pub struct RemoteFile {
    pub content: Vec<u8>,
    pub revision: RevisionToken,
}

/// `GET /repos/{owner}/{repo}/contents/{path}` response for a file.
#[derive(Debug, Deserialize)]
pub struct ContentFile {
    pub path: String,
    pub sha: String,
    /// Base64 with embedded newlines; empty for files over 1 MB.
    #[serde(default)]
    pub content: String,
    pub encoding: Option<String>,
    pub download_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PutContentRequest<'a> {
    pub message: &'a str,
    pub content: String,
    pub branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct PutContentResponse {
    pub content: ContentRef,
}

#[derive(Debug, Deserialize)]
pub struct ContentRef {
    pub path: String,
    pub sha: String,
}
