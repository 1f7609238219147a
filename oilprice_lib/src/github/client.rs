//! GitHub contents API client implementation.

use std::time::Duration;

use base64::Engine;
use reqwest::StatusCode;

use super::error::PublishError;
use super::types::{
    ContentFile, PutContentRequest, PutContentResponse, RemoteFile, RepoTarget, RevisionToken,
};

/// Request timeout for GitHub API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const API_VERSION: &str = "2022-11-28";

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Reads and writes single files on one branch of one repository.
pub struct GitHubClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
    repo: RepoTarget,
}

impl GitHubClient {
    /// Create a new GitHubClient against api.github.com.
    pub fn new(repo: RepoTarget, token: String) -> Result<Self, PublishError> {
        Self::with_base_url(DEFAULT_API_URL, repo, token)
    }

    /// Create a new GitHubClient with custom base URL (for testing with wiremock).
    pub fn with_base_url(
        base_url: &str,
        repo: RepoTarget,
        token: String,
    ) -> Result<Self, PublishError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("oilprice/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
            repo,
        })
    }

    pub fn repo(&self) -> &RepoTarget {
        &self.repo
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.base_url,
            self.repo.owner,
            self.repo.name,
            path.trim_start_matches('/')
        )
    }

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.bearer_auth(&self.token)
            .header("accept", "application/vnd.github+json")
            .header("x-github-api-version", API_VERSION)
    }

    /// Fetches `path` from the configured branch.
    ///
    /// Returns `Ok(None)` when the file does not exist yet.
    pub async fn fetch_file(&self, path: &str) -> Result<Option<RemoteFile>, PublishError> {
        let response = self
            .authorized(self.client.get(self.contents_url(path)))
            .query(&[("ref", self.repo.branch.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, body, path));
        }

        let file: ContentFile = response
            .json()
            .await
            .map_err(|e| PublishError::Decode(format!("contents response: {}", e)))?;

        let content = if !file.content.is_empty() {
            if let Some(encoding) = file.encoding.as_deref().filter(|e| *e != "base64") {
                return Err(PublishError::Decode(format!(
                    "unsupported encoding {:?} for {}",
                    encoding, file.path
                )));
            }
            decode_content(&file.content)?
        } else if let Some(url) = file.download_url.as_deref() {
            // Files over 1 MB come back without inline content.
            tracing::debug!("{} has no inline content; using download_url", file.path);
            self.download(url, path).await?
        } else {
            Vec::new()
        };

        Ok(Some(RemoteFile {
            content,
            revision: RevisionToken::new(file.sha),
        }))
    }

    async fn download(&self, url: &str, path: &str) -> Result<Vec<u8>, PublishError> {
        let response = self.client.get(url).bearer_auth(&self.token).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, body, path));
        }
        Ok(response.bytes().await?.to_vec())
    }

    /// Writes `content` to `path`, creating it when `revision` is `None`.
    ///
    /// Returns the blob sha of the written file.
    pub async fn put_file(
        &self,
        path: &str,
        content: &[u8],
        message: &str,
        revision: Option<&RevisionToken>,
    ) -> Result<RevisionToken, PublishError> {
        let body = PutContentRequest {
            message,
            content: base64::engine::general_purpose::STANDARD.encode(content),
            branch: &self.repo.branch,
            sha: revision.map(RevisionToken::as_str),
        };

        let response = self
            .authorized(self.client.put(self.contents_url(path)))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(status_error(status, text, path));
        }

        let written: PutContentResponse = response
            .json()
            .await
            .map_err(|e| PublishError::Decode(format!("put response: {}", e)))?;
        tracing::debug!("Wrote {} ({})", written.content.path, written.content.sha);
        Ok(RevisionToken::new(written.content.sha))
    }

    /// Creates or updates `path`.
    ///
    /// With a known revision this is an update guarded by that revision; a
    /// stale revision fails with [`PublishError::Conflict`]. An update whose
    /// target has vanished falls back to create.
    pub async fn publish(
        &self,
        path: &str,
        content: &[u8],
        message: &str,
        revision: Option<&RevisionToken>,
    ) -> Result<RevisionToken, PublishError> {
        match revision {
            Some(rev) => match self.put_file(path, content, message, Some(rev)).await {
                Err(PublishError::NotFound { .. }) => {
                    tracing::warn!("{} disappeared from {}; creating it", path, self.repo);
                    self.put_file(path, content, message, None).await
                }
                other => other,
            },
            None => self.put_file(path, content, message, None).await,
        }
    }
}

fn decode_content(encoded: &str) -> Result<Vec<u8>, PublishError> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    base64::engine::general_purpose::STANDARD
        .decode(compact)
        .map_err(|e| PublishError::Decode(e.to_string()))
}

fn status_error(status: StatusCode, body: String, path: &str) -> PublishError {
    let snippet = if body.len() > 200 {
        let mut cut = 200;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...", &body[..cut])
    } else {
        body
    };
    match status {
        StatusCode::NOT_FOUND => PublishError::NotFound {
            path: path.to_string(),
        },
        StatusCode::CONFLICT => PublishError::Conflict {
            path: path.to_string(),
        },
        // Creating over an existing file without a sha answers 422.
        StatusCode::UNPROCESSABLE_ENTITY if snippet.contains("sha") => PublishError::Conflict {
            path: path.to_string(),
        },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PublishError::Unauthorized {
            status: status.as_u16(),
        },
        _ => PublishError::Remote {
            status: status.as_u16(),
            body: snippet,
        },
    }
}
