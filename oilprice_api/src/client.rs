//! Shared HTTP plumbing for the upstream clients.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::Error;

/// Request timeout for every upstream call.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) fn build_http_client() -> Result<reqwest::Client, Error> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("oilprice/", env!("CARGO_PKG_VERSION")))
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    Ok(client)
}

pub(crate) fn build_url(base: &str, path: &str, params: &[(&str, &str)]) -> Result<Url, Error> {
    let mut url = Url::parse(&format!("{}{}", base.trim_end_matches('/'), path)).map_err(|e| {
        tracing::error!("Invalid URL constructed: {}", e);
        Error::InvalidUrl(format!("{}{}: {}", base, path, e))
    })?;
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params);
    }
    Ok(url)
}

/// GET `url` and deserialize the JSON body.
///
/// Query strings carry API keys, so only the path is logged.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: Url,
) -> Result<T, Error> {
    tracing::debug!("GET {}", url.path());
    let resp = client
        .get(url)
        .header("accept", "application/json")
        .send()
        .await?;

    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        let snippet = truncate_body(&body);
        tracing::error!("Request failed with status {}: {}", status, snippet);
        return Err(Error::UpstreamUnavailable {
            status: status.as_u16(),
            body: snippet,
        });
    }

    serde_json::from_str::<T>(&body).map_err(|e| {
        Error::UpstreamMalformed(format!(
            "Failed to deserialize response: {} | body: {}",
            e,
            truncate_body(&body)
        ))
    })
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        None => body.to_string(),
        Some((cut, _)) => format!("{}...", &body[..cut]),
    }
}
