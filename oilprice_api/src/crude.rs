//! Client for a crude benchmark price feed (WTI, Brent, Dubai).
//!
//! The feed is any endpoint returning a JSON array of column-keyed objects,
//! so the client takes the full URL rather than a base URL.

use url::Url;

use crate::client::{build_http_client, get_json};
use crate::types::RawRecord;
use crate::Error;

pub struct CrudeClient {
    client: reqwest::Client,
    url: Url,
}

impl CrudeClient {
    pub fn new(url: &str) -> Result<Self, Error> {
        let url = Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))?;
        Ok(Self {
            client: build_http_client()?,
            url,
        })
    }

    pub async fn get_quotes(&self) -> Result<Vec<RawRecord>, Error> {
        get_json(&self.client, self.url.clone()).await
    }
}
