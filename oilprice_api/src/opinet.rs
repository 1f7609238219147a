//! Opinet (KNOC) client for nationwide average retail fuel prices.

use crate::client::{build_http_client, build_url, get_json};
use crate::types::{AvgPriceResponse, OilPrice};
use crate::Error;

/// Opinet open API client.
pub struct OpinetClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpinetClient {
    /// Creates a client pointing at the production Opinet API.
    pub fn new(api_key: String) -> Result<Self, Error> {
        Self::with_base_url("https://www.opinet.co.kr", api_key)
    }

    /// Creates a client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, api_key: String) -> Result<Self, Error> {
        Ok(Self {
            client: build_http_client()?,
            api_key,
            base_url: base_url.to_string(),
        })
    }

    /// Fetches today's nationwide average price for every product.
    ///
    /// Opinet publishes one row per product code; all rows share a trade date.
    pub async fn get_average_prices(&self) -> Result<Vec<OilPrice>, Error> {
        let url = build_url(
            &self.base_url,
            "/api/avgAllPrice.do",
            &[("out", "json"), ("code", self.api_key.as_str())],
        )?;
        let resp: AvgPriceResponse = get_json(&self.client, url).await?;
        Ok(resp.result.oil)
    }
}
