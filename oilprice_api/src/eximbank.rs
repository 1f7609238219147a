//! Korea Eximbank client for daily KRW exchange rates.

use chrono::NaiveDate;

use crate::client::{build_http_client, build_url, get_json};
use crate::types::ExchangeRate;
use crate::Error;

/// Eximbank open API client (`AP01` daily exchange-rate report).
pub struct EximbankClient {
    client: reqwest::Client,
    auth_key: String,
    base_url: String,
}

impl EximbankClient {
    /// Creates a client pointing at the production Eximbank API.
    pub fn new(auth_key: String) -> Result<Self, Error> {
        Self::with_base_url("https://oapi.koreaexim.go.kr", auth_key)
    }

    /// Creates a client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, auth_key: String) -> Result<Self, Error> {
        Ok(Self {
            client: build_http_client()?,
            auth_key,
            base_url: base_url.to_string(),
        })
    }

    /// Fetches the published rates for `date`.
    ///
    /// The service answers non-business days (and mornings before the daily
    /// publication) with an empty array rather than an error status.
    pub async fn get_exchange_rates(&self, date: NaiveDate) -> Result<Vec<ExchangeRate>, Error> {
        let search_date = date.format("%Y%m%d").to_string();
        let url = build_url(
            &self.base_url,
            "/site/program/financial/exchangeJSON",
            &[
                ("authkey", self.auth_key.as_str()),
                ("searchdate", search_date.as_str()),
                ("data", "AP01"),
            ],
        )?;
        get_json(&self.client, url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn sends_search_date_and_report_code() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/site/program/financial/exchangeJSON"))
            .and(query_param("authkey", "exim-key"))
            .and(query_param("searchdate", "20240102"))
            .and(query_param("data", "AP01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"result": 1, "cur_unit": "JPY(100)", "deal_bas_r": "913.5"},
                {"result": 1, "cur_unit": "USD", "deal_bas_r": "1,300.4"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = EximbankClient::with_base_url(&server.uri(), "exim-key".to_string()).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let rates = client.get_exchange_rates(date).await.unwrap();

        assert_eq!(rates.len(), 2);
        assert!(rates[1].is_currency("USD"));
        assert_eq!(rates[1].deal_base_rate(), Some(1300.4));
    }

    #[tokio::test]
    async fn holiday_returns_empty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/site/program/financial/exchangeJSON"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let client = EximbankClient::with_base_url(&server.uri(), "exim-key".to_string()).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
        let rates = client.get_exchange_rates(date).await.unwrap();

        assert!(rates.is_empty());
    }
}
