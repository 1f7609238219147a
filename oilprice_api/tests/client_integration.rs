use chrono::NaiveDate;
use oilprice_api::{Error, EximbankClient, OpinetClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[tokio::test]
async fn opinet_fixture_round_trip() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("opinet_avg_all_price.json");

    Mock::given(method("GET"))
        .and(path("/api/avgAllPrice.do"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = OpinetClient::with_base_url(&mock_server.uri(), "key".to_string()).unwrap();
    let prices = client.get_average_prices().await.unwrap();
    assert_eq!(prices.len(), 5);
    assert_eq!(prices[1].prodcd, "B027");
}

#[tokio::test]
async fn opinet_base_url_with_trailing_slash() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("opinet_avg_all_price.json");

    Mock::given(method("GET"))
        .and(path("/api/avgAllPrice.do"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let base = format!("{}/", mock_server.uri());
    let client = OpinetClient::with_base_url(&base, "key".to_string()).unwrap();
    assert!(client.get_average_prices().await.is_ok());
}

#[tokio::test]
async fn eximbank_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/site/program/financial/exchangeJSON"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = EximbankClient::with_base_url(&mock_server.uri(), "key".to_string()).unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let result = client.get_exchange_rates(date).await;
    assert!(matches!(
        result,
        Err(Error::UpstreamUnavailable { status: 500, .. })
    ));
}

#[tokio::test]
async fn eximbank_malformed_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/site/program/financial/exchangeJSON"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let client = EximbankClient::with_base_url(&mock_server.uri(), "key".to_string()).unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let result = client.get_exchange_rates(date).await;
    assert!(matches!(result, Err(Error::UpstreamMalformed(_))));
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    let client = OpinetClient::with_base_url("http://127.0.0.1:1", "key".to_string()).unwrap();
    let err = client.get_average_prices().await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));

    // The reqwest cause is carried into the message.
    let msg = err.to_string();
    assert!(msg.starts_with("Network error: "));
    assert!(msg.len() > "Network error: ".len());
}
