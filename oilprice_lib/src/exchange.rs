//! USD/KRW lookup on top of the Eximbank client.

use chrono::NaiveDate;
use oilprice_api::types::{ExchangeRate, RESULT_OK};
use oilprice_api::{Error, EximbankClient};

use crate::retry::{fetch_with_retry, RetryPolicy};

/// Currency unit recorded in the `Exchange Rate` column.
pub const TARGET_CURRENCY: &str = "USD";

/// Picks the deal basis rate for `unit` out of one day's report.
///
/// A report without the unit (holidays answer with `[]`) is an error so the
/// retry loop treats it like any other failed attempt.
pub fn select_rate(rates: &[ExchangeRate], unit: &str) -> Result<f64, Error> {
    if let Some(failed) = rates.iter().find(|r| r.result != RESULT_OK) {
        return Err(Error::UpstreamMalformed(format!(
            "exchange-rate service returned result code {}",
            failed.result
        )));
    }
    let row = rates.iter().find(|r| r.is_currency(unit)).ok_or_else(|| {
        Error::UpstreamMalformed(format!("no {} row among {} rates", unit, rates.len()))
    })?;
    row.deal_base_rate().ok_or_else(|| {
        Error::UpstreamMalformed(format!(
            "unparsable {} deal basis rate {:?}",
            unit, row.deal_bas_r
        ))
    })
}

/// Fetches the USD deal basis rate for `date`, retrying per `policy`.
///
/// `None` means the budget was exhausted and the run must not publish.
pub async fn fetch_usd_rate(
    client: &EximbankClient,
    date: NaiveDate,
    policy: &RetryPolicy,
) -> Option<f64> {
    fetch_with_retry(policy, "exchange rate", move || async move {
        client
            .get_exchange_rates(date)
            .await
            .and_then(|rates| select_rate(&rates, TARGET_CURRENCY))
    })
    .await
}
