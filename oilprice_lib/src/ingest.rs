//! Reshapes upstream payloads into [`DailyRecord`]s.

use chrono::NaiveDate;
use oilprice_api::types::{OilPrice, ProductCode, RawRecord};
use oilprice_api::Error;

use crate::table::{Column, DailyRecord};
use crate::OilDataError;

/// Table column fed by an Opinet product, if the table tracks it.
pub fn product_column(product: ProductCode) -> Option<Column> {
    match product {
        ProductCode::PremiumGasoline => Some(Column::PremiumGasoline),
        ProductCode::RegularGasoline => Some(Column::RegularGasoline),
        ProductCode::Diesel => Some(Column::Diesel),
        ProductCode::Kerosene | ProductCode::Lpg => None,
    }
}

/// Builds the domestic retail record from Opinet's average prices.
///
/// Every tracked product must report the same trade date.
pub fn domestic_record(prices: &[OilPrice]) -> Result<DailyRecord, OilDataError> {
    let mut date: Option<NaiveDate> = None;
    let mut fields = Vec::new();

    for price in prices {
        let Some(column) = price.product().and_then(product_column) else {
            continue;
        };
        let trade_date = price.trade_date().ok_or_else(|| {
            Error::UpstreamMalformed(format!(
                "{} has invalid trade date {:?}",
                price.prodcd, price.trade_dt
            ))
        })?;
        match date {
            None => date = Some(trade_date),
            Some(d) if d != trade_date => {
                return Err(Error::UpstreamMalformed(format!(
                    "mixed trade dates {} and {}",
                    d, trade_date
                ))
                .into())
            }
            Some(_) => {}
        }
        fields.push((column, price.price));
    }

    let date = date.ok_or_else(|| {
        Error::UpstreamMalformed(format!(
            "none of {} price rows is a tracked product",
            prices.len()
        ))
    })?;
    Ok(fields
        .into_iter()
        .fold(DailyRecord::new(date), |r, (c, v)| r.with(c, v)))
}

/// Validates crude feed objects into records.
pub fn crude_records(raw: &[RawRecord]) -> Result<Vec<DailyRecord>, OilDataError> {
    raw.iter().map(DailyRecord::from_json).collect()
}
