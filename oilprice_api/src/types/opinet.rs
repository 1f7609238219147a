use chrono::NaiveDate;
use serde::Deserialize;

use super::number::{number, optional_number};

/// Envelope of the Opinet nationwide average price endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AvgPriceResponse {
    #[serde(rename = "RESULT")]
    pub result: AvgPriceResult,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvgPriceResult {
    #[serde(rename = "OIL", default)]
    pub oil: Vec<OilPrice>,
}

/// One product's nationwide average price for a trade date.
#[derive(Debug, Clone, Deserialize)]
pub struct OilPrice {
    /// Trade date as `YYYYMMDD`.
    #[serde(rename = "TRADE_DT", alias = "DATE")]
    pub trade_dt: String,
    #[serde(rename = "PRODCD")]
    pub prodcd: String,
    #[serde(rename = "PRODNM", default)]
    pub prodnm: Option<String>,
    /// KRW per litre.
    #[serde(rename = "PRICE", deserialize_with = "number")]
    pub price: f64,
    /// Change against the previous trade date.
    #[serde(rename = "DIFF", default, deserialize_with = "optional_number")]
    pub diff: Option<f64>,
}

impl OilPrice {
    pub fn product(&self) -> Option<ProductCode> {
        ProductCode::from_code(&self.prodcd)
    }

    pub fn trade_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.trade_dt.trim(), "%Y%m%d").ok()
    }
}

/// Opinet product codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductCode {
    PremiumGasoline,
    RegularGasoline,
    Diesel,
    Kerosene,
    Lpg,
}

impl ProductCode {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "B034" => Some(Self::PremiumGasoline),
            "B027" => Some(Self::RegularGasoline),
            "D047" => Some(Self::Diesel),
            "C004" => Some(Self::Kerosene),
            "K015" => Some(Self::Lpg),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_codes() {
        assert_eq!(ProductCode::from_code("B034"), Some(ProductCode::PremiumGasoline));
        assert_eq!(ProductCode::from_code("B027"), Some(ProductCode::RegularGasoline));
        assert_eq!(ProductCode::from_code(" D047 "), Some(ProductCode::Diesel));
        assert_eq!(ProductCode::from_code("C004"), Some(ProductCode::Kerosene));
        assert_eq!(ProductCode::from_code("K015"), Some(ProductCode::Lpg));
        assert_eq!(ProductCode::from_code("X999"), None);
    }

    #[test]
    fn price_accepts_string_or_number() {
        let json = r#"[
            {"TRADE_DT":"20240102","PRODCD":"D047","PRICE":"1520.47","DIFF":"-0.84"},
            {"DATE":"20240102","PRODCD":"B027","PRICE":1580}
        ]"#;
        let items: Vec<OilPrice> = serde_json::from_str(json).unwrap();
        assert_eq!(items[0].price, 1520.47);
        assert_eq!(items[0].diff, Some(-0.84));
        assert_eq!(items[1].price, 1580.0);
        assert_eq!(items[1].diff, None);
        assert_eq!(
            items[1].trade_date(),
            NaiveDate::from_ymd_opt(2024, 1, 2)
        );
    }

    #[test]
    fn bad_price_is_rejected() {
        let json = r#"{"TRADE_DT":"20240102","PRODCD":"D047","PRICE":"-"}"#;
        assert!(serde_json::from_str::<OilPrice>(json).is_err());
    }
}
