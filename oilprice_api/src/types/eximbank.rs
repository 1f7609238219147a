use serde::Deserialize;

use super::number::parse_decimal;

/// `result` value of a successful Eximbank row.
pub const RESULT_OK: i32 = 1;

/// One currency row of the Eximbank `AP01` daily exchange-rate report.
///
/// On error the service returns a single row with only `result` set, so the
/// remaining fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeRate {
    /// 1 ok, 2 data code error, 3 auth code error, 4 daily call limit.
    pub result: i32,
    pub cur_unit: Option<String>,
    pub cur_nm: Option<String>,
    /// Deal basis rate, comma grouped (e.g. `"1,320.5"`).
    pub deal_bas_r: Option<String>,
    pub ttb: Option<String>,
    pub tts: Option<String>,
}

impl ExchangeRate {
    pub fn is_currency(&self, unit: &str) -> bool {
        self.cur_unit.as_deref().map(str::trim) == Some(unit)
    }

    pub fn deal_base_rate(&self) -> Option<f64> {
        self.deal_bas_r.as_deref().and_then(parse_decimal)
    }
}
