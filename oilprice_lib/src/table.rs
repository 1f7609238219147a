//! The historical price table: one row per calendar date, ascending.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use oilprice_api::types::{parse_decimal, RawRecord};
use serde_json::Value;

use crate::OilDataError;

/// Header name of the key column.
pub const DATE_COLUMN: &str = "Date";
/// Format of the key column in snapshots and feeds.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Value columns, in snapshot header order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Wti,
    Brent,
    Dubai,
    ExchangeRate,
    PremiumGasoline,
    RegularGasoline,
    Diesel,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Wti,
        Column::Brent,
        Column::Dubai,
        Column::ExchangeRate,
        Column::PremiumGasoline,
        Column::RegularGasoline,
        Column::Diesel,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Wti => "WTI",
            Self::Brent => "Brent",
            Self::Dubai => "Dubai",
            Self::ExchangeRate => "Exchange Rate",
            Self::PremiumGasoline => "Premium Gasoline",
            Self::RegularGasoline => "Regular Gasoline",
            Self::Diesel => "Diesel",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, OilDataError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| OilDataError::InvalidRecord(format!("invalid Date {:?}", raw)))
}

/// One day's observations. Columns without a value are null.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    date: NaiveDate,
    values: BTreeMap<Column, f64>,
}

impl DailyRecord {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            values: BTreeMap::new(),
        }
    }

    /// Builder form of [`DailyRecord::set`].
    pub fn with(mut self, column: Column, value: f64) -> Self {
        self.set(column, value);
        self
    }

    pub fn set(&mut self, column: Column, value: f64) {
        self.values.insert(column, value);
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn get(&self, column: Column) -> Option<f64> {
        self.values.get(&column).copied()
    }

    /// Populated columns in header order.
    pub fn fields(&self) -> impl Iterator<Item = (Column, f64)> + '_ {
        self.values.iter().map(|(c, v)| (*c, *v))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Builds a record from a column-keyed JSON object.
    ///
    /// `Date` is required. Values may be numbers, numeric strings, or null;
    /// null and blank strings leave the column unset. Keys outside the fixed
    /// column set are rejected.
    pub fn from_json(raw: &RawRecord) -> Result<Self, OilDataError> {
        let date = match raw.get(DATE_COLUMN) {
            Some(Value::String(s)) => parse_date(s)?,
            Some(other) => {
                return Err(OilDataError::InvalidRecord(format!(
                    "Date must be a string, got {}",
                    other
                )))
            }
            None => return Err(OilDataError::InvalidRecord("missing Date".to_string())),
        };

        let mut record = Self::new(date);
        for (key, value) in raw {
            if key == DATE_COLUMN {
                continue;
            }
            let column = Column::from_name(key).ok_or_else(|| {
                OilDataError::InvalidRecord(format!("unknown column {:?} on {}", key, date))
            })?;
            let parsed = match value {
                Value::Null => None,
                Value::Number(n) => n.as_f64(),
                Value::String(s) if s.trim().is_empty() => None,
                Value::String(s) => Some(parse_decimal(s).ok_or_else(|| {
                    OilDataError::InvalidRecord(format!("{} on {}: invalid number {:?}", key, date, s))
                })?),
                other => {
                    return Err(OilDataError::InvalidRecord(format!(
                        "{} on {}: unexpected value {}",
                        key, date, other
                    )))
                }
            };
            if let Some(v) = parsed {
                record.set(column, v);
            }
        }
        Ok(record)
    }
}

/// Date-keyed table. Iteration is always ascending by date and a date can
/// hold at most one row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoricalTable {
    pub(crate) rows: BTreeMap<NaiveDate, DailyRecord>,
}

impl HistoricalTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DailyRecord> {
        self.rows.get(&date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.rows.contains_key(&date)
    }

    pub fn rows(&self) -> impl Iterator<Item = &DailyRecord> + '_ {
        self.rows.values()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.rows.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.keys().next_back().copied()
    }
}

impl FromIterator<DailyRecord> for HistoricalTable {
    fn from_iter<I: IntoIterator<Item = DailyRecord>>(iter: I) -> Self {
        crate::merge::merge(Self::new(), iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn object(json: serde_json::Value) -> RawRecord {
        match json {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn column_names_round_trip() {
        for c in Column::ALL {
            assert_eq!(Column::from_name(c.name()), Some(c));
        }
        assert_eq!(Column::from_name(" Exchange Rate "), Some(Column::ExchangeRate));
        assert_eq!(Column::from_name("Kerosene"), None);
        assert_eq!(Column::from_name(DATE_COLUMN), None);
    }

    #[test]
    fn from_json_reads_numbers_strings_and_nulls() {
        let raw = object(serde_json::json!({
            "Date": "2024-01-02",
            "WTI": 70.38,
            "Brent": "75.89",
            "Dubai": null,
            "Diesel": ""
        }));
        let record = DailyRecord::from_json(&raw).unwrap();
        assert_eq!(record.date(), date(2024, 1, 2));
        assert_eq!(record.get(Column::Wti), Some(70.38));
        assert_eq!(record.get(Column::Brent), Some(75.89));
        assert_eq!(record.get(Column::Dubai), None);
        assert_eq!(record.get(Column::Diesel), None);
        assert_eq!(record.fields().count(), 2);
    }

    #[test]
    fn from_json_without_date_is_invalid() {
        let raw = object(serde_json::json!({"WTI": 70.38}));
        let err = DailyRecord::from_json(&raw).unwrap_err();
        assert!(matches!(err, OilDataError::InvalidRecord(ref m) if m.contains("missing Date")));
    }

    #[test]
    fn from_json_rejects_bad_dates_and_columns() {
        let raw = object(serde_json::json!({"Date": "01/02/2024"}));
        assert!(DailyRecord::from_json(&raw).is_err());

        let raw = object(serde_json::json!({"Date": 20240102}));
        assert!(DailyRecord::from_json(&raw).is_err());

        let raw = object(serde_json::json!({"Date": "2024-01-02", "Gold": 2040.1}));
        assert!(DailyRecord::from_json(&raw).is_err());

        let raw = object(serde_json::json!({"Date": "2024-01-02", "WTI": "abc"}));
        assert!(DailyRecord::from_json(&raw).is_err());
    }

    #[test]
    fn table_iterates_in_date_order() {
        let table: HistoricalTable = vec![
            DailyRecord::new(date(2024, 1, 3)).with(Column::Diesel, 1.0),
            DailyRecord::new(date(2024, 1, 1)).with(Column::Diesel, 2.0),
            DailyRecord::new(date(2024, 1, 2)).with(Column::Diesel, 3.0),
        ]
        .into_iter()
        .collect();

        let dates: Vec<_> = table.rows().map(|r| r.date()).collect();
        assert_eq!(dates, vec![date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)]);
        assert_eq!(table.first_date(), Some(date(2024, 1, 1)));
        assert_eq!(table.last_date(), Some(date(2024, 1, 3)));
        assert!(table.contains(date(2024, 1, 2)));
    }
}
