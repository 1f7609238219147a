//! Error types for the library layer.

use std::fmt;

use chrono::NaiveDate;

use crate::github::PublishError;

/// Errors produced by a collection run, wrapping upstream and publication
/// errors and adding record validation, snapshot, and configuration failures.
#[derive(Debug)]
pub enum OilDataError {
    /// A record or snapshot row violated the table schema (e.g. no `Date`).
    InvalidRecord(String),
    /// An upstream price source failed.
    Upstream(oilprice_api::Error),
    /// The exchange-rate lookup exhausted its retry budget.
    ExchangeRateUnavailable { date: NaiveDate, attempts: u32 },
    /// The CSV snapshot could not be read or written.
    Snapshot(csv::Error),
    /// Local file I/O failed.
    Io(std::io::Error),
    /// The remote snapshot could not be read.
    RemoteRead(PublishError),
    /// The remote repository rejected or failed the write.
    Publish(PublishError),
    /// A required setting is missing or invalid.
    Config(String),
}

impl fmt::Display for OilDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRecord(msg) => write!(f, "Invalid record: {}", msg),
            Self::Upstream(e) => write!(f, "Upstream error: {}", e),
            Self::ExchangeRateUnavailable { date, attempts } => write!(
                f,
                "Exchange rate for {} unavailable after {} attempts",
                date, attempts
            ),
            Self::Snapshot(e) => write!(f, "Snapshot error: {}", e),
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::RemoteRead(e) => write!(f, "Remote read error: {}", e),
            Self::Publish(e) => write!(f, "Publish error: {}", e),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for OilDataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Upstream(e) => Some(e),
            Self::Snapshot(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::RemoteRead(e) | Self::Publish(e) => Some(e),
            _ => None,
        }
    }
}

impl From<oilprice_api::Error> for OilDataError {
    fn from(e: oilprice_api::Error) -> Self {
        Self::Upstream(e)
    }
}

impl From<csv::Error> for OilDataError {
    fn from(e: csv::Error) -> Self {
        Self::Snapshot(e)
    }
}

impl From<std::io::Error> for OilDataError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<PublishError> for OilDataError {
    fn from(e: PublishError) -> Self {
        Self::Publish(e)
    }
}
