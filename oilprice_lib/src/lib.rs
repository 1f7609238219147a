//! Library layer for the oil price collector: the date-keyed table, its
//! field-level merge, the CSV snapshot codec, and the remote publisher.
//!
//! Wraps the upstream clients from `oilprice_api` with retry, validation,
//! and a single-run pipeline.

pub mod config;
pub mod error;
pub mod exchange;
pub mod github;
pub mod ingest;
pub mod merge;
pub mod pipeline;
pub mod retry;
pub mod snapshot;
pub mod table;

pub use oilprice_api;

pub use config::Config;
pub use error::OilDataError;
pub use github::{GitHubClient, PublishError, RepoTarget, RevisionToken};
pub use merge::{merge, merge_with_report, MergeReport, UpsertOutcome};
pub use pipeline::{Pipeline, RunSummary, SnapshotSource};
pub use retry::{fetch_with_retry, RetryPolicy};
pub use table::{Column, DailyRecord, HistoricalTable};
