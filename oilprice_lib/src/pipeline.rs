//! One collection run: load, ingest, merge, publish, persist.
//!
//! Ingestion finishes before anything is written, so a failed fetch leaves
//! both the local file and the remote object untouched. The local file is
//! written only after the remote accepts the new table.

use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use oilprice_api::{CrudeClient, EximbankClient, OpinetClient};

use crate::config::Config;
use crate::exchange::fetch_usd_rate;
use crate::github::{GitHubClient, RevisionToken};
use crate::ingest::{crude_records, domestic_record};
use crate::merge::{merge_with_report, UpsertOutcome};
use crate::retry::RetryPolicy;
use crate::snapshot::{load_local, read_table, save_local, write_table};
use crate::table::{Column, DailyRecord, HistoricalTable};
use crate::OilDataError;

/// Where the pre-run table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotSource {
    Remote,
    Local,
    Empty,
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Trade date of the domestic price record.
    pub date: NaiveDate,
    pub outcome: UpsertOutcome,
    pub source: SnapshotSource,
    pub rows_before: usize,
    pub rows_after: usize,
    pub crude_records: usize,
    /// Revision of the published remote object.
    pub revision: RevisionToken,
}

/// Calendar date in Korea Standard Time (UTC+9, no DST).
pub fn today_kst() -> NaiveDate {
    (Utc::now() + chrono::Duration::hours(9)).date_naive()
}

pub struct Pipeline {
    opinet: OpinetClient,
    eximbank: Option<EximbankClient>,
    crude: Option<CrudeClient>,
    github: GitHubClient,
    remote_path: String,
    local_path: PathBuf,
    retry: RetryPolicy,
}

impl Pipeline {
    pub fn from_config(config: &Config) -> Result<Self, OilDataError> {
        let opinet = match &config.opinet_base_url {
            Some(url) => OpinetClient::with_base_url(url, config.opinet_api_key.clone())?,
            None => OpinetClient::new(config.opinet_api_key.clone())?,
        };
        let eximbank = match (&config.eximbank_api_key, &config.eximbank_base_url) {
            (Some(key), Some(url)) => Some(EximbankClient::with_base_url(url, key.clone())?),
            (Some(key), None) => Some(EximbankClient::new(key.clone())?),
            (None, _) => None,
        };
        let crude = config
            .crude_api_url
            .as_deref()
            .map(CrudeClient::new)
            .transpose()?;
        let github = match &config.github_api_url {
            Some(url) => {
                GitHubClient::with_base_url(url, config.repo.clone(), config.access_token.clone())
            }
            None => GitHubClient::new(config.repo.clone(), config.access_token.clone()),
        }
        .map_err(OilDataError::RemoteRead)?;

        Ok(Self {
            opinet,
            eximbank,
            crude,
            github,
            remote_path: config.remote_path.clone(),
            local_path: config.local_path.clone(),
            retry: config.retry,
        })
    }

    pub async fn run(&self) -> Result<RunSummary, OilDataError> {
        tracing::info!(
            "Collecting oil prices on {} (KST) for {}",
            today_kst(),
            self.github.repo()
        );

        let (existing, revision, source) = self.load_existing().await?;
        let rows_before = existing.len();

        let (crude, domestic) = self.collect().await?;
        let date = domestic.date();
        let outcome = if existing.contains(date) {
            UpsertOutcome::Updated
        } else {
            UpsertOutcome::Inserted
        };
        let crude_count = crude.len();

        let (merged, report) = merge_with_report(existing, crude.into_iter().chain([domestic]));
        tracing::info!(
            "Merged {} new and {} updated rows into {} rows",
            report.inserted.len(),
            report.updated.len(),
            merged.len()
        );
        if let (Some(first), Some(last)) = (merged.first_date(), merged.last_date()) {
            tracing::debug!("Table spans {} to {}", first, last);
        }

        let bytes = write_table(&merged)?;

        let message = format!("Update oil prices for {}", date);
        let revision = self
            .github
            .publish(&self.remote_path, &bytes, &message, revision.as_ref())
            .await?;
        tracing::info!("Published {} at {}", self.remote_path, revision);

        save_local(&self.local_path, &bytes)?;
        tracing::info!("Wrote {}", self.local_path.display());

        Ok(RunSummary {
            date,
            outcome,
            source,
            rows_before,
            rows_after: merged.len(),
            crude_records: crude_count,
            revision,
        })
    }

    /// Remote snapshot first; the local file only when the remote has none.
    async fn load_existing(
        &self,
    ) -> Result<(HistoricalTable, Option<RevisionToken>, SnapshotSource), OilDataError> {
        let remote = self
            .github
            .fetch_file(&self.remote_path)
            .await
            .map_err(OilDataError::RemoteRead)?;
        if let Some(remote) = remote {
            let table = read_table(&remote.content)?;
            tracing::info!(
                "Loaded {} rows from remote {} ({})",
                table.len(),
                self.remote_path,
                remote.revision
            );
            return Ok((table, Some(remote.revision), SnapshotSource::Remote));
        }

        match load_local(&self.local_path)? {
            Some(table) => {
                tracing::info!(
                    "Remote {} missing; loaded {} rows from {}",
                    self.remote_path,
                    table.len(),
                    self.local_path.display()
                );
                Ok((table, None, SnapshotSource::Local))
            }
            None => {
                tracing::info!("No existing snapshot; starting an empty table");
                Ok((HistoricalTable::new(), None, SnapshotSource::Empty))
            }
        }
    }

    async fn collect(&self) -> Result<(Vec<DailyRecord>, DailyRecord), OilDataError> {
        let crude = match &self.crude {
            Some(client) => {
                let records = crude_records(&client.get_quotes().await?)?;
                tracing::info!("Fetched {} crude benchmark rows", records.len());
                records
            }
            None => Vec::new(),
        };

        let prices = self.opinet.get_average_prices().await?;
        let mut domestic = domestic_record(&prices)?;
        tracing::info!(
            "Fetched domestic prices for {} ({} products)",
            domestic.date(),
            domestic.fields().count()
        );

        if let Some(client) = &self.eximbank {
            let rate = fetch_usd_rate(client, domestic.date(), &self.retry)
                .await
                .ok_or(OilDataError::ExchangeRateUnavailable {
                    date: domestic.date(),
                    attempts: self.retry.max_attempts,
                })?;
            tracing::info!("USD/KRW deal basis rate {}", rate);
            domestic.set(Column::ExchangeRate, rate);
        }

        Ok((crude, domestic))
    }
}
