//! Field-level upsert of freshly observed records into the historical table.
//!
//! An incoming record for a date already in the table only overwrites the
//! columns it carries; every other column keeps its stored value. A record
//! for a new date becomes a new row with its missing columns null. Because
//! the table is keyed by date, the result is always deduplicated and sorted.

use chrono::NaiveDate;

use crate::table::{DailyRecord, HistoricalTable};

/// What an upsert did to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// Dates touched by a merge, in the order the records were applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub inserted: Vec<NaiveDate>,
    pub updated: Vec<NaiveDate>,
}

impl HistoricalTable {
    /// Inserts `record` or applies its populated fields to the existing row.
    pub fn upsert(&mut self, record: DailyRecord) -> UpsertOutcome {
        match self.rows.get_mut(&record.date()) {
            Some(existing) => {
                for (column, value) in record.fields() {
                    existing.set(column, value);
                }
                UpsertOutcome::Updated
            }
            None => {
                self.rows.insert(record.date(), record);
                UpsertOutcome::Inserted
            }
        }
    }
}

/// Merges `incoming` into `existing` and returns the canonical table.
pub fn merge<I>(existing: HistoricalTable, incoming: I) -> HistoricalTable
where
    I: IntoIterator<Item = DailyRecord>,
{
    merge_with_report(existing, incoming).0
}

/// Like [`merge`], also reporting which dates were inserted or updated.
pub fn merge_with_report<I>(mut existing: HistoricalTable, incoming: I) -> (HistoricalTable, MergeReport)
where
    I: IntoIterator<Item = DailyRecord>,
{
    let mut report = MergeReport::default();
    for record in incoming {
        let date = record.date();
        match existing.upsert(record) {
            UpsertOutcome::Inserted => report.inserted.push(date),
            UpsertOutcome::Updated => report.updated.push(date),
        }
    }
    tracing::debug!(
        "merge: {} inserted, {} updated, {} rows",
        report.inserted.len(),
        report.updated.len(),
        existing.len()
    );
    (existing, report)
}
