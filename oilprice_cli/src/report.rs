//! Human-readable run summary.

use oilprice_lib::{RunSummary, SnapshotSource, UpsertOutcome};

pub fn summary_line(summary: &RunSummary) -> String {
    let action = match summary.outcome {
        UpsertOutcome::Inserted => "added",
        UpsertOutcome::Updated => "updated",
    };
    let source = match summary.source {
        SnapshotSource::Remote => "remote snapshot",
        SnapshotSource::Local => "local snapshot",
        SnapshotSource::Empty => "empty table",
    };
    format!(
        "{} {} (from {}, {} -> {} rows, {} crude rows), revision {}",
        action,
        summary.date,
        source,
        summary.rows_before,
        summary.rows_after,
        summary.crude_records,
        summary.revision
    )
}

pub fn print_summary(summary: &RunSummary) {
    tracing::info!("Run complete: {}", summary_line(summary));
}
