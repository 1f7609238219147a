use serde_json::{Map, Value};

/// One object of the crude benchmark feed, keyed by column name
/// (`Date`, `WTI`, `Brent`, `Dubai`).
///
/// Kept untyped here; the table layer validates it.
pub type RawRecord = Map<String, Value>;
