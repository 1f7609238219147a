//! CSV snapshot codec for the historical table.
//!
//! Snapshots are UTF-8 with a byte-order mark, a `Date` column in
//! `YYYY-MM-DD`, and the value columns in [`Column::ALL`] order. Reading is
//! lenient about the BOM, column order, and column subsets.

use std::io::ErrorKind;
use std::path::Path;

use oilprice_api::types::parse_decimal;

use crate::table::{parse_date, Column, DailyRecord, HistoricalTable, DATE_COLUMN, DATE_FORMAT};
use crate::OilDataError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parses a snapshot. Rows with a repeated date are upserted in file order.
pub fn read_table(bytes: &[u8]) -> Result<HistoricalTable, OilDataError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    if headers.is_empty() || headers.iter().all(str::is_empty) {
        return Ok(HistoricalTable::new());
    }

    let mut date_index = None;
    let mut columns: Vec<(usize, Column)> = Vec::new();
    for (i, name) in headers.iter().enumerate() {
        if name == DATE_COLUMN {
            if date_index.replace(i).is_some() {
                return Err(OilDataError::InvalidRecord("duplicate Date column".to_string()));
            }
            continue;
        }
        let column = Column::from_name(name)
            .ok_or_else(|| OilDataError::InvalidRecord(format!("unknown column {:?}", name)))?;
        if columns.iter().any(|(_, c)| *c == column) {
            return Err(OilDataError::InvalidRecord(format!("duplicate column {:?}", name)));
        }
        columns.push((i, column));
    }
    let date_index = date_index
        .ok_or_else(|| OilDataError::InvalidRecord("snapshot has no Date column".to_string()))?;

    let mut table = HistoricalTable::new();
    let mut duplicates = 0usize;
    for row in reader.records() {
        let row = row?;
        let date = parse_date(row.get(date_index).unwrap_or_default())?;
        let mut record = DailyRecord::new(date);
        for (i, column) in &columns {
            let cell = row.get(*i).unwrap_or_default();
            if cell.is_empty() {
                continue;
            }
            let value = parse_decimal(cell).ok_or_else(|| {
                OilDataError::InvalidRecord(format!("{} on {}: invalid number {:?}", column, date, cell))
            })?;
            record.set(*column, value);
        }
        if table.upsert(record) == crate::merge::UpsertOutcome::Updated {
            duplicates += 1;
        }
    }
    if duplicates > 0 {
        tracing::warn!("snapshot contained {} duplicate date rows; collapsed", duplicates);
    }
    Ok(table)
}

/// Serializes `table` in canonical form: BOM, full header, ascending dates,
/// empty cells for null.
pub fn write_table(table: &HistoricalTable) -> Result<Vec<u8>, OilDataError> {
    let mut buf = UTF8_BOM.to_vec();
    {
        let mut wtr = csv::Writer::from_writer(&mut buf);
        let mut header = vec![DATE_COLUMN];
        header.extend(Column::ALL.iter().map(Column::name));
        wtr.write_record(&header)?;

        for row in table.rows() {
            let mut cells = Vec::with_capacity(Column::ALL.len() + 1);
            cells.push(row.date().format(DATE_FORMAT).to_string());
            cells.extend(
                Column::ALL
                    .iter()
                    .map(|c| row.get(*c).map(|v| v.to_string()).unwrap_or_default()),
            );
            wtr.write_record(&cells)?;
        }
        wtr.flush()?;
    }
    Ok(buf)
}

/// Reads the local snapshot, or `None` if the file does not exist.
pub fn load_local(path: &Path) -> Result<Option<HistoricalTable>, OilDataError> {
    match std::fs::read(path) {
        Ok(bytes) => read_table(&bytes).map(Some),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn save_local(path: &Path, bytes: &[u8]) -> Result<(), OilDataError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    Ok(())
}
