//! Headered CSV tables deserialised row by row into typed records.

use recs_core::error::{RecsError, RecsResult};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Read every row of the table at `path`. Any unreadable file, missing
/// column or unparsable value fails the whole table.
pub fn read_table<T: DeserializeOwned>(source: &str, path: &Path) -> RecsResult<Vec<T>> {
    info!(source, path = %path.display(), "Reading table");
    let reader = csv::Reader::from_path(path).map_err(|e| {
        RecsError::load(source, format!("failed to open {}: {e}", path.display()))
    })?;
    collect_rows(source, reader)
}

/// Same as [`read_table`] over any byte source.
pub fn read_records<T: DeserializeOwned, R: Read>(source: &str, input: R) -> RecsResult<Vec<T>> {
    collect_rows(source, csv::Reader::from_reader(input))
}

fn collect_rows<T: DeserializeOwned, R: Read>(
    source: &str,
    mut reader: csv::Reader<R>,
) -> RecsResult<Vec<T>> {
    reader
        .deserialize()
        .map(|row| row.map_err(|e| RecsError::load(source, e)))
        .collect()
}
