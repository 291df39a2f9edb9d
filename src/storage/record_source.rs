use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::models::DisbursementRecord;
use crate::storage::SourceError;

/// Reads every record of the CSV file at `path` before anything is acted upon.
///
/// # Errors
/// Returns `SourceError` if the file cannot be opened or any row is malformed; a
/// single bad row rejects the whole file.
pub fn load_records(path: &Path) -> Result<Vec<DisbursementRecord>, SourceError> {
    let file = File::open(path).map_err(|source| SourceError::Open {
        path: path.to_path_buf(),
        source
    })?;

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut records = Vec::new();

    for (index, result) in reader.deserialize::<DisbursementRecord>().enumerate() {
        let record = result.map_err(|source| SourceError::Malformed {
            path: path.to_path_buf(),
            row: index + 1,
            source
        })?;

        debug!("Loaded record {}: {:?}", index + 1, record);
        records.push(record);
    }

    Ok(records)
}
