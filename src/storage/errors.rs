use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Unable to open records file [{}]: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: io::Error
    },
    #[error("Malformed record at row {row} of [{}]: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        row: usize,
        source: csv::Error
    }
}
