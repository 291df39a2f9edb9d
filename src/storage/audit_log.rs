use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::models::LogEntry;

/// Append-only results file, one line per terminal record outcome.
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends the entry and returns only once it has reached the disk.
    pub fn append(&self, entry: &LogEntry) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        writeln!(file, "{entry}")?;
        file.flush()?;
        file.sync_data()
    }
}
