//! Append-only audit mapping from generated tokens back to paper numbers.

use std::fs::File;
use std::path::Path;

use crate::error::ExportError;

/// Writer for `uidmap.csv` (header `email,paper,uid`), the sole reverse
/// lookup for tokens.
///
/// Rows are flushed as they are written so every token is on disk before
/// the message carrying it leaves the process.
pub struct AuditWriter {
    inner: csv::Writer<File>,
}

impl AuditWriter {
    /// Create the mapping file and write the header row.
    pub fn create(path: &Path) -> Result<Self, ExportError> {
        let file = File::create(path).map_err(|source| ExportError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut inner = csv::Writer::from_writer(file);
        inner.write_record(["email", "paper", "uid"])?;
        inner.flush()?;
        Ok(Self { inner })
    }

    /// Append one token row and flush it to disk.
    pub fn record(&mut self, reviewer: &str, paper: &str, uid: &str) -> Result<(), ExportError> {
        self.inner.write_record([reviewer, paper, uid])?;
        self.inner.flush()?;
        Ok(())
    }
}
