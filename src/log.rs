use std::{
    fs::{File, OpenOptions},
    io::Write,
    path::Path,
};

use crate::error::Result;

/// Fixed name of the metadata log inside an index directory.
pub const METADATA_FILENAME: &str = ".metadata.txt";

/// Append-only log of serialized entry records.
///
/// The log is the single source of truth for the index: the in-memory
/// structures of both search strategies are derived views rebuilt from
/// it on open. The file handle is opened once in append mode and held
/// for the lifetime of the strategy; every append is flushed before the
/// caller is acknowledged, so a flushed record is durable and an
/// unflushed one was never committed.
pub struct MetadataLog {
    file: File,
}

impl MetadataLog {
    /// Open the log at `path`, creating it empty if missing.
    ///
    /// Returns the handle plus the full existing contents so the caller
    /// can replay the records into its in-memory view.
    pub fn open(path: &Path) -> Result<(Self, String)> {
        if !path.exists() {
            File::create(path)?;
        }
        let contents = std::fs::read_to_string(path)?;
        let file = OpenOptions::new().append(true).open(path)?;
        Ok((Self { file }, contents))
    }

    /// Append one serialized record and flush it to disk.
    pub fn append(&mut self, record: &str) -> Result<()> {
        self.file.write_all(record.as_bytes())?;
        self.file.flush()?;
        Ok(())
    }

    /// Flush and release the file handle.
    pub fn close(mut self) -> Result<()> {
        self.file.flush()?;
        Ok(())
    }
}
