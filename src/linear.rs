use std::path::Path;

use tracing::debug;

use crate::{
    blob_store::BlobStore,
    entry::{IndexEntry, RECORD_SEP, sanitize},
    error::{Error, Result},
    log::MetadataLog,
};

/// Substring search strategy.
///
/// Keeps the raw log content buffered in memory and answers queries by
/// literal substring scan over the serialized records, so a query can
/// match across field boundaries, not just whole tokens. Appends go to
/// both the buffer and the file.
pub struct LinearSearch {
    log: MetadataLog,
    buffer: String,
}

impl LinearSearch {
    pub fn open(meta_path: &Path) -> Result<Self> {
        let (log, buffer) = MetadataLog::open(meta_path)?;
        Ok(Self { log, buffer })
    }

    /// Scan the buffer for literal occurrences of the sanitized query.
    ///
    /// Each hit is widened to its enclosing record; scanning resumes
    /// past that record, so one record is reported at most once even if
    /// the query occurs in it several times. Results follow log order.
    pub fn search(&self, query: &str) -> Result<Vec<IndexEntry>> {
        let needle = sanitize(query);
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let buf = self.buffer.as_str();
        let mut results = Vec::new();
        let mut pos = 0;

        while let Some(offset) = buf[pos..].find(&needle) {
            let hit = pos + offset;
            let start = match buf[..hit].rfind(RECORD_SEP) {
                Some(i) => i + 1,
                None => 0,
            };
            let end = match buf[hit..].find(RECORD_SEP) {
                Some(i) => hit + i,
                None => buf.len(),
            };

            let entry = IndexEntry::decode(&buf[start..end])?;
            debug!(entry_id = %entry.entry_id, "substring search hit");
            results.push(entry);

            pos = (end + 1).min(buf.len());
        }

        Ok(results)
    }

    /// Index a new entry.
    ///
    /// Dedup here is a blob-existence check, which never fires for
    /// reference-only entries (no blob is written for them). The
    /// inverted strategy differs on this point; see its `add_entry`.
    pub fn add_entry(
        &mut self,
        store: &dyn BlobStore,
        filename: &str,
        keywords: &str,
        content: &[u8],
        extra: &str,
    ) -> Result<IndexEntry> {
        let entry = IndexEntry::from_parts(filename, keywords, content, extra);
        if store.contains(&entry.entry_id) {
            return Err(Error::AlreadyExists {
                id: entry.entry_id.to_string(),
            });
        }

        let record = entry.encode();
        self.buffer.push_str(&record);
        self.log.append(&record)?;

        if !content.is_empty() {
            store.write(&entry.entry_id, content)?;
            store.mark_read_only(&entry.entry_id)?;
        }

        Ok(entry)
    }

    pub fn entry_count(&self) -> usize {
        self.buffer.lines().count()
    }

    pub fn close(self) -> Result<()> {
        self.log.close()
    }
}
