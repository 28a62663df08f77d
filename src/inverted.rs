use std::{
    collections::{HashMap, HashSet},
    path::Path,
};

use tracing::debug;

use crate::{
    blob_store::BlobStore,
    entry::{IndexEntry, sanitize},
    entry_id::EntryId,
    error::{Error, Result},
    log::MetadataLog,
    tokenize::split_tokens,
};

/// Inverted-index search strategy.
///
/// On open, every record is replayed from the log and its filename and
/// keywords are tokenized into a token -> entry-id posting structure.
/// Queries intersect the posting sets of their tokens (logical AND);
/// result order is unspecified.
pub struct InvertedSearch {
    log: MetadataLog,
    entries: HashMap<EntryId, IndexEntry>,
    postings: HashMap<String, Vec<EntryId>>,
}

impl InvertedSearch {
    pub fn open(meta_path: &Path) -> Result<Self> {
        let (log, contents) = MetadataLog::open(meta_path)?;
        let mut index = Self {
            log,
            entries: HashMap::new(),
            postings: HashMap::new(),
        };
        for line in contents.lines() {
            let entry = IndexEntry::decode(line)?;
            index.insert_postings(entry);
        }
        debug!(entries = index.entries.len(), "replayed metadata log");
        Ok(index)
    }

    /// Record an entry in the id map and posting lists.
    ///
    /// A token appearing in both filename and keywords is pushed twice;
    /// posting lists are collapsed to sets at query time.
    fn insert_postings(&mut self, entry: IndexEntry) {
        for token in split_tokens(&entry.filename)
            .into_iter()
            .chain(split_tokens(&entry.keywords))
        {
            self.postings
                .entry(token.to_string())
                .or_default()
                .push(entry.entry_id.clone());
        }
        self.entries.insert(entry.entry_id.clone(), entry);
    }

    /// Intersect the posting sets of the query's tokens.
    pub fn search(&self, query: &str) -> Vec<IndexEntry> {
        let query = sanitize(query);
        let mut acc: HashSet<&EntryId> = HashSet::new();

        for (i, token) in split_tokens(&query).iter().enumerate() {
            let ids: HashSet<&EntryId> = self
                .postings
                .get(*token)
                .map(|ids| ids.iter().collect())
                .unwrap_or_default();
            if i == 0 {
                acc = ids;
            } else {
                acc = acc.intersection(&ids).copied().collect();
            }
            if acc.is_empty() {
                break;
            }
        }

        acc.into_iter()
            .filter_map(|id| self.entries.get(id).cloned())
            .collect()
    }

    /// Index a new entry.
    ///
    /// Dedup here checks the in-memory id map, so duplicate
    /// reference-only entries are rejected too, unlike the linear
    /// strategy's blob-existence check.
    pub fn add_entry(
        &mut self,
        store: &dyn BlobStore,
        filename: &str,
        keywords: &str,
        content: &[u8],
        extra: &str,
    ) -> Result<IndexEntry> {
        let entry = IndexEntry::from_parts(filename, keywords, content, extra);
        if self.entries.contains_key(&entry.entry_id) {
            return Err(Error::AlreadyExists {
                id: entry.entry_id.to_string(),
            });
        }

        self.insert_postings(entry.clone());
        self.log.append(&entry.encode())?;

        if !content.is_empty() {
            store.write(&entry.entry_id, content)?;
            store.mark_read_only(&entry.entry_id)?;
        }

        Ok(entry)
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn close(self) -> Result<()> {
        self.log.close()
    }
}
