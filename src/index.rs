use std::path::Path;

use tracing::info;

use crate::{
    blob_store::{BlobStore, CompressedBlobStore, FsBlobStore},
    engine::{Engine, Strategy},
    entry::IndexEntry,
    entry_id::EntryId,
    error::Result,
    log::METADATA_FILENAME,
};

/// Construction parameters for an [`Index`].
///
/// Both choices are fixed for the lifetime of an index directory:
/// reopening with a different strategy is safe (the log format is
/// shared), but reopening with a different compression setting is
/// undefined — existing blobs would be read through the wrong layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexOptions {
    pub strategy: Strategy,
    pub compression: bool,
}

/// The single entry point to the document index.
///
/// Owns the configured search strategy and blob store, validates
/// identifiers before they reach storage, and forwards everything else.
/// `close` consumes the index; there is no way to use one afterwards.
pub struct Index {
    engine: Engine,
    store: Box<dyn BlobStore>,
}

impl Index {
    /// Open or create an index rooted at `dir`.
    ///
    /// The directory holds the metadata log plus one file per stored
    /// blob, named by entry id.
    pub fn open(dir: &Path, options: IndexOptions) -> Result<Self> {
        std::fs::create_dir_all(dir)?;

        let store: Box<dyn BlobStore> = if options.compression {
            Box::new(CompressedBlobStore::new(FsBlobStore::new(dir)))
        } else {
            Box::new(FsBlobStore::new(dir))
        };
        let engine =
            Engine::open(&dir.join(METADATA_FILENAME), options.strategy)?;

        info!(
            dir = %dir.display(),
            strategy = %options.strategy,
            compression = options.compression,
            entries = engine.entry_count(),
            "opened index"
        );

        Ok(Self { engine, store })
    }

    /// Index a document.
    ///
    /// With content, the entry id is the content digest and the bytes
    /// are stored as a blob; with empty content, the entry is
    /// reference-only and the id derives from the sanitized metadata.
    /// Fails with `AlreadyExists` when the id already denotes a stored
    /// entry.
    pub fn add_entry(
        &mut self,
        filename: &str,
        keywords: &str,
        content: &[u8],
        extra: &str,
    ) -> Result<IndexEntry> {
        self.engine
            .add_entry(self.store.as_ref(), filename, keywords, content, extra)
    }

    /// Query the active strategy. An empty query yields an empty
    /// result, never an error.
    pub fn search(&self, query: &str) -> Result<Vec<IndexEntry>> {
        self.engine.search(query)
    }

    /// Fetch the stored blob for an entry.
    ///
    /// The id is validated before any filesystem access; a malformed
    /// id fails with `InvalidIdentifier`, a valid id with no blob with
    /// `NotFound`.
    pub fn get_file(&self, entry_id: &str) -> Result<Vec<u8>> {
        let id = EntryId::parse(entry_id)?;
        self.store.read(&id)
    }

    pub fn strategy(&self) -> Strategy {
        self.engine.strategy()
    }

    pub fn entry_count(&self) -> usize {
        self.engine.entry_count()
    }

    /// Flush and release the metadata log.
    pub fn close(self) -> Result<()> {
        self.engine.close()
    }
}

impl std::fmt::Debug for Index {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Index")
            .field("strategy", &self.engine.strategy())
            .finish_non_exhaustive()
    }
}
