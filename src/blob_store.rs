use std::{
    io::{Read, Write},
    path::{Path, PathBuf},
};

use flate2::{Compression, read::ZlibDecoder, write::ZlibEncoder};

use crate::{
    entry_id::EntryId,
    error::{Error, Result},
};

/// Durable content-addressed byte storage keyed by entry id.
///
/// Keys arrive as [`EntryId`], already validated, so an id can never
/// escape the store directory. Overwrites are permitted at this layer;
/// dedup is the facade's job.
pub trait BlobStore {
    fn contains(&self, id: &EntryId) -> bool;
    fn read(&self, id: &EntryId) -> Result<Vec<u8>>;
    fn write(&self, id: &EntryId, content: &[u8]) -> Result<()>;

    /// Seal a blob against further writes.
    ///
    /// Currently a no-op: this is the seam where write-once enforcement
    /// (permission drop or a sealed flag) would live.
    fn mark_read_only(&self, id: &EntryId) -> Result<()>;
}

/// Plain filesystem store: one file per blob, named by its entry id.
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    fn blob_path(&self, id: &EntryId) -> PathBuf {
        self.root.join(id.as_str())
    }
}

impl BlobStore for FsBlobStore {
    fn contains(&self, id: &EntryId) -> bool {
        self.blob_path(id).is_file()
    }

    fn read(&self, id: &EntryId) -> Result<Vec<u8>> {
        std::fs::read(self.blob_path(id)).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::NotFound {
                    id: id.to_string(),
                }
            } else {
                Error::Io(e)
            }
        })
    }

    fn write(&self, id: &EntryId, content: &[u8]) -> Result<()> {
        std::fs::write(self.blob_path(id), content)?;
        Ok(())
    }

    fn mark_read_only(&self, _id: &EntryId) -> Result<()> {
        Ok(())
    }
}

/// Decorator that zlib-compresses payloads on write and decompresses on
/// read. Same key space and error semantics as the wrapped store.
pub struct CompressedBlobStore<S> {
    inner: S,
}

impl<S: BlobStore> CompressedBlobStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: BlobStore> BlobStore for CompressedBlobStore<S> {
    fn contains(&self, id: &EntryId) -> bool {
        self.inner.contains(id)
    }

    fn read(&self, id: &EntryId) -> Result<Vec<u8>> {
        let compressed = self.inner.read(id)?;
        let mut decoder = ZlibDecoder::new(compressed.as_slice());
        let mut payload = Vec::new();
        decoder.read_to_end(&mut payload)?;
        Ok(payload)
    }

    fn write(&self, id: &EntryId, content: &[u8]) -> Result<()> {
        let mut encoder =
            ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(content)?;
        self.inner.write(id, &encoder.finish()?)
    }

    fn mark_read_only(&self, id: &EntryId) -> Result<()> {
        self.inner.mark_read_only(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> (tempfile::TempDir, FsBlobStore) {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsBlobStore::new(tmp.path());
        (tmp, store)
    }

    fn id(content: &[u8]) -> EntryId {
        EntryId::from_content(content)
    }

    #[test]
    fn write_then_read() {
        let (_tmp, store) = test_store();
        let id = id(b"payload");

        assert!(!store.contains(&id));
        store.write(&id, b"payload").unwrap();
        assert!(store.contains(&id));
        assert_eq!(store.read(&id).unwrap(), b"payload");
    }

    #[test]
    fn read_missing_is_not_found() {
        let (_tmp, store) = test_store();
        match store.read(&id(b"missing")) {
            Err(Error::NotFound { .. }) => {}
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn mark_read_only_is_a_noop() {
        let (_tmp, store) = test_store();
        let id = id(b"sealed");
        store.write(&id, b"sealed").unwrap();
        store.mark_read_only(&id).unwrap();
        store.write(&id, b"sealed again").unwrap();
    }

    #[test]
    fn compressed_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CompressedBlobStore::new(FsBlobStore::new(tmp.path()));

        for payload in
            [&b""[..], &b"x"[..], &b"example content"[..], &[0u8; 4096][..]]
        {
            let id = EntryId::from_content(payload);
            store.write(&id, payload).unwrap();
            assert!(store.contains(&id));
            assert_eq!(store.read(&id).unwrap(), payload);
        }
    }

    #[test]
    fn compressed_bytes_differ_on_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CompressedBlobStore::new(FsBlobStore::new(tmp.path()));
        let payload = vec![b'a'; 1024];
        let id = EntryId::from_content(&payload);

        store.write(&id, &payload).unwrap();
        let raw = std::fs::read(tmp.path().join(id.as_str())).unwrap();
        assert_ne!(raw, payload);
        assert!(raw.len() < payload.len());
    }
}
