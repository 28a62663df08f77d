//! findex - a content-addressed file index with pluggable search
//! strategies.
//!
//! findex stores opaque binary documents by their SHA-256 digest and
//! indexes them by filename and free-text keywords in an append-only
//! metadata log. Queries run either as a literal substring scan over
//! the raw log or through an in-memory inverted index with AND
//! semantics; both views are rebuilt from the log on open. Blobs can
//! optionally pass through a transparent zlib compression layer.
//!
//! # Quick start
//!
//! ```
//! # let tmp = tempfile::tempdir().unwrap();
//! use findex::{Index, IndexOptions};
//!
//! let mut index = Index::open(tmp.path(), IndexOptions::default()).unwrap();
//! let entry = index
//!     .add_entry("notes.txt", "meeting notes", b"the minutes", "")
//!     .unwrap();
//!
//! let hits = index.search("meeting").unwrap();
//! assert_eq!(hits[0].entry_id, entry.entry_id);
//!
//! let content = index.get_file(entry.entry_id.as_str()).unwrap();
//! assert_eq!(content, b"the minutes");
//! index.close().unwrap();
//! ```

pub mod blob_store;
pub mod data_dir;
pub mod engine;
pub mod entry;
pub mod entry_id;
pub mod error;
pub mod index;
pub mod inverted;
pub mod linear;
pub mod log;
pub mod tokenize;

pub use blob_store::{BlobStore, CompressedBlobStore, FsBlobStore};
pub use data_dir::DataDir;
pub use engine::Strategy;
pub use entry::{EntryType, IndexEntry};
pub use entry_id::EntryId;
pub use error::{Error, Result};
pub use index::{Index, IndexOptions};
