use std::path::Path;

use crate::{
    blob_store::BlobStore,
    entry::IndexEntry,
    error::Result,
    inverted::InvertedSearch,
    linear::LinearSearch,
};

/// Which search strategy backs an index.
///
/// A construction-time choice, fixed for the lifetime of an index
/// directory: the two strategies share the log format but differ in
/// query algorithm, result order and dedup behavior for reference-only
/// entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    #[default]
    Linear,
    Inverted,
}

/// The closed set of search strategies behind one contract.
pub enum Engine {
    Linear(LinearSearch),
    Inverted(InvertedSearch),
}

impl Engine {
    pub fn open(meta_path: &Path, strategy: Strategy) -> Result<Self> {
        Ok(match strategy {
            Strategy::Linear => Self::Linear(LinearSearch::open(meta_path)?),
            Strategy::Inverted => {
                Self::Inverted(InvertedSearch::open(meta_path)?)
            }
        })
    }

    pub fn strategy(&self) -> Strategy {
        match self {
            Self::Linear(_) => Strategy::Linear,
            Self::Inverted(_) => Strategy::Inverted,
        }
    }

    pub fn add_entry(
        &mut self,
        store: &dyn BlobStore,
        filename: &str,
        keywords: &str,
        content: &[u8],
        extra: &str,
    ) -> Result<IndexEntry> {
        match self {
            Self::Linear(engine) => {
                engine.add_entry(store, filename, keywords, content, extra)
            }
            Self::Inverted(engine) => {
                engine.add_entry(store, filename, keywords, content, extra)
            }
        }
    }

    pub fn search(&self, query: &str) -> Result<Vec<IndexEntry>> {
        match self {
            Self::Linear(engine) => engine.search(query),
            Self::Inverted(engine) => Ok(engine.search(query)),
        }
    }

    pub fn entry_count(&self) -> usize {
        match self {
            Self::Linear(engine) => engine.entry_count(),
            Self::Inverted(engine) => engine.entry_count(),
        }
    }

    pub fn close(self) -> Result<()> {
        match self {
            Self::Linear(engine) => engine.close(),
            Self::Inverted(engine) => engine.close(),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Linear => f.write_str("linear"),
            Self::Inverted => f.write_str("inverted"),
        }
    }
}
