use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::{
    entry::{FIELD_SEP, RECORD_SEP},
    error::{Error, Result},
};

/// Number of hex characters in an entry id (SHA-256).
pub const ENTRY_ID_LEN: usize = 64;

/// A content-derived entry identifier: 64 lowercase hex characters.
///
/// The id doubles as the blob filename, so every externally supplied id
/// must go through [`EntryId::parse`] before it touches storage — a
/// malformed id is rejected up front rather than turned into a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Derive the id for a content-bearing entry: SHA-256 of the raw
    /// bytes, so identical content always maps to the same id.
    pub fn from_content(content: &[u8]) -> Self {
        Self(hex_digest(Sha256::digest(content).as_slice()))
    }

    /// Derive the id for a reference-only entry from its sanitized
    /// metadata: SHA-256 of the serialized `filename|keywords|extra`
    /// triple (with the record terminator included).
    pub fn from_metadata(filename: &str, keywords: &str, extra: &str) -> Self {
        let serialized = format!(
            "{filename}{FIELD_SEP}{keywords}{FIELD_SEP}{extra}{RECORD_SEP}"
        );
        Self(hex_digest(Sha256::digest(serialized.as_bytes()).as_slice()))
    }

    /// Validate an externally supplied id string.
    pub fn parse(id: &str) -> Result<Self> {
        let valid = id.len() == ENTRY_ID_LEN
            && id
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if !valid {
            return Err(Error::InvalidIdentifier { id: id.to_string() });
        }
        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn hex_digest(bytes: &[u8]) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{b:02x}");
    }
    out
}
