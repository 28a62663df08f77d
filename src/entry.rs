use serde::Serialize;

use crate::{
    entry_id::EntryId,
    error::{Error, Result},
};

/// Separates fields within one serialized record.
pub const FIELD_SEP: char = '|';

/// Terminates one serialized record.
pub const RECORD_SEP: char = '\n';

/// Whether raw content was supplied when the entry was indexed.
///
/// `Present` entries have a blob stored under their id; `Absent` entries
/// are reference-only and carry at most an opaque handle in `extra`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntryType {
    #[serde(rename = "P")]
    Present,
    #[serde(rename = "A")]
    Absent,
}

impl EntryType {
    pub fn code(self) -> char {
        match self {
            Self::Present => 'P',
            Self::Absent => 'A',
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "P" => Some(Self::Present),
            "A" => Some(Self::Absent),
            _ => None,
        }
    }
}

/// One indexed document's metadata record.
///
/// Serialized as `type|entry_id|filename|keywords|extra` followed by a
/// newline. The free-text fields are sanitized before construction so a
/// record can never contain a separator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    pub entry_type: EntryType,
    pub entry_id: EntryId,
    pub filename: String,
    pub keywords: String,
    pub extra: String,
}

/// Replace every reserved separator with a single space and trim.
///
/// Lossy on purpose: user-supplied text must not be able to forge a
/// field or record boundary.
pub fn sanitize(text: &str) -> String {
    text.replace([FIELD_SEP, RECORD_SEP], " ").trim().to_string()
}

impl IndexEntry {
    /// Build an entry from raw user input.
    ///
    /// Free-text fields are sanitized first; the id is then derived
    /// from the content bytes when present, otherwise from the
    /// sanitized metadata triple. An empty content slice means
    /// reference-only: no content, no blob.
    pub fn from_parts(
        filename: &str,
        keywords: &str,
        content: &[u8],
        extra: &str,
    ) -> Self {
        let filename = sanitize(filename);
        let keywords = sanitize(keywords);
        let extra = sanitize(extra);

        let (entry_type, entry_id) = if content.is_empty() {
            (
                EntryType::Absent,
                EntryId::from_metadata(&filename, &keywords, &extra),
            )
        } else {
            (EntryType::Present, EntryId::from_content(content))
        };

        Self {
            entry_type,
            entry_id,
            filename,
            keywords,
            extra,
        }
    }

    /// Serialize to one record line, including the terminator.
    pub fn encode(&self) -> String {
        format!(
            "{t}{s}{id}{s}{f}{s}{k}{s}{e}{r}",
            t = self.entry_type.code(),
            s = FIELD_SEP,
            id = self.entry_id,
            f = self.filename,
            k = self.keywords,
            e = self.extra,
            r = RECORD_SEP,
        )
    }

    /// Decode one record line (with or without its terminator).
    pub fn decode(line: &str) -> Result<Self> {
        let corrupt = || Error::Corrupt {
            line: line.to_string(),
        };

        let trimmed = line.strip_suffix(RECORD_SEP).unwrap_or(line);
        let mut parts = trimmed.splitn(5, FIELD_SEP);

        let entry_type = parts
            .next()
            .and_then(EntryType::from_code)
            .ok_or_else(&corrupt)?;
        let entry_id = parts
            .next()
            .and_then(|id| EntryId::parse(id).ok())
            .ok_or_else(&corrupt)?;
        let filename = parts.next().ok_or_else(&corrupt)?.to_string();
        let keywords = parts.next().ok_or_else(&corrupt)?.to_string();
        let extra = parts.next().ok_or_else(&corrupt)?.to_string();

        Ok(Self {
            entry_type,
            entry_id,
            filename,
            keywords,
            extra,
        })
    }
}
