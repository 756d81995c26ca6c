//! Corpus export records and the JSON loader.
//!
//! The linguistic dataset is flattened by an external exporter into a JSON
//! array of [`CorpusRecord`]s, one per clause. Only identity, placement, and
//! the original mother are required; everything else is descriptive.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use mog_types::NodeKind;

use crate::error::{CorpusError, CorpusResult};

/// One clause as exported from the source dataset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusRecord {
    pub id: u64,
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    /// Original mother identity, absent for base roots.
    #[serde(default)]
    pub mother: Option<u64>,
    /// First word slot. Defaults to the node identity.
    #[serde(default)]
    pub slots_start: Option<u64>,
    /// Last word slot. Defaults to `slots_start`.
    #[serde(default)]
    pub slots_end: Option<u64>,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub kind: NodeKind,
    #[serde(default)]
    pub typ: Option<String>,
    #[serde(default)]
    pub rela: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub txt: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub instruction: Option<String>,
    #[serde(default)]
    pub core_functions: Vec<String>,
}

impl CorpusRecord {
    /// A bare clause record with no descriptive metadata.
    pub fn clause(
        id: u64,
        book: impl Into<String>,
        chapter: u32,
        verse: u32,
        mother: Option<u64>,
    ) -> Self {
        Self {
            id,
            book: book.into(),
            chapter,
            verse,
            mother,
            slots_start: None,
            slots_end: None,
            label: String::new(),
            kind: NodeKind::Clause,
            typ: None,
            rela: None,
            code: None,
            txt: None,
            domain: None,
            instruction: None,
            core_functions: Vec::new(),
        }
    }

    /// Override the node kind.
    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    /// Override the slot span.
    pub fn with_slots(mut self, start: u64, end: u64) -> Self {
        self.slots_start = Some(start);
        self.slots_end = Some(end);
        self
    }

    /// Effective textual start key.
    pub fn start_slot(&self) -> u64 {
        self.slots_start.unwrap_or(self.id)
    }

    /// Effective textual end key.
    pub fn end_slot(&self) -> u64 {
        self.slots_end.unwrap_or_else(|| self.start_slot())
    }
}

/// Read a JSON array of records from disk.
pub fn load_records(path: impl AsRef<Path>) -> CorpusResult<Vec<CorpusRecord>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let records: Vec<CorpusRecord> =
        serde_json::from_reader(reader).map_err(|e| CorpusError::Parse(e.to_string()))?;
    info!(path = %path.display(), records = records.len(), "read corpus export");
    Ok(records)
}

/// `genesis` / `1_Samuel` -> `Genesis` / `1 Samuel`.
pub(crate) fn display_book(book: &str) -> String {
    book.replace('_', " ")
        .split(' ')
        .map(title_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Per-verse segment suffix: `a`..`z`, then the 1-based ordinal.
pub(crate) fn segment_suffix(index: usize) -> String {
    if index < 26 {
        char::from(b'a' + index as u8).to_string()
    } else {
        (index + 1).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn minimal_json_record_uses_defaults() {
        let json = r#"[{"id": 10, "book": "Genesis", "chapter": 1, "verse": 1}]"#;
        let records: Vec<CorpusRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.mother, None);
        assert_eq!(r.kind, NodeKind::Clause);
        assert_eq!(r.start_slot(), 10);
        assert_eq!(r.end_slot(), 10);
    }

    #[test]
    fn load_records_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 1, "book": "Genesis", "chapter": 1, "verse": 1}},
                {{"id": 2, "book": "Genesis", "chapter": 1, "verse": 1, "mother": 1,
                  "kind": "clause", "typ": "WayX", "core_functions": ["Pred"]}}]"#
        )
        .unwrap();
        let records = load_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].mother, Some(1));
        assert_eq!(records[1].typ.as_deref(), Some("WayX"));
    }

    #[test]
    fn load_records_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        assert!(matches!(load_records(file.path()), Err(CorpusError::Parse(_))));
    }

    #[test]
    fn load_records_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        assert!(matches!(load_records(missing), Err(CorpusError::Io(_))));
    }

    #[test]
    fn book_display_and_suffix() {
        assert_eq!(display_book("1_samuel"), "1 Samuel");
        assert_eq!(display_book("Genesis"), "Genesis");
        assert_eq!(segment_suffix(0), "a");
        assert_eq!(segment_suffix(25), "z");
        assert_eq!(segment_suffix(26), "27");
    }
}
