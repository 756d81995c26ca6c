//! Scope descriptors and the container index.
//!
//! A scope names a contiguous run of containers: a whole book, a chapter, a
//! single verse, or a verse range within a chapter. [`ContainerIndex`] maps
//! every container to its nodes in a `BTreeMap`, so answering a scope costs a
//! range seek plus the size of the answer, never a corpus scan.
//!
//! Grammar: `<book>[.<chapter>[.<verse>[-<verse>]]]`, e.g. `Gen`, `Gen.1`,
//! `Gen.1.4`, `Gen.1.1-3`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use mog_types::{ContainerId, NodeId};

use crate::books::BookTable;
use crate::error::{CorpusError, CorpusResult};
use crate::traits::CorpusIndex;

/// Parsed, not yet resolved, scope descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopeDescriptor {
    /// Book token as typed; resolved against a [`BookTable`].
    pub book: String,
    pub chapter: Option<u32>,
    /// Inclusive verse range within `chapter`.
    pub verses: Option<(u32, u32)>,
}

impl FromStr for ScopeDescriptor {
    type Err = CorpusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CorpusError::InvalidScope("empty scope".into()));
        }

        let mut parts = s.splitn(3, '.');
        let book = parts.next().unwrap_or_default().trim().to_string();
        if book.is_empty() {
            return Err(CorpusError::InvalidScope(format!("missing book in '{s}'")));
        }

        let chapter = match parts.next().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_number(raw, "chapter")?),
        };

        let verses = match parts.next().map(str::trim) {
            None | Some("") => None,
            Some(raw) => {
                if chapter.is_none() {
                    return Err(CorpusError::InvalidScope(format!(
                        "verse given without chapter in '{s}'"
                    )));
                }
                let (start, end) = match raw.split_once('-') {
                    Some((a, b)) => (parse_number(a, "verse")?, parse_number(b, "verse")?),
                    None => {
                        let v = parse_number(raw, "verse")?;
                        (v, v)
                    }
                };
                if end < start {
                    return Err(CorpusError::InvalidScope(format!(
                        "verse range {start}-{end} is reversed"
                    )));
                }
                Some((start, end))
            }
        };

        Ok(Self {
            book,
            chapter,
            verses,
        })
    }
}

impl fmt::Display for ScopeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.book)?;
        if let Some(chapter) = self.chapter {
            write!(f, ".{chapter}")?;
        }
        match self.verses {
            Some((a, b)) if a == b => write!(f, ".{a}"),
            Some((a, b)) => write!(f, ".{a}-{b}"),
            None => Ok(()),
        }
    }
}

fn parse_number(raw: &str, what: &str) -> CorpusResult<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| CorpusError::InvalidScope(format!("invalid {what}: '{raw}'")))
}

/// Inclusive range of containers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScopeRange {
    pub start: ContainerId,
    pub end: ContainerId,
}

impl ScopeRange {
    pub fn new(start: ContainerId, end: ContainerId) -> Self {
        Self { start, end }
    }
}

/// Container → nodes index, built once from the corpus.
#[derive(Clone, Debug, Default)]
pub struct ContainerIndex {
    by_container: BTreeMap<ContainerId, Vec<NodeId>>,
    books: BookTable,
}

impl ContainerIndex {
    /// Group every corpus node by container. Node lists keep textual order.
    pub fn build(corpus: &dyn CorpusIndex) -> Self {
        let mut by_container: BTreeMap<ContainerId, Vec<NodeId>> = BTreeMap::new();
        for node in corpus.all_nodes() {
            by_container.entry(node.container).or_default().push(node.id);
        }
        debug!(containers = by_container.len(), "container index built");
        Self {
            by_container,
            books: BookTable::new(corpus.book_names().to_vec()),
        }
    }

    /// Number of non-empty containers.
    pub fn len(&self) -> usize {
        self.by_container.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_container.is_empty()
    }

    pub fn books(&self) -> &BookTable {
        &self.books
    }

    /// Resolve a descriptor against the book table.
    pub fn resolve(&self, scope: &ScopeDescriptor) -> CorpusResult<ScopeRange> {
        let book = self
            .books
            .resolve(&scope.book)
            .ok_or_else(|| CorpusError::UnknownBook(scope.book.clone()))?;
        let range = match (scope.chapter, scope.verses) {
            (None, _) => ScopeRange::new(ContainerId::book_start(book), ContainerId::book_end(book)),
            (Some(chapter), None) => ScopeRange::new(
                ContainerId::chapter_start(book, chapter),
                ContainerId::chapter_end(book, chapter),
            ),
            (Some(chapter), Some((start, end))) => ScopeRange::new(
                ContainerId::new(book, chapter, start),
                ContainerId::new(book, chapter, end),
            ),
        };
        Ok(range)
    }

    /// Parse and resolve a textual scope in one step.
    pub fn resolve_str(&self, scope: &str) -> CorpusResult<ScopeRange> {
        self.resolve(&scope.parse()?)
    }

    /// Nodes of every container in the range, in textual order.
    pub fn nodes_in(&self, range: &ScopeRange) -> Vec<NodeId> {
        if range.start > range.end {
            return Vec::new();
        }
        self.by_container
            .range(range.start..=range.end)
            .flat_map(|(_, ids)| ids.iter().copied())
            .collect()
    }

    /// The first `count` containers of the corpus as a range.
    ///
    /// Returns `None` for an empty corpus or a zero count.
    pub fn leading_window(&self, count: usize) -> Option<ScopeRange> {
        let mut keys = self.by_container.keys().take(count);
        let first = *keys.next()?;
        let last = keys.last().copied().unwrap_or(first);
        Some(ScopeRange::new(first, last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryCorpus;
    use crate::record::CorpusRecord;

    fn corpus() -> InMemoryCorpus {
        let mut records = Vec::new();
        let mut id = 1;
        for chapter in 1..=2 {
            for verse in 1..=4 {
                for _ in 0..2 {
                    records.push(CorpusRecord::clause(id, "Genesis", chapter, verse, None));
                    id += 1;
                }
            }
        }
        records.push(CorpusRecord::clause(100, "Exodus", 1, 1, None));
        InMemoryCorpus::from_records(records).unwrap()
    }

    fn ids(raw: &[u64]) -> Vec<NodeId> {
        raw.iter().copied().map(NodeId::new).collect()
    }

    #[test]
    fn parse_descriptors() {
        let d: ScopeDescriptor = "Gen.1.1-3".parse().unwrap();
        assert_eq!(d.book, "Gen");
        assert_eq!(d.chapter, Some(1));
        assert_eq!(d.verses, Some((1, 3)));

        let d: ScopeDescriptor = "Gen.1.4".parse().unwrap();
        assert_eq!(d.verses, Some((4, 4)));
        assert_eq!(d.to_string(), "Gen.1.4");

        let d: ScopeDescriptor = "Exodus".parse().unwrap();
        assert_eq!(d.chapter, None);
        assert_eq!(d.verses, None);

        let d: ScopeDescriptor = "Gen.2.".parse().unwrap();
        assert_eq!(d.chapter, Some(2));
        assert_eq!(d.verses, None);
    }

    #[test]
    fn parse_rejects_malformed_descriptors() {
        for bad in ["", "  ", ".1", "Gen.x", "Gen.1.y", "Gen.1.3-1", "Gen..3", "Gen.1.2-z"] {
            let result = bad.parse::<ScopeDescriptor>();
            assert!(
                matches!(result, Err(CorpusError::InvalidScope(_))),
                "expected InvalidScope for {bad:?}, got {result:?}"
            );
        }
    }

    #[test]
    fn verse_range_returns_only_those_verses() {
        let index = ContainerIndex::build(&corpus());
        let range = index.resolve_str("Gen.1.2-3").unwrap();
        assert_eq!(index.nodes_in(&range), ids(&[3, 4, 5, 6]));
    }

    #[test]
    fn chapter_and_book_ranges() {
        let index = ContainerIndex::build(&corpus());
        let chapter = index.resolve_str("gen.2").unwrap();
        assert_eq!(index.nodes_in(&chapter), ids(&[9, 10, 11, 12, 13, 14, 15, 16]));
        let book = index.resolve_str("Exo").unwrap();
        assert_eq!(index.nodes_in(&book), ids(&[100]));
    }

    #[test]
    fn unknown_book_is_reported() {
        let index = ContainerIndex::build(&corpus());
        assert!(matches!(
            index.resolve_str("Lev.1"),
            Err(CorpusError::UnknownBook(b)) if b == "Lev"
        ));
    }

    #[test]
    fn missing_verses_yield_empty_results() {
        let index = ContainerIndex::build(&corpus());
        let range = index.resolve_str("Gen.9.1-5").unwrap();
        assert!(index.nodes_in(&range).is_empty());
    }

    #[test]
    fn leading_window_covers_first_containers() {
        let index = ContainerIndex::build(&corpus());
        let window = index.leading_window(3).unwrap();
        assert_eq!(window.start, ContainerId::new(0, 1, 1));
        assert_eq!(window.end, ContainerId::new(0, 1, 3));
        assert_eq!(index.nodes_in(&window), ids(&[1, 2, 3, 4, 5, 6]));
        assert!(index.leading_window(0).is_none());
        assert!(ContainerIndex::default().leading_window(3).is_none());
    }

    #[test]
    fn single_container_lookup() {
        let index = ContainerIndex::build(&corpus());
        assert_eq!(index.len(), 9);
        let verse = ScopeRange::new(ContainerId::new(0, 1, 4), ContainerId::new(0, 1, 4));
        assert_eq!(index.nodes_in(&verse), ids(&[7, 8]));
        let absent = ScopeRange::new(ContainerId::new(0, 7, 7), ContainerId::new(0, 7, 7));
        assert!(index.nodes_in(&absent).is_empty());
    }
}
