use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::info;

use mog_types::{ClauseNode, ContainerId, NodeId};

use crate::error::{CorpusError, CorpusResult};
use crate::record::{display_book, load_records, segment_suffix, CorpusRecord};
use crate::traits::CorpusIndex;

/// In-memory corpus built once from exported records.
///
/// Nodes are held in textual order with a position index keyed by identity.
/// Construction validates the export (unique identities, no dangling
/// mothers) and derives book ordinals, container labels, and per-verse
/// references.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCorpus {
    nodes: Vec<ClauseNode>,
    positions: HashMap<NodeId, usize>,
    books: Vec<String>,
}

impl InMemoryCorpus {
    /// Build a corpus from records in any order.
    pub fn from_records(mut records: Vec<CorpusRecord>) -> CorpusResult<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(CorpusError::DuplicateNode(NodeId::new(record.id)));
            }
        }
        for record in &records {
            if let Some(mother) = record.mother {
                if !seen.contains(&mother) {
                    return Err(CorpusError::DanglingMother {
                        node: NodeId::new(record.id),
                        mother: NodeId::new(mother),
                    });
                }
            }
        }

        records.sort_by_key(|r| (r.start_slot(), r.id));

        let mut books: Vec<String> = Vec::new();
        let mut book_ordinals: HashMap<String, u16> = HashMap::new();
        let mut verse_counters: HashMap<ContainerId, usize> = HashMap::new();
        let mut nodes = Vec::with_capacity(records.len());
        let mut positions = HashMap::with_capacity(records.len());

        for record in records {
            let name = display_book(&record.book);
            let book = match book_ordinals.get(&name) {
                Some(&ordinal) => ordinal,
                None => {
                    let ordinal = u16::try_from(books.len())
                        .map_err(|_| CorpusError::TooManyBooks(books.len() + 1))?;
                    books.push(name.clone());
                    book_ordinals.insert(name.clone(), ordinal);
                    ordinal
                }
            };
            let container = ContainerId::new(book, record.chapter, record.verse);
            let counter = verse_counters.entry(container).or_insert(0);
            let reference = format!(
                "{} {}:{}{}",
                name,
                record.chapter,
                record.verse,
                segment_suffix(*counter)
            );
            *counter += 1;

            let slots_start = record.start_slot();
            let slots_end = record.end_slot();
            let id = NodeId::new(record.id);
            positions.insert(id, nodes.len());
            nodes.push(ClauseNode {
                id,
                slots_start,
                slots_end,
                slot_count: slots_end.saturating_sub(slots_start) + 1,
                label: record.label,
                container,
                book: name,
                reference,
                kind: record.kind,
                typ: record.typ,
                rela: record.rela,
                code: record.code,
                txt: record.txt,
                domain: record.domain,
                instruction: record.instruction,
                core_functions: record.core_functions,
                original_mother: record.mother.map(NodeId::new),
            });
        }

        info!(nodes = nodes.len(), books = books.len(), "corpus index built");
        Ok(Self {
            nodes,
            positions,
            books,
        })
    }

    /// Load a JSON export from disk and build the corpus.
    pub fn load_json(path: impl AsRef<Path>) -> CorpusResult<Self> {
        Self::from_records(load_records(path)?)
    }
}

impl CorpusIndex for InMemoryCorpus {
    fn all_nodes(&self) -> &[ClauseNode] {
        &self.nodes
    }

    fn node(&self, id: NodeId) -> Option<&ClauseNode> {
        self.positions.get(&id).map(|&i| &self.nodes[i])
    }

    fn book_names(&self) -> &[String] {
        &self.books
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mog_types::NodeKind;

    fn n(raw: u64) -> NodeId {
        NodeId::new(raw)
    }

    fn genesis_fixture() -> InMemoryCorpus {
        InMemoryCorpus::from_records(vec![
            CorpusRecord::clause(4, "Genesis", 1, 2, Some(2)),
            CorpusRecord::clause(1, "Genesis", 1, 1, None),
            CorpusRecord::clause(2, "Genesis", 1, 1, Some(1)),
            CorpusRecord::clause(3, "Genesis", 1, 2, Some(1)),
            CorpusRecord::clause(10, "exodus", 1, 1, None).with_kind(NodeKind::Sentence),
        ])
        .unwrap()
    }

    #[test]
    fn nodes_are_in_textual_order() {
        let corpus = genesis_fixture();
        let ids: Vec<u64> = corpus.all_nodes().iter().map(|c| c.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 10]);
        assert_eq!(corpus.node(n(3)).map(|c| c.id), Some(n(3)));
    }

    #[test]
    fn books_get_ordinals_in_textual_order() {
        let corpus = genesis_fixture();
        assert_eq!(corpus.book_names(), &["Genesis".to_string(), "Exodus".to_string()]);
        assert_eq!(corpus.container_of(n(10)).unwrap(), ContainerId::new(1, 1, 1));
        assert_eq!(
            corpus.container_label(ContainerId::new(1, 1, 1)).as_deref(),
            Some("Exodus.1.1")
        );
    }

    #[test]
    fn references_carry_verse_suffixes() {
        let corpus = genesis_fixture();
        assert_eq!(corpus.node(n(1)).unwrap().reference, "Genesis 1:1a");
        assert_eq!(corpus.node(n(2)).unwrap().reference, "Genesis 1:1b");
        assert_eq!(corpus.node(n(3)).unwrap().reference, "Genesis 1:2a");
    }

    #[test]
    fn boundary_lookups() {
        let corpus = genesis_fixture();
        assert_eq!(corpus.len(), 5);
        assert_eq!(corpus.original_mother_of(n(4)).unwrap(), Some(n(2)));
        assert_eq!(corpus.original_mother_of(n(1)).unwrap(), None);
        assert!(matches!(
            corpus.original_mother_of(n(99)),
            Err(CorpusError::NodeNotFound(_))
        ));
        assert!(corpus.is_draggable(n(1)));
        assert!(!corpus.is_draggable(n(10)));
        assert!(!corpus.is_draggable(n(99)));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = InMemoryCorpus::from_records(vec![
            CorpusRecord::clause(1, "Genesis", 1, 1, None),
            CorpusRecord::clause(1, "Genesis", 1, 1, None),
        ]);
        assert!(matches!(result, Err(CorpusError::DuplicateNode(id)) if id == n(1)));
    }

    #[test]
    fn dangling_mothers_are_rejected() {
        let result = InMemoryCorpus::from_records(vec![CorpusRecord::clause(
            2,
            "Genesis",
            1,
            1,
            Some(1),
        )]);
        assert!(matches!(
            result,
            Err(CorpusError::DanglingMother { node, mother }) if node == n(2) && mother == n(1)
        ));
    }

    #[test]
    fn slot_span_is_recorded() {
        let corpus = InMemoryCorpus::from_records(vec![
            CorpusRecord::clause(100, "Genesis", 1, 1, None).with_slots(1, 11),
        ])
        .unwrap();
        let node = corpus.node(n(100)).unwrap();
        assert_eq!(node.slots_start, 1);
        assert_eq!(node.slots_end, 11);
        assert_eq!(node.slot_count, 11);
    }
}
