//! Clause node records as loaded from the corpus.
//!
//! A [`ClauseNode`] is created once at load time and never changes. The only
//! mutable aspect of a node, its mother, lives outside the record in the
//! overlay; `original_mother` here is the base-forest value.

use serde::{Deserialize, Serialize};

use crate::container::ContainerId;
use crate::id::NodeId;

/// The corpus object type of a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A clause. The only kind the analyst may move.
    #[default]
    Clause,
    /// A clause atom (sub-clause segment).
    ClauseAtom,
    /// A sentence-level grouping.
    Sentence,
}

impl NodeKind {
    /// Whether nodes of this kind may be reparented or rootified.
    pub fn is_draggable(self) -> bool {
        matches!(self, Self::Clause)
    }

    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Clause => "clause",
            Self::ClauseAtom => "clause_atom",
            Self::Sentence => "sentence",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One clause segment of the corpus.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseNode {
    pub id: NodeId,
    /// First word slot; the textual order key.
    pub slots_start: u64,
    /// Last word slot.
    pub slots_end: u64,
    pub slot_count: u64,
    /// Short display label (first few words).
    pub label: String,
    pub container: ContainerId,
    /// Book name as it appears in the corpus, e.g. `Genesis`.
    pub book: String,
    /// Human reference with per-verse suffix, e.g. `Genesis 1:4b`.
    pub reference: String,
    pub kind: NodeKind,
    pub typ: Option<String>,
    pub rela: Option<String>,
    pub code: Option<String>,
    pub txt: Option<String>,
    pub domain: Option<String>,
    pub instruction: Option<String>,
    pub core_functions: Vec<String>,
    /// Base-forest mother, fixed at load time.
    pub original_mother: Option<NodeId>,
}

impl ClauseNode {
    /// `Book.chapter.verse` label of this node's container.
    pub fn container_label(&self) -> String {
        self.container.label(&self.book)
    }

    pub fn is_draggable(&self) -> bool {
        self.kind.is_draggable()
    }

    /// Compact reference to this node as a child of another.
    pub fn as_related(&self) -> RelatedClause {
        RelatedClause {
            id: self.id,
            typ: self.typ.clone(),
            rela: self.rela.clone(),
            code: self.code.clone(),
        }
    }
}

/// Summary of a clause listed under its mother.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedClause {
    pub id: NodeId,
    pub typ: Option<String>,
    pub rela: Option<String>,
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ClauseNode {
        ClauseNode {
            id: NodeId::new(427567),
            slots_start: 52,
            slots_end: 60,
            slot_count: 9,
            label: "wayyar".into(),
            container: ContainerId::new(0, 1, 4),
            book: "Genesis".into(),
            reference: "Genesis 1:4a".into(),
            kind: NodeKind::Clause,
            typ: Some("WayX".into()),
            rela: None,
            code: Some("200".into()),
            txt: Some("N".into()),
            domain: None,
            instruction: None,
            core_functions: vec!["Pred".into(), "Subj".into()],
            original_mother: Some(NodeId::new(427566)),
        }
    }

    #[test]
    fn only_clauses_are_draggable() {
        assert!(NodeKind::Clause.is_draggable());
        assert!(!NodeKind::ClauseAtom.is_draggable());
        assert!(!NodeKind::Sentence.is_draggable());
    }

    #[test]
    fn container_label_uses_book_name() {
        assert_eq!(sample().container_label(), "Genesis.1.4");
    }

    #[test]
    fn related_clause_copies_tags() {
        let related = sample().as_related();
        assert_eq!(related.id, NodeId::new(427567));
        assert_eq!(related.typ.as_deref(), Some("WayX"));
        assert_eq!(related.code.as_deref(), Some("200"));
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&NodeKind::ClauseAtom).unwrap();
        assert_eq!(json, "\"clause_atom\"");
    }
}
