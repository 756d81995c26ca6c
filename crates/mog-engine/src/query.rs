//! Tree views over a scope.
//!
//! A view is built from the node identities a scope resolves to (the
//! in-scope set), optionally widened by context expansion: every effective
//! ancestor of an in-scope node, then every effective sibling of every node
//! gathered so far. Context nodes are marked `in_scope = false`.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use mog_corpus::CorpusIndex;
use mog_dag::{DagResult, EffectiveForest};
use mog_types::{ClauseNode, Edge, NodeId, NodeKind, RelatedClause};

/// One node of a tree view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeView {
    pub id: NodeId,
    pub slots_start: u64,
    pub slots_end: u64,
    pub slot_count: u64,
    pub label: String,
    /// `Book.chapter.verse`.
    pub container_id: String,
    pub reference: String,
    pub in_scope: bool,
    pub kind: NodeKind,
    pub draggable: bool,
    pub typ: Option<String>,
    pub rela: Option<String>,
    pub code: Option<String>,
    pub txt: Option<String>,
    pub domain: Option<String>,
    pub instruction: Option<String>,
    pub original_mother: Option<NodeId>,
    pub core_functions: Vec<String>,
    /// Effective children that are also part of this view, in textual order.
    pub children: Vec<RelatedClause>,
}

impl NodeView {
    fn new(node: &ClauseNode, in_scope: bool) -> Self {
        Self {
            id: node.id,
            slots_start: node.slots_start,
            slots_end: node.slots_end,
            slot_count: node.slot_count,
            label: node.label.clone(),
            container_id: node.container_label(),
            reference: node.reference.clone(),
            in_scope,
            kind: node.kind,
            draggable: node.is_draggable(),
            typ: node.typ.clone(),
            rela: node.rela.clone(),
            code: node.code.clone(),
            txt: node.txt.clone(),
            domain: node.domain.clone(),
            instruction: node.instruction.clone(),
            original_mother: node.original_mother,
            core_functions: node.core_functions.clone(),
            children: Vec::new(),
        }
    }
}

/// Nodes and effective edges of a scope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeView {
    /// Sorted by textual order.
    pub nodes: Vec<NodeView>,
    /// One edge per node, in the same order as `nodes`.
    pub edges: Vec<Edge>,
    /// The scope descriptor that was asked for, if any.
    pub scope: Option<String>,
    pub version: u64,
}

impl TreeView {
    pub fn empty(scope: Option<String>, version: u64) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            scope,
            version,
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeView> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: NodeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.from == id)
    }
}

/// Add ancestors of the seeds, then siblings of everything gathered.
pub(crate) fn expand_context(
    forest: &EffectiveForest<'_>,
    seeds: &[NodeId],
) -> DagResult<Vec<NodeId>> {
    let mut included: HashSet<NodeId> = seeds.iter().copied().collect();
    let mut order = seeds.to_vec();

    for &id in seeds {
        for ancestor in forest.ancestors(id)? {
            // The rest of this chain was added with the ancestor.
            if !included.insert(ancestor) {
                break;
            }
            order.push(ancestor);
        }
    }

    let mut mothers_seen = HashSet::new();
    for id in order.clone() {
        let Some(mother) = forest.resolve(id)? else {
            continue;
        };
        if !mothers_seen.insert(mother) {
            continue;
        }
        for sibling in forest.children(mother)? {
            if included.insert(sibling) {
                order.push(sibling);
            }
        }
    }

    Ok(order)
}

/// Assemble a view from the gathered identities.
pub(crate) fn build_view(
    corpus: &dyn CorpusIndex,
    forest: &EffectiveForest<'_>,
    in_scope: &[NodeId],
    gathered: &[NodeId],
    scope: Option<String>,
    version: u64,
) -> DagResult<TreeView> {
    let in_scope: HashSet<NodeId> = in_scope.iter().copied().collect();
    let mut nodes: Vec<&ClauseNode> = gathered.iter().filter_map(|id| corpus.node(*id)).collect();
    nodes.sort_by_key(|n| (n.slots_start, n.id));

    let mut edges = Vec::with_capacity(nodes.len());
    let mut views = Vec::with_capacity(nodes.len());
    let mut position = HashMap::with_capacity(nodes.len());
    for node in &nodes {
        position.insert(node.id, views.len());
        views.push(NodeView::new(node, in_scope.contains(&node.id)));
        edges.push(forest.edge(node.id)?);
    }

    // Nodes are already in textual order, so children are appended in order.
    for (node, edge) in nodes.iter().zip(&edges) {
        if let Some(&mother_at) = edge.to.and_then(|m| position.get(&m)) {
            views[mother_at].children.push(node.as_related());
        }
    }

    Ok(TreeView {
        nodes: views,
        edges,
        scope,
        version,
    })
}
