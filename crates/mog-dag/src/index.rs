use std::collections::HashMap;

use tracing::debug;

use mog_corpus::CorpusIndex;
use mog_types::NodeId;

/// Forward-edge index of the base forest: original mother → children.
///
/// Built once at load. Child lists are in textual order because the corpus
/// yields nodes in textual order.
#[derive(Clone, Debug, Default)]
pub struct BaseIndex {
    children: HashMap<NodeId, Vec<NodeId>>,
    roots: Vec<NodeId>,
}

impl BaseIndex {
    pub fn build(corpus: &dyn CorpusIndex) -> Self {
        let mut children: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
        let mut roots = Vec::new();
        for node in corpus.all_nodes() {
            match node.original_mother {
                Some(mother) => children.entry(mother).or_default().push(node.id),
                None => roots.push(node.id),
            }
        }
        debug!(mothers = children.len(), roots = roots.len(), "base index built");
        Self { children, roots }
    }

    /// Children of `mother` in the base forest.
    pub fn children(&self, mother: NodeId) -> &[NodeId] {
        self.children.get(&mother).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Nodes without an original mother.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }
}
