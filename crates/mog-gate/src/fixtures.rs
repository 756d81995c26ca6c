//! Shared test corpus for stage and pipeline tests.
//!
//! ```text
//! Genesis 1:1   1 ── 2 ── 7        6 (sentence)
//!               └─ 3
//! Genesis 1:2   4 ── 5
//! ```

use mog_corpus::{CorpusRecord, InMemoryCorpus};
use mog_dag::{BaseIndex, EffectiveForest};
use mog_ledger::OverlayLedger;
use mog_types::{NodeId, NodeKind};

use crate::config::GateConfig;
use crate::stage::GateContext;

pub(crate) fn n(raw: u64) -> NodeId {
    NodeId::new(raw)
}

pub(crate) struct Fixture {
    pub corpus: InMemoryCorpus,
    pub base: BaseIndex,
    pub ledger: OverlayLedger,
    pub config: GateConfig,
}

impl Fixture {
    pub fn new() -> Self {
        let corpus = InMemoryCorpus::from_records(vec![
            CorpusRecord::clause(1, "Genesis", 1, 1, None),
            CorpusRecord::clause(2, "Genesis", 1, 1, Some(1)),
            CorpusRecord::clause(3, "Genesis", 1, 1, Some(1)),
            CorpusRecord::clause(7, "Genesis", 1, 1, Some(2)).with_slots(3, 3),
            CorpusRecord::clause(6, "Genesis", 1, 1, None)
                .with_kind(NodeKind::Sentence)
                .with_slots(3, 3),
            CorpusRecord::clause(4, "Genesis", 1, 2, None),
            CorpusRecord::clause(5, "Genesis", 1, 2, Some(4)),
        ])
        .unwrap();
        let base = BaseIndex::build(&corpus);
        Self {
            corpus,
            base,
            ledger: OverlayLedger::new(),
            config: GateConfig::default(),
        }
    }

    pub fn context(&self) -> GateContext<'_> {
        GateContext {
            corpus: &self.corpus,
            forest: EffectiveForest::new(&self.corpus, &self.base, self.ledger.store()),
            config: &self.config,
        }
    }
}
