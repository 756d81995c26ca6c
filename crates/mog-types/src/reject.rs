use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a proposed mutation was refused.
///
/// These are expected, user-facing outcomes rather than faults. A rejected
/// mutation leaves the overlay and the mutation log untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
    /// The proposed mother is the child itself.
    SelfParent,
    /// The child or the proposed mother is not in the corpus.
    NotFound,
    /// The child is an ancestor of the proposed mother.
    CycleDetected,
    /// Child and mother live in different containers.
    ScopeViolation,
    /// The child would sit deeper than the configured maximum.
    DepthExceeded,
    /// The node is not of a kind the analyst may move.
    NotDraggable,
    /// The proposed mother is not a clause.
    MotherNotClause,
    /// Rootify is switched off in configuration.
    RootifyDisabled,
}

impl RejectReason {
    /// Stable reason code used on the wire.
    pub fn code(self) -> &'static str {
        match self {
            Self::SelfParent => "SELF_PARENT",
            Self::NotFound => "NODE_NOT_FOUND",
            Self::CycleDetected => "CYCLE",
            Self::ScopeViolation => "SCOPE_VIOLATION",
            Self::DepthExceeded => "DEPTH_LIMIT",
            Self::NotDraggable => "NOT_DRAGGABLE",
            Self::MotherNotClause => "MOTHER_NOT_CLAUSE",
            Self::RootifyDisabled => "ROOTIFY_DISABLED",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
