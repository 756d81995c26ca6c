use mog_dag::DagError;

/// Errors that can occur during gate evaluation.
///
/// A rejected proposal is not an error; it is reported through
/// [`Decision::Reject`](crate::Decision::Reject). These are faults that stop
/// the pipeline from reaching a decision at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    /// Walking the effective forest failed.
    #[error("forest error in '{stage}': {source}")]
    Forest {
        stage: &'static str,
        #[source]
        source: DagError,
    },

    /// Configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

impl GateError {
    /// Wrap a forest error raised by a named stage.
    pub fn forest(stage: &'static str, source: DagError) -> Self {
        Self::Forest { stage, source }
    }
}

/// Convenience alias for gate results.
pub type GateResult<T> = Result<T, GateError>;
