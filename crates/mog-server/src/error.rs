use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

use mog_engine::EngineError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        let Self::Engine(e) = self else {
            return StatusCode::INTERNAL_SERVER_ERROR;
        };
        match e.code() {
            "NODE_NOT_FOUND" => StatusCode::NOT_FOUND,
            "ROOTIFY_DISABLED" => StatusCode::METHOD_NOT_ALLOWED,
            "BUSY" => StatusCode::SERVICE_UNAVAILABLE,
            "INVALID_SCOPE" => StatusCode::BAD_REQUEST,
            "INTERNAL" | "CONFIG" => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::CONFLICT,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            Self::Engine(e) => e.code(),
            _ => "INTERNAL",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = match &self {
            Self::Engine(EngineError::BatchRejected { index, reason }) => {
                json!({"ok": false, "reason": reason.code(), "index": index})
            }
            _ => json!({"ok": false, "reason": self.reason()}),
        };
        (status, Json(body)).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use mog_engine::{NodeId, RejectReason};

    fn status_of(e: EngineError) -> StatusCode {
        ServerError::from(e).status()
    }

    #[test]
    fn status_mapping() {
        assert_eq!(status_of(EngineError::NodeNotFound(NodeId::new(1))), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(EngineError::Rejected(RejectReason::NotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(EngineError::Rejected(RejectReason::RootifyDisabled)),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            status_of(EngineError::Rejected(RejectReason::CycleDetected)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(EngineError::Rejected(RejectReason::MotherNotClause)),
            StatusCode::CONFLICT
        );
        assert_eq!(status_of(EngineError::EmptyHistory), StatusCode::CONFLICT);
        assert_eq!(status_of(EngineError::Busy), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(status_of(EngineError::InvalidScope("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(EngineError::Poisoned), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            ServerError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
