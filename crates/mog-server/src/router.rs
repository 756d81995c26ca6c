use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handler::{self, AppState};

/// Build the axum router with all MOG endpoints.
pub fn build_router(engine: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/tree", get(handler::tree_handler))
        .route("/mother/reparent", post(handler::reparent_handler))
        .route("/mother/rootify", post(handler::rootify_handler))
        .route("/mother/reparent-batch", post(handler::batch_handler))
        .route("/mother/undo", post(handler::undo_handler))
        .route("/mother/redo", post(handler::redo_handler))
        .route("/mother/reset", post(handler::reset_handler))
        .route("/mother/history", get(handler::history_handler))
        .route("/nodes/:id/descendants", get(handler::descendants_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(engine)
}
