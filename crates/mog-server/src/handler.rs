use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use mog_engine::{BatchOp, EdgeChange, MotherEngine, MutationEntry, TreeView};
use mog_types::{Edge, NodeId};

use crate::error::ServerResult;

pub type AppState = Arc<MotherEngine>;

const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Default, Deserialize)]
pub struct TreeParams {
    pub scope: Option<String>,
    #[serde(default)]
    pub context: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReparentRequest {
    pub child: NodeId,
    pub new_mother: NodeId,
}

#[derive(Debug, Deserialize)]
pub struct RootifyRequest {
    pub child: NodeId,
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub ops: Vec<BatchOp>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<usize>,
}

/// Body of every successful single-edge mutation.
#[derive(Debug, Serialize, Deserialize)]
pub struct MutationResponse {
    pub ok: bool,
    pub edge: Edge,
    pub version: u64,
}

impl From<EdgeChange> for MutationResponse {
    fn from(change: EdgeChange) -> Self {
        Self {
            ok: true,
            edge: change.edge,
            version: change.version,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DescendantsResponse {
    pub node: NodeId,
    pub descendants: Vec<NodeId>,
}

pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn tree_handler(
    State(engine): State<AppState>,
    Query(params): Query<TreeParams>,
) -> ServerResult<Json<TreeView>> {
    Ok(Json(engine.get_tree(params.scope.as_deref(), params.context)?))
}

pub async fn reparent_handler(
    State(engine): State<AppState>,
    Json(req): Json<ReparentRequest>,
) -> ServerResult<Json<MutationResponse>> {
    Ok(Json(engine.reparent(req.child, req.new_mother)?.into()))
}

pub async fn rootify_handler(
    State(engine): State<AppState>,
    Json(req): Json<RootifyRequest>,
) -> ServerResult<Json<MutationResponse>> {
    Ok(Json(engine.rootify(req.child)?.into()))
}

/// Applies the batch, then answers with the default-scope tree.
pub async fn batch_handler(
    State(engine): State<AppState>,
    Json(req): Json<BatchRequest>,
) -> ServerResult<Json<TreeView>> {
    engine.reparent_batch(&req.ops)?;
    Ok(Json(engine.get_tree(None, false)?))
}

pub async fn undo_handler(State(engine): State<AppState>) -> ServerResult<Json<MutationResponse>> {
    Ok(Json(engine.undo()?.into()))
}

pub async fn redo_handler(State(engine): State<AppState>) -> ServerResult<Json<MutationResponse>> {
    Ok(Json(engine.redo()?.into()))
}

pub async fn reset_handler(State(engine): State<AppState>) -> ServerResult<Json<Value>> {
    let version = engine.reset()?;
    Ok(Json(json!({"ok": true, "version": version})))
}

pub async fn descendants_handler(
    State(engine): State<AppState>,
    Path(id): Path<u64>,
) -> ServerResult<Json<DescendantsResponse>> {
    let node = NodeId::new(id);
    let descendants = engine.descendants_of(node)?;
    Ok(Json(DescendantsResponse { node, descendants }))
}

pub async fn history_handler(
    State(engine): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> ServerResult<Json<Vec<MutationEntry>>> {
    let limit = params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    Ok(Json(engine.history(limit)?))
}
