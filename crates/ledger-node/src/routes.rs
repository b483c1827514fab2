use crate::{error::ApiError, AppState};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use ledger_core::{ChainSnapshot, Transaction};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

#[derive(Deserialize)]
struct TxIn {
    sender: String,
    recipient: String,
    amount: i64,
}

#[derive(Deserialize)]
struct RegisterIn {
    nodes: Option<Vec<String>>,
}

#[derive(Serialize)]
struct Mined {
    message: &'static str,
    index: u64,
    transactions: Vec<Transaction>,
    proof: u64,
    previous_hash: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(Health { status: "ok" }) }))
        .route("/mine", get(mine))
        .route("/transaction/new", post(new_transaction))
        .route("/transactions/pending", get(pending))
        .route("/chain", get(full_chain))
        .route("/nodes", get(list_nodes))
        .route("/nodes/register", post(register_nodes))
        .route("/nodes/resolve", get(consensus))
        .with_state(state)
}

async fn mine(State(state): State<AppState>) -> Result<Json<Mined>, ApiError> {
    let block = state.engine.mine().await?;
    Ok(Json(Mined {
        message: "New block forged",
        index: block.index,
        transactions: block.transactions,
        proof: block.proof,
        previous_hash: block.previous_hash,
    }))
}

async fn new_transaction(
    State(state): State<AppState>,
    payload: Result<Json<TxIn>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(tx) = payload.map_err(|_| ApiError::BadRequest("Missing values".into()))?;
    let index = state
        .engine
        .submit_transaction(tx.sender, tx.recipient, tx.amount)
        .await;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": format!("Transaction will be added to Block {index}") })),
    ))
}

async fn pending(State(state): State<AppState>) -> Json<Value> {
    let transactions = state.engine.pending_transactions().await;
    Json(json!({ "count": transactions.len(), "transactions": transactions }))
}

async fn full_chain(State(state): State<AppState>) -> Json<ChainSnapshot> {
    Json(state.engine.chain().await)
}

async fn list_nodes(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "nodes": state.engine.nodes().await }))
}

async fn register_nodes(
    State(state): State<AppState>,
    payload: Result<Json<RegisterIn>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let nodes = payload
        .ok()
        .and_then(|Json(body)| body.nodes)
        .ok_or_else(|| {
            ApiError::BadRequest("Error: please supply a valid list of nodes".into())
        })?;
    let total_nodes = state.engine.register_nodes(nodes.as_slice()).await?;
    info!(
        added = nodes.len(),
        total = total_nodes.len(),
        "nodes registered"
    );
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "New nodes have been added",
            "total_nodes": total_nodes,
        })),
    ))
}

async fn consensus(State(state): State<AppState>) -> Json<Value> {
    let replaced = state.engine.resolve_conflicts().await;
    let chain = state.engine.chain().await.chain;
    if replaced {
        Json(json!({ "message": "Our chain was replaced", "new_chain": chain }))
    } else {
        Json(json!({ "message": "Our chain is authoritative", "chain": chain }))
    }
}
