//! HTTP front end for a ledger node.
use axum::Router;
use ledger_core::LedgerEngine;
use tower_http::trace::TraceLayer;

pub mod config;
mod constants;
pub mod error;
pub mod peer_client;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub engine: LedgerEngine,
}

/// All node routes with request tracing.
pub fn build_router(engine: LedgerEngine) -> Router {
    routes::router(AppState { engine }).layer(TraceLayer::new_for_http())
}
