use clap::Parser;
use ledger_core::LedgerEngine;
use ledger_node::{build_router, config::Args, peer_client::HttpPeerPort};
use std::{net::SocketAddr, sync::Arc};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let node_id = args.node_id();
    let peers = Arc::new(HttpPeerPort::new(args.peer_timeout())?);
    let engine = LedgerEngine::with_options(node_id, peers, args.engine_options());
    engine.register_nodes(args.peers.as_slice()).await?;

    let app = build_router(engine.clone());

    let addr: SocketAddr = args.listen.parse()?;
    let options = engine.options();
    info!(
        node_id = engine.node_id(),
        peers = args.peers.len(),
        peer_timeout_ms = options.peer_timeout.as_millis() as u64,
        parallel_pow = options.parallel_pow,
        "ledger-node listening on http://{addr}"
    );
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("ledger-node stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
