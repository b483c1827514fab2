use crate::constants::{DEFAULT_LISTEN, NODE_ID_BYTES};
use clap::Parser;
use ledger_core::{constants::DEFAULT_PEER_TIMEOUT_MS, EngineOptions};
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(name = "ledger-node")]
#[command(about = "Proof-of-work ledger node")]
pub struct Args {
    /// Address to listen on, e.g. 127.0.0.1:5000
    #[arg(long, default_value = DEFAULT_LISTEN)]
    pub listen: String,

    /// Peer to register at startup (repeatable), e.g. http://127.0.0.1:5001
    #[arg(long = "peer")]
    pub peers: Vec<String>,

    /// Per-peer timeout while resolving conflicts
    #[arg(long, default_value_t = DEFAULT_PEER_TIMEOUT_MS)]
    pub peer_timeout_ms: u64,

    /// Identity credited with mining rewards; random when omitted
    #[arg(long)]
    pub node_id: Option<String>,

    /// Search proofs on all cores
    #[arg(long)]
    pub parallel_pow: bool,
}

impl Args {
    pub fn peer_timeout(&self) -> Duration {
        Duration::from_millis(self.peer_timeout_ms)
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            peer_timeout: self.peer_timeout(),
            parallel_pow: self.parallel_pow,
        }
    }

    pub fn node_id(&self) -> String {
        self.node_id.clone().unwrap_or_else(generate_node_id)
    }
}

pub fn generate_node_id() -> String {
    let bytes: [u8; NODE_ID_BYTES] = rand::random();
    hex::encode(bytes)
}
