use crate::{error::PeerError, Block};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A node's full chain as it reports it. Also the `/chain` response body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSnapshot {
    pub chain: Vec<Block>,
    pub length: u64,
}

impl ChainSnapshot {
    pub fn new(chain: Vec<Block>) -> Self {
        let length = chain.len() as u64;
        Self { chain, length }
    }

    /// Reported length matches the blocks actually sent.
    pub fn is_consistent(&self) -> bool {
        self.length == self.chain.len() as u64
    }
}

/// Outbound access to other nodes, used only while resolving conflicts.
///
/// `peer` is a `host:port` authority as stored in the node registry.
#[async_trait]
pub trait PeerPort: Send + Sync {
    async fn get_chain(&self, peer: &str) -> Result<ChainSnapshot, PeerError>;
}
