use crate::{
    consensus::{fetch_snapshots, select_longest},
    constants::DEFAULT_PEER_TIMEOUT_MS,
    pow, Block, ChainSnapshot, Ledger, LedgerError, PeerPort, Transaction,
};
use std::{sync::Arc, time::Duration};
use tokio::sync::RwLock;
use tracing::{debug, info};

#[derive(Clone, Debug)]
pub struct EngineOptions {
    /// Upper bound on a single peer fetch during conflict resolution.
    pub peer_timeout: Duration,
    /// Search proofs on the rayon pool instead of a single thread.
    pub parallel_pow: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            peer_timeout: Duration::from_millis(DEFAULT_PEER_TIMEOUT_MS),
            parallel_pow: false,
        }
    }
}

/// Shared handle to a node's [`Ledger`]. Cheap to clone; every clone sees the same state.
///
/// All mutations go through one write lock. Proof search runs without the lock and
/// is committed only if the tip it was computed for is still the tip.
#[derive(Clone)]
pub struct LedgerEngine {
    state: Arc<RwLock<Ledger>>,
    node_id: Arc<str>,
    peers: Arc<dyn PeerPort>,
    options: EngineOptions,
}

impl LedgerEngine {
    pub fn new(node_id: impl Into<String>, peers: Arc<dyn PeerPort>) -> Self {
        Self::with_options(node_id, peers, EngineOptions::default())
    }

    pub fn with_options(
        node_id: impl Into<String>,
        peers: Arc<dyn PeerPort>,
        options: EngineOptions,
    ) -> Self {
        let node_id: String = node_id.into();
        Self {
            state: Arc::new(RwLock::new(Ledger::new())),
            node_id: Arc::from(node_id),
            peers,
            options,
        }
    }

    /// Identity credited with mining rewards.
    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub async fn submit_transaction(
        &self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: i64,
    ) -> u64 {
        self.state
            .write()
            .await
            .submit_transaction(sender, recipient, amount)
    }

    pub async fn chain(&self) -> ChainSnapshot {
        ChainSnapshot::new(self.state.read().await.chain().to_vec())
    }

    pub async fn height(&self) -> u64 {
        self.state.read().await.height()
    }

    pub async fn last_block(&self) -> Block {
        self.state.read().await.last_block().clone()
    }

    pub async fn pending_transactions(&self) -> Vec<Transaction> {
        self.state.read().await.pending().to_vec()
    }

    pub async fn nodes(&self) -> Vec<String> {
        self.state.read().await.nodes().iter().cloned().collect()
    }

    pub async fn register_node(&self, address: &str) -> Result<(), LedgerError> {
        self.state.write().await.register_node(address)
    }

    /// Register all addresses or none of them.
    pub async fn register_nodes<S: AsRef<str>>(
        &self,
        addresses: &[S],
    ) -> Result<Vec<String>, LedgerError> {
        let parsed = addresses
            .iter()
            .map(|a| crate::ledger::parse_node_address(a.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let mut ledger = self.state.write().await;
        for authority in &parsed {
            ledger.register_node(authority)?;
        }
        Ok(ledger.nodes().iter().cloned().collect())
    }

    /// Mine a block on the current tip and credit this node.
    pub async fn mine(&self) -> Result<Block, LedgerError> {
        loop {
            let (last_proof, last_hash) = {
                let ledger = self.state.read().await;
                let last = ledger.last_block();
                (last.proof, last.hash())
            };

            let parallel = self.options.parallel_pow;
            let proof = tokio::task::spawn_blocking(move || {
                if parallel {
                    pow::proof_of_work_parallel(last_proof)
                } else {
                    pow::proof_of_work(last_proof)
                }
            })
            .await
            .map_err(|e| LedgerError::Worker(e.to_string()))?;

            let mut ledger = self.state.write().await;
            let tip = ledger.last_block();
            if tip.proof == last_proof && tip.hash() == last_hash {
                return Ok(ledger.seal_block(proof, last_hash, &self.node_id));
            }
            debug!(stale_proof = proof, "tip moved while mining, searching again");
        }
    }

    /// Replace the local chain with the longest valid chain among registered peers.
    ///
    /// The local length is read once before any peer is contacted. Returns whether
    /// the chain was replaced.
    pub async fn resolve_conflicts(&self) -> bool {
        let (local_len, peers) = {
            let ledger = self.state.read().await;
            (
                ledger.height(),
                ledger.nodes().iter().cloned().collect::<Vec<_>>(),
            )
        };
        if peers.is_empty() {
            return false;
        }

        let responses =
            fetch_snapshots(&*self.peers, &peers, self.options.peer_timeout).await;
        let Some((peer, chain)) = select_longest(local_len, responses) else {
            info!(local_len, peers = peers.len(), "local chain is authoritative");
            return false;
        };

        let mut ledger = self.state.write().await;
        let new_len = chain.len() as u64;
        // a concurrent mine may have grown us past the candidate
        if new_len <= ledger.height() {
            info!(
                %peer,
                new_len,
                local_len = ledger.height(),
                "candidate no longer longer than local chain"
            );
            return false;
        }
        ledger.replace_chain(chain);
        info!(%peer, from = local_len, to = new_len, "chain replaced");
        true
    }
}
