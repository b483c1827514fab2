use crate::{
    consensus,
    constants::{MINING_REWARD, REWARD_SENDER},
    pow, unix_now, Block, LedgerError, Transaction,
};
use std::collections::BTreeSet;
use tracing::{debug, info};
use url::Url;

/// Chain, pending pool and peer registry of one node.
///
/// Single-owner state; [`crate::LedgerEngine`] puts it behind a lock for shared use.
#[derive(Clone, Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    pending: Vec<Transaction>,
    nodes: BTreeSet<String>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            chain: vec![Block::genesis(unix_now())],
            pending: Vec::new(),
            nodes: BTreeSet::new(),
        }
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn height(&self) -> u64 {
        self.chain.len() as u64
    }

    pub fn last_block(&self) -> &Block {
        // genesis is pushed in `new` and replacement never installs an empty chain
        &self.chain[self.chain.len() - 1]
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn nodes(&self) -> &BTreeSet<String> {
        &self.nodes
    }

    /// Queue a transaction and return the index of the block that will hold it.
    pub fn submit_transaction(
        &mut self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: i64,
    ) -> u64 {
        let tx = Transaction::new(sender, recipient, amount);
        debug!(sender = %tx.sender, recipient = %tx.recipient, amount, "transaction queued");
        self.pending.push(tx);
        self.height() + 1
    }

    /// Append a block holding the whole pending pool. `previous_hash` is taken as given.
    pub fn new_block(&mut self, proof: u64, previous_hash: impl Into<String>) -> Block {
        let timestamp = unix_now().max(self.last_block().timestamp);
        let block = Block {
            index: self.height() + 1,
            timestamp,
            transactions: std::mem::take(&mut self.pending),
            proof,
            previous_hash: previous_hash.into(),
        };
        self.chain.push(block.clone());
        block
    }

    /// Search a proof for the tip, reward `miner` and append the block.
    pub fn mine_block(&mut self, miner: &str) -> Block {
        let last = self.last_block();
        let proof = pow::proof_of_work(last.proof);
        let previous_hash = last.hash();
        self.seal_block(proof, previous_hash, miner)
    }

    pub(crate) fn seal_block(&mut self, proof: u64, previous_hash: String, miner: &str) -> Block {
        self.submit_transaction(REWARD_SENDER, miner, MINING_REWARD);
        let block = self.new_block(proof, previous_hash);
        info!(
            "Mined block {} with proof {} and {} transactions",
            block.index,
            block.proof,
            block.transactions.len()
        );
        block
    }

    /// Add a peer by URL or bare `host:port`. Registering the same authority twice is a no-op.
    pub fn register_node(&mut self, address: &str) -> Result<(), LedgerError> {
        let authority = parse_node_address(address)?;
        if self.nodes.insert(authority.clone()) {
            info!(node = %authority, "peer registered");
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        consensus::valid_chain(&self.chain)
    }

    pub(crate) fn replace_chain(&mut self, chain: Vec<Block>) {
        if chain.is_empty() {
            return;
        }
        self.chain = chain;
    }
}

/// Normalise a peer address to the `host:port` the registry stores.
///
/// Addresses without a scheme are read as `http://`; a missing port falls back to
/// the scheme default.
pub fn parse_node_address(address: &str) -> Result<String, LedgerError> {
    let address = address.trim();
    let with_scheme = if address.contains("://") {
        address.to_string()
    } else {
        format!("http://{address}")
    };
    let url =
        Url::parse(&with_scheme).map_err(|_| LedgerError::InvalidAddress(address.to_string()))?;
    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| LedgerError::InvalidAddress(address.to_string()))?;
    Ok(match url.port_or_known_default() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}
