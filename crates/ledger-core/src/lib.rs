use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

pub mod consensus;
pub mod constants;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod peer;
pub mod pow;

pub use consensus::valid_chain;
pub use engine::{EngineOptions, LedgerEngine};
pub use error::{LedgerError, PeerError};
pub use ledger::Ledger;
pub use peer::{ChainSnapshot, PeerPort};

pub type BlockDigest = [u8; constants::HASH_SIZE];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: i64,
}

impl Transaction {
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>, amount: i64) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: u64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

impl Block {
    /// The first block of every chain. Its previous hash is a placeholder, not a digest.
    pub fn genesis(timestamp: u64) -> Self {
        Self {
            index: 1,
            timestamp,
            transactions: Vec::new(),
            proof: constants::GENESIS_PROOF,
            previous_hash: constants::GENESIS_PREVIOUS_HASH.to_string(),
        }
    }

    /// Compact JSON with every object's keys in sorted order, so the bytes do not
    /// depend on how the block was built or decoded.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let view = CanonicalBlock {
            index: self.index,
            previous_hash: &self.previous_hash,
            proof: self.proof,
            timestamp: self.timestamp,
            transactions: self
                .transactions
                .iter()
                .map(|tx| CanonicalTransaction {
                    amount: tx.amount,
                    recipient: &tx.recipient,
                    sender: &tx.sender,
                })
                .collect(),
        };
        serde_json::to_vec(&view).expect("canonical block serializes")
    }

    pub fn digest(&self) -> BlockDigest {
        sha256(&self.canonical_bytes())
    }

    /// Lowercase hex SHA-256 of the canonical form.
    pub fn hash(&self) -> String {
        hex::encode(self.digest())
    }
}

// Hashed field order. Declared alphabetically; serialized in declaration order.
#[derive(Serialize)]
struct CanonicalBlock<'a> {
    index: u64,
    previous_hash: &'a str,
    proof: u64,
    timestamp: u64,
    transactions: Vec<CanonicalTransaction<'a>>,
}

#[derive(Serialize)]
struct CanonicalTransaction<'a> {
    amount: i64,
    recipient: &'a str,
    sender: &'a str,
}

pub fn sha256(bytes: &[u8]) -> BlockDigest {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher.finalize().into()
}

pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
