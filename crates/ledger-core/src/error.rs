use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("invalid node address `{0}`")]
    InvalidAddress(String),

    #[error("proof-of-work worker failed: {0}")]
    Worker(String),
}

/// Why a peer contributed nothing to a consensus round.
#[derive(Debug, Error)]
pub enum PeerError {
    #[error("peer {peer} unreachable: {reason}")]
    Unreachable { peer: String, reason: String },

    #[error("peer {peer} returned a malformed chain: {reason}")]
    Malformed { peer: String, reason: String },

    #[error("peer {peer} did not answer within {timeout:?}")]
    Timeout { peer: String, timeout: Duration },
}

impl PeerError {
    pub fn peer(&self) -> &str {
        match self {
            PeerError::Unreachable { peer, .. }
            | PeerError::Malformed { peer, .. }
            | PeerError::Timeout { peer, .. } => peer,
        }
    }
}
