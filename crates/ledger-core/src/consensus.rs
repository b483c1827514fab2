//! Longest-valid-chain rule.

use crate::{peer::PeerPort, pow::valid_proof, Block, ChainSnapshot, PeerError};
use futures::future::join_all;
use std::time::Duration;
use tracing::{debug, warn};

/// Check hash links and proofs pairwise from the second block on.
///
/// Empty chains are invalid; a lone genesis block is valid.
pub fn valid_chain(chain: &[Block]) -> bool {
    if chain.is_empty() {
        return false;
    }
    for pair in chain.windows(2) {
        let (last, block) = (&pair[0], &pair[1]);
        if block.previous_hash != last.hash() {
            debug!(index = block.index, "previous hash does not link");
            return false;
        }
        if !valid_proof(last.proof, block.proof) {
            debug!(index = block.index, "proof of work rejected");
            return false;
        }
    }
    true
}

/// Fetch every peer concurrently. Results keep the order of `peers`.
pub async fn fetch_snapshots<P>(
    port: &P,
    peers: &[String],
    timeout: Duration,
) -> Vec<(String, Result<ChainSnapshot, PeerError>)>
where
    P: PeerPort + ?Sized,
{
    let fetches = peers.iter().map(|peer| async move {
        let result = match tokio::time::timeout(timeout, port.get_chain(peer)).await {
            Ok(result) => result,
            Err(_) => Err(PeerError::Timeout {
                peer: peer.clone(),
                timeout,
            }),
        };
        (peer.clone(), result)
    });
    join_all(fetches).await
}

/// Pick the longest valid chain strictly longer than `local_len`.
///
/// Failed fetches, inconsistent snapshots and invalid chains are skipped.
/// Among equal lengths the first one seen wins.
pub fn select_longest<I>(local_len: u64, responses: I) -> Option<(String, Vec<Block>)>
where
    I: IntoIterator<Item = (String, Result<ChainSnapshot, PeerError>)>,
{
    let mut max_length = local_len;
    let mut best = None;
    for (peer, response) in responses {
        let snapshot = match response {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(%peer, error = %err, "skipping peer");
                continue;
            }
        };
        if !snapshot.is_consistent() {
            warn!(
                %peer,
                reported = snapshot.length,
                sent = snapshot.chain.len(),
                "skipping peer: length does not match chain"
            );
            continue;
        }
        if snapshot.length > max_length && valid_chain(&snapshot.chain) {
            max_length = snapshot.length;
            best = Some((peer, snapshot.chain));
        }
    }
    best
}
