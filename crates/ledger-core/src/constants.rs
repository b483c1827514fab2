pub const HASH_SIZE: usize = 32;
pub const HASH_HEX_SIZE: usize = HASH_SIZE * 2;

/// Leading zero hex characters a proof hash must carry.
pub const POW_DIFFICULTY: u32 = 4;

pub const GENESIS_PROOF: u64 = 100;
pub const GENESIS_PREVIOUS_HASH: &str = "1";

/// Sender recorded on the mining reward transaction.
pub const REWARD_SENDER: &str = "0";
pub const MINING_REWARD: i64 = 1;

pub const DEFAULT_PEER_TIMEOUT_MS: u64 = 5_000;
