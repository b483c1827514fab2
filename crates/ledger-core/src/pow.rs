use crate::{constants::POW_DIFFICULTY, sha256, BlockDigest};
use rayon::prelude::*;

/// Whether `sha256("{last_proof}{proof}")` starts with `POW_DIFFICULTY` zero hex digits.
pub fn valid_proof(last_proof: u64, proof: u64) -> bool {
    let guess = format!("{last_proof}{proof}");
    count_leading_zero_nibbles(&sha256(guess.as_bytes())) >= POW_DIFFICULTY
}

/// Smallest `p >= 0` such that `valid_proof(last_proof, p)` holds.
pub fn proof_of_work(last_proof: u64) -> u64 {
    let mut proof = 0u64;
    while !valid_proof(last_proof, proof) {
        proof += 1;
    }
    proof
}

/// Same answer as [`proof_of_work`], searched across the rayon pool.
/// `find_first` keeps the lowest matching proof, so nodes agree regardless of thread count.
pub fn proof_of_work_parallel(last_proof: u64) -> u64 {
    (0u64..u64::MAX)
        .into_par_iter()
        .find_first(|proof| valid_proof(last_proof, *proof))
        .expect("proof space exhausted (practically impossible)")
}

/// Number of leading `0` characters in the hex encoding of `hash`.
pub fn count_leading_zero_nibbles(hash: &BlockDigest) -> u32 {
    let mut total = 0u32;
    for b in hash {
        if *b == 0 {
            total += 2;
        } else {
            if *b < 0x10 {
                total += 1;
            }
            break;
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_zero_nibbles_examples() {
        let mut h = [0u8; 32];
        assert_eq!(count_leading_zero_nibbles(&h), 64);
        h[0] = 0x0F; // "0f"
        assert_eq!(count_leading_zero_nibbles(&h), 1);
        h = [0u8; 32];
        h[1] = 0x80; // "0080"
        assert_eq!(count_leading_zero_nibbles(&h), 2);
        h[1] = 0x04; // "0004"
        assert_eq!(count_leading_zero_nibbles(&h), 3);
        h[0] = 0xA0;
        assert_eq!(count_leading_zero_nibbles(&h), 0);
    }

    #[test]
    fn nibbles_agree_with_hex_prefix() {
        for i in 0..500u64 {
            let digest = sha256(i.to_string().as_bytes());
            let hex = hex::encode(digest);
            let expected = hex.chars().take_while(|c| *c == '0').count() as u32;
            assert_eq!(count_leading_zero_nibbles(&digest), expected);
        }
    }

    #[test]
    fn proof_of_work_finds_first_valid_proof() {
        let proof = proof_of_work(100);
        assert!(valid_proof(100, proof));
        assert!((0..proof).all(|p| !valid_proof(100, p)));
        let hex = hex::encode(sha256(format!("100{proof}").as_bytes()));
        assert!(hex.starts_with("0000"));
    }

    #[test]
    fn valid_proof_is_pure() {
        let proof = proof_of_work(7);
        for _ in 0..3 {
            assert!(valid_proof(7, proof));
            assert_eq!(valid_proof(7, proof + 1), valid_proof(7, proof + 1));
        }
    }

    #[test]
    fn parallel_search_matches_sequential() {
        for last in [0u64, 100, 35_293] {
            assert_eq!(proof_of_work_parallel(last), proof_of_work(last));
        }
    }
}
