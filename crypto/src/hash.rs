//! Blake2b hashing for commitments, descriptors, and contract kinds.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use weft_types::Digest32;

type Blake2b256 = Blake2b<U32>;

/// Compute a 256-bit Blake2b hash of arbitrary data.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn blake2b_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash arbitrary data into a `Digest32`.
pub fn digest_of(data: &[u8]) -> Digest32 {
    Digest32::new(blake2b_256(data))
}

/// The self-reported contract-kind digest for a named organization kind.
///
/// Capability introspection compares these digests to confirm a counterparty
/// is genuinely the expected kind of contract (e.g. `kind_digest("weft.thread")`).
pub fn kind_digest(kind: &str) -> Digest32 {
    Digest32::new(blake2b_256(kind.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blake2b_deterministic() {
        let h1 = blake2b_256(b"hello weft");
        let h2 = blake2b_256(b"hello weft");
        assert_eq!(h1, h2);
    }

    #[test]
    fn blake2b_different_inputs() {
        assert_ne!(blake2b_256(b"hub"), blake2b_256(b"thread"));
    }

    #[test]
    fn multi_matches_concatenation() {
        let concat = blake2b_256(b"weftfederation");
        let multi = blake2b_256_multi(&[b"weft", b"federation"]);
        assert_eq!(concat, multi);
    }

    #[test]
    fn kind_digests_are_distinct() {
        assert_ne!(kind_digest("weft.hub"), kind_digest("weft.thread"));
    }
}
