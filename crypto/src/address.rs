//! Member address derivation from public keys.
//!
//! Address format: `weft_` + hex(Blake2b-256(public_key))[..40].
//! 20 bytes of digest is enough to make collisions impractical while keeping
//! addresses short enough to read in event logs.

use crate::hash::blake2b_256;
use weft_types::{MemberAddress, PublicKey};

/// Derive a member address from an Ed25519 public key.
pub fn derive_address(public_key: &PublicKey) -> MemberAddress {
    let digest = blake2b_256(public_key.as_bytes());
    let body = hex::encode(&digest[..20]);
    MemberAddress::new(format!("{}{}", MemberAddress::PREFIX, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::keypair_from_seed;

    #[test]
    fn derivation_is_deterministic() {
        let kp = keypair_from_seed(&[1u8; 32]);
        assert_eq!(derive_address(&kp.public), derive_address(&kp.public));
    }

    #[test]
    fn distinct_keys_distinct_addresses() {
        let a = keypair_from_seed(&[1u8; 32]);
        let b = keypair_from_seed(&[2u8; 32]);
        assert_ne!(derive_address(&a.public), derive_address(&b.public));
    }

    #[test]
    fn derived_address_is_valid() {
        let kp = keypair_from_seed(&[3u8; 32]);
        let addr = derive_address(&kp.public);
        assert!(addr.is_valid());
        assert_eq!(addr.as_str().len(), MemberAddress::PREFIX.len() + 40);
    }
}
