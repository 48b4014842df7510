use proptest::prelude::*;

use weft_crypto::{
    attestation_digest, derive_address, keypair_from_seed, sign_message, verify_signature,
    MerkleTree,
};
use weft_types::{Digest32, MemberAddress};

fn addrs(n: usize) -> Vec<MemberAddress> {
    (0..n)
        .map(|i| MemberAddress::new(format!("weft_member{i:04}")))
        .collect()
}

proptest! {
    /// Every committed member proves membership against the root; a proof
    /// never validates for a different member's address.
    #[test]
    fn merkle_proofs_bind_to_their_leaf(n in 1usize..64, pick in 0usize..64) {
        let members = addrs(n);
        let tree = MerkleTree::new(&members);
        let idx = pick % n;
        let proof = tree.prove(idx).unwrap();
        prop_assert!(proof.verify(&members[idx], &tree.root()));

        let stranger = MemberAddress::new("weft_stranger");
        prop_assert!(!proof.verify(&stranger, &tree.root()));
    }

    /// Roots are order-sensitive set commitments: any single-member change
    /// changes the root.
    #[test]
    fn merkle_root_reflects_the_set(n in 2usize..32, pick in 0usize..32) {
        let members = addrs(n);
        let root = MerkleTree::new(&members).root();

        let mut altered = members.clone();
        altered[pick % n] = MemberAddress::new("weft_substitute");
        prop_assert_ne!(MerkleTree::new(&altered).root(), root);
    }

    /// Flipping any byte anywhere in a proof path invalidates it.
    #[test]
    fn merkle_proof_tamper_detected(
        n in 2usize..32,
        pick in 0usize..32,
        level in 0usize..8,
        byte in 0usize..32,
        flip in 1u8..,
    ) {
        let members = addrs(n);
        let tree = MerkleTree::new(&members);
        let idx = pick % n;
        let mut proof = tree.prove(idx).unwrap();
        let lvl = level % proof.path.len();
        let (sibling, side) = proof.path[lvl];
        let mut bytes = *sibling.as_bytes();
        bytes[byte] ^= flip;
        proof.path[lvl] = (Digest32::new(bytes), side);
        prop_assert!(!proof.verify(&members[idx], &tree.root()));
    }

    /// An attestation binds both the claimant and the verification hash:
    /// a signature never validates for a different pairing.
    #[test]
    fn attestation_binds_claimant_and_hash(
        seed in prop::array::uniform32(0u8..),
        hash in prop::array::uniform32(0u8..),
        other_hash in prop::array::uniform32(0u8..),
    ) {
        let kp = keypair_from_seed(&seed);
        let claimant = derive_address(&kp.public);
        let digest = attestation_digest(&claimant, &Digest32::new(hash));
        let sig = sign_message(digest.as_bytes(), &kp.private);
        prop_assert!(verify_signature(digest.as_bytes(), &sig, &kp.public));

        if hash != other_hash {
            let forged = attestation_digest(&claimant, &Digest32::new(other_hash));
            prop_assert!(!verify_signature(forged.as_bytes(), &sig, &kp.public));
        }
        let other = MemberAddress::new("weft_other");
        let reused = attestation_digest(&other, &Digest32::new(hash));
        prop_assert!(!verify_signature(reused.as_bytes(), &sig, &kp.public));
    }

    /// Address derivation is deterministic and distinct per key.
    #[test]
    fn derived_addresses_are_stable(a in prop::array::uniform32(0u8..), b in prop::array::uniform32(0u8..)) {
        let ka = keypair_from_seed(&a);
        let kb = keypair_from_seed(&b);
        prop_assert_eq!(derive_address(&ka.public), derive_address(&ka.public));
        if a != b {
            prop_assert_ne!(derive_address(&ka.public), derive_address(&kb.public));
        }
    }
}
