//! Cryptographic primitives for the WEFT federation engine.
//!
//! - **Ed25519** for identity-verifier attestation signatures
//! - **Blake2b-256** for all digests (commitments, descriptors, addresses)
//! - **Merkle set commitments** for batched onboarding approvals
//! - Address derivation with `weft_` prefix and hex encoding

pub mod address;
pub mod attestation;
pub mod hash;
pub mod keys;
pub mod merkle;
pub mod sign;

pub use address::derive_address;
pub use attestation::attestation_digest;
pub use hash::{blake2b_256, blake2b_256_multi, digest_of, kind_digest};
pub use keys::{generate_keypair, keypair_from_private, keypair_from_seed, public_from_private};
pub use merkle::{MembershipProof, MerkleTree, SetCommitment, Side};
pub use sign::{sign_message, verify_signature};
