//! Identity attestation digests.
//!
//! The identity verifier signs a structured, domain-separated digest binding
//! a claimant's address to an opaque verification hash. Domain separation
//! prevents a signature produced for one protocol context from being replayed
//! in another.

use crate::hash::blake2b_256_multi;
use weft_types::{Digest32, MemberAddress};

/// Domain tag for onboarding attestations.
const ATTESTATION_DOMAIN: &[u8] = b"weft.identity.v1";

/// The digest an identity verifier signs to attest a claimant.
///
/// Binds the claimant's address and the opaque verification hash produced by
/// the off-chain identity check. The claimant presents the signature over
/// this digest in Phase 2 of onboarding.
pub fn attestation_digest(claimant: &MemberAddress, verification_hash: &Digest32) -> Digest32 {
    Digest32::new(blake2b_256_multi(&[
        ATTESTATION_DOMAIN,
        claimant.as_str().as_bytes(),
        verification_hash.as_bytes(),
    ]))
}
