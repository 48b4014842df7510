//! Fundamental types for the WEFT federation engine.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: member addresses, digests, keys, timestamps, identifiers, and
//! the membership status enums.

pub mod address;
pub mod digest;
pub mod ids;
pub mod keys;
pub mod status;
pub mod time;

pub use address::MemberAddress;
pub use digest::Digest32;
pub use ids::{BlockHeight, DistributionId, ProposalId};
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use status::{GovernorStatus, ParticipantKind, ThreadVariant};
pub use time::Timestamp;
