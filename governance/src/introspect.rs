//! Collaborator interfaces: capability introspection, organization directory,
//! and the thread factory.
//!
//! Hub and thread reference each other only by address plus these handle
//! traits, never as compile-time types — capability queries replace what
//! would otherwise be a circular type dependency.

use crate::relay::RelayAction;
use std::sync::Arc;
use weft_crypto::kind_digest;
use weft_ledger::TokenLedger;
use weft_types::{Digest32, GovernorStatus, MemberAddress, ThreadVariant};

/// Named capability interfaces an organization can support.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    Hub,
    Thread,
}

/// The self-reported contract-kind digest for hubs.
pub fn hub_kind() -> Digest32 {
    kind_digest("weft.hub")
}

/// The self-reported contract-kind digest for threads.
pub fn thread_kind() -> Digest32 {
    kind_digest("weft.thread")
}

/// Directory of federated organizations, queried by address.
///
/// In a deployment this is backed by the live contract registry; in tests by
/// a nullable. All lookups are by handle, keeping hub and thread decoupled.
pub trait OrgDirectory: Send + Sync {
    /// The organization's self-reported contract-kind digest.
    fn contract_kind(&self, org: &MemberAddress) -> Option<Digest32>;

    /// Whether the organization supports a named capability interface.
    fn supports(&self, org: &MemberAddress, capability: Capability) -> bool;

    /// The organization's current voting period in seconds, if it exposes
    /// a lifecycle engine.
    fn voting_period(&self, org: &MemberAddress) -> Option<u64>;

    /// Governor status as recorded by the hub.
    fn governor_status(&self, governor: &MemberAddress) -> GovernorStatus;

    /// Resolve a token ledger handle by address.
    fn token(&self, token: &MemberAddress) -> Option<Arc<dyn TokenLedger>>;

    /// Perform an allow-listed cross-call against `target`'s governance
    /// surface. On failure, returns the callee's raw failure payload.
    fn relay(
        &self,
        target: &MemberAddress,
        action: RelayAction,
        payload: &[u8],
    ) -> Result<(), Vec<u8>>;
}

/// Deploys new threads. Structural validation runs before a proposal is even
/// opened, so invalid configurations never reach a vote.
pub trait ThreadFactory: Send + Sync {
    /// Validate a variant + opaque configuration pre-vote.
    fn validate(&self, variant: ThreadVariant, config: &[u8]) -> Result<(), String>;

    /// Deploy the thread post-vote; returns its address.
    fn deploy(
        &self,
        variant: ThreadVariant,
        leader: &MemberAddress,
        name: &str,
        symbol: &str,
        config: &[u8],
    ) -> Result<MemberAddress, String>;
}
