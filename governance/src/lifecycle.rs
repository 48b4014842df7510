//! Interface to the external proposal-lifecycle engine.
//!
//! Voting, queuing, and cancellation live outside this crate. The engine
//! allocates monotonically increasing proposal identifiers, walks each
//! proposal through its states, and invokes the governance core's completion
//! hook exactly once per executed proposal. Cancelled proposals leave their
//! payload records orphaned and inert — an accepted leak, not a correctness
//! issue.

use serde::{Deserialize, Serialize};
use weft_types::ProposalId;

/// The externally driven lifecycle states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalState {
    Active,
    Queued,
    Executed,
    Cancelled,
}

/// The proposal-lifecycle engine consumed by the governance core.
pub trait ProposalLifecycle: Send + Sync {
    /// Open voting on a new proposal; returns the allocated identifier.
    ///
    /// Identifiers are unbounded, strictly increasing, and never reused for
    /// the lifetime of a deploying engine instance. `info` is the
    /// human-readable rationale shown to voters.
    fn create_proposal(&self, kind_tag: u16, info: &str) -> ProposalId;

    /// The engine's current voting period, in seconds.
    fn voting_period(&self) -> u64;
}
