//! Governance audit events.
//!
//! Payload mappings are not externally readable; the event journal is the
//! public audit trail. Each event carries the full structured payload needed
//! to reconstruct engine state off-chain.

use crate::relay::RelayAction;
use serde::{Deserialize, Serialize};
use weft_crypto::SetCommitment;
use weft_types::{
    Digest32, DistributionId, MemberAddress, ParticipantKind, ProposalId, ThreadVariant,
    Timestamp,
};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum GovernanceEvent {
    // --- hub: onboarding ---
    OnboardingProposed {
        id: ProposalId,
        kind: ParticipantKind,
        commitment: SetCommitment,
    },
    OnboardingPassed {
        id: ProposalId,
        kind: ParticipantKind,
    },
    /// A batch found moot at execution (state drifted since proposal) is
    /// discarded silently rather than failing the execution batch.
    OnboardingDiscarded {
        id: ProposalId,
        address: MemberAddress,
    },
    MembershipClaimed {
        id: ProposalId,
        claimant: MemberAddress,
        kind: ParticipantKind,
        verification_hash: Digest32,
    },
    ParticipantRemoved {
        participant: MemberAddress,
    },

    // --- hub: stake removal ---
    StakeRemovalProposed {
        id: ProposalId,
        governor: MemberAddress,
        slash: bool,
        amount: u128,
    },
    StakeRemovalExecuted {
        id: ProposalId,
        governor: MemberAddress,
        slash: bool,
        amount: u128,
    },

    // --- hub: thread creation & relay ---
    ThreadProposed {
        id: ProposalId,
        variant: ThreadVariant,
        leader: MemberAddress,
        name: String,
        symbol: String,
    },
    ThreadDeployed {
        id: ProposalId,
        thread: MemberAddress,
    },
    RelayProposed {
        id: ProposalId,
        target: MemberAddress,
        action: RelayAction,
        payload: Vec<u8>,
    },
    RelayExecuted {
        id: ProposalId,
        target: MemberAddress,
        action: RelayAction,
    },

    // --- thread lifecycle ---
    DescriptorChangeProposed {
        id: ProposalId,
        descriptor: Digest32,
    },
    DescriptorChanged {
        id: ProposalId,
        descriptor: Digest32,
    },
    LeaderChangeProposed {
        id: ProposalId,
        new_leader: MemberAddress,
    },
    LeaderChanged {
        id: ProposalId,
        new_leader: MemberAddress,
    },
    CoordinatorChangeProposed {
        id: ProposalId,
        new_coordinator: MemberAddress,
    },
    CoordinatorChanged {
        id: ProposalId,
        new_coordinator: MemberAddress,
    },
    EcosystemExitProposed {
        id: ProposalId,
        new_coordinator: MemberAddress,
    },
    EcosystemExited {
        id: ProposalId,
        new_coordinator: MemberAddress,
        upgrades_enabled_at: Timestamp,
    },
    DissolutionProposed {
        id: ProposalId,
        purchaser: MemberAddress,
        token: MemberAddress,
        price: u128,
    },
    ThreadDissolved {
        id: ProposalId,
        distribution: DistributionId,
    },
}
