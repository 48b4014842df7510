//! Typed proposal payloads.
//!
//! One strongly-typed record per pending proposal, stored in a
//! payload-type-specific sparse map keyed by the proposal identifier. A
//! record is deleted the instant it is consumed — deletion is the single
//! authoritative "already executed" flag for that identifier.

use crate::error::GovernanceError;
use crate::relay::RelayAction;
use serde::{Deserialize, Serialize};
use weft_crypto::SetCommitment;
use weft_types::{Digest32, MemberAddress, ParticipantKind, ThreadVariant};

/// Numeric tags for the hub's payload types, as passed through the
/// lifecycle engine's completion hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HubPayloadKind {
    OnboardingBatch,
    StakeRemoval,
    ThreadCreation,
    RelayedAction,
}

impl HubPayloadKind {
    pub fn tag(&self) -> u16 {
        match self {
            Self::OnboardingBatch => 0,
            Self::StakeRemoval => 1,
            Self::ThreadCreation => 2,
            Self::RelayedAction => 3,
        }
    }

    /// Re-derive the kind from a completion-hook tag. The lifecycle engine
    /// only ever passes back tags this contract produced, so an unknown
    /// value is a fatal misconfiguration, not user input.
    pub fn from_tag(tag: u16) -> Result<Self, GovernanceError> {
        match tag {
            0 => Ok(Self::OnboardingBatch),
            1 => Ok(Self::StakeRemoval),
            2 => Ok(Self::ThreadCreation),
            3 => Ok(Self::RelayedAction),
            other => Err(GovernanceError::UnhandledKind(other)),
        }
    }
}

/// Numeric tags for the thread's payload types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThreadPayloadKind {
    DescriptorChange,
    LeaderChange,
    CoordinatorChange,
    EcosystemExit,
    Dissolution,
}

impl ThreadPayloadKind {
    pub fn tag(&self) -> u16 {
        match self {
            Self::DescriptorChange => 16,
            Self::LeaderChange => 17,
            Self::CoordinatorChange => 18,
            Self::EcosystemExit => 19,
            Self::Dissolution => 20,
        }
    }

    pub fn from_tag(tag: u16) -> Result<Self, GovernanceError> {
        match tag {
            16 => Ok(Self::DescriptorChange),
            17 => Ok(Self::LeaderChange),
            18 => Ok(Self::CoordinatorChange),
            19 => Ok(Self::EcosystemExit),
            20 => Ok(Self::Dissolution),
            other => Err(GovernanceError::UnhandledKind(other)),
        }
    }
}

/// Phase-1 onboarding batch: a category plus a compact commitment to the
/// approved address set. Retained (not deleted) once passed so Phase-2
/// claims can reference it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OnboardingBatch {
    pub kind: ParticipantKind,
    pub approved: bool,
    pub commitment: SetCommitment,
}

/// Reduce or forfeit a governor's bonded stake.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StakeRemoval {
    pub governor: MemberAddress,
    /// `true` = forfeit (slash), `false` = return (unbond).
    pub slash: bool,
    pub amount: u128,
}

/// Deploy a new thread through the factory.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThreadCreation {
    pub variant: ThreadVariant,
    pub leader: MemberAddress,
    pub name: String,
    pub symbol: String,
    /// Opaque configuration, validated structurally by the factory pre-vote.
    pub config: Vec<u8>,
}

/// A locked-down action relayed to a thread's own governance surface.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RelayedAction {
    pub target: MemberAddress,
    pub action: RelayAction,
    /// Opaque payload bytes; the proposing UI is trusted to present them
    /// for human review before a vote.
    pub payload: Vec<u8>,
}

/// Replace the thread's off-chain charter descriptor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DescriptorChange {
    pub descriptor: Digest32,
}

/// Hand leadership to a new governor; the new leader must self-trigger
/// completion to signal consent.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LeaderChange {
    pub new_leader: MemberAddress,
}

/// Re-parent the thread under a new coordinator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CoordinatorChange {
    pub new_coordinator: MemberAddress,
}

/// Coordinator change plus delayed enablement of code upgrades.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EcosystemExit {
    pub new_coordinator: MemberAddress,
}

/// Forced buyout: liquidate the thread's token into a cash settlement.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Dissolution {
    pub purchaser: MemberAddress,
    /// Address of the settlement token ledger.
    pub token: MemberAddress,
    pub price: u128,
}
