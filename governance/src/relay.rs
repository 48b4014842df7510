//! Allow-listed actions for cross-organization relay.
//!
//! Hub governance may trigger a specific action on a thread's own governance
//! surface, but only from a fixed allow-list. The action is addressed by a
//! namespace tag plus an action tag; unrecognized values in either namespace
//! fail closed. Two thread actions are explicitly unrelayable: participant
//! removal (must stay at the hub) and coordinator change (must be
//! self-initiated by the thread).

use crate::error::GovernanceError;
use serde::{Deserialize, Serialize};

/// Namespace tag for actions shared by every organization kind.
pub const NAMESPACE_COMMON: u8 = 0;
/// Namespace tag for thread-specific actions.
pub const NAMESPACE_THREAD: u8 = 1;

/// Actions every organization's governance surface exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommonAction {
    PaperResolution,
    CodeUpgrade,
    TreasuryAction,
}

impl CommonAction {
    fn from_tag(tag: u16) -> Result<Self, GovernanceError> {
        match tag {
            0 => Ok(Self::PaperResolution),
            1 => Ok(Self::CodeUpgrade),
            2 => Ok(Self::TreasuryAction),
            other => Err(GovernanceError::UnhandledKind(other)),
        }
    }
}

/// Thread-specific actions; only a subset is relayable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThreadAction {
    DescriptorChange,
    LeaderChange,
    CoordinatorChange,
    EcosystemExit,
    Dissolution,
    ParticipantRemoval,
}

impl ThreadAction {
    fn from_tag(tag: u16) -> Result<Self, GovernanceError> {
        match tag {
            0 => Ok(Self::DescriptorChange),
            1 => Ok(Self::LeaderChange),
            2 => Ok(Self::CoordinatorChange),
            3 => Ok(Self::EcosystemExit),
            4 => Ok(Self::Dissolution),
            5 => Ok(Self::ParticipantRemoval),
            other => Err(GovernanceError::UnhandledKind(other)),
        }
    }
}

/// A relayable action, fully resolved from its numeric tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelayAction {
    Common(CommonAction),
    Thread(ThreadAction),
}

impl RelayAction {
    /// Resolve and police the allow-list. Fails closed on unknown tags and
    /// rejects the two explicitly unrelayable thread actions.
    pub fn from_tags(namespace: u8, tag: u16) -> Result<Self, GovernanceError> {
        match namespace {
            NAMESPACE_COMMON => Ok(Self::Common(CommonAction::from_tag(tag)?)),
            NAMESPACE_THREAD => {
                let action = ThreadAction::from_tag(tag)?;
                match action {
                    ThreadAction::ParticipantRemoval => {
                        Err(GovernanceError::RemovalMustStayOnHub)
                    }
                    ThreadAction::CoordinatorChange => {
                        Err(GovernanceError::CoordinatorChangeNotRelayable)
                    }
                    _ => Ok(Self::Thread(action)),
                }
            }
            other => Err(GovernanceError::UnhandledKind(other as u16)),
        }
    }
}
