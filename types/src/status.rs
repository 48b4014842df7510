//! Status enums for participants, governors, and thread variants.

use serde::{Deserialize, Serialize};

/// The verified-identity category of a participant.
///
/// The declaration order defines a total order: `Removed` sorts below every
/// valid category, which gates re-onboarding. Monotonicity invariant: once
/// `Removed`, an address never returns to `Null` — the governance engine only
/// ever raises a status out of `Null` or sets `Removed`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ParticipantKind {
    /// No status — the address has never been onboarded.
    #[default]
    Null,
    /// Removed from the federation; may not re-enter via `Null` paths.
    Removed,
    /// Seeded at engine initialization; not proposable afterwards.
    Genesis,
    /// The verified-identity operator whose key signs onboarding attestations.
    Verifier,
    /// Elected-operator candidate; accrues slashable stake once active.
    GovernorCandidate,
    /// An individual member.
    Individual,
    /// A member organization.
    Organization,
}

impl ParticipantKind {
    /// Whether this kind commits to exactly one address at onboarding time.
    pub fn is_single_identity(&self) -> bool {
        matches!(self, Self::Verifier | Self::GovernorCandidate)
    }

    /// Whether an address with this status counts as a current member.
    pub fn is_member(&self) -> bool {
        *self > Self::Removed
    }
}

/// The lifecycle status of a governor.
///
/// `Null → Unverified` at batch approval, `Unverified → Active` at individual
/// claim, any → `Removed` on membership removal. Stake is only slashable for
/// governors that reached `Active`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GovernorStatus {
    #[default]
    Null,
    /// Approved in a batch but has not yet claimed and consented.
    Unverified,
    /// Claimed, consented, and bonded — slashable.
    Active,
    Removed,
}

/// The structural variant of a thread, forwarded opaquely to the factory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThreadVariant(pub u8);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removed_sorts_below_every_valid_category() {
        for kind in [
            ParticipantKind::Genesis,
            ParticipantKind::Verifier,
            ParticipantKind::GovernorCandidate,
            ParticipantKind::Individual,
            ParticipantKind::Organization,
        ] {
            assert!(ParticipantKind::Removed < kind);
            assert!(kind.is_member());
        }
        assert!(!ParticipantKind::Null.is_member());
        assert!(!ParticipantKind::Removed.is_member());
    }

    #[test]
    fn single_identity_kinds() {
        assert!(ParticipantKind::Verifier.is_single_identity());
        assert!(ParticipantKind::GovernorCandidate.is_single_identity());
        assert!(!ParticipantKind::Individual.is_single_identity());
        assert!(!ParticipantKind::Organization.is_single_identity());
    }
}
