use thiserror::Error;
use weft_ledger::LedgerError;
use weft_types::{GovernorStatus, MemberAddress, ParticipantKind, ProposalId};

#[derive(Debug, Error)]
pub enum GovernanceError {
    // --- validation errors (proposal time) ---
    #[error("cannot propose onboarding for category {0:?}")]
    InvalidKind(ParticipantKind),

    #[error("commitment for a single-identity category must decode to exactly one address")]
    CommitmentNotSingle,

    #[error("{0} already holds a membership status")]
    AlreadyApproved(MemberAddress),

    #[error("{0} is not a current member")]
    NotMember(MemberAddress),

    #[error("{governor} is not an active governor (status {status:?})")]
    NotActiveGovernor {
        governor: MemberAddress,
        status: GovernorStatus,
    },

    #[error("display name must be 3–50 units, got {0}")]
    InvalidNameLength(usize),

    #[error("symbol must be 2–5 units, got {0}")]
    InvalidSymbolLength(usize),

    #[error("thread factory rejected the configuration: {0}")]
    FactoryRejected(String),

    #[error("{0} does not self-report as the expected contract kind")]
    DifferentContract(MemberAddress),

    #[error("participant removal must be proposed at the hub, not relayed")]
    RemovalMustStayOnHub,

    #[error("coordinator change must be self-initiated by the thread, not relayed")]
    CoordinatorChangeNotRelayable,

    #[error("buyout price must be non-zero")]
    ZeroPrice,

    #[error("proposed coordinator is the current coordinator")]
    NotLeaving,

    #[error("{0} is exempt from removal")]
    Irremovable(MemberAddress),

    // --- claim / consent errors ---
    #[error("claimant address is empty")]
    InvalidAddress,

    #[error("{0} already holds a membership status")]
    ParticipantAlreadyApproved(MemberAddress),

    #[error("onboarding batch {0} has not passed")]
    BatchNotPassed(ProposalId),

    #[error("attestation signature does not match the current identity verifier")]
    InvalidVerifierSignature,

    #[error("membership proof does not match the batch commitment")]
    NotInCommitment,

    #[error("completion requires {expected}, called by {actual}")]
    NotGovernor {
        expected: MemberAddress,
        actual: MemberAddress,
    },

    // --- capability / relay errors ---
    #[error("{0} does not support the required capability interface")]
    UnsupportedInterface(MemberAddress),

    #[error("relayed call to {target} failed: 0x{}", hex::encode(detail))]
    RelayFailed {
        target: MemberAddress,
        detail: Vec<u8>,
    },

    // --- programming / configuration errors ---
    #[error("unhandled payload or action tag {0}")]
    UnhandledKind(u16),

    // --- downstream ledger failures, propagated unmodified ---
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
