//! Federation governance for WEFT.
//!
//! The hub coordinates a federation of member organizations ("threads").
//! Every privileged action — onboarding, stake removal, thread creation,
//! cross-organization relay, leadership succession, coordinator migration,
//! forced buyout — is a typed, queued payload that executes exactly once.
//! Proposal voting and queuing live in an external lifecycle engine; this
//! crate records payloads against the identifiers that engine allocates and
//! consumes them on completion.

pub mod error;
pub mod events;
pub mod hub;
pub mod introspect;
pub mod lifecycle;
pub mod payload;
pub mod registry;
pub mod relay;
pub mod thread;

pub use error::GovernanceError;
pub use events::GovernanceEvent;
pub use hub::{HubConfig, HubGovernance};
pub use introspect::{hub_kind, thread_kind, Capability, OrgDirectory, ThreadFactory};
pub use lifecycle::{ProposalLifecycle, ProposalState};
pub use payload::{
    CoordinatorChange, DescriptorChange, Dissolution, EcosystemExit, HubPayloadKind,
    LeaderChange, OnboardingBatch, RelayedAction, StakeRemoval, ThreadCreation,
    ThreadPayloadKind,
};
pub use registry::PayloadMap;
pub use relay::{CommonAction, RelayAction, ThreadAction};
pub use thread::{ThreadConfig, ThreadGovernance};
