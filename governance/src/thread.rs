//! Thread governance — lifecycle state machine for a single member
//! organization under a hub coordinator.
//!
//! Same dispatch discipline as the hub: typed payloads recorded at proposal
//! time, consumed at completion, failed side effects restored. The thread
//! additionally enforces caller consent on completions that hand over power
//! (leadership, dissolution) and gates code upgrades behind an enablement
//! deadline armed on ecosystem exit.

use crate::error::GovernanceError;
use crate::events::GovernanceEvent;
use crate::introspect::{hub_kind, Capability, OrgDirectory};
use crate::lifecycle::ProposalLifecycle;
use crate::payload::{
    CoordinatorChange, DescriptorChange, Dissolution, EcosystemExit, LeaderChange,
    ThreadPayloadKind,
};
use crate::registry::PayloadMap;
use std::collections::HashSet;
use std::sync::Arc;
use weft_ledger::{LedgerError, RevenueLedger, TokenLedger};
use weft_types::{Digest32, GovernorStatus, MemberAddress, ProposalId, Timestamp};

/// Grace period added on top of the new coordinator's voting period before
/// code upgrades unlock after an ecosystem exit.
pub const UPGRADE_BUFFER_SECS: u64 = 7 * 24 * 60 * 60;

/// Static configuration fixed when a thread is deployed.
pub struct ThreadConfig {
    /// The thread's own address.
    pub address: MemberAddress,
    pub leader: MemberAddress,
    /// The hub this thread is parented under.
    pub coordinator: MemberAddress,
    /// Digest of the off-chain charter document.
    pub descriptor: Digest32,
    /// Participants exempt from removal, fixed at deployment.
    pub irremovable: HashSet<MemberAddress>,
    /// Digest of the currently live implementation code.
    pub live_code: Digest32,
    /// Highest release-channel code digest upgradable to without a timelock.
    pub release_ceiling: Digest32,
}

/// The governance engine of one thread.
pub struct ThreadGovernance {
    address: MemberAddress,
    leader: MemberAddress,
    coordinator: MemberAddress,
    descriptor: Digest32,
    irremovable: HashSet<MemberAddress>,
    live_code: Digest32,
    release_ceiling: Digest32,
    /// Armed once, on ecosystem exit. `None` means upgrades stay gated to
    /// the release channel.
    upgrade_enabled_at: Option<Timestamp>,
    dissolved: bool,

    lifecycle: Arc<dyn ProposalLifecycle>,
    token: Arc<dyn TokenLedger>,
    directory: Arc<dyn OrgDirectory>,
    revenue: RevenueLedger,

    descriptor_changes: PayloadMap<DescriptorChange>,
    leader_changes: PayloadMap<LeaderChange>,
    coordinator_changes: PayloadMap<CoordinatorChange>,
    exits: PayloadMap<EcosystemExit>,
    dissolutions: PayloadMap<Dissolution>,

    events: Vec<GovernanceEvent>,
}

impl ThreadGovernance {
    pub fn new(
        config: ThreadConfig,
        lifecycle: Arc<dyn ProposalLifecycle>,
        token: Arc<dyn TokenLedger>,
        directory: Arc<dyn OrgDirectory>,
    ) -> Self {
        let revenue = RevenueLedger::new(config.address.clone(), token.clone());
        Self {
            address: config.address,
            leader: config.leader,
            coordinator: config.coordinator,
            descriptor: config.descriptor,
            irremovable: config.irremovable,
            live_code: config.live_code,
            release_ceiling: config.release_ceiling,
            upgrade_enabled_at: None,
            dissolved: false,
            lifecycle,
            token,
            directory,
            revenue,
            descriptor_changes: PayloadMap::new(),
            leader_changes: PayloadMap::new(),
            coordinator_changes: PayloadMap::new(),
            exits: PayloadMap::new(),
            dissolutions: PayloadMap::new(),
            events: Vec::new(),
        }
    }

    pub fn address(&self) -> &MemberAddress {
        &self.address
    }

    pub fn leader(&self) -> &MemberAddress {
        &self.leader
    }

    pub fn coordinator(&self) -> &MemberAddress {
        &self.coordinator
    }

    pub fn descriptor(&self) -> Digest32 {
        self.descriptor
    }

    pub fn is_dissolved(&self) -> bool {
        self.dissolved
    }

    pub fn is_irremovable(&self, participant: &MemberAddress) -> bool {
        self.irremovable.contains(participant)
    }

    pub fn upgrade_enabled_at(&self) -> Option<Timestamp> {
        self.upgrade_enabled_at
    }

    pub fn revenue(&self) -> &RevenueLedger {
        &self.revenue
    }

    pub fn revenue_mut(&mut self) -> &mut RevenueLedger {
        &mut self.revenue
    }

    pub fn events(&self) -> &[GovernanceEvent] {
        &self.events
    }

    /// Whether `proposed_code` may be installed at `now`.
    ///
    /// Allowed once the exit deadline has passed, or when the code is the
    /// one already live, or when it sits at or below the release-channel
    /// ceiling (bytewise digest order).
    pub fn upgrade_allowed(&self, proposed_code: Digest32, now: Timestamp) -> bool {
        if let Some(deadline) = self.upgrade_enabled_at {
            if deadline.has_passed(now) {
                return true;
            }
        }
        proposed_code == self.live_code || proposed_code.as_bytes() <= self.release_ceiling.as_bytes()
    }

    /// Thread proposals are open to token holders and the leader.
    fn require_stakeholder(&self, proposer: &MemberAddress) -> Result<(), GovernanceError> {
        if *proposer == self.leader || self.token.balance_of(proposer) > 0 {
            Ok(())
        } else {
            Err(GovernanceError::NotMember(proposer.clone()))
        }
    }

    /// The new coordinator must self-report as a hub and expose the hub
    /// capability surface, or re-parenting would strand the thread.
    fn require_hub(&self, candidate: &MemberAddress) -> Result<(), GovernanceError> {
        if self.directory.contract_kind(candidate) != Some(hub_kind()) {
            return Err(GovernanceError::DifferentContract(candidate.clone()));
        }
        if !self.directory.supports(candidate, Capability::Hub) {
            return Err(GovernanceError::UnsupportedInterface(candidate.clone()));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Proposals
    // ------------------------------------------------------------------

    pub fn propose_descriptor_change(
        &mut self,
        proposer: &MemberAddress,
        descriptor: Digest32,
        info: &str,
    ) -> Result<ProposalId, GovernanceError> {
        self.require_stakeholder(proposer)?;
        let id = self
            .lifecycle
            .create_proposal(ThreadPayloadKind::DescriptorChange.tag(), info);
        self.descriptor_changes
            .record(id, DescriptorChange { descriptor });
        tracing::info!(%id, descriptor = %descriptor.to_hex(), "descriptor change proposed");
        self.events
            .push(GovernanceEvent::DescriptorChangeProposed { id, descriptor });
        Ok(id)
    }

    pub fn propose_leader_change(
        &mut self,
        proposer: &MemberAddress,
        new_leader: &MemberAddress,
        info: &str,
    ) -> Result<ProposalId, GovernanceError> {
        self.require_stakeholder(proposer)?;
        let status = self.directory.governor_status(new_leader);
        if status != GovernorStatus::Active {
            return Err(GovernanceError::NotActiveGovernor {
                governor: new_leader.clone(),
                status,
            });
        }

        let id = self
            .lifecycle
            .create_proposal(ThreadPayloadKind::LeaderChange.tag(), info);
        self.leader_changes.record(
            id,
            LeaderChange {
                new_leader: new_leader.clone(),
            },
        );
        tracing::info!(%id, %new_leader, "leader change proposed");
        self.events.push(GovernanceEvent::LeaderChangeProposed {
            id,
            new_leader: new_leader.clone(),
        });
        Ok(id)
    }

    pub fn propose_coordinator_change(
        &mut self,
        proposer: &MemberAddress,
        new_coordinator: &MemberAddress,
        info: &str,
    ) -> Result<ProposalId, GovernanceError> {
        self.require_stakeholder(proposer)?;
        self.require_hub(new_coordinator)?;

        let id = self
            .lifecycle
            .create_proposal(ThreadPayloadKind::CoordinatorChange.tag(), info);
        self.coordinator_changes.record(
            id,
            CoordinatorChange {
                new_coordinator: new_coordinator.clone(),
            },
        );
        tracing::info!(%id, %new_coordinator, "coordinator change proposed");
        self.events.push(GovernanceEvent::CoordinatorChangeProposed {
            id,
            new_coordinator: new_coordinator.clone(),
        });
        Ok(id)
    }

    pub fn propose_ecosystem_exit(
        &mut self,
        proposer: &MemberAddress,
        new_coordinator: &MemberAddress,
        info: &str,
    ) -> Result<ProposalId, GovernanceError> {
        self.require_stakeholder(proposer)?;
        if *new_coordinator == self.coordinator {
            return Err(GovernanceError::NotLeaving);
        }
        self.require_hub(new_coordinator)?;
        if self.directory.voting_period(new_coordinator).is_none() {
            return Err(GovernanceError::UnsupportedInterface(
                new_coordinator.clone(),
            ));
        }

        let id = self
            .lifecycle
            .create_proposal(ThreadPayloadKind::EcosystemExit.tag(), info);
        self.exits.record(
            id,
            EcosystemExit {
                new_coordinator: new_coordinator.clone(),
            },
        );
        tracing::info!(%id, %new_coordinator, "ecosystem exit proposed");
        self.events.push(GovernanceEvent::EcosystemExitProposed {
            id,
            new_coordinator: new_coordinator.clone(),
        });
        Ok(id)
    }

    pub fn propose_dissolution(
        &mut self,
        proposer: &MemberAddress,
        purchaser: &MemberAddress,
        token: &MemberAddress,
        price: u128,
        info: &str,
    ) -> Result<ProposalId, GovernanceError> {
        self.require_stakeholder(proposer)?;
        if price == 0 {
            return Err(GovernanceError::ZeroPrice);
        }
        if self.directory.token(token).is_none() {
            return Err(LedgerError::UnknownToken(token.to_string()).into());
        }

        let id = self
            .lifecycle
            .create_proposal(ThreadPayloadKind::Dissolution.tag(), info);
        self.dissolutions.record(
            id,
            Dissolution {
                purchaser: purchaser.clone(),
                token: token.clone(),
                price,
            },
        );
        tracing::info!(%id, %purchaser, %token, price, "dissolution proposed");
        self.events.push(GovernanceEvent::DissolutionProposed {
            id,
            purchaser: purchaser.clone(),
            token: token.clone(),
            price,
        });
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Completion hook
    // ------------------------------------------------------------------

    /// Invoked by the lifecycle engine once per executed proposal.
    ///
    /// `caller` is the account that triggered execution — completions that
    /// hand over power require the receiving party to be the trigger.
    pub fn on_complete(
        &mut self,
        id: ProposalId,
        tag: u16,
        caller: &MemberAddress,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        match ThreadPayloadKind::from_tag(tag)? {
            ThreadPayloadKind::DescriptorChange => self.complete_descriptor_change(id),
            ThreadPayloadKind::LeaderChange => self.complete_leader_change(id, caller),
            ThreadPayloadKind::CoordinatorChange => self.complete_coordinator_change(id),
            ThreadPayloadKind::EcosystemExit => self.complete_ecosystem_exit(id, now),
            ThreadPayloadKind::Dissolution => self.complete_dissolution(id, caller),
        }
    }

    fn complete_descriptor_change(&mut self, id: ProposalId) -> Result<(), GovernanceError> {
        let Some(change) = self.descriptor_changes.take(id) else {
            return Ok(());
        };
        self.descriptor = change.descriptor;
        tracing::info!(%id, descriptor = %change.descriptor.to_hex(), "descriptor changed");
        self.events.push(GovernanceEvent::DescriptorChanged {
            id,
            descriptor: change.descriptor,
        });
        Ok(())
    }

    /// Governor status is checked at proposal time only; leadership transfer
    /// hinges on the new leader's consent, expressed by being the caller.
    fn complete_leader_change(
        &mut self,
        id: ProposalId,
        caller: &MemberAddress,
    ) -> Result<(), GovernanceError> {
        let Some(change) = self.leader_changes.take(id) else {
            return Ok(());
        };
        if change.new_leader != *caller {
            let expected = change.new_leader.clone();
            self.leader_changes.record(id, change);
            return Err(GovernanceError::NotGovernor {
                expected,
                actual: caller.clone(),
            });
        }
        self.leader = change.new_leader.clone();
        tracing::info!(%id, new_leader = %change.new_leader, "leader changed");
        self.events.push(GovernanceEvent::LeaderChanged {
            id,
            new_leader: change.new_leader,
        });
        Ok(())
    }

    fn complete_coordinator_change(&mut self, id: ProposalId) -> Result<(), GovernanceError> {
        let Some(change) = self.coordinator_changes.take(id) else {
            return Ok(());
        };
        self.coordinator = change.new_coordinator.clone();
        self.token.reparent_whitelist(&change.new_coordinator);
        tracing::info!(%id, new_coordinator = %change.new_coordinator, "coordinator changed");
        self.events.push(GovernanceEvent::CoordinatorChanged {
            id,
            new_coordinator: change.new_coordinator,
        });
        Ok(())
    }

    fn complete_ecosystem_exit(
        &mut self,
        id: ProposalId,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        let Some(exit) = self.exits.take(id) else {
            return Ok(());
        };
        let Some(period) = self.directory.voting_period(&exit.new_coordinator) else {
            let candidate = exit.new_coordinator.clone();
            self.exits.record(id, exit);
            return Err(GovernanceError::UnsupportedInterface(candidate));
        };

        // The deadline is fixed here, once. Later voting-period changes at
        // the new coordinator do not move it.
        let enabled_at = now.plus(period + UPGRADE_BUFFER_SECS);
        self.upgrade_enabled_at = Some(enabled_at);
        self.coordinator = exit.new_coordinator.clone();
        self.token.reparent_whitelist(&exit.new_coordinator);

        tracing::info!(%id, new_coordinator = %exit.new_coordinator, ?enabled_at, "ecosystem exited");
        self.events.push(GovernanceEvent::EcosystemExited {
            id,
            new_coordinator: exit.new_coordinator,
            upgrades_enabled_at: enabled_at,
        });
        Ok(())
    }

    /// Forced buyout. Pulls the settlement from the purchaser (who must have
    /// approved this thread as spender), freezes the thread's own token at
    /// its final holdings, and opens a pro-rata distribution against them.
    fn complete_dissolution(
        &mut self,
        id: ProposalId,
        caller: &MemberAddress,
    ) -> Result<(), GovernanceError> {
        let Some(buyout) = self.dissolutions.take(id) else {
            return Ok(());
        };
        if *caller != self.leader {
            self.dissolutions.record(id, buyout);
            return Err(GovernanceError::NotGovernor {
                expected: self.leader.clone(),
                actual: caller.clone(),
            });
        }
        let Some(settlement) = self.directory.token(&buyout.token) else {
            let token = buyout.token.to_string();
            self.dissolutions.record(id, buyout);
            return Err(LedgerError::UnknownToken(token).into());
        };

        // Pull the price first: a purchaser without funds or approval must
        // leave the thread fully intact.
        let distribution = match self
            .revenue
            .distribute(settlement, &buyout.purchaser, buyout.price)
        {
            Ok(distribution) => distribution,
            Err(e) => {
                self.dissolutions.record(id, buyout);
                return Err(e.into());
            }
        };
        self.token.pause();
        self.dissolved = true;

        tracing::info!(%id, %distribution, "thread dissolved");
        self.events
            .push(GovernanceEvent::ThreadDissolved { id, distribution });
        Ok(())
    }
}
