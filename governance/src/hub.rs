//! Hub governance — payload dispatch, identity onboarding, stake removal,
//! thread creation, and cross-organization relay.
//!
//! Every `propose_*` entry point validates, records a typed payload at the
//! identifier the lifecycle engine allocates, emits the full payload as an
//! event, and leaves voting to the engine. The single completion hook
//! consumes the payload and performs the side effect; a failed side effect
//! re-records the payload, mirroring transactional revert, so a completion
//! either fully lands or leaves no trace.

use crate::error::GovernanceError;
use crate::events::GovernanceEvent;
use crate::introspect::{thread_kind, OrgDirectory, ThreadFactory};
use crate::lifecycle::ProposalLifecycle;
use crate::payload::{HubPayloadKind, OnboardingBatch, RelayedAction, StakeRemoval, ThreadCreation};
use crate::registry::PayloadMap;
use crate::relay::RelayAction;
use std::collections::HashMap;
use std::sync::Arc;
use weft_crypto::{attestation_digest, derive_address, verify_signature, MembershipProof, SetCommitment};
use weft_ledger::{StakeLedger, TokenLedger};
use weft_types::{
    Digest32, GovernorStatus, MemberAddress, ParticipantKind, ProposalId, PublicKey, Signature,
    ThreadVariant,
};

/// Display-name length bounds for new threads, in characters.
/// Character set is deliberately not validated to bound compute cost.
const NAME_LEN: std::ops::RangeInclusive<usize> = 3..=50;
const SYMBOL_LEN: std::ops::RangeInclusive<usize> = 2..=5;

/// Static configuration fixed at hub initialization.
pub struct HubConfig {
    /// The hub's own address.
    pub address: MemberAddress,
    /// Members seeded with `Genesis` status; not proposable afterwards.
    pub genesis: Vec<MemberAddress>,
    /// The identity verifier's address.
    pub verifier: MemberAddress,
    /// The identity verifier's attestation signing key.
    pub verifier_key: PublicKey,
}

/// The hub's governance engine.
///
/// Identity and governor registries are process-wide state owned by this
/// instance and mutated only through the documented entry points.
pub struct HubGovernance {
    address: MemberAddress,
    lifecycle: Arc<dyn ProposalLifecycle>,
    token: Arc<dyn TokenLedger>,
    stake: Arc<dyn StakeLedger>,
    factory: Arc<dyn ThreadFactory>,
    directory: Arc<dyn OrgDirectory>,

    verifier: MemberAddress,
    verifier_key: PublicKey,
    participants: HashMap<MemberAddress, ParticipantKind>,
    governors: HashMap<MemberAddress, GovernorStatus>,

    onboarding: PayloadMap<OnboardingBatch>,
    stake_removals: PayloadMap<StakeRemoval>,
    thread_creations: PayloadMap<ThreadCreation>,
    relays: PayloadMap<RelayedAction>,

    events: Vec<GovernanceEvent>,
}

impl HubGovernance {
    pub fn new(
        config: HubConfig,
        lifecycle: Arc<dyn ProposalLifecycle>,
        token: Arc<dyn TokenLedger>,
        stake: Arc<dyn StakeLedger>,
        factory: Arc<dyn ThreadFactory>,
        directory: Arc<dyn OrgDirectory>,
    ) -> Self {
        let mut participants = HashMap::new();
        for member in &config.genesis {
            participants.insert(member.clone(), ParticipantKind::Genesis);
            token.whitelist(member, Digest32::ZERO);
        }
        participants.insert(config.verifier.clone(), ParticipantKind::Verifier);

        Self {
            address: config.address,
            lifecycle,
            token,
            stake,
            factory,
            directory,
            verifier: config.verifier,
            verifier_key: config.verifier_key,
            participants,
            governors: HashMap::new(),
            onboarding: PayloadMap::new(),
            stake_removals: PayloadMap::new(),
            thread_creations: PayloadMap::new(),
            relays: PayloadMap::new(),
            events: Vec::new(),
        }
    }

    pub fn address(&self) -> &MemberAddress {
        &self.address
    }

    pub fn participant_kind(&self, address: &MemberAddress) -> ParticipantKind {
        self.participants.get(address).copied().unwrap_or_default()
    }

    pub fn governor_status(&self, address: &MemberAddress) -> GovernorStatus {
        self.governors.get(address).copied().unwrap_or_default()
    }

    pub fn verifier_key(&self) -> &PublicKey {
        &self.verifier_key
    }

    /// The audit event journal.
    pub fn events(&self) -> &[GovernanceEvent] {
        &self.events
    }

    fn require_member(&self, proposer: &MemberAddress) -> Result<(), GovernanceError> {
        if self.participant_kind(proposer).is_member() {
            Ok(())
        } else {
            Err(GovernanceError::NotMember(proposer.clone()))
        }
    }

    // ------------------------------------------------------------------
    // Onboarding — Phase 1 (batch proposal)
    // ------------------------------------------------------------------

    /// Propose a batch of candidates for `kind`, committed to as a set.
    pub fn propose_onboarding(
        &mut self,
        proposer: &MemberAddress,
        kind: ParticipantKind,
        commitment: SetCommitment,
        info: &str,
    ) -> Result<ProposalId, GovernanceError> {
        self.require_member(proposer)?;
        // Null is not a category; Genesis is seeded at initialization only.
        if matches!(kind, ParticipantKind::Null | ParticipantKind::Removed | ParticipantKind::Genesis)
        {
            return Err(GovernanceError::InvalidKind(kind));
        }
        if kind.is_single_identity() {
            let address = commitment
                .as_single()
                .ok_or(GovernanceError::CommitmentNotSingle)?;
            if self.participant_kind(address) != ParticipantKind::Null {
                return Err(GovernanceError::AlreadyApproved(address.clone()));
            }
        }

        let id = self
            .lifecycle
            .create_proposal(HubPayloadKind::OnboardingBatch.tag(), info);
        self.onboarding.record(
            id,
            OnboardingBatch {
                kind,
                approved: false,
                commitment: commitment.clone(),
            },
        );
        tracing::info!(%id, ?kind, "onboarding batch proposed");
        self.events.push(GovernanceEvent::OnboardingProposed {
            id,
            kind,
            commitment,
        });
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Onboarding — Phase 2 (individual claim)
    // ------------------------------------------------------------------

    /// Claim membership under a passed batch.
    ///
    /// The claimant presents the verifier's signature over the attestation
    /// digest binding (claimant, verification hash), plus a proof that the
    /// claimant belongs to the batch's committed set.
    pub fn claim_membership(
        &mut self,
        claimant: &MemberAddress,
        batch_id: ProposalId,
        verification_hash: Digest32,
        signature: &Signature,
        proof: &MembershipProof,
    ) -> Result<(), GovernanceError> {
        if claimant.is_empty() {
            return Err(GovernanceError::InvalidAddress);
        }
        if self.participant_kind(claimant) != ParticipantKind::Null {
            return Err(GovernanceError::ParticipantAlreadyApproved(claimant.clone()));
        }
        let batch = match self.onboarding.get(batch_id) {
            Some(batch) if batch.approved => batch,
            _ => return Err(GovernanceError::BatchNotPassed(batch_id)),
        };

        let digest = attestation_digest(claimant, &verification_hash);
        if !verify_signature(digest.as_bytes(), signature, &self.verifier_key) {
            return Err(GovernanceError::InvalidVerifierSignature);
        }
        if !batch.commitment.verify_membership(claimant, proof) {
            return Err(GovernanceError::NotInCommitment);
        }

        let kind = batch.kind;
        self.participants.insert(claimant.clone(), kind);
        if kind == ParticipantKind::GovernorCandidate {
            self.governors.insert(claimant.clone(), GovernorStatus::Active);
            // The batch was scoped to exactly one address — nothing left to claim.
            self.onboarding.remove(batch_id);
        }
        self.token.whitelist(claimant, verification_hash);

        tracing::info!(%batch_id, %claimant, ?kind, "membership claimed");
        self.events.push(GovernanceEvent::MembershipClaimed {
            id: batch_id,
            claimant: claimant.clone(),
            kind,
            verification_hash,
        });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Stake removal
    // ------------------------------------------------------------------

    pub fn propose_stake_removal(
        &mut self,
        proposer: &MemberAddress,
        governor: &MemberAddress,
        slash: bool,
        amount: u128,
        info: &str,
    ) -> Result<ProposalId, GovernanceError> {
        self.require_member(proposer)?;
        let status = self.governor_status(governor);
        // Removed governors held Active status once; their residual stake is
        // still removable.
        if !matches!(status, GovernorStatus::Active | GovernorStatus::Removed) {
            return Err(GovernanceError::NotActiveGovernor {
                governor: governor.clone(),
                status,
            });
        }

        let id = self
            .lifecycle
            .create_proposal(HubPayloadKind::StakeRemoval.tag(), info);
        self.stake_removals.record(
            id,
            StakeRemoval {
                governor: governor.clone(),
                slash,
                amount,
            },
        );
        tracing::info!(%id, %governor, slash, amount, "stake removal proposed");
        self.events.push(GovernanceEvent::StakeRemovalProposed {
            id,
            governor: governor.clone(),
            slash,
            amount,
        });
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Thread creation
    // ------------------------------------------------------------------

    pub fn propose_thread(
        &mut self,
        proposer: &MemberAddress,
        variant: ThreadVariant,
        leader: &MemberAddress,
        name: &str,
        symbol: &str,
        config: Vec<u8>,
        info: &str,
    ) -> Result<ProposalId, GovernanceError> {
        self.require_member(proposer)?;
        let status = self.governor_status(leader);
        if status != GovernorStatus::Active {
            return Err(GovernanceError::NotActiveGovernor {
                governor: leader.clone(),
                status,
            });
        }
        if !NAME_LEN.contains(&name.chars().count()) {
            return Err(GovernanceError::InvalidNameLength(name.chars().count()));
        }
        if !SYMBOL_LEN.contains(&symbol.chars().count()) {
            return Err(GovernanceError::InvalidSymbolLength(symbol.chars().count()));
        }
        // Structural validation happens before the vote opens, so invalid
        // configurations never reach voters.
        self.factory
            .validate(variant, &config)
            .map_err(GovernanceError::FactoryRejected)?;

        let id = self
            .lifecycle
            .create_proposal(HubPayloadKind::ThreadCreation.tag(), info);
        self.thread_creations.record(
            id,
            ThreadCreation {
                variant,
                leader: leader.clone(),
                name: name.to_owned(),
                symbol: symbol.to_owned(),
                config,
            },
        );
        tracing::info!(%id, ?variant, %leader, name, symbol, "thread proposed");
        self.events.push(GovernanceEvent::ThreadProposed {
            id,
            variant,
            leader: leader.clone(),
            name: name.to_owned(),
            symbol: symbol.to_owned(),
        });
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Cross-organization relay
    // ------------------------------------------------------------------

    /// Propose relaying an allow-listed action to a thread, addressed by raw
    /// namespace + action tags as supplied by the proposing UI.
    pub fn propose_relay(
        &mut self,
        proposer: &MemberAddress,
        target: &MemberAddress,
        namespace: u8,
        action_tag: u16,
        payload: Vec<u8>,
        info: &str,
    ) -> Result<ProposalId, GovernanceError> {
        self.require_member(proposer)?;
        if self.directory.contract_kind(target) != Some(thread_kind()) {
            return Err(GovernanceError::DifferentContract(target.clone()));
        }
        let action = RelayAction::from_tags(namespace, action_tag)?;

        let id = self
            .lifecycle
            .create_proposal(HubPayloadKind::RelayedAction.tag(), info);
        self.relays.record(
            id,
            RelayedAction {
                target: target.clone(),
                action,
                payload: payload.clone(),
            },
        );
        tracing::info!(%id, %target, ?action, "relay proposed");
        self.events.push(GovernanceEvent::RelayProposed {
            id,
            target: target.clone(),
            action,
            payload,
        });
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Completion hook
    // ------------------------------------------------------------------

    /// Invoked by the lifecycle engine once per executed proposal.
    ///
    /// Consumes the payload for `id` and performs the type-specific side
    /// effect. A completion whose payload is already gone (consumed, or the
    /// batch was discarded as superseded) is a no-op.
    pub fn on_complete(&mut self, id: ProposalId, tag: u16) -> Result<(), GovernanceError> {
        match HubPayloadKind::from_tag(tag)? {
            HubPayloadKind::OnboardingBatch => self.complete_onboarding(id),
            HubPayloadKind::StakeRemoval => self.complete_stake_removal(id),
            HubPayloadKind::ThreadCreation => self.complete_thread_creation(id),
            HubPayloadKind::RelayedAction => self.complete_relay(id),
        }
    }

    fn complete_onboarding(&mut self, id: ProposalId) -> Result<(), GovernanceError> {
        let (kind, single) = match self.onboarding.get(id) {
            // Already executed — the batch passed and awaits claims.
            Some(batch) if batch.approved => return Ok(()),
            Some(batch) => (batch.kind, batch.commitment.as_single().cloned()),
            None => return Ok(()),
        };

        if kind.is_single_identity() {
            let address = single.ok_or(GovernanceError::CommitmentNotSingle)?;
            let drifted = self.participant_kind(&address) != ParticipantKind::Null
                || (kind == ParticipantKind::GovernorCandidate
                    && self.governor_status(&address) != GovernorStatus::Null);
            if drifted {
                // A concurrent onboarding won the race. The proposal is
                // superseded: discard silently instead of failing the whole
                // execution batch.
                self.onboarding.remove(id);
                tracing::info!(%id, %address, "onboarding batch discarded as superseded");
                self.events
                    .push(GovernanceEvent::OnboardingDiscarded { id, address });
                return Ok(());
            }
            if kind == ParticipantKind::GovernorCandidate {
                self.governors.insert(address, GovernorStatus::Unverified);
            }
        }

        if let Some(batch) = self.onboarding.get_mut(id) {
            batch.approved = true;
        }
        tracing::info!(%id, ?kind, "onboarding batch passed");
        self.events.push(GovernanceEvent::OnboardingPassed { id, kind });
        Ok(())
    }

    fn complete_stake_removal(&mut self, id: ProposalId) -> Result<(), GovernanceError> {
        let Some(removal) = self.stake_removals.take(id) else {
            return Ok(());
        };
        let result = if removal.slash {
            self.stake.slash(&removal.governor, removal.amount)
        } else {
            self.stake.unbond(&removal.governor, removal.amount)
        };
        if let Err(e) = result {
            // Failed side effect: restore the payload so the whole completion
            // leaves no trace, and report the stake ledger's error unmodified.
            self.stake_removals.record(id, removal);
            return Err(e.into());
        }

        tracing::info!(%id, governor = %removal.governor, slash = removal.slash, "stake removal executed");
        self.events.push(GovernanceEvent::StakeRemovalExecuted {
            id,
            governor: removal.governor,
            slash: removal.slash,
            amount: removal.amount,
        });
        Ok(())
    }

    fn complete_thread_creation(&mut self, id: ProposalId) -> Result<(), GovernanceError> {
        let Some(creation) = self.thread_creations.take(id) else {
            return Ok(());
        };
        match self.factory.deploy(
            creation.variant,
            &creation.leader,
            &creation.name,
            &creation.symbol,
            &creation.config,
        ) {
            Ok(thread) => {
                tracing::info!(%id, %thread, "thread deployed");
                self.events
                    .push(GovernanceEvent::ThreadDeployed { id, thread });
                Ok(())
            }
            Err(reason) => {
                self.thread_creations.record(id, creation);
                Err(GovernanceError::FactoryRejected(reason))
            }
        }
    }

    fn complete_relay(&mut self, id: ProposalId) -> Result<(), GovernanceError> {
        let Some(relay) = self.relays.take(id) else {
            return Ok(());
        };
        match self
            .directory
            .relay(&relay.target, relay.action, &relay.payload)
        {
            Ok(()) => {
                tracing::info!(%id, target = %relay.target, action = ?relay.action, "relay executed");
                self.events.push(GovernanceEvent::RelayExecuted {
                    id,
                    target: relay.target,
                    action: relay.action,
                });
                Ok(())
            }
            Err(detail) => {
                let target = relay.target.clone();
                self.relays.record(id, relay);
                Err(GovernanceError::RelayFailed { target, detail })
            }
        }
    }

    // ------------------------------------------------------------------
    // Membership removal & verifier rotation
    // ------------------------------------------------------------------

    /// Remove a participant from the federation.
    ///
    /// Invoked by the hub's own removal governance (out of scope here).
    /// Sets both statuses to `Removed` — an address never returns to `Null`
    /// — and drops the participant from the token whitelist.
    pub fn remove_participant(&mut self, participant: &MemberAddress) {
        self.participants
            .insert(participant.clone(), ParticipantKind::Removed);
        if self.governors.contains_key(participant) {
            self.governors
                .insert(participant.clone(), GovernorStatus::Removed);
        }
        self.token.remove_from_whitelist(participant);
        tracing::info!(%participant, "participant removed");
        self.events.push(GovernanceEvent::ParticipantRemoved {
            participant: participant.clone(),
        });
    }

    /// Hand the verifier role to a new attestation key.
    ///
    /// Only the current verifier may rotate. The successor address is
    /// derived from the new key; the predecessor's status becomes `Removed`
    /// so attestations signed with the retired key stop validating and the
    /// old address can never silently re-enter.
    pub fn adopt_verifier_key(
        &mut self,
        caller: &MemberAddress,
        new_key: PublicKey,
    ) -> Result<(), GovernanceError> {
        if *caller != self.verifier {
            return Err(GovernanceError::NotMember(caller.clone()));
        }
        let successor = derive_address(&new_key);
        if successor != *caller {
            self.participants
                .insert(caller.clone(), ParticipantKind::Removed);
        }
        self.participants
            .insert(successor.clone(), ParticipantKind::Verifier);
        tracing::info!(predecessor = %caller, %successor, "verifier key rotated");
        self.verifier = successor;
        self.verifier_key = new_key;
        Ok(())
    }
}
