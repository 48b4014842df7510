//! Nullable organization directory — an in-memory contract registry.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use weft_governance::{hub_kind, thread_kind, Capability, OrgDirectory, RelayAction};
use weft_ledger::TokenLedger;
use weft_types::{Digest32, GovernorStatus, MemberAddress};

struct OrgRecord {
    kind: Digest32,
    capabilities: HashSet<Capability>,
    voting_period: Option<u64>,
}

struct Inner {
    orgs: HashMap<MemberAddress, OrgRecord>,
    statuses: HashMap<MemberAddress, GovernorStatus>,
    tokens: HashMap<MemberAddress, Arc<dyn TokenLedger>>,
    relays: Vec<(MemberAddress, RelayAction, Vec<u8>)>,
    relay_failure: Option<Vec<u8>>,
}

/// A directory primed by the test with org records, governor statuses, and
/// token handles. Relays are recorded, not performed; a primable failure
/// payload simulates a failing callee.
pub struct NullDirectory {
    inner: Mutex<Inner>,
}

impl NullDirectory {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                orgs: HashMap::new(),
                statuses: HashMap::new(),
                tokens: HashMap::new(),
                relays: Vec::new(),
                relay_failure: None,
            }),
        }
    }

    /// Register an org that self-reports as a hub with the given voting
    /// period.
    pub fn register_hub(&self, org: &MemberAddress, voting_period: u64) {
        self.inner.lock().unwrap().orgs.insert(
            org.clone(),
            OrgRecord {
                kind: hub_kind(),
                capabilities: HashSet::from([Capability::Hub]),
                voting_period: Some(voting_period),
            },
        );
    }

    /// Register an org that self-reports as a thread.
    pub fn register_thread(&self, org: &MemberAddress) {
        self.inner.lock().unwrap().orgs.insert(
            org.clone(),
            OrgRecord {
                kind: thread_kind(),
                capabilities: HashSet::from([Capability::Thread]),
                voting_period: None,
            },
        );
    }

    /// Register an org with an arbitrary kind digest and no capabilities.
    pub fn register_other(&self, org: &MemberAddress, kind: Digest32) {
        self.inner.lock().unwrap().orgs.insert(
            org.clone(),
            OrgRecord {
                kind,
                capabilities: HashSet::new(),
                voting_period: None,
            },
        );
    }

    /// Strip a capability from a registered org.
    pub fn revoke_capability(&self, org: &MemberAddress, capability: Capability) {
        if let Some(record) = self.inner.lock().unwrap().orgs.get_mut(org) {
            record.capabilities.remove(&capability);
        }
    }

    pub fn set_governor_status(&self, governor: &MemberAddress, status: GovernorStatus) {
        self.inner
            .lock()
            .unwrap()
            .statuses
            .insert(governor.clone(), status);
    }

    pub fn register_token(&self, ledger: Arc<dyn TokenLedger>) {
        self.inner
            .lock()
            .unwrap()
            .tokens
            .insert(ledger.address(), ledger);
    }

    /// Make every subsequent relay fail with the given callee payload.
    pub fn fail_relays(&self, detail: Vec<u8>) {
        self.inner.lock().unwrap().relay_failure = Some(detail);
    }

    /// All relays attempted so far, in order.
    pub fn relays(&self) -> Vec<(MemberAddress, RelayAction, Vec<u8>)> {
        self.inner.lock().unwrap().relays.clone()
    }
}

impl Default for NullDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl OrgDirectory for NullDirectory {
    fn contract_kind(&self, org: &MemberAddress) -> Option<Digest32> {
        self.inner.lock().unwrap().orgs.get(org).map(|r| r.kind)
    }

    fn supports(&self, org: &MemberAddress, capability: Capability) -> bool {
        self.inner
            .lock()
            .unwrap()
            .orgs
            .get(org)
            .is_some_and(|r| r.capabilities.contains(&capability))
    }

    fn voting_period(&self, org: &MemberAddress) -> Option<u64> {
        self.inner
            .lock()
            .unwrap()
            .orgs
            .get(org)
            .and_then(|r| r.voting_period)
    }

    fn governor_status(&self, governor: &MemberAddress) -> GovernorStatus {
        self.inner
            .lock()
            .unwrap()
            .statuses
            .get(governor)
            .copied()
            .unwrap_or_default()
    }

    fn token(&self, token: &MemberAddress) -> Option<Arc<dyn TokenLedger>> {
        self.inner.lock().unwrap().tokens.get(token).cloned()
    }

    fn relay(
        &self,
        target: &MemberAddress,
        action: RelayAction,
        payload: &[u8],
    ) -> Result<(), Vec<u8>> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(detail) = &inner.relay_failure {
            return Err(detail.clone());
        }
        inner
            .relays
            .push((target.clone(), action, payload.to_vec()));
        Ok(())
    }
}
