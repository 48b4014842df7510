//! Nullable lifecycle engine — allocates proposal ids without any voting.

use std::sync::Mutex;
use weft_governance::ProposalLifecycle;
use weft_types::ProposalId;

struct Inner {
    next: u64,
    log: Vec<(ProposalId, u16, String)>,
}

/// A lifecycle engine that hands out sequential ids and records every
/// proposal it is asked to open. Votes always "pass" — completion is driven
/// directly by the test.
pub struct NullLifecycle {
    inner: Mutex<Inner>,
    voting_period: u64,
}

impl NullLifecycle {
    pub fn new(voting_period: u64) -> Self {
        Self {
            inner: Mutex::new(Inner {
                next: 0,
                log: Vec::new(),
            }),
            voting_period,
        }
    }

    /// All proposals opened so far, as (id, kind tag, info).
    pub fn proposals(&self) -> Vec<(ProposalId, u16, String)> {
        self.inner.lock().unwrap().log.clone()
    }

    /// The kind tag recorded for `id`, for driving completion hooks.
    pub fn tag_of(&self, id: ProposalId) -> Option<u16> {
        self.inner
            .lock()
            .unwrap()
            .log
            .iter()
            .find(|(pid, _, _)| *pid == id)
            .map(|(_, tag, _)| *tag)
    }
}

impl ProposalLifecycle for NullLifecycle {
    fn create_proposal(&self, kind_tag: u16, info: &str) -> ProposalId {
        let mut inner = self.inner.lock().unwrap();
        let id = ProposalId::new(inner.next);
        inner.next += 1;
        inner.log.push((id, kind_tag, info.to_owned()));
        id
    }

    fn voting_period(&self) -> u64 {
        self.voting_period
    }
}
