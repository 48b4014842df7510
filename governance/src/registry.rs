//! Sparse per-type payload storage.
//!
//! Each payload type gets its own map from proposal id to record, never
//! inspected generically. `take` removes the record as it returns it, which
//! is what makes re-consumption impossible: two different identifiers never
//! share payload state, and a second completion for the same identifier
//! finds nothing.

use std::collections::HashMap;
use weft_types::ProposalId;

/// A sparse mapping from proposal id to one payload type's records.
#[derive(Debug)]
pub struct PayloadMap<P> {
    map: HashMap<ProposalId, P>,
}

impl<P> Default for PayloadMap<P> {
    fn default() -> Self {
        Self {
            map: HashMap::new(),
        }
    }
}

impl<P> PayloadMap<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a payload against a freshly allocated identifier.
    ///
    /// The lifecycle engine never reuses identifiers, so a collision would
    /// mean the caller recorded twice for one proposal — a programming error.
    pub fn record(&mut self, id: ProposalId, payload: P) {
        let previous = self.map.insert(id, payload);
        debug_assert!(previous.is_none(), "payload already recorded for {id}");
    }

    /// Consume the payload for `id`. Consumption doubles as the
    /// "already executed" flag: the second take returns `None`.
    pub fn take(&mut self, id: ProposalId) -> Option<P> {
        self.map.remove(&id)
    }

    pub fn get(&self, id: ProposalId) -> Option<&P> {
        self.map.get(&id)
    }

    pub fn get_mut(&mut self, id: ProposalId) -> Option<&mut P> {
        self.map.get_mut(&id)
    }

    /// Remove without consuming semantics (used to discard superseded
    /// onboarding batches).
    pub fn remove(&mut self, id: ProposalId) -> Option<P> {
        self.map.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_consumes() {
        let mut map: PayloadMap<&'static str> = PayloadMap::new();
        map.record(ProposalId::new(1), "payload");
        assert_eq!(map.take(ProposalId::new(1)), Some("payload"));
        assert_eq!(map.take(ProposalId::new(1)), None);
    }

    #[test]
    fn ids_are_independent() {
        let mut map: PayloadMap<u32> = PayloadMap::new();
        map.record(ProposalId::new(1), 10);
        map.record(ProposalId::new(2), 20);
        // Out-of-order completion is always safe.
        assert_eq!(map.take(ProposalId::new(2)), Some(20));
        assert_eq!(map.take(ProposalId::new(1)), Some(10));
    }
}
