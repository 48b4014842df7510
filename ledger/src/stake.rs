//! Bonded-stake ledger contract and in-memory reference implementation.
//!
//! Governors bond stake that governance can later unbond (return) or slash
//! (forfeit). The stake ledger alone is responsible for accounting
//! correctness; the governance dispatcher only routes `slash`/`unbond` and
//! reports stake failures upward unmodified.

use crate::error::LedgerError;
use std::collections::HashMap;
use std::sync::Mutex;
use weft_types::MemberAddress;

/// The stake ledger consumed by the governance dispatcher.
pub trait StakeLedger: Send + Sync {
    /// Bond `amount` of stake for `governor`.
    fn bond(&self, governor: &MemberAddress, amount: u128) -> Result<(), LedgerError>;

    /// Return `amount` of bonded stake to `governor`.
    fn unbond(&self, governor: &MemberAddress, amount: u128) -> Result<(), LedgerError>;

    /// Forfeit `amount` of `governor`'s bonded stake.
    fn slash(&self, governor: &MemberAddress, amount: u128) -> Result<(), LedgerError>;

    fn bonded(&self, governor: &MemberAddress) -> u128;

    /// Total stake forfeited across all governors (destination accounting).
    fn total_slashed(&self) -> u128;
}

#[derive(Default)]
struct StakeState {
    bonded: HashMap<MemberAddress, u128>,
    total_slashed: u128,
}

/// In-memory stake ledger with sufficient-balance checks.
#[derive(Default)]
pub struct InMemoryStakeLedger {
    state: Mutex<StakeState>,
}

impl InMemoryStakeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn reduce(&self, governor: &MemberAddress, amount: u128, slash: bool) -> Result<(), LedgerError> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        let mut state = self.state.lock().expect("stake lock");
        let available = state.bonded.get(governor).copied().unwrap_or(0);
        if available < amount {
            return Err(LedgerError::InsufficientStake {
                needed: amount,
                available,
            });
        }
        state.bonded.insert(governor.clone(), available - amount);
        if slash {
            state.total_slashed += amount;
        }
        Ok(())
    }
}

impl StakeLedger for InMemoryStakeLedger {
    fn bond(&self, governor: &MemberAddress, amount: u128) -> Result<(), LedgerError> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        let mut state = self.state.lock().expect("stake lock");
        let current = state.bonded.get(governor).copied().unwrap_or(0);
        let updated = current.checked_add(amount).ok_or(LedgerError::Overflow)?;
        state.bonded.insert(governor.clone(), updated);
        Ok(())
    }

    fn unbond(&self, governor: &MemberAddress, amount: u128) -> Result<(), LedgerError> {
        self.reduce(governor, amount, false)
    }

    fn slash(&self, governor: &MemberAddress, amount: u128) -> Result<(), LedgerError> {
        self.reduce(governor, amount, true)
    }

    fn bonded(&self, governor: &MemberAddress) -> u128 {
        self.state
            .lock()
            .expect("stake lock")
            .bonded
            .get(governor)
            .copied()
            .unwrap_or(0)
    }

    fn total_slashed(&self) -> u128 {
        self.state.lock().expect("stake lock").total_slashed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gov() -> MemberAddress {
        MemberAddress::new("weft_governor")
    }

    #[test]
    fn bond_then_unbond() {
        let stake = InMemoryStakeLedger::new();
        stake.bond(&gov(), 100).unwrap();
        stake.unbond(&gov(), 40).unwrap();
        assert_eq!(stake.bonded(&gov()), 60);
        assert_eq!(stake.total_slashed(), 0);
    }

    #[test]
    fn slash_tracks_forfeited_total() {
        let stake = InMemoryStakeLedger::new();
        stake.bond(&gov(), 100).unwrap();
        stake.slash(&gov(), 30).unwrap();
        assert_eq!(stake.bonded(&gov()), 70);
        assert_eq!(stake.total_slashed(), 30);
    }

    #[test]
    fn cannot_reduce_more_than_bonded() {
        let stake = InMemoryStakeLedger::new();
        stake.bond(&gov(), 10).unwrap();
        assert!(matches!(
            stake.slash(&gov(), 11),
            Err(LedgerError::InsufficientStake { needed: 11, available: 10 })
        ));
    }

    #[test]
    fn zero_amounts_rejected() {
        let stake = InMemoryStakeLedger::new();
        assert!(matches!(stake.bond(&gov(), 0), Err(LedgerError::ZeroAmount)));
        assert!(matches!(stake.unbond(&gov(), 0), Err(LedgerError::ZeroAmount)));
    }
}
