//! Token ledger contract and in-memory reference implementation.
//!
//! The governance engine never owns token accounting — it drives a
//! `TokenLedger` handle. The in-memory implementation exists for tests and
//! as the reference for the snapshot semantics: every balance mutation is
//! journaled against the current block height so historical queries answer
//! for any past height.

use crate::error::LedgerError;
use std::collections::HashMap;
use std::sync::Mutex;
use weft_types::{BlockHeight, Digest32, MemberAddress};

/// The token ledger consumed by the governance engine.
///
/// Entry points are `&self`; implementations provide their own interior
/// synchronization. Per the execution model every call runs to completion
/// with serialized transaction semantics.
pub trait TokenLedger: Send + Sync {
    /// The address identifying this token.
    fn address(&self) -> MemberAddress;

    fn current_height(&self) -> BlockHeight;

    fn balance_of(&self, holder: &MemberAddress) -> u128;

    fn total_supply(&self) -> u128;

    /// Balance of `holder` as of `height` (last recorded value at or before).
    fn balance_at(&self, holder: &MemberAddress, height: BlockHeight) -> u128;

    /// Total supply as of `height`.
    fn total_supply_at(&self, height: BlockHeight) -> u128;

    fn transfer(
        &self,
        from: &MemberAddress,
        to: &MemberAddress,
        amount: u128,
    ) -> Result<(), LedgerError>;

    /// Spend `from`'s balance on behalf of `spender`, consuming allowance.
    fn transfer_from(
        &self,
        spender: &MemberAddress,
        from: &MemberAddress,
        to: &MemberAddress,
        amount: u128,
    ) -> Result<(), LedgerError>;

    /// Grant `spender` an allowance over `owner`'s balance.
    fn approve(&self, owner: &MemberAddress, spender: &MemberAddress, amount: u128);

    /// Add `holder` to the transfer whitelist, tagged with its verification hash.
    fn whitelist(&self, holder: &MemberAddress, verification_hash: Digest32);

    fn remove_from_whitelist(&self, holder: &MemberAddress);

    fn is_whitelisted(&self, holder: &MemberAddress) -> bool;

    /// Irreversibly halt ordinary transfers (dissolution end-state).
    fn pause(&self);

    fn is_paused(&self) -> bool;

    /// Re-parent the whitelist to a new coordinator's ledger.
    fn reparent_whitelist(&self, new_parent: &MemberAddress);

    /// The current whitelist parent, if re-parented.
    fn whitelist_parent(&self) -> Option<MemberAddress>;
}

/// One holder's balance journal: (height, balance) pairs, append-only.
type BalanceJournal = Vec<(u64, u128)>;

#[derive(Default)]
struct LedgerState {
    height: u64,
    balances: HashMap<MemberAddress, u128>,
    /// Per-holder history of balance writes, keyed by height.
    history: HashMap<MemberAddress, BalanceJournal>,
    supply: u128,
    supply_history: BalanceJournal,
    allowances: HashMap<(MemberAddress, MemberAddress), u128>,
    whitelist: HashMap<MemberAddress, Digest32>,
    whitelist_parent: Option<MemberAddress>,
    paused: bool,
}

impl LedgerState {
    fn record(&mut self, holder: &MemberAddress, balance: u128) {
        self.balances.insert(holder.clone(), balance);
        self.history
            .entry(holder.clone())
            .or_default()
            .push((self.height, balance));
    }

    fn record_supply(&mut self) {
        self.supply_history.push((self.height, self.supply));
    }

    fn debit(&mut self, holder: &MemberAddress, amount: u128) -> Result<(), LedgerError> {
        let available = self.balances.get(holder).copied().unwrap_or(0);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        self.record(holder, available - amount);
        Ok(())
    }

    fn credit(&mut self, holder: &MemberAddress, amount: u128) -> Result<(), LedgerError> {
        let current = self.balances.get(holder).copied().unwrap_or(0);
        let updated = current.checked_add(amount).ok_or(LedgerError::Overflow)?;
        self.record(holder, updated);
        Ok(())
    }
}

/// Look up the last journaled value at or before `height`.
fn value_at(journal: &[(u64, u128)], height: u64) -> u128 {
    match journal.binary_search_by_key(&height, |(h, _)| *h) {
        Ok(mut idx) => {
            // Multiple writes at the same height: take the last one.
            while idx + 1 < journal.len() && journal[idx + 1].0 == height {
                idx += 1;
            }
            journal[idx].1
        }
        Err(0) => 0,
        Err(idx) => journal[idx - 1].1,
    }
}

/// In-memory token ledger with height-indexed balance snapshots.
pub struct InMemoryLedger {
    address: MemberAddress,
    state: Mutex<LedgerState>,
}

impl InMemoryLedger {
    pub fn new(address: MemberAddress) -> Self {
        Self {
            address,
            state: Mutex::new(LedgerState::default()),
        }
    }

    /// Mint new tokens to a holder (test/genesis path, bypasses pause).
    ///
    /// Also whitelists the holder with a zero verification hash if absent,
    /// since a balance without transfer rights is useless in tests.
    pub fn mint(&self, holder: &MemberAddress, amount: u128) {
        let mut state = self.state.lock().expect("ledger lock");
        let current = state.balances.get(holder).copied().unwrap_or(0);
        state.record(holder, current + amount);
        state.supply += amount;
        state.record_supply();
        state
            .whitelist
            .entry(holder.clone())
            .or_insert(Digest32::ZERO);
    }

    /// Advance the block height by one.
    pub fn advance_height(&self) {
        let mut state = self.state.lock().expect("ledger lock");
        state.height += 1;
    }
}

impl TokenLedger for InMemoryLedger {
    fn address(&self) -> MemberAddress {
        self.address.clone()
    }

    fn current_height(&self) -> BlockHeight {
        BlockHeight::new(self.state.lock().expect("ledger lock").height)
    }

    fn balance_of(&self, holder: &MemberAddress) -> u128 {
        self.state
            .lock()
            .expect("ledger lock")
            .balances
            .get(holder)
            .copied()
            .unwrap_or(0)
    }

    fn total_supply(&self) -> u128 {
        self.state.lock().expect("ledger lock").supply
    }

    fn balance_at(&self, holder: &MemberAddress, height: BlockHeight) -> u128 {
        let state = self.state.lock().expect("ledger lock");
        state
            .history
            .get(holder)
            .map(|journal| value_at(journal, height.value()))
            .unwrap_or(0)
    }

    fn total_supply_at(&self, height: BlockHeight) -> u128 {
        let state = self.state.lock().expect("ledger lock");
        value_at(&state.supply_history, height.value())
    }

    fn transfer(
        &self,
        from: &MemberAddress,
        to: &MemberAddress,
        amount: u128,
    ) -> Result<(), LedgerError> {
        let mut state = self.state.lock().expect("ledger lock");
        if state.paused {
            return Err(LedgerError::Paused);
        }
        if !state.whitelist.contains_key(to) {
            return Err(LedgerError::NotWhitelisted(to.to_string()));
        }
        state.debit(from, amount)?;
        state.credit(to, amount)
    }

    fn transfer_from(
        &self,
        spender: &MemberAddress,
        from: &MemberAddress,
        to: &MemberAddress,
        amount: u128,
    ) -> Result<(), LedgerError> {
        let mut state = self.state.lock().expect("ledger lock");
        if state.paused {
            return Err(LedgerError::Paused);
        }
        if !state.whitelist.contains_key(to) {
            return Err(LedgerError::NotWhitelisted(to.to_string()));
        }
        let key = (from.clone(), spender.clone());
        let allowance = state.allowances.get(&key).copied().unwrap_or(0);
        if allowance < amount {
            return Err(LedgerError::InsufficientAllowance {
                needed: amount,
                available: allowance,
            });
        }
        state.debit(from, amount)?;
        state.credit(to, amount)?;
        state.allowances.insert(key, allowance - amount);
        Ok(())
    }

    fn approve(&self, owner: &MemberAddress, spender: &MemberAddress, amount: u128) {
        let mut state = self.state.lock().expect("ledger lock");
        state
            .allowances
            .insert((owner.clone(), spender.clone()), amount);
    }

    fn whitelist(&self, holder: &MemberAddress, verification_hash: Digest32) {
        let mut state = self.state.lock().expect("ledger lock");
        state.whitelist.insert(holder.clone(), verification_hash);
    }

    fn remove_from_whitelist(&self, holder: &MemberAddress) {
        let mut state = self.state.lock().expect("ledger lock");
        state.whitelist.remove(holder);
    }

    fn is_whitelisted(&self, holder: &MemberAddress) -> bool {
        self.state
            .lock()
            .expect("ledger lock")
            .whitelist
            .contains_key(holder)
    }

    fn pause(&self) {
        self.state.lock().expect("ledger lock").paused = true;
    }

    fn is_paused(&self) -> bool {
        self.state.lock().expect("ledger lock").paused
    }

    fn reparent_whitelist(&self, new_parent: &MemberAddress) {
        let mut state = self.state.lock().expect("ledger lock");
        state.whitelist_parent = Some(new_parent.clone());
    }

    fn whitelist_parent(&self) -> Option<MemberAddress> {
        self.state
            .lock()
            .expect("ledger lock")
            .whitelist_parent
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> MemberAddress {
        MemberAddress::new(format!("weft_{s}"))
    }

    fn ledger() -> InMemoryLedger {
        InMemoryLedger::new(addr("token"))
    }

    #[test]
    fn mint_and_transfer() {
        let l = ledger();
        let (a, b) = (addr("a"), addr("b"));
        l.mint(&a, 100);
        l.whitelist(&b, Digest32::ZERO);
        l.transfer(&a, &b, 30).unwrap();
        assert_eq!(l.balance_of(&a), 70);
        assert_eq!(l.balance_of(&b), 30);
        assert_eq!(l.total_supply(), 100);
    }

    #[test]
    fn transfer_to_non_whitelisted_fails() {
        let l = ledger();
        let (a, b) = (addr("a"), addr("b"));
        l.mint(&a, 100);
        assert!(matches!(
            l.transfer(&a, &b, 10),
            Err(LedgerError::NotWhitelisted(_))
        ));
    }

    #[test]
    fn insufficient_balance() {
        let l = ledger();
        let (a, b) = (addr("a"), addr("b"));
        l.mint(&a, 5);
        l.whitelist(&b, Digest32::ZERO);
        assert!(matches!(
            l.transfer(&a, &b, 10),
            Err(LedgerError::InsufficientBalance { needed: 10, available: 5 })
        ));
    }

    #[test]
    fn historical_balances_survive_later_transfers() {
        let l = ledger();
        let (a, b) = (addr("a"), addr("b"));
        l.mint(&a, 100);
        l.advance_height();
        let snapshot = l.current_height();
        l.advance_height();
        l.whitelist(&b, Digest32::ZERO);
        l.transfer(&a, &b, 100).unwrap();

        // Current balances moved; the snapshot did not.
        assert_eq!(l.balance_of(&a), 0);
        assert_eq!(l.balance_at(&a, snapshot), 100);
        assert_eq!(l.balance_at(&b, snapshot), 0);
        assert_eq!(l.total_supply_at(snapshot), 100);
    }

    #[test]
    fn balance_before_first_write_is_zero() {
        let l = ledger();
        let a = addr("a");
        l.advance_height();
        l.advance_height();
        l.mint(&a, 50);
        assert_eq!(l.balance_at(&a, BlockHeight::new(1)), 0);
        assert_eq!(l.balance_at(&a, BlockHeight::new(2)), 50);
    }

    #[test]
    fn transfer_from_consumes_allowance() {
        let l = ledger();
        let (owner, spender, dest) = (addr("o"), addr("s"), addr("d"));
        l.mint(&owner, 100);
        l.whitelist(&dest, Digest32::ZERO);
        l.approve(&owner, &spender, 60);
        l.transfer_from(&spender, &owner, &dest, 40).unwrap();
        assert!(matches!(
            l.transfer_from(&spender, &owner, &dest, 40),
            Err(LedgerError::InsufficientAllowance { needed: 40, available: 20 })
        ));
    }

    #[test]
    fn pause_blocks_transfers() {
        let l = ledger();
        let (a, b) = (addr("a"), addr("b"));
        l.mint(&a, 100);
        l.whitelist(&b, Digest32::ZERO);
        l.pause();
        assert!(matches!(l.transfer(&a, &b, 1), Err(LedgerError::Paused)));
    }

    #[test]
    fn reparent_records_new_parent() {
        let l = ledger();
        assert_eq!(l.whitelist_parent(), None);
        l.reparent_whitelist(&addr("newhub"));
        assert_eq!(l.whitelist_parent(), Some(addr("newhub")));
    }

    #[test]
    fn same_height_rewrites_take_last_value() {
        let l = ledger();
        let (a, b) = (addr("a"), addr("b"));
        l.mint(&a, 100);
        l.whitelist(&b, Digest32::ZERO);
        l.transfer(&a, &b, 25).unwrap();
        l.transfer(&a, &b, 25).unwrap();
        // All writes landed at height 0 — the last one wins.
        assert_eq!(l.balance_at(&a, BlockHeight::GENESIS), 50);
        assert_eq!(l.balance_at(&b, BlockHeight::GENESIS), 50);
    }
}
