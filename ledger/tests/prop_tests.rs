use std::sync::Arc;

use proptest::prelude::*;

use weft_ledger::{InMemoryLedger, LedgerError, RevenueLedger, TokenLedger};
use weft_types::MemberAddress;

fn addr(i: usize) -> MemberAddress {
    MemberAddress::new(format!("weft_holder{i:03}"))
}

fn org() -> MemberAddress {
    MemberAddress::new("weft_org")
}

/// Build a share ledger with the given balances and a funded revenue ledger.
fn setup(balances: &[u128], pot: u128) -> (Arc<InMemoryLedger>, Arc<InMemoryLedger>, RevenueLedger) {
    let share = Arc::new(InMemoryLedger::new(MemberAddress::new("weft_share")));
    for (i, &bal) in balances.iter().enumerate() {
        if bal > 0 {
            share.mint(&addr(i), bal);
        }
    }
    share.advance_height();

    let cash = Arc::new(InMemoryLedger::new(MemberAddress::new("weft_cash")));
    cash.mint(&org(), pot);
    for i in 0..balances.len() {
        cash.whitelist(&addr(i), Default::default());
    }

    let revenue = RevenueLedger::new(org(), share.clone());
    (share, cash, revenue)
}

proptest! {
    /// Σ claims ≤ distributed amount; dust loss is bounded by holder count.
    #[test]
    fn claims_never_exceed_distribution(
        balances in prop::collection::vec(0u128..1_000_000, 1..12),
        amount in 1u128..1_000_000_000,
    ) {
        let supply: u128 = balances.iter().sum();
        prop_assume!(supply > 0);

        let (_share, cash, mut revenue) = setup(&balances, amount);
        let id = revenue.distribute(cash.clone(), &org(), amount).unwrap();

        let mut paid: u128 = 0;
        for (i, &bal) in balances.iter().enumerate() {
            match revenue.claim(&addr(i), id) {
                Ok(got) => {
                    prop_assert_eq!(got, amount * bal / supply);
                    paid += got;
                }
                Err(LedgerError::ZeroAmount) => prop_assert_eq!(amount * bal / supply, 0),
                Err(e) => prop_assert!(false, "unexpected error: {}", e),
            }
        }
        prop_assert!(paid <= amount);
        // Truncation loses strictly less than one unit per holder.
        prop_assert!(amount - paid < balances.len() as u128);
    }

    /// A second claim for the same (holder, distribution) always fails, and
    /// pays nothing.
    #[test]
    fn claim_at_most_once(
        balances in prop::collection::vec(1u128..10_000, 2..8),
        amount in 100u128..1_000_000,
    ) {
        let supply: u128 = balances.iter().sum();
        prop_assume!(amount * balances[0] / supply > 0);

        let (_share, cash, mut revenue) = setup(&balances, amount);
        let id = revenue.distribute(cash.clone(), &org(), amount).unwrap();

        let first = revenue.claim(&addr(0), id).unwrap();
        let before = cash.balance_of(&addr(0));
        prop_assert_eq!(before, first);
        prop_assert!(
            matches!(
                revenue.claim(&addr(0), id),
                Err(LedgerError::AlreadyClaimed { .. })
            ),
            "second claim must fail with AlreadyClaimed"
        );
        prop_assert_eq!(cash.balance_of(&addr(0)), before);
    }

    /// Historical snapshots are immune to balance shuffling after the
    /// distribution is recorded.
    #[test]
    fn post_distribution_shuffle_changes_nothing(
        balances in prop::collection::vec(1u128..10_000, 2..6),
        amount in 100u128..1_000_000,
    ) {
        let supply: u128 = balances.iter().sum();
        prop_assume!(amount * balances[0] / supply > 0);

        let (share, cash, mut revenue) = setup(&balances, amount);
        let id = revenue.distribute(cash.clone(), &org(), amount).unwrap();

        let expected = revenue.claimable(&addr(0), id).unwrap();

        // Dump holder 0's entire stake onto holder 1 after the snapshot.
        share.advance_height();
        share.transfer(&addr(0), &addr(1), balances[0]).unwrap();

        prop_assert_eq!(revenue.claimable(&addr(0), id).unwrap(), expected);
        prop_assert_eq!(revenue.claim(&addr(0), id).unwrap(), expected);
    }
}
