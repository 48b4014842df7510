//! Snapshot revenue ledger — pro-rata distributions against historical holdings.
//!
//! Each distribution snapshots the share ledger's *current* block height.
//! Claims divide against the balance and supply at that height, never the
//! current ones, so acquiring tokens after a distribution is announced earns
//! nothing from it. Heights, not timestamps, align with the token ledger's
//! historical-balance query granularity.

use crate::error::LedgerError;
use crate::token::TokenLedger;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use weft_types::{BlockHeight, DistributionId, MemberAddress};

/// One discrete revenue-sharing event.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Distribution {
    pub id: DistributionId,
    /// The settlement token the revenue was paid in.
    pub token: MemberAddress,
    /// Share-ledger height whose balances the distribution is split by.
    pub height: BlockHeight,
    pub amount: u128,
}

/// Audit events emitted by the revenue ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevenueEvent {
    DistributionCreated {
        id: DistributionId,
        token: MemberAddress,
        height: BlockHeight,
        amount: u128,
    },
    ClaimCompleted {
        id: DistributionId,
        holder: MemberAddress,
        amount: u128,
    },
}

/// Records distributions and lets every historical holder claim its pro-rata
/// share exactly once per distribution.
pub struct RevenueLedger {
    /// The organization account that custodies settlement funds.
    owner: MemberAddress,
    /// The organization's own token — source of historical voting power.
    share: Arc<dyn TokenLedger>,
    /// Settlement token handles registered at distribution time.
    settlements: HashMap<MemberAddress, Arc<dyn TokenLedger>>,
    /// Append-only, never-shrinking log keyed by monotonic id.
    distributions: Vec<Distribution>,
    /// Once present, permanently present.
    claimed: HashSet<(MemberAddress, DistributionId)>,
    events: Vec<RevenueEvent>,
}

impl RevenueLedger {
    pub fn new(owner: MemberAddress, share: Arc<dyn TokenLedger>) -> Self {
        Self {
            owner,
            share,
            settlements: HashMap::new(),
            distributions: Vec::new(),
            claimed: HashSet::new(),
            events: Vec::new(),
        }
    }

    /// Record a new distribution of `amount` of the settlement token.
    ///
    /// If `payer` is not the owning organization itself, the amount is pulled
    /// from the payer (the payer must have approved the owner as spender).
    /// The share ledger's current height is captured as the snapshot.
    pub fn distribute(
        &mut self,
        settlement: Arc<dyn TokenLedger>,
        payer: &MemberAddress,
        amount: u128,
    ) -> Result<DistributionId, LedgerError> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        if *payer != self.owner {
            settlement.transfer_from(&self.owner, payer, &self.owner, amount)?;
        }

        let id = DistributionId::new(self.distributions.len() as u64);
        let height = self.share.current_height();
        let token = settlement.address();
        self.settlements.insert(token.clone(), settlement);
        self.distributions.push(Distribution {
            id,
            token: token.clone(),
            height,
            amount,
        });

        tracing::info!(%id, %token, %height, amount, "distribution created");
        self.events.push(RevenueEvent::DistributionCreated {
            id,
            token,
            height,
            amount,
        });
        Ok(id)
    }

    /// Claim `holder`'s pro-rata share of distribution `id`.
    ///
    /// `amount = distribution.amount × balance_at(holder, h) ÷ supply_at(h)`,
    /// truncating toward zero — dust from truncation is an accepted rounding
    /// loss, never redistributed. A zero result (including an id that was
    /// never created, which yields zero historical power) fails `ZeroAmount`.
    pub fn claim(
        &mut self,
        holder: &MemberAddress,
        id: DistributionId,
    ) -> Result<u128, LedgerError> {
        if self.claimed.contains(&(holder.clone(), id)) {
            return Err(LedgerError::AlreadyClaimed {
                holder: holder.to_string(),
                distribution: id,
            });
        }

        let amount = self.claimable(holder, id)?;
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }

        let dist = &self.distributions[id.value() as usize];
        let settlement = self
            .settlements
            .get(&dist.token)
            .ok_or_else(|| LedgerError::UnknownToken(dist.token.to_string()))?;
        settlement.transfer(&self.owner, holder, amount)?;

        self.claimed.insert((holder.clone(), id));
        tracing::info!(%id, %holder, amount, "claim completed");
        self.events.push(RevenueEvent::ClaimCompleted {
            id,
            holder: holder.clone(),
            amount,
        });
        Ok(amount)
    }

    /// Compute the claimable amount without transferring or marking claimed.
    pub fn claimable(
        &self,
        holder: &MemberAddress,
        id: DistributionId,
    ) -> Result<u128, LedgerError> {
        let Some(dist) = self.distributions.get(id.value() as usize) else {
            // Never-created distributions carry zero historical power.
            return Ok(0);
        };
        let power = self.share.balance_at(holder, dist.height);
        let supply = self.share.total_supply_at(dist.height);
        if supply == 0 {
            return Ok(0);
        }
        let scaled = dist
            .amount
            .checked_mul(power)
            .ok_or(LedgerError::Overflow)?;
        Ok(scaled / supply)
    }

    pub fn distribution(&self, id: DistributionId) -> Option<&Distribution> {
        self.distributions.get(id.value() as usize)
    }

    pub fn distribution_count(&self) -> u64 {
        self.distributions.len() as u64
    }

    pub fn has_claimed(&self, holder: &MemberAddress, id: DistributionId) -> bool {
        self.claimed.contains(&(holder.clone(), id))
    }

    /// The audit event log.
    pub fn events(&self) -> &[RevenueEvent] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::InMemoryLedger;

    fn addr(s: &str) -> MemberAddress {
        MemberAddress::new(format!("weft_{s}"))
    }

    struct Fixture {
        org: MemberAddress,
        share: Arc<InMemoryLedger>,
        cash: Arc<InMemoryLedger>,
        revenue: RevenueLedger,
    }

    /// An org token with holders a=600, b=300, c=100 and a funded org account.
    fn fixture() -> Fixture {
        let org = addr("org");
        let share = Arc::new(InMemoryLedger::new(addr("sharetoken")));
        share.mint(&addr("a"), 600);
        share.mint(&addr("b"), 300);
        share.mint(&addr("c"), 100);
        share.advance_height();

        let cash = Arc::new(InMemoryLedger::new(addr("cashtoken")));
        cash.mint(&org, 10_000);

        let revenue = RevenueLedger::new(org.clone(), share.clone());
        Fixture {
            org,
            share,
            cash,
            revenue,
        }
    }

    #[test]
    fn pro_rata_split_floors() {
        let mut f = fixture();
        let id = f
            .revenue
            .distribute(f.cash.clone(), &f.org.clone(), 1000)
            .unwrap();

        f.cash.whitelist(&addr("a"), Default::default());
        f.cash.whitelist(&addr("b"), Default::default());
        f.cash.whitelist(&addr("c"), Default::default());
        assert_eq!(f.revenue.claim(&addr("a"), id).unwrap(), 600);
        assert_eq!(f.revenue.claim(&addr("b"), id).unwrap(), 300);
        assert_eq!(f.revenue.claim(&addr("c"), id).unwrap(), 100);
        assert_eq!(f.cash.balance_of(&addr("a")), 600);
    }

    #[test]
    fn claim_is_at_most_once() {
        let mut f = fixture();
        let id = f
            .revenue
            .distribute(f.cash.clone(), &f.org.clone(), 1000)
            .unwrap();
        f.cash.whitelist(&addr("a"), Default::default());
        f.revenue.claim(&addr("a"), id).unwrap();
        assert!(matches!(
            f.revenue.claim(&addr("a"), id),
            Err(LedgerError::AlreadyClaimed { .. })
        ));
        // Exactly one claim event for holder a.
        let claims = f
            .revenue
            .events()
            .iter()
            .filter(|e| matches!(e, RevenueEvent::ClaimCompleted { holder, .. } if *holder == addr("a")))
            .count();
        assert_eq!(claims, 1);
    }

    #[test]
    fn zero_amount_distribution_rejected() {
        let mut f = fixture();
        let org = f.org.clone();
        assert!(matches!(
            f.revenue.distribute(f.cash.clone(), &org, 0),
            Err(LedgerError::ZeroAmount)
        ));
    }

    #[test]
    fn unknown_distribution_claims_zero() {
        let mut f = fixture();
        assert!(matches!(
            f.revenue.claim(&addr("a"), DistributionId::new(99)),
            Err(LedgerError::ZeroAmount)
        ));
    }

    #[test]
    fn late_buyer_gets_nothing() {
        let mut f = fixture();
        let id = f
            .revenue
            .distribute(f.cash.clone(), &f.org.clone(), 1000)
            .unwrap();

        // Tokens acquired after the snapshot height carry no claim.
        f.share.advance_height();
        f.share.mint(&addr("late"), 5_000);
        f.cash.whitelist(&addr("late"), Default::default());
        assert!(matches!(
            f.revenue.claim(&addr("late"), id),
            Err(LedgerError::ZeroAmount)
        ));
    }

    #[test]
    fn external_payer_is_pulled_from() {
        let mut f = fixture();
        let payer = addr("payer");
        f.cash.mint(&payer, 500);
        // The payer must approve the org before distribute can pull.
        f.cash.approve(&payer, &f.org, 500);
        let before = f.cash.balance_of(&f.org);
        f.revenue
            .distribute(f.cash.clone(), &payer, 500)
            .unwrap();
        assert_eq!(f.cash.balance_of(&payer), 0);
        assert_eq!(f.cash.balance_of(&f.org), before + 500);
    }

    #[test]
    fn distributions_are_independent() {
        let mut f = fixture();
        let org = f.org.clone();
        let d0 = f.revenue.distribute(f.cash.clone(), &org, 100).unwrap();
        let d1 = f.revenue.distribute(f.cash.clone(), &org, 200).unwrap();
        assert_ne!(d0, d1);
        f.cash.whitelist(&addr("b"), Default::default());
        // Claim the second before the first — no ordering constraint.
        assert_eq!(f.revenue.claim(&addr("b"), d1).unwrap(), 60);
        assert_eq!(f.revenue.claim(&addr("b"), d0).unwrap(), 30);
    }
}
