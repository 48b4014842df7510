//! Token and stake ledgers for the WEFT federation.
//!
//! The token and stake ledgers are external collaborators of the governance
//! engine — this crate defines their trait contracts plus in-memory reference
//! implementations with height-indexed balance snapshots. The snapshot
//! revenue ledger (pro-rata distributions claimable against historical
//! balances) is core and lives here because it is pure ledger arithmetic.

pub mod error;
pub mod revenue;
pub mod stake;
pub mod token;

pub use error::LedgerError;
pub use revenue::{Distribution, RevenueEvent, RevenueLedger};
pub use stake::{InMemoryStakeLedger, StakeLedger};
pub use token::{InMemoryLedger, TokenLedger};
