use thiserror::Error;
use weft_types::DistributionId;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("insufficient allowance: need {needed}, have {available}")]
    InsufficientAllowance { needed: u128, available: u128 },

    #[error("insufficient bonded stake: need {needed}, have {available}")]
    InsufficientStake { needed: u128, available: u128 },

    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("ledger is paused")]
    Paused,

    #[error("holder {0} is not whitelisted")]
    NotWhitelisted(String),

    #[error("{holder} already claimed {distribution}")]
    AlreadyClaimed {
        holder: String,
        distribution: DistributionId,
    },

    #[error("unknown settlement token {0}")]
    UnknownToken(String),

    #[error("balance overflow")]
    Overflow,
}
