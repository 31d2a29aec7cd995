//! Staking-engine errors.

use icefarm_store::StoreError;
use icefarm_token::TokenError;
use icefarm_types::AccountId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FarmError {
    #[error("amount must be non-zero")]
    InvalidAmount,

    #[error("insufficient stake: requested {requested}, staked {staked}")]
    InsufficientStake { requested: u128, staked: u128 },

    #[error("custody account {0} cannot stake, unstake or withdraw")]
    CustodyCaller(AccountId),

    #[error("no yield to withdraw")]
    NothingToWithdraw,

    #[error("ledger error: {0}")]
    Ledger(#[from] TokenError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("invalid farm parameters: {0}")]
    InvalidParams(String),

    #[error("arithmetic overflow in yield computation")]
    Overflow,

    #[error("internal invariant violated: {0}")]
    Invariant(String),

    #[error("config error: {0}")]
    Config(String),
}
