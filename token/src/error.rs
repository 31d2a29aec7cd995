//! Ledger-level errors, surfaced unchanged by the engine.

use icefarm_types::AccountId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("transfer failed: need {needed}, available {available}")]
    TransferFailed { needed: u128, available: u128 },

    #[error("insufficient allowance: need {needed}, approved {available}")]
    InsufficientAllowance { needed: u128, available: u128 },

    #[error("{caller} is not authorized to mint")]
    MintUnauthorized { caller: AccountId },

    #[error("{caller} is not the ledger owner")]
    NotOwner { caller: AccountId },

    #[error("arithmetic overflow in ledger balance")]
    Overflow,
}
