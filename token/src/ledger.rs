//! Ledger traits.
//!
//! Methods take `&self`; implementations provide their own interior
//! synchronization and must apply each call all-or-nothing.

use crate::TokenError;
use icefarm_types::AccountId;

/// A fungible-token account system with ERC-20 style semantics.
pub trait FungibleLedger: Send + Sync {
    fn symbol(&self) -> &str;

    fn balance_of(&self, account: &AccountId) -> u128;

    fn total_supply(&self) -> u128;

    fn allowance(&self, owner: &AccountId, spender: &AccountId) -> u128;

    /// Authorize `spender` to pull up to `amount` from `owner`. Replaces any
    /// previous allowance.
    fn approve(&self, owner: &AccountId, spender: &AccountId, amount: u128)
        -> Result<(), TokenError>;

    /// Move `amount` from `from` to `to`, signed by `from`.
    fn transfer(&self, from: &AccountId, to: &AccountId, amount: u128) -> Result<(), TokenError>;

    /// Move `amount` from `from` to `to` on behalf of `spender`, consuming
    /// allowance.
    fn transfer_from(
        &self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), TokenError>;
}

/// A fungible ledger whose supply can be grown by its owner.
pub trait MintableLedger: FungibleLedger {
    /// The account currently holding the mint capability.
    fn owner(&self) -> Option<AccountId>;

    /// Create `amount` new tokens for `to`. Only the owner may call this.
    fn mint(&self, caller: &AccountId, to: &AccountId, amount: u128) -> Result<(), TokenError>;

    /// Hand the mint capability to `new_owner`. Only the owner may call this.
    fn transfer_ownership(&self, caller: &AccountId, new_owner: &AccountId)
        -> Result<(), TokenError>;
}
