//! In-memory token ledger.

use crate::ledger::{FungibleLedger, MintableLedger};
use crate::TokenError;
use icefarm_types::{AccountId, AssetDecimals};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct LedgerState {
    balances: HashMap<AccountId, u128>,
    allowances: HashMap<(AccountId, AccountId), u128>,
    total_supply: u128,
    owner: Option<AccountId>,
}

impl LedgerState {
    fn balance(&self, account: &AccountId) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Debit `from` and credit `to`, or change nothing.
    fn move_balance(&mut self, from: &AccountId, to: &AccountId, amount: u128) -> Result<(), TokenError> {
        let available = self.balance(from);
        if available < amount {
            return Err(TokenError::TransferFailed {
                needed: amount,
                available,
            });
        }
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance(to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        self.balances.insert(from.clone(), available - amount);
        self.balances.insert(to.clone(), credited);
        Ok(())
    }

    fn require_owner(&self, caller: &AccountId) -> Result<(), TokenError> {
        match &self.owner {
            Some(owner) if owner == caller => Ok(()),
            _ => Err(TokenError::NotOwner {
                caller: caller.clone(),
            }),
        }
    }
}

/// A thread-safe in-memory fungible ledger with an owner-gated mint.
///
/// An allowance of `u128::MAX` is treated as unlimited and is never
/// decremented.
pub struct TokenLedger {
    symbol: String,
    decimals: AssetDecimals,
    state: Mutex<LedgerState>,
}

impl TokenLedger {
    /// Create an empty ledger whose mint capability belongs to `owner`.
    pub fn new(symbol: impl Into<String>, decimals: AssetDecimals, owner: AccountId) -> Self {
        Self {
            symbol: symbol.into(),
            decimals,
            state: Mutex::new(LedgerState {
                owner: Some(owner),
                ..LedgerState::default()
            }),
        }
    }

    pub fn decimals(&self) -> AssetDecimals {
        self.decimals
    }

    /// Give up the mint capability entirely.
    pub fn renounce_ownership(&self, caller: &AccountId) -> Result<(), TokenError> {
        let mut state = self.lock();
        state.require_owner(caller)?;
        state.owner = None;
        tracing::debug!(token = %self.symbol, %caller, "ownership renounced");
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FungibleLedger for TokenLedger {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn balance_of(&self, account: &AccountId) -> u128 {
        self.lock().balance(account)
    }

    fn total_supply(&self) -> u128 {
        self.lock().total_supply
    }

    fn allowance(&self, owner: &AccountId, spender: &AccountId) -> u128 {
        self.lock()
            .allowances
            .get(&(owner.clone(), spender.clone()))
            .copied()
            .unwrap_or(0)
    }

    fn approve(&self, owner: &AccountId, spender: &AccountId, amount: u128) -> Result<(), TokenError> {
        self.lock()
            .allowances
            .insert((owner.clone(), spender.clone()), amount);
        tracing::debug!(token = %self.symbol, %owner, %spender, amount, "approve");
        Ok(())
    }

    fn transfer(&self, from: &AccountId, to: &AccountId, amount: u128) -> Result<(), TokenError> {
        self.lock().move_balance(from, to, amount)?;
        tracing::debug!(token = %self.symbol, %from, %to, amount, "transfer");
        Ok(())
    }

    fn transfer_from(
        &self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), TokenError> {
        let mut state = self.lock();
        let key = (from.clone(), spender.clone());
        let approved = state.allowances.get(&key).copied().unwrap_or(0);
        if approved < amount {
            return Err(TokenError::InsufficientAllowance {
                needed: amount,
                available: approved,
            });
        }
        state.move_balance(from, to, amount)?;
        if approved != u128::MAX {
            state.allowances.insert(key, approved - amount);
        }
        tracing::debug!(token = %self.symbol, %spender, %from, %to, amount, "transfer_from");
        Ok(())
    }
}

impl MintableLedger for TokenLedger {
    fn owner(&self) -> Option<AccountId> {
        self.lock().owner.clone()
    }

    fn mint(&self, caller: &AccountId, to: &AccountId, amount: u128) -> Result<(), TokenError> {
        let mut state = self.lock();
        if state.owner.as_ref() != Some(caller) {
            return Err(TokenError::MintUnauthorized {
                caller: caller.clone(),
            });
        }
        let supply = state
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        let balance = state
            .balance(to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        state.total_supply = supply;
        state.balances.insert(to.clone(), balance);
        tracing::debug!(token = %self.symbol, %to, amount, "mint");
        Ok(())
    }

    fn transfer_ownership(&self, caller: &AccountId, new_owner: &AccountId) -> Result<(), TokenError> {
        let mut state = self.lock();
        state.require_owner(caller)?;
        state.owner = Some(new_owner.clone());
        tracing::debug!(token = %self.symbol, from = %caller, to = %new_owner, "ownership transferred");
        Ok(())
    }
}
