//! Core staking engine.

use crate::config::FarmConfig;
use crate::error::FarmError;
use crate::event::FarmEvent;
use crate::rate::{elapsed_secs, YieldRate};
use crate::record::AccountRecord;
use icefarm_store::{FarmStore, StoreError};
use icefarm_token::{FungibleLedger, MintableLedger, TokenError};
use icefarm_types::{AccountId, Clock, FarmParams, Timestamp};
use icefarm_utils::format_duration;
use std::collections::HashMap;
use std::sync::Arc;

const META_TOTAL_YIELD_MINTED: &[u8] = b"total_yield_minted";

/// The staking engine, sole writer of account records.
///
/// Every state-changing operation takes `&mut self`, so operations are
/// serialized. Each one computes the complete post-state first, performs its
/// single ledger call, and commits only when that call succeeds; a failure at
/// any step leaves records, totals and events untouched.
pub struct StakingEngine {
    params: FarmParams,
    rate: YieldRate,
    /// The engine's own identity on both ledgers.
    custody: AccountId,
    stake_ledger: Arc<dyn FungibleLedger>,
    reward_ledger: Arc<dyn MintableLedger>,
    clock: Arc<dyn Clock>,
    records: HashMap<AccountId, AccountRecord>,
    /// Sum of `staked_amount` over all records.
    total_staked: u128,
    total_yield_minted: u128,
    events: Vec<FarmEvent>,
}

impl StakingEngine {
    /// Create an engine with an empty record table.
    ///
    /// The reward ledger's mint capability must be granted to `custody`
    /// before the first `withdraw_yield`; see [`Self::has_mint_capability`].
    pub fn new(
        params: FarmParams,
        custody: AccountId,
        stake_ledger: Arc<dyn FungibleLedger>,
        reward_ledger: Arc<dyn MintableLedger>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, FarmError> {
        if !custody.is_valid() {
            return Err(FarmError::InvalidParams(format!(
                "invalid custody account: {custody:?}"
            )));
        }
        let rate = YieldRate::new(&params)?;
        tracing::info!(
            %custody,
            stake_token = stake_ledger.symbol(),
            reward_token = reward_ledger.symbol(),
            rate_num = rate.numerator(),
            rate_den = rate.denominator(),
            "staking engine created"
        );
        Ok(Self {
            params,
            rate,
            custody,
            stake_ledger,
            reward_ledger,
            clock,
            records: HashMap::new(),
            total_staked: 0,
            total_yield_minted: 0,
            events: Vec::new(),
        })
    }

    /// Create an engine from a validated configuration.
    pub fn from_config(
        config: &FarmConfig,
        stake_ledger: Arc<dyn FungibleLedger>,
        reward_ledger: Arc<dyn MintableLedger>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, FarmError> {
        config.validate()?;
        Self::new(
            config.params(),
            config.custody_account.clone(),
            stake_ledger,
            reward_ledger,
            clock,
        )
    }

    // ── Operations ────────────────────────────────────────────────────────

    /// Deposit `amount` stake-asset units from `caller` into custody.
    ///
    /// The caller must have approved the custody account for at least
    /// `amount` on the stake ledger.
    pub fn stake(&mut self, caller: &AccountId, amount: u128) -> Result<(), FarmError> {
        self.reject_custody(caller)?;
        if amount == 0 {
            tracing::warn!(%caller, "stake rejected: zero amount");
            return Err(FarmError::InvalidAmount);
        }
        let now = self.clock.now();
        let current = self.records.get(caller).cloned().unwrap_or_default();
        let mut updated = self.capture(caller, &current, now)?;
        updated.staked_amount = updated
            .staked_amount
            .checked_add(amount)
            .ok_or(FarmError::Overflow)?;
        let total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(FarmError::Overflow)?;

        self.stake_ledger
            .transfer_from(&self.custody, caller, &self.custody, amount)
            .inspect_err(|e| tracing::warn!(%caller, amount, error = %e, "stake transfer failed"))?;

        self.records.insert(caller.clone(), updated);
        self.total_staked = total_staked;
        self.events.push(FarmEvent::Staked {
            account: caller.clone(),
            amount,
            at: now,
        });
        tracing::info!(%caller, amount, total_staked, "staked");
        Ok(())
    }

    /// Return `amount` of `caller`'s principal from custody.
    ///
    /// Yield earned so far is captured first, so a partial unstake keeps it
    /// withdrawable. The accrual clock restarts even when nothing remains
    /// staked. A capture too large for `u128` is clamped rather than
    /// blocking the return of principal.
    pub fn unstake(&mut self, caller: &AccountId, amount: u128) -> Result<(), FarmError> {
        self.reject_custody(caller)?;
        if amount == 0 {
            tracing::warn!(%caller, "unstake rejected: zero amount");
            return Err(FarmError::InvalidAmount);
        }
        let current = self.records.get(caller).cloned().unwrap_or_default();
        if amount > current.staked_amount {
            tracing::warn!(%caller, amount, staked = current.staked_amount, "unstake rejected");
            return Err(FarmError::InsufficientStake {
                requested: amount,
                staked: current.staked_amount,
            });
        }
        let now = self.clock.now();
        let mut updated = match self.capture(caller, &current, now) {
            Ok(captured) => captured,
            Err(FarmError::Overflow) => {
                tracing::warn!(%caller, "captured yield overflows u128, clamped");
                current.captured_saturating(&self.rate, now)
            }
            Err(e) => return Err(e),
        };
        updated.staked_amount -= amount;
        let total_staked = self.total_staked.checked_sub(amount).ok_or_else(|| {
            FarmError::Invariant(format!(
                "total staked {} below account stake {}",
                self.total_staked, current.staked_amount
            ))
        })?;

        match self.stake_ledger.transfer(&self.custody, caller, amount) {
            Ok(()) => {}
            Err(TokenError::TransferFailed { needed, available }) => {
                tracing::error!(
                    custody = %self.custody,
                    needed,
                    available,
                    total_staked = self.total_staked,
                    "custody shortfall on unstake"
                );
                return Err(FarmError::Invariant(format!(
                    "custody holds {available}, unstake needs {needed}"
                )));
            }
            Err(e) => return Err(e.into()),
        }

        self.records.insert(caller.clone(), updated);
        self.total_staked = total_staked;
        self.events.push(FarmEvent::Unstaked {
            account: caller.clone(),
            amount,
            at: now,
        });
        tracing::info!(%caller, amount, total_staked, "unstaked");
        Ok(())
    }

    /// Mint all of `caller`'s withdrawable yield and restart its accrual
    /// period. Returns the minted amount.
    ///
    /// Fails with `NothingToWithdraw` when the amount would be zero.
    pub fn withdraw_yield(&mut self, caller: &AccountId) -> Result<u128, FarmError> {
        self.reject_custody(caller)?;
        let current = self
            .records
            .get(caller)
            .cloned()
            .ok_or(FarmError::NothingToWithdraw)?;
        let now = self.clock.now();
        let mut updated = self.capture(caller, &current, now)?;
        let amount = updated.unclaimed_yield;
        if amount == 0 {
            return Err(FarmError::NothingToWithdraw);
        }
        updated.unclaimed_yield = 0;
        let total_minted = self
            .total_yield_minted
            .checked_add(amount)
            .ok_or(FarmError::Overflow)?;

        self.reward_ledger
            .mint(&self.custody, caller, amount)
            .inspect_err(|e| tracing::error!(%caller, amount, error = %e, "yield mint failed"))?;

        self.records.insert(caller.clone(), updated);
        self.total_yield_minted = total_minted;
        self.events.push(FarmEvent::YieldWithdrawn {
            account: caller.clone(),
            amount,
            at: now,
        });
        tracing::info!(%caller, amount, total_minted, "yield withdrawn");
        Ok(amount)
    }

    fn reject_custody(&self, caller: &AccountId) -> Result<(), FarmError> {
        if caller == &self.custody {
            tracing::warn!(%caller, "operation rejected: caller is the custody account");
            return Err(FarmError::CustodyCaller(caller.clone()));
        }
        Ok(())
    }

    /// Fold the current period's yield into `unclaimed_yield` and restart the
    /// period at `now`. Pure with respect to `self`.
    fn capture(
        &self,
        account: &AccountId,
        record: &AccountRecord,
        now: Timestamp,
    ) -> Result<AccountRecord, FarmError> {
        if now < record.accrual_start {
            tracing::warn!(
                %account,
                start = %record.accrual_start,
                %now,
                "clock reads before accrual start, treating elapsed as zero"
            );
        }
        let captured = record
            .captured(&self.rate, now)
            .ok_or(FarmError::Overflow)?;
        if record.is_staking() {
            tracing::debug!(
                %account,
                staked = record.staked_amount,
                period = %format_duration(elapsed_secs(record.accrual_start, now)),
                captured = captured.unclaimed_yield - record.unclaimed_yield,
                "yield captured"
            );
        }
        Ok(captured)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn is_staking(&self, account: &AccountId) -> bool {
        self.records.get(account).is_some_and(AccountRecord::is_staking)
    }

    pub fn staking_balance(&self, account: &AccountId) -> u128 {
        self.records.get(account).map_or(0, |r| r.staked_amount)
    }

    /// Start of the account's current accrual period; the epoch for an
    /// account that never staked.
    pub fn start_time(&self, account: &AccountId) -> Timestamp {
        self.records
            .get(account)
            .map_or(Timestamp::EPOCH, |r| r.accrual_start)
    }

    /// Seconds in the account's current accrual period; zero for an account
    /// that never staked.
    pub fn calculate_yield_time(&self, account: &AccountId) -> u64 {
        self.records
            .get(account)
            .map_or(0, |r| elapsed_secs(r.accrual_start, self.clock.now()))
    }

    /// Everything withdrawable right now: captured plus current-period yield.
    pub fn accrued_yield(&self, account: &AccountId) -> Result<u128, FarmError> {
        match self.records.get(account) {
            Some(r) => r
                .withdrawable_yield(&self.rate, self.clock.now())
                .ok_or(FarmError::Overflow),
            None => Ok(0),
        }
    }

    /// Alias of [`Self::accrued_yield`] named after the reward token.
    pub fn ice_balance(&self, account: &AccountId) -> Result<u128, FarmError> {
        self.accrued_yield(account)
    }

    pub fn record(&self, account: &AccountId) -> Option<&AccountRecord> {
        self.records.get(account)
    }

    pub fn account_count(&self) -> usize {
        self.records.len()
    }

    pub fn total_staked(&self) -> u128 {
        self.total_staked
    }

    pub fn total_yield_minted(&self) -> u128 {
        self.total_yield_minted
    }

    pub fn custody(&self) -> &AccountId {
        &self.custody
    }

    pub fn params(&self) -> &FarmParams {
        &self.params
    }

    pub fn rate(&self) -> YieldRate {
        self.rate
    }

    /// Whether the reward ledger currently lets the engine mint.
    pub fn has_mint_capability(&self) -> bool {
        self.reward_ledger.owner().as_ref() == Some(&self.custody)
    }

    /// Verify that custody on the stake ledger covers every staked unit.
    pub fn check_custody(&self) -> Result<(), FarmError> {
        let held = self.stake_ledger.balance_of(&self.custody);
        if held < self.total_staked {
            tracing::error!(held, total_staked = self.total_staked, "custody shortfall");
            return Err(FarmError::Invariant(format!(
                "custody holds {held}, accounts staked {}",
                self.total_staked
            )));
        }
        Ok(())
    }

    /// Drain events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<FarmEvent> {
        std::mem::take(&mut self.events)
    }
}

impl StakingEngine {
    /// Persist all account records and counters to a farm store.
    ///
    /// Records the store holds for accounts this engine does not know are
    /// deleted, so a later restore sees exactly this engine's table.
    pub fn save_to_store(&self, store: &dyn FarmStore) -> Result<(), FarmError> {
        for (account, _) in store.iter_records()? {
            if !self.records.contains_key(&account) {
                store.delete_record(&account)?;
                tracing::debug!(%account, "stale record removed from store");
            }
        }
        for (account, record) in &self.records {
            let bytes = bincode::serialize(record)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            store.put_record(account, &bytes)?;
        }
        store.put_meta(
            META_TOTAL_YIELD_MINTED,
            &self.total_yield_minted.to_be_bytes(),
        )?;
        tracing::debug!(accounts = self.records.len(), "farm state saved");
        Ok(())
    }

    /// Replace the in-memory record table with the one held by `store`.
    ///
    /// `total_staked` is recomputed from the loaded records.
    pub fn restore_from_store(&mut self, store: &dyn FarmStore) -> Result<(), FarmError> {
        let total_yield_minted = match store.get_meta(META_TOTAL_YIELD_MINTED)? {
            Some(bytes) => {
                let raw: [u8; 16] = bytes.as_slice().try_into().map_err(|_| {
                    StoreError::Corruption(format!(
                        "total_yield_minted has {} bytes, expected 16",
                        bytes.len()
                    ))
                })?;
                u128::from_be_bytes(raw)
            }
            None => 0,
        };

        let mut records = HashMap::new();
        let mut total_staked: u128 = 0;
        for (account, bytes) in store.iter_records()? {
            let record: AccountRecord = bincode::deserialize(&bytes)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            total_staked = total_staked
                .checked_add(record.staked_amount)
                .ok_or(FarmError::Overflow)?;
            records.insert(account, record);
        }

        tracing::info!(accounts = records.len(), total_staked, "farm state restored");
        self.records = records;
        self.total_staked = total_staked;
        self.total_yield_minted = total_yield_minted;
        Ok(())
    }
}
