//! Per-account staking record.

use crate::rate::{elapsed_secs, YieldRate};
use icefarm_types::Timestamp;
use serde::{Deserialize, Serialize};

/// Staking state for a single account.
///
/// Created zero-valued on first stake and never removed; a fully unstaked
/// account keeps its record with `staked_amount == 0`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Principal currently held in custody, stake-asset base units.
    pub staked_amount: u128,

    /// Start of the current accrual period.
    pub accrual_start: Timestamp,

    /// Reward base units captured from earlier periods and not yet minted.
    /// Only grows by capture; only reset by a successful withdrawal.
    pub unclaimed_yield: u128,
}

impl AccountRecord {
    pub fn is_staking(&self) -> bool {
        self.staked_amount > 0
    }

    /// Yield of the current accrual period at `now`.
    pub fn pending_yield(&self, rate: &YieldRate, now: Timestamp) -> Option<u128> {
        rate.yield_for_period(self.staked_amount, elapsed_secs(self.accrual_start, now))
    }

    /// Everything withdrawable at `now`: captured plus pending.
    pub fn withdrawable_yield(&self, rate: &YieldRate, now: Timestamp) -> Option<u128> {
        self.unclaimed_yield
            .checked_add(self.pending_yield(rate, now)?)
    }

    /// Copy of this record with the current period's yield folded into
    /// `unclaimed_yield` and a fresh period starting at `now`.
    ///
    /// Uses the pre-update `staked_amount`, so the caller may change the
    /// principal afterwards without re-pricing elapsed time.
    pub fn captured(&self, rate: &YieldRate, now: Timestamp) -> Option<Self> {
        Some(Self {
            staked_amount: self.staked_amount,
            accrual_start: now,
            unclaimed_yield: self.withdrawable_yield(rate, now)?,
        })
    }

    /// Like [`Self::captured`], but a yield too large for `u128` is clamped
    /// to `u128::MAX` instead of failing.
    pub fn captured_saturating(&self, rate: &YieldRate, now: Timestamp) -> Self {
        let pending = self.pending_yield(rate, now).unwrap_or(u128::MAX);
        Self {
            staked_amount: self.staked_amount,
            accrual_start: now,
            unclaimed_yield: self.unclaimed_yield.saturating_add(pending),
        }
    }
}
