//! Yield formula.
//!
//! `yield(staked, elapsed) = floor(staked × elapsed × numerator / denominator)`
//! where `numerator / denominator` is
//! `reward_per_token_per_day / (86400 × 10^stake_decimals)` reduced by its
//! gcd. These functions are pure: capturing yield into a record and
//! resetting the accrual clock is the engine's job.

use crate::error::FarmError;
use icefarm_types::{FarmParams, Timestamp, SECONDS_PER_DAY};
use serde::{Deserialize, Serialize};

/// Reward base units per stake base unit per second, as a reduced fraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YieldRate {
    numerator: u128,
    denominator: u128,
}

impl YieldRate {
    /// Build the per-second rate from farm parameters.
    pub fn new(params: &FarmParams) -> Result<Self, FarmError> {
        if !params.decimals_in_range() {
            return Err(FarmError::InvalidParams(format!(
                "decimals out of range: stake {}, reward {}",
                params.stake_decimals, params.reward_decimals
            )));
        }
        let unit = params
            .stake_decimals
            .unit()
            .ok_or_else(|| FarmError::InvalidParams("stake unit overflows".into()))?;

        // Reduce against each denominator factor before multiplying them so
        // 18-decimal assets do not overflow.
        let rate = params.reward_per_token_per_day;
        let g = gcd(rate, unit);
        let (rate, unit) = (rate / g, unit / g);
        let day = u128::from(SECONDS_PER_DAY);
        let g = gcd(rate, day);
        let (numerator, day) = (rate / g, day / g);
        let denominator = unit.checked_mul(day).ok_or_else(|| {
            FarmError::InvalidParams("rate denominator overflows u128".into())
        })?;
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// A rate given directly as a fraction. `None` for a zero denominator.
    pub fn from_fraction(numerator: u128, denominator: u128) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        let g = gcd(numerator, denominator);
        Some(Self {
            numerator: numerator / g,
            denominator: denominator / g,
        })
    }

    pub fn numerator(&self) -> u128 {
        self.numerator
    }

    pub fn denominator(&self) -> u128 {
        self.denominator
    }

    /// Yield earned by `staked` base units over `elapsed_secs`.
    ///
    /// Exact floor division, evaluated as `q·n + r·n/d` with
    /// `(q, r) = divmod(staked·elapsed, d)`. `None` on overflow.
    pub fn yield_for_period(&self, staked: u128, elapsed_secs: u64) -> Option<u128> {
        let product = staked.checked_mul(u128::from(elapsed_secs))?;
        let q = product / self.denominator;
        let r = product % self.denominator;
        let whole = q.checked_mul(self.numerator)?;
        let rest = r.checked_mul(self.numerator)? / self.denominator;
        whole.checked_add(rest)
    }
}

impl Default for YieldRate {
    /// One reward unit per staked unit per day.
    fn default() -> Self {
        Self {
            numerator: 1,
            denominator: u128::from(SECONDS_PER_DAY),
        }
    }
}

/// Seconds between `start` and `now`, zero if the clock reads earlier than
/// `start`.
pub fn elapsed_secs(start: Timestamp, now: Timestamp) -> u64 {
    start.elapsed_since(now)
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    // gcd(0, 0) would be 0; callers always pass a non-zero operand.
    a.max(1)
}
