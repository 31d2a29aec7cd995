//! Yield parameters of a farm.
//!
//! The rate is expressed against whole stake tokens so that the two assets
//! may carry different decimal precisions.

use crate::amount::{AssetDecimals, MAX_DECIMALS};
use serde::{Deserialize, Serialize};

/// Parameters fixed at engine construction.
///
/// Accrual is linear: every whole stake token earns
/// `reward_per_token_per_day` reward base units per 24h of staking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmParams {
    /// Reward base units minted per whole stake token per day.
    /// Default: one whole reward token (`10^reward_decimals`).
    #[serde(default = "default_reward_per_token_per_day")]
    pub reward_per_token_per_day: u128,

    /// Precision of the stake asset.
    #[serde(default)]
    pub stake_decimals: AssetDecimals,

    /// Precision of the reward asset.
    #[serde(default)]
    pub reward_decimals: AssetDecimals,
}

fn default_reward_per_token_per_day() -> u128 {
    // 10^18: one whole 18-decimal reward token.
    1_000_000_000_000_000_000
}

impl FarmParams {
    /// A rate of `whole_rewards` whole reward tokens per whole stake token per
    /// day, for the given precisions. `None` if the rate overflows.
    pub fn with_whole_rate(
        whole_rewards: u128,
        stake_decimals: AssetDecimals,
        reward_decimals: AssetDecimals,
    ) -> Option<Self> {
        Some(Self {
            reward_per_token_per_day: whole_rewards.checked_mul(reward_decimals.unit()?)?,
            stake_decimals,
            reward_decimals,
        })
    }

    /// Whether both decimal scales are representable.
    pub fn decimals_in_range(&self) -> bool {
        self.stake_decimals.get() <= MAX_DECIMALS && self.reward_decimals.get() <= MAX_DECIMALS
    }
}

/// One reward token per staked token per day, both assets at 18 decimals.
impl Default for FarmParams {
    fn default() -> Self {
        Self {
            reward_per_token_per_day: default_reward_per_token_per_day(),
            stake_decimals: AssetDecimals::STANDARD,
            reward_decimals: AssetDecimals::STANDARD,
        }
    }
}
