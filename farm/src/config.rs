//! Farm configuration with TOML file support.

use crate::rate::YieldRate;
use crate::FarmError;
use icefarm_types::{AccountId, AssetDecimals, FarmParams};
use icefarm_utils::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a staking farm.
///
/// Can be loaded from a TOML file via [`FarmConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FarmConfig {
    /// The engine's identity on both ledgers.
    #[serde(default = "default_custody_account")]
    pub custody_account: AccountId,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter, e.g. "info" or "debug,icefarm_farm=trace".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Yield rate and asset precisions.
    #[serde(default)]
    pub rate: RateConfig,
}

/// The `[rate]` table.
///
/// TOML integers are 64-bit, so the rate is capped at `u64::MAX` here; build
/// [`FarmParams`] directly for larger rates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateConfig {
    /// Reward base units per whole stake token per day.
    #[serde(default = "default_reward_per_token_per_day")]
    pub reward_per_token_per_day: u64,

    #[serde(default = "default_decimals")]
    pub stake_decimals: u8,

    #[serde(default = "default_decimals")]
    pub reward_decimals: u8,
}

impl RateConfig {
    pub fn to_params(&self) -> FarmParams {
        FarmParams {
            reward_per_token_per_day: u128::from(self.reward_per_token_per_day),
            stake_decimals: AssetDecimals::new(self.stake_decimals),
            reward_decimals: AssetDecimals::new(self.reward_decimals),
        }
    }
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            reward_per_token_per_day: default_reward_per_token_per_day(),
            stake_decimals: default_decimals(),
            reward_decimals: default_decimals(),
        }
    }
}

fn default_custody_account() -> AccountId {
    AccountId::new("icefarm")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_reward_per_token_per_day() -> u64 {
    // One whole 18-decimal reward token.
    1_000_000_000_000_000_000
}

fn default_decimals() -> u8 {
    AssetDecimals::STANDARD.get()
}

impl FarmConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, FarmError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| FarmError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, FarmError> {
        toml::from_str(s).map_err(|e| FarmError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, FarmError> {
        toml::to_string_pretty(self).map_err(|e| FarmError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), FarmError> {
        if !self.custody_account.is_valid() {
            return Err(FarmError::Config(format!(
                "invalid custody_account: {:?}",
                self.custody_account.as_str()
            )));
        }
        if !self.params().decimals_in_range() {
            return Err(FarmError::Config(format!(
                "decimals out of range: stake {}, reward {}",
                self.rate.stake_decimals, self.rate.reward_decimals
            )));
        }
        YieldRate::new(&self.params()).map_err(|e| FarmError::Config(e.to_string()))?;
        Ok(())
    }

    pub fn params(&self) -> FarmParams {
        self.rate.to_params()
    }

    /// Install the global tracing subscriber described by this config.
    pub fn init_logging(&self) -> Result<(), FarmError> {
        icefarm_utils::init_logging(self.log_format, &self.log_level).map_err(FarmError::Config)
    }
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            custody_account: default_custody_account(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            rate: RateConfig::default(),
        }
    }
}
