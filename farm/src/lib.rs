//! Staking farm: the yield accounting engine.
//!
//! Accounts deposit a stake asset and accrue a reward asset linearly in time:
//! `yield = staked × elapsed × rate / (86400 × 10^stake_decimals)`
//!
//! This crate handles:
//! - Per-account staking records (principal, accrual start, unclaimed yield)
//! - Stake / unstake with yield capture so a balance change never re-prices
//!   time already elapsed
//! - Yield withdrawal by minting on the reward ledger
//! - Persistence of the record table through a `FarmStore`

pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod rate;
pub mod record;

pub use config::{FarmConfig, RateConfig};
pub use engine::StakingEngine;
pub use error::FarmError;
pub use event::FarmEvent;
pub use rate::{elapsed_secs, YieldRate};
pub use record::AccountRecord;
