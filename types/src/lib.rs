//! Fundamental types for the icefarm staking ledger.
//!
//! Shared by every other crate in the workspace: account identities,
//! timestamps and the clock seam, decimal scaling for both assets, and the
//! farm's yield parameters.

pub mod address;
pub mod amount;
pub mod params;
pub mod time;

pub use address::AccountId;
pub use amount::{to_base_units, AssetDecimals, MAX_DECIMALS};
pub use params::FarmParams;
pub use time::{Clock, SystemClock, Timestamp, SECONDS_PER_DAY};
