//! Decimal scaling for fungible amounts.
//!
//! Every amount in the workspace is a raw `u128` in the asset's base unit.
//! A "whole" token is `10^decimals` base units, the way an 18-decimal ERC-20
//! counts wei.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest decimal scale whose unit (`10^decimals`) still fits in a `u128`.
pub const MAX_DECIMALS: u8 = 38;

/// Decimal precision of one asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetDecimals(u8);

impl AssetDecimals {
    /// The common 18-decimal precision.
    pub const STANDARD: Self = Self(18);

    pub fn new(decimals: u8) -> Self {
        Self(decimals)
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// Base units in one whole token, or `None` above [`MAX_DECIMALS`].
    pub fn unit(&self) -> Option<u128> {
        10u128.checked_pow(u32::from(self.0))
    }
}

impl Default for AssetDecimals {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl fmt::Display for AssetDecimals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} decimals", self.0)
    }
}

/// Convert a whole-token count into base units (`whole * 10^decimals`).
///
/// Returns `None` on overflow.
pub fn to_base_units(whole: u128, decimals: AssetDecimals) -> Option<u128> {
    whole.checked_mul(decimals.unit()?)
}
