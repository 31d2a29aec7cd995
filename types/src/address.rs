//! Account identity used as the key of every ledger and staking record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identity of an account on the stake ledger, the reward ledger and
/// the staking engine.
///
/// The engine never interprets the string; it only compares and hashes it.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the raw identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An identity is usable when it is non-empty and has no surrounding
    /// whitespace.
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty() && self.0.trim() == self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity() {
        assert!(AccountId::new("alice").is_valid());
        assert!(!AccountId::new("").is_valid());
        assert!(!AccountId::new(" bob").is_valid());
    }

    #[test]
    fn display_is_raw_string() {
        assert_eq!(AccountId::from("farm").to_string(), "farm");
    }
}
