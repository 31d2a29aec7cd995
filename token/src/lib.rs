//! Fungible token ledgers consumed by the staking engine.
//!
//! The engine only sees the two traits in [`ledger`]: a plain fungible
//! ledger for the stake asset and a mintable one for the reward asset.
//! [`TokenLedger`] is the in-memory implementation used by tests, benches
//! and embedders that have no external ledger.

pub mod error;
pub mod ledger;
pub mod memory;

pub use error::TokenError;
pub use ledger::{FungibleLedger, MintableLedger};
pub use memory::TokenLedger;
