//! Abstract storage traits for icefarm.
//!
//! Every storage backend (embedded database, in-memory for testing)
//! implements these traits. The engine depends only on the traits.

pub mod error;
pub mod farm;

pub use error::StoreError;
pub use farm::FarmStore;
