//! Events emitted by successful state-changing operations.

use icefarm_types::{AccountId, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FarmEvent {
    /// Principal moved into custody.
    Staked {
        account: AccountId,
        amount: u128,
        at: Timestamp,
    },
    /// Principal returned from custody.
    Unstaked {
        account: AccountId,
        amount: u128,
        at: Timestamp,
    },
    /// Reward tokens minted to the account.
    YieldWithdrawn {
        account: AccountId,
        amount: u128,
        at: Timestamp,
    },
}
