//! Balance types for the deposit ledger.

use serde::{Deserialize, Serialize};

/// Token or native-currency amount in minor units.
pub type Amount = u128;

/// Administrative view of one (token, account) deposit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositInfo {
    /// Ledger balance held for the account.
    pub amount: Amount,
    /// Block after which withdrawal is allowed; `0` means locked.
    pub unlock_block: u64,
}
