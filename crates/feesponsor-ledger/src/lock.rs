//! Withdrawal gate consumed by the deposit ledger.
//!
//! The ledger only asks whether an account may withdraw at a block. Who
//! records unlock requests, and how, belongs to the implementor.

use feesponsor_types::AccountId;

/// Per-account withdrawal gate keyed by block height.
///
/// Implementations must report an account unlocked only when its unlock
/// block is non-zero and strictly below `current_block`.
pub trait WithdrawalLock {
    fn is_unlocked(&self, account: AccountId, current_block: u64) -> bool;

    /// Recorded unlock block, `0` when locked. Used for diagnostics.
    fn unlock_block(&self, _account: AccountId) -> u64 {
        0
    }
}
