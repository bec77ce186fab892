//! Block-height withdraw lock.
//!
//! Deposits are locked by default. An account unlocks by recording the
//! current block; withdrawals succeed only in a strictly later block, so an
//! unlock can never be paired with a withdrawal in the same block. Locking
//! again clears the record.

use std::collections::HashMap;

use feesponsor_ledger::WithdrawalLock;
use feesponsor_types::AccountId;

/// Per-account unlock blocks. Absent means locked.
#[derive(Debug, Clone, Default)]
pub struct UnlockSchedule {
    unlock_blocks: HashMap<AccountId, u64>,
}

impl UnlockSchedule {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `account` asked to unlock at `current_block`.
    pub fn request_unlock(&mut self, account: AccountId, current_block: u64) {
        self.unlock_blocks.insert(account, current_block);
        tracing::info!(account = %account, block = current_block, "deposit unlock requested");
    }

    /// Lock `account`'s deposits again.
    pub fn lock(&mut self, account: AccountId) {
        if self.unlock_blocks.remove(&account).is_some() {
            tracing::info!(account = %account, "deposit locked");
        }
    }

    /// Number of accounts with a pending or active unlock.
    #[must_use]
    pub fn unlocked_count(&self) -> usize {
        self.unlock_blocks.len()
    }
}

impl WithdrawalLock for UnlockSchedule {
    fn is_unlocked(&self, account: AccountId, current_block: u64) -> bool {
        let unlock_block = self.unlock_block(account);
        unlock_block != 0 && current_block > unlock_block
    }

    fn unlock_block(&self, account: AccountId) -> u64 {
        self.unlock_blocks.get(&account).copied().unwrap_or(0)
    }
}
