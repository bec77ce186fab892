//! Allowance-based token pull, the preferred way to collect payment.
//!
//! A pull moves tokens from the account's own balance into the sponsor's
//! custody, independent of the deposit ledger. Failure is expected and is
//! answered by debiting the deposit instead.

use feesponsor_types::{AccountId, Amount, Result, SponsorId, TokenId};

/// Moves `amount` of `token` from `from` into `to`'s custody.
///
/// Implementations report a refused or failed transfer as
/// [`SponsorError::TransferFailed`](feesponsor_types::SponsorError::TransferFailed).
pub trait TokenPuller: Send + Sync {
    fn pull(&self, token: TokenId, from: AccountId, to: SponsorId, amount: Amount) -> Result<()>;
}

#[cfg(any(test, feature = "test-helpers"))]
pub use scripted::{PullCall, ScriptedPuller};

/// Recording puller for tests. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
mod scripted {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use feesponsor_types::{AccountId, Amount, Result, SponsorError, SponsorId, TokenId};

    use super::TokenPuller;

    /// One attempted pull, successful or not.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PullCall {
        pub token: TokenId,
        pub from: AccountId,
        pub to: SponsorId,
        pub amount: Amount,
        pub succeeded: bool,
    }

    /// Records every pull and fails on demand. Clones share state.
    #[derive(Debug, Clone, Default)]
    pub struct ScriptedPuller {
        failing: Arc<AtomicBool>,
        calls: Arc<Mutex<Vec<PullCall>>>,
    }

    impl ScriptedPuller {
        pub fn new() -> Self {
            Self::default()
        }

        /// A puller whose every pull fails.
        pub fn failing() -> Self {
            let puller = Self::default();
            puller.set_failing(true);
            puller
        }

        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        pub fn calls(&self) -> Vec<PullCall> {
            self.calls.lock().expect("puller poisoned").clone()
        }

        /// Sum of successful pulls.
        pub fn total_pulled(&self) -> Amount {
            self.calls()
                .iter()
                .filter(|c| c.succeeded)
                .map(|c| c.amount)
                .sum()
        }
    }

    impl TokenPuller for ScriptedPuller {
        fn pull(&self, token: TokenId, from: AccountId, to: SponsorId, amount: Amount) -> Result<()> {
            let succeeded = !self.failing.load(Ordering::SeqCst);
            self.calls.lock().expect("puller poisoned").push(PullCall {
                token,
                from,
                to,
                amount,
                succeeded,
            });
            if succeeded {
                Ok(())
            } else {
                Err(SponsorError::TransferFailed {
                    reason: "allowance or balance too low".into(),
                })
            }
        }
    }
}
