//! # feesponsor-settlement
//!
//! **Protocol plane**: two-phase admission and settlement of sponsored
//! requests, the block-height withdraw lock, and replay protection.
//!
//! ## Architecture
//!
//! The [`SponsorEngine`] owns the accounting plane and:
//! 1. Admits a request if the deposit covers the converted budget ceiling
//! 2. Hands back an opaque context fixing the exchange rate
//! 3. Settles the actual cost at that rate: token pull first, deposit debit
//!    as the fallback
//! 4. Credits the sponsor owner and records a [`SettlementReceipt`](feesponsor_types::SettlementReceipt)
//! 5. Rejects any context that was already settled
//!
//! ## Request Flow
//!
//! ```text
//! SponsoredRequest → admit() → AdmissionDecision{context}
//!     → (operation runs) → settle(context, mode, cost) → SettlementReceipt
//! ```

pub mod engine;
pub mod puller;
pub mod replay_guard;
pub mod withdraw_lock;

pub use engine::SponsorEngine;
pub use puller::TokenPuller;
pub use replay_guard::ReplayGuard;
pub use withdraw_lock::UnlockSchedule;

#[cfg(any(test, feature = "test-helpers"))]
pub use puller::{PullCall, ScriptedPuller};
