//! # feesponsor-ledger
//!
//! **Accounting plane**: which tokens the sponsor accepts, what they are
//! worth, and how much each account has escrowed.
//!
//! ## Architecture
//!
//! 1. **TokenRegistry**: write-once map from token to price source
//! 2. **PriceConverter**: native cost → token amount at a fixed scale,
//!    through 256-bit intermediates in [`math`]
//! 3. **DepositLedger**: per-(token, account) balances, never negative
//! 4. **SupplyConservation**: inflow/outflow totals backing the ledger
//! 5. **WithdrawalLock**: the withdrawal gate the ledger consults
//!
//! ## Data Flow
//!
//! ```text
//! register(token, cfg) → TokenRegistry ──lookup──▶ PriceConverter.convert()
//! deposit / withdraw / settle / credit → DepositLedger → SupplyConservation
//! ```

pub mod converter;
pub mod deposit_ledger;
pub mod lock;
pub mod math;
pub mod oracle;
pub mod registry;
pub mod supply;

pub use converter::PriceConverter;
pub use deposit_ledger::DepositLedger;
pub use lock::WithdrawalLock;
pub use oracle::{PriceSource, PriceSourceFactory};
pub use registry::{RegisteredToken, TokenRegistry};
pub use supply::SupplyConservation;

#[cfg(any(test, feature = "test-helpers"))]
pub use oracle::{ManualFeedFactory, ManualPriceFeed};
