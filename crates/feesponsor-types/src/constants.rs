//! System-wide constants for feesponsor.

/// Gas units reserved for the settlement phase itself. Admission requires
/// the verification budget to exceed it; settlement bills it on top of
/// the measured cost.
pub const POST_SETTLEMENT_COST: u64 = 35_000;

/// Default decimal scale of price-source quotes (18 = native minor units).
pub const DEFAULT_PRICE_SCALE_DECIMALS: u32 = 18;

/// Largest scale for which `10^scale` fits in a `u128`.
pub const MAX_PRICE_SCALE_DECIMALS: u32 = 38;

/// Number of settled operation ids to remember for replay protection.
pub const DEFAULT_REPLAY_CACHE_SIZE: usize = 100_000;

/// Encoded width of an admission context: account, token, three `u128`s.
pub const CONTEXT_LEN: usize = crate::ID_LEN * 2 + 16 * 3;

/// Width of the trailing sponsor payload: `[sponsor][token]`.
pub const SPONSOR_PAYLOAD_LEN: usize = crate::ID_LEN * 2;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
