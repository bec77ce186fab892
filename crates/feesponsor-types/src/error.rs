//! Error types for feesponsor.
//!
//! All errors use the `SF_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Token registry / pricing errors
//! - 2xx: Deposit ledger errors
//! - 3xx: Admission errors
//! - 4xx: Settlement errors
//! - 9xx: General errors (configuration, serialization, I/O)

use thiserror::Error;

use crate::{AccountId, Amount, TokenId};

/// Central error enum for all feesponsor operations.
#[derive(Debug, Error)]
pub enum SponsorError {
    // =================================================================
    // Registry / Pricing Errors (1xx)
    // =================================================================
    /// The token already has a price source.
    #[error("SF_ERR_100: Token already registered: {0}")]
    AlreadyRegistered(TokenId),

    /// The token has no registered price source.
    #[error("SF_ERR_101: Unsupported token: {0}")]
    UnsupportedToken(TokenId),

    /// The price source reported a zero or negative price.
    #[error("SF_ERR_102: Invalid price {price} for token {token}")]
    InvalidPrice { token: TokenId, price: i128 },

    /// The price source precision disagrees with the conversion scale.
    #[error("SF_ERR_103: Price source for {token} has {decimals} decimals, converter scale is {scale}")]
    PriceScaleMismatch {
        token: TokenId,
        decimals: u32,
        scale: u32,
    },

    /// Checked arithmetic overflowed.
    #[error("SF_ERR_104: Arithmetic overflow in {op}")]
    ArithmeticOverflow { op: &'static str },

    // =================================================================
    // Ledger Errors (2xx)
    // =================================================================
    /// A debit would take the ledger entry below zero.
    #[error("SF_ERR_200: Insufficient deposit balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Amount, available: Amount },

    /// A credit would overflow the ledger entry.
    #[error("SF_ERR_201: Deposit balance overflow for {account} in {token}")]
    BalanceOverflow { token: TokenId, account: AccountId },

    /// The account's deposit is still locked at this block.
    #[error("SF_ERR_202: Withdrawal locked for {account} at block {current_block} (unlock block {unlock_block})")]
    WithdrawalLocked {
        account: AccountId,
        unlock_block: u64,
        current_block: u64,
    },

    /// Supply conservation invariant violated. Critical safety alert.
    #[error("SF_ERR_203: Supply invariant violation: {reason}")]
    SupplyInvariantViolation { reason: String },

    // =================================================================
    // Admission Errors (3xx)
    // =================================================================
    /// The sponsor payload is not `[sponsor][token]`.
    #[error("SF_ERR_300: Malformed sponsor payload: expected {expected} bytes, got {actual}")]
    MalformedPayload { expected: usize, actual: usize },

    /// The verification budget cannot cover the settlement phase.
    #[error("SF_ERR_301: Verification budget {budget} must exceed settlement cost {required}")]
    InsufficientVerificationBudget { budget: u64, required: u64 },

    /// The account's deposit does not cover the estimated token cost.
    #[error("SF_ERR_302: Insufficient deposit: need {needed}, have {available}")]
    InsufficientDeposit { needed: Amount, available: Amount },

    /// A zero budget ceiling leaves no exchange rate to bill against.
    #[error("SF_ERR_303: Budget ceiling must be non-zero")]
    ZeroBudget,

    // =================================================================
    // Settlement Errors (4xx)
    // =================================================================
    /// The opaque context bytes do not decode.
    #[error("SF_ERR_400: Malformed admission context: {reason}")]
    MalformedContext { reason: String },

    /// The operation was already settled through the replay guard.
    #[error("SF_ERR_401: Operation already settled: {0}")]
    OperationReplayed(String),

    /// The direct token pull failed. Handled by the deposit fallback.
    #[error("SF_ERR_402: Token transfer failed: {reason}")]
    TransferFailed { reason: String },

    // =================================================================
    // General (9xx)
    // =================================================================
    /// Serialization / deserialization error.
    #[error("SF_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config file, bad values, etc.).
    #[error("SF_ERR_902: Configuration error: {0}")]
    Configuration(String),

    /// I/O error.
    #[error("SF_ERR_903: I/O error: {0}")]
    Io(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, SponsorError>;

impl From<std::io::Error> for SponsorError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SponsorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
