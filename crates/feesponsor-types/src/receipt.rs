//! Settlement receipts for the audit trail.
//!
//! Every completed settlement produces a [`SettlementReceipt`] naming the
//! path that funded it and the digest of the context it consumed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountId, Amount, OutcomeMode, ReceiptId, TokenId};

/// Which funding source paid for a settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentPath {
    /// Tokens were pulled from the account's own balance.
    Pulled,
    /// The account's deposit ledger entry was debited.
    DepositDebit,
}

impl std::fmt::Display for PaymentPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pulled => write!(f, "PULLED"),
            Self::DepositDebit => write!(f, "DEPOSIT_DEBIT"),
        }
    }
}

/// Record of one completed settlement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementReceipt {
    pub id: ReceiptId,
    pub account: AccountId,
    pub token: TokenId,
    /// Outcome reported by the caller.
    pub mode: OutcomeMode,
    pub path: PaymentPath,
    /// Measured native cost, before the settlement overhead.
    pub native_cost: Amount,
    /// Tokens billed and credited to the sponsor owner.
    pub token_cost: Amount,
    /// Hex SHA-256 of the consumed context.
    pub context_digest: String,
    pub settled_at: DateTime<Utc>,
}

impl SettlementReceipt {
    /// Canonical JSON for audit storage.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
