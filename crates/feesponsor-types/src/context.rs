//! # AdmissionContext: the value threaded from admission to settlement
//!
//! Admission fixes the exchange rate for a request by recording both the
//! budget ceiling and the token amount it converted to. Settlement bills
//! against exactly that ratio, so a price change in between cannot bill
//! more than was checked at admission.
//!
//! ## Wire Layout (88 bytes, integers big-endian)
//!
//! ```text
//! [ account : 20 ][ token : 20 ][ gas_price : 16 ][ estimated_token_cost : 16 ][ budget_ceiling : 16 ]
//! ```
//!
//! ## Lifecycle
//!
//! ```text
//!   ┌──────────┐  admit ok  ┌──────────┐  settle ok  ┌─────────┐
//!   │ RECEIVED ├───────────▶│ ADMITTED ├────────────▶│ SETTLED │
//!   └────┬─────┘            └──────────┘             └─────────┘
//!        │ admit err
//!        ▼
//!   ┌──────────┐
//!   │ REJECTED │
//!   └──────────┘
//! ```

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{
    AccountId, Amount, ID_LEN, Result, SponsorError, TokenId, constants::CONTEXT_LEN,
};

/// Immutable record of what admission decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionContext {
    pub account: AccountId,
    pub token: TokenId,
    /// Native price per gas unit fixed at admission.
    pub gas_price: Amount,
    /// `budget_ceiling` converted to tokens at admission.
    pub estimated_token_cost: Amount,
    /// Maximum native cost the sponsor agreed to cover.
    pub budget_ceiling: Amount,
}

impl AdmissionContext {
    /// Encode to the fixed 88-byte wire layout.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(CONTEXT_LEN);
        out.extend_from_slice(self.account.as_bytes());
        out.extend_from_slice(self.token.as_bytes());
        out.extend_from_slice(&self.gas_price.to_be_bytes());
        out.extend_from_slice(&self.estimated_token_cost.to_be_bytes());
        out.extend_from_slice(&self.budget_ceiling.to_be_bytes());
        out
    }

    /// Decode from the wire layout. Any other length is rejected.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != CONTEXT_LEN {
            return Err(SponsorError::MalformedContext {
                reason: format!("expected {CONTEXT_LEN} bytes, got {}", bytes.len()),
            });
        }
        let (account, rest) = bytes.split_at(ID_LEN);
        let (token, rest) = rest.split_at(ID_LEN);
        let (gas_price, rest) = rest.split_at(16);
        let (estimated, budget) = rest.split_at(16);

        let context = Self {
            account: AccountId::from_slice(account).ok_or_else(|| malformed("account"))?,
            token: TokenId::from_slice(token).ok_or_else(|| malformed("token"))?,
            gas_price: read_u128(gas_price)?,
            estimated_token_cost: read_u128(estimated)?,
            budget_ceiling: read_u128(budget)?,
        };
        if context.budget_ceiling == 0 {
            return Err(malformed("budget_ceiling is zero"));
        }
        Ok(context)
    }

    /// SHA-256 digest of the encoded context, hex-encoded.
    #[must_use]
    pub fn digest(&self) -> String {
        digest_bytes(&self.encode())
    }
}

/// SHA-256 digest of raw context bytes, hex-encoded.
#[must_use]
pub fn digest_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"feesponsor:context:v1:");
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Domain-separated SHA-256 of a caller-supplied operation id.
#[must_use]
pub fn operation_digest(operation_id: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"feesponsor:operation:v1:");
    hasher.update(operation_id);
    hasher.finalize().into()
}

fn malformed(field: &str) -> SponsorError {
    SponsorError::MalformedContext {
        reason: field.to_string(),
    }
}

fn read_u128(bytes: &[u8]) -> Result<u128> {
    let raw: [u8; 16] = bytes.try_into().map_err(|_| malformed("integer width"))?;
    Ok(u128::from_be_bytes(raw))
}

/// How long an admission stays valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidityWindow {
    /// No time restriction.
    Always,
}

/// What `admit` hands back to the dispatch infrastructure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionDecision {
    /// Opaque encoded [`AdmissionContext`]; pass unchanged to settlement.
    pub context: Vec<u8>,
    pub validity: ValidityWindow,
}

/// How the sponsored operation ended, as reported by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeMode {
    /// The operation executed successfully.
    Succeeded,
    /// The operation reverted normally.
    Reverted,
    /// A previous settlement attempt failed; the direct pull is unusable.
    DegradedRecovery,
}

impl OutcomeMode {
    /// Whether a direct token pull may be attempted in this mode.
    #[must_use]
    pub fn allows_pull(&self) -> bool {
        !matches!(self, Self::DegradedRecovery)
    }
}

impl std::fmt::Display for OutcomeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Succeeded => write!(f, "SUCCEEDED"),
            Self::Reverted => write!(f, "REVERTED"),
            Self::DegradedRecovery => write!(f, "DEGRADED_RECOVERY"),
        }
    }
}
