//! Inbound sponsored request and its trailing sponsor payload.
//!
//! The payload that selects this sponsor is a fixed two-field layout:
//!
//! ```text
//! [ sponsor id : 20 bytes ][ token id : 20 bytes ]
//! ```
//!
//! Any other length is a format error at admission.

use serde::{Deserialize, Serialize};

use crate::{
    AccountId, Amount, ID_LEN, Result, SponsorError, SponsorId, TokenId,
    constants::SPONSOR_PAYLOAD_LEN,
};

/// Decoded `[sponsor][token]` payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SponsorPayload {
    pub sponsor: SponsorId,
    pub token: TokenId,
}

impl SponsorPayload {
    #[must_use]
    pub fn new(sponsor: SponsorId, token: TokenId) -> Self {
        Self { sponsor, token }
    }

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SPONSOR_PAYLOAD_LEN);
        out.extend_from_slice(self.sponsor.as_bytes());
        out.extend_from_slice(self.token.as_bytes());
        out
    }

    /// Decode a payload of exactly [`SPONSOR_PAYLOAD_LEN`] bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SPONSOR_PAYLOAD_LEN {
            return Err(SponsorError::MalformedPayload {
                expected: SPONSOR_PAYLOAD_LEN,
                actual: bytes.len(),
            });
        }
        let (sponsor, token) = bytes.split_at(ID_LEN);
        let mut sponsor_bytes = [0u8; ID_LEN];
        sponsor_bytes.copy_from_slice(sponsor);
        let mut token_bytes = [0u8; ID_LEN];
        token_bytes.copy_from_slice(token);
        Ok(Self {
            sponsor: SponsorId(sponsor_bytes),
            token: TokenId(token_bytes),
        })
    }
}

/// A request whose execution cost the sponsor is asked to front.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SponsoredRequest {
    /// Account the operation runs for, and the one billed.
    pub sender: AccountId,
    /// Ceiling on the native price per gas unit.
    pub max_fee_per_gas: Amount,
    /// Tip per gas unit on top of the block base fee.
    pub max_priority_fee_per_gas: Amount,
    /// Gas units allotted to the verification phase.
    pub verification_budget: u64,
    /// Trailing `[sponsor][token]` payload.
    pub sponsor_data: Vec<u8>,
}

impl SponsoredRequest {
    /// Decode the sponsor payload carried by this request.
    pub fn payload(&self) -> Result<SponsorPayload> {
        SponsorPayload::decode(&self.sponsor_data)
    }

    /// Effective native price per gas unit the sender pays.
    ///
    /// Equal fee fields mean legacy pricing on a chain without a base fee,
    /// so the max fee is used as-is.
    #[must_use]
    pub fn gas_price(&self, base_fee: Amount) -> Amount {
        if self.max_fee_per_gas == self.max_priority_fee_per_gas {
            return self.max_fee_per_gas;
        }
        self.max_fee_per_gas
            .min(self.max_priority_fee_per_gas.saturating_add(base_fee))
    }
}

/// Chain state the caller observes when invoking the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockContext {
    pub number: u64,
    pub base_fee: Amount,
}

impl BlockContext {
    #[must_use]
    pub fn new(number: u64, base_fee: Amount) -> Self {
        Self { number, base_fee }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(max_fee: Amount, priority: Amount) -> SponsoredRequest {
        SponsoredRequest {
            sender: AccountId([1; ID_LEN]),
            max_fee_per_gas: max_fee,
            max_priority_fee_per_gas: priority,
            verification_budget: 100_000,
            sponsor_data: SponsorPayload::new(SponsorId([2; ID_LEN]), TokenId([3; ID_LEN]))
                .encode(),
        }
    }

    #[test]
    fn payload_decodes_both_fields() {
        let payload = request(1, 1).payload().unwrap();
        assert_eq!(payload.sponsor, SponsorId([2; ID_LEN]));
        assert_eq!(payload.token, TokenId([3; ID_LEN]));
    }

    #[test]
    fn short_payload_rejected() {
        let err = SponsorPayload::decode(&[0u8; SPONSOR_PAYLOAD_LEN - 1]).unwrap_err();
        assert!(matches!(
            err,
            SponsorError::MalformedPayload {
                expected: 40,
                actual: 39
            }
        ));
    }

    #[test]
    fn long_payload_rejected() {
        let err = SponsorPayload::decode(&[0u8; SPONSOR_PAYLOAD_LEN + 20]).unwrap_err();
        assert!(matches!(err, SponsorError::MalformedPayload { actual: 60, .. }));
    }

    #[test]
    fn legacy_pricing_ignores_base_fee() {
        assert_eq!(request(50, 50).gas_price(1_000), 50);
    }

    #[test]
    fn eip1559_pricing_caps_at_max_fee() {
        assert_eq!(request(100, 2).gas_price(30), 32);
        assert_eq!(request(100, 2).gas_price(500), 100);
    }
}
