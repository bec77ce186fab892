//! Fixed-width identifiers used throughout feesponsor.
//!
//! Tokens, accounts and the sponsor itself are all 20-byte identifiers
//! (the width of a contract address). They serialize as `0x`-prefixed
//! lowercase hex so configuration files stay readable. Receipts use
//! UUIDv7 for time-ordered sorting.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Result, SponsorError};

/// Width in bytes of every [`TokenId`], [`AccountId`] and [`SponsorId`].
pub const ID_LEN: usize = 20;

/// Serde adapter for `[u8; ID_LEN]` as a `0x` hex string.
mod hex_id {
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    use super::ID_LEN;

    pub fn serialize<S: Serializer>(bytes: &[u8; ID_LEN], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; ID_LEN], D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_hex_id(&raw).map_err(D::Error::custom)
    }
}

fn parse_hex_id(raw: &str) -> Result<[u8; ID_LEN]> {
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    let bytes = hex::decode(digits)
        .map_err(|e| SponsorError::Serialization(format!("invalid hex id {raw:?}: {e}")))?;
    <[u8; ID_LEN]>::try_from(bytes.as_slice()).map_err(|_| {
        SponsorError::Serialization(format!(
            "id {raw:?} is {} bytes, expected {ID_LEN}",
            bytes.len()
        ))
    })
}

fn read_id(bytes: &[u8]) -> Option<[u8; ID_LEN]> {
    <[u8; ID_LEN]>::try_from(bytes).ok()
}

// ---------------------------------------------------------------------------
// TokenId
// ---------------------------------------------------------------------------

/// Identifier of a fungible token. Unique key of the registry and ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TokenId(#[serde(with = "hex_id")] pub [u8; ID_LEN]);

impl TokenId {
    /// Decode from a slice that must be exactly [`ID_LEN`] bytes.
    #[must_use]
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        read_id(bytes).map(Self)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; ID_LEN] {
        &self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for TokenId {
    type Err = SponsorError;

    fn from_str(s: &str) -> Result<Self> {
        parse_hex_id(s).map(Self)
    }
}

// ---------------------------------------------------------------------------
// AccountId
// ---------------------------------------------------------------------------

/// Identifier of an account whose operations are sponsored, or of the
/// sponsor owner that collects revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AccountId(#[serde(with = "hex_id")] pub [u8; ID_LEN]);

impl AccountId {
    #[must_use]
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        read_id(bytes).map(Self)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; ID_LEN] {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for AccountId {
    type Err = SponsorError;

    fn from_str(s: &str) -> Result<Self> {
        parse_hex_id(s).map(Self)
    }
}

// ---------------------------------------------------------------------------
// SponsorId
// ---------------------------------------------------------------------------

/// Identifier of the sponsor. Leads the trailing request payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct SponsorId(#[serde(with = "hex_id")] pub [u8; ID_LEN]);

impl SponsorId {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; ID_LEN] {
        &self.0
    }
}

impl fmt::Display for SponsorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sponsor:0x{}", hex::encode(self.0))
    }
}

// ---------------------------------------------------------------------------
// ReceiptId
// ---------------------------------------------------------------------------

/// Unique identifier of a settlement receipt. UUIDv7 for time ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ReceiptId(pub Uuid);

impl ReceiptId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ReceiptId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rcpt:{}", self.0)
    }
}

/// Random identifiers for tests. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
mod random {
    use super::{AccountId, ID_LEN, SponsorId, TokenId};

    impl TokenId {
        pub fn random() -> Self {
            Self(rand::random::<[u8; ID_LEN]>())
        }
    }

    impl AccountId {
        pub fn random() -> Self {
            Self(rand::random::<[u8; ID_LEN]>())
        }
    }

    impl SponsorId {
        pub fn random() -> Self {
            Self(rand::random::<[u8; ID_LEN]>())
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
