//! Configuration types for the sponsor engine and its price sources.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{AccountId, Result, SponsorError, SponsorId, constants};

/// Configuration for one sponsor engine instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// The sponsor's own identifier (first field of the request payload).
    pub sponsor: SponsorId,
    /// Account credited with settlement revenue.
    pub owner: AccountId,
    /// Decimal scale of price-source quotes.
    #[serde(default = "default_scale")]
    pub price_scale_decimals: u32,
    /// Gas units billed for the settlement phase.
    #[serde(default = "default_post_settlement_gas")]
    pub post_settlement_gas: u64,
    /// Settled operation ids remembered for replay protection.
    #[serde(default = "default_replay_cache_size")]
    pub replay_cache_size: usize,
}

fn default_scale() -> u32 {
    constants::DEFAULT_PRICE_SCALE_DECIMALS
}

fn default_post_settlement_gas() -> u64 {
    constants::POST_SETTLEMENT_COST
}

fn default_replay_cache_size() -> usize {
    constants::DEFAULT_REPLAY_CACHE_SIZE
}

impl EngineConfig {
    /// Config with every tunable at its default.
    #[must_use]
    pub fn new(sponsor: SponsorId, owner: AccountId) -> Self {
        Self {
            sponsor,
            owner,
            price_scale_decimals: default_scale(),
            post_settlement_gas: default_post_settlement_gas(),
            replay_cache_size: default_replay_cache_size(),
        }
    }

    /// Parse and validate a JSON config.
    pub fn from_json(raw: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Reject values the engine cannot operate with.
    pub fn validate(&self) -> Result<()> {
        if self.price_scale_decimals > constants::MAX_PRICE_SCALE_DECIMALS {
            return Err(SponsorError::Configuration(format!(
                "price_scale_decimals {} exceeds {}",
                self.price_scale_decimals,
                constants::MAX_PRICE_SCALE_DECIMALS
            )));
        }
        if self.post_settlement_gas == 0 {
            return Err(SponsorError::Configuration(
                "post_settlement_gas must be > 0".into(),
            ));
        }
        if self.replay_cache_size == 0 {
            return Err(SponsorError::Configuration(
                "replay_cache_size must be > 0".into(),
            ));
        }
        Ok(())
    }
}

/// What a price source is bound to when a token is registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSourceConfig {
    /// Base asset of the feed (e.g., "ETH").
    pub base: String,
    /// Quote asset of the feed (e.g., "USDC").
    pub quote: String,
    /// Decimal precision of the quoted price.
    pub decimals: u32,
}

impl PriceSourceConfig {
    #[must_use]
    pub fn new(base: impl Into<String>, quote: impl Into<String>, decimals: u32) -> Self {
        Self {
            base: base.into(),
            quote: quote.into(),
            decimals,
        }
    }

    /// Feed symbol (e.g., "ETH/USDC").
    #[must_use]
    pub fn symbol(&self) -> String {
        format!("{}/{}", self.base, self.quote)
    }
}
