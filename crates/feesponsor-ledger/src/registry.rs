//! Token registry: maps each supported token to its price source.
//!
//! Registration is write-once: a token that already has a source can
//! never be re-bound, so a registered exchange rate feed cannot be swapped
//! out from under admitted requests.

use std::collections::HashMap;
use std::sync::Arc;

use feesponsor_types::{PriceSourceConfig, Result, SponsorError, TokenId};
use rust_decimal::Decimal;

use crate::oracle::{PriceSource, PriceSourceFactory};

/// A registered token: its feed configuration and the live source.
#[derive(Clone)]
pub struct RegisteredToken {
    pub config: PriceSourceConfig,
    pub source: Arc<dyn PriceSource>,
}

/// Write-once map from token to price source.
pub struct TokenRegistry {
    tokens: HashMap<TokenId, RegisteredToken>,
    /// Builds a price source for each new registration.
    factory: Box<dyn PriceSourceFactory>,
    /// Scale every feed must quote at.
    scale_decimals: u32,
}

impl TokenRegistry {
    /// Create an empty registry whose feeds must quote at `scale_decimals`.
    #[must_use]
    pub fn new(factory: Box<dyn PriceSourceFactory>, scale_decimals: u32) -> Self {
        Self {
            tokens: HashMap::new(),
            factory,
            scale_decimals,
        }
    }

    /// Bind `token` to a new price source built from `config`.
    ///
    /// # Errors
    /// - `AlreadyRegistered` if `token` already has a source
    /// - `PriceScaleMismatch` if `config.decimals` differs from the scale
    pub fn register(
        &mut self,
        token: TokenId,
        config: PriceSourceConfig,
    ) -> Result<Arc<dyn PriceSource>> {
        if self.tokens.contains_key(&token) {
            return Err(SponsorError::AlreadyRegistered(token));
        }
        if config.decimals != self.scale_decimals {
            return Err(SponsorError::PriceScaleMismatch {
                token,
                decimals: config.decimals,
                scale: self.scale_decimals,
            });
        }

        let source = self.factory.create(token, &config)?;
        tracing::info!(
            token = %token,
            feed = %config.symbol(),
            decimals = config.decimals,
            "token registered"
        );
        self.tokens.insert(
            token,
            RegisteredToken {
                config,
                source: Arc::clone(&source),
            },
        );
        Ok(source)
    }

    /// The price source for `token`, if registered.
    #[must_use]
    pub fn lookup(&self, token: TokenId) -> Option<Arc<dyn PriceSource>> {
        self.tokens.get(&token).map(|t| Arc::clone(&t.source))
    }

    /// The feed configuration for `token`, if registered.
    #[must_use]
    pub fn config(&self, token: TokenId) -> Option<&PriceSourceConfig> {
        self.tokens.get(&token).map(|t| &t.config)
    }

    #[must_use]
    pub fn is_registered(&self, token: TokenId) -> bool {
        self.tokens.contains_key(&token)
    }

    /// Current price of `token` as a human-readable decimal.
    ///
    /// # Errors
    /// `UnsupportedToken` if unregistered; `ArithmeticOverflow` if the
    /// price does not fit a `Decimal` at the feed's precision.
    pub fn display_price(&self, token: TokenId) -> Result<Decimal> {
        let entry = self
            .tokens
            .get(&token)
            .ok_or(SponsorError::UnsupportedToken(token))?;
        Decimal::try_from_i128_with_scale(entry.source.latest_price(), entry.config.decimals)
            .map_err(|_| SponsorError::ArithmeticOverflow {
                op: "display_price",
            })
    }

    /// Scale every registered feed quotes at.
    #[must_use]
    pub fn scale_decimals(&self) -> u32 {
        self.scale_decimals
    }

    /// Number of registered tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::ManualFeedFactory;

    fn setup() -> (TokenRegistry, ManualFeedFactory) {
        let factory = ManualFeedFactory::new();
        (TokenRegistry::new(Box::new(factory.clone()), 18), factory)
    }

    fn cfg() -> PriceSourceConfig {
        PriceSourceConfig::new("ETH", "TKN", 18)
    }

    #[test]
    fn register_then_lookup() {
        let (mut registry, factory) = setup();
        let token = TokenId::random();
        factory.with_price(token, 7);

        registry.register(token, cfg()).unwrap();
        assert!(registry.is_registered(token));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup(token).unwrap().latest_price(), 7);
        assert_eq!(registry.config(token).unwrap().symbol(), "ETH/TKN");
    }

    #[test]
    fn second_registration_rejected_and_first_kept() {
        let (mut registry, factory) = setup();
        let token = TokenId::random();
        factory.with_price(token, 100);
        registry.register(token, cfg()).unwrap();

        let err = registry
            .register(token, PriceSourceConfig::new("ETH", "OTHER", 18))
            .err()
            .unwrap();
        assert!(matches!(err, SponsorError::AlreadyRegistered(t) if t == token));
        assert_eq!(registry.config(token).unwrap().quote, "TKN");
        assert_eq!(registry.lookup(token).unwrap().latest_price(), 100);
    }

    #[test]
    fn mismatched_decimals_rejected() {
        let (mut registry, _) = setup();
        let token = TokenId::random();
        let err = registry
            .register(token, PriceSourceConfig::new("ETH", "TKN", 8))
            .err()
            .unwrap();
        assert!(matches!(
            err,
            SponsorError::PriceScaleMismatch {
                decimals: 8,
                scale: 18,
                ..
            }
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn unknown_token_lookup_is_none() {
        let (registry, _) = setup();
        assert!(registry.lookup(TokenId::random()).is_none());
    }

    #[test]
    fn display_price_applies_feed_precision() {
        let (mut registry, factory) = setup();
        let token = TokenId::random();
        factory.with_price(token, 2_000 * 10i128.pow(18) + 5 * 10i128.pow(17));
        registry.register(token, cfg()).unwrap();
        assert_eq!(
            registry.display_price(token).unwrap(),
            Decimal::new(20_005, 1)
        );
    }

    #[test]
    fn display_price_unknown_token() {
        let (registry, _) = setup();
        let err = registry.display_price(TokenId::random()).unwrap_err();
        assert!(matches!(err, SponsorError::UnsupportedToken(_)));
    }
}
