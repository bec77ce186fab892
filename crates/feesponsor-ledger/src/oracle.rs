//! Price-source capabilities consumed by the registry.
//!
//! The sponsor never computes prices itself. A [`PriceSourceFactory`]
//! injected at construction builds one [`PriceSource`] per registered
//! token, bound to that token's [`PriceSourceConfig`].

use std::sync::Arc;

use feesponsor_types::{PriceSourceConfig, Result, TokenId};

/// A live feed of token units per native unit, at the configured scale.
///
/// Zero or negative values are invalid and are rejected by the converter.
pub trait PriceSource: Send + Sync {
    fn latest_price(&self) -> i128;
}

/// Builds the price source for a newly registered token.
pub trait PriceSourceFactory: Send + Sync {
    fn create(&self, token: TokenId, config: &PriceSourceConfig) -> Result<Arc<dyn PriceSource>>;
}

#[cfg(any(test, feature = "test-helpers"))]
pub use manual::{ManualFeedFactory, ManualPriceFeed};

/// Hand-driven feeds for tests. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
mod manual {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use feesponsor_types::{PriceSourceConfig, Result, TokenId};

    use super::{PriceSource, PriceSourceFactory};

    /// A feed whose price is set by the test. Clones share the price.
    #[derive(Debug, Clone, Default)]
    pub struct ManualPriceFeed {
        price: Arc<Mutex<i128>>,
    }

    impl ManualPriceFeed {
        pub fn new(price: i128) -> Self {
            Self {
                price: Arc::new(Mutex::new(price)),
            }
        }

        pub fn set_price(&self, price: i128) {
            *self.price.lock().expect("price feed poisoned") = price;
        }
    }

    impl PriceSource for ManualPriceFeed {
        fn latest_price(&self) -> i128 {
            *self.price.lock().expect("price feed poisoned")
        }
    }

    /// Hands out one shared [`ManualPriceFeed`] per token. Feeds start at
    /// price 0 until the test sets them.
    #[derive(Debug, Clone, Default)]
    pub struct ManualFeedFactory {
        feeds: Arc<Mutex<HashMap<TokenId, ManualPriceFeed>>>,
    }

    impl ManualFeedFactory {
        pub fn new() -> Self {
            Self::default()
        }

        /// The feed for `token`, created on first use.
        pub fn feed(&self, token: TokenId) -> ManualPriceFeed {
            self.feeds
                .lock()
                .expect("feed factory poisoned")
                .entry(token)
                .or_default()
                .clone()
        }

        /// Shorthand: set `token`'s price and return its feed.
        pub fn with_price(&self, token: TokenId, price: i128) -> ManualPriceFeed {
            let feed = self.feed(token);
            feed.set_price(price);
            feed
        }
    }

    impl PriceSourceFactory for ManualFeedFactory {
        fn create(
            &self,
            token: TokenId,
            _config: &PriceSourceConfig,
        ) -> Result<Arc<dyn PriceSource>> {
            Ok(Arc::new(self.feed(token)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_feed_clones_share_price() {
        let feed = ManualPriceFeed::new(5);
        let handle = feed.clone();
        handle.set_price(-1);
        assert_eq!(feed.latest_price(), -1);
    }

    #[test]
    fn factory_binds_same_feed_per_token() {
        let factory = ManualFeedFactory::new();
        let token = TokenId::random();
        let handle = factory.with_price(token, 42);
        let source = factory
            .create(token, &PriceSourceConfig::new("ETH", "TKN", 18))
            .unwrap();
        assert_eq!(source.latest_price(), 42);
        handle.set_price(43);
        assert_eq!(source.latest_price(), 43);
    }

    #[test]
    fn unset_feed_reads_zero() {
        let factory = ManualFeedFactory::new();
        assert_eq!(factory.feed(TokenId::random()).latest_price(), 0);
    }
}
