//! Native-cost → token-amount conversion.
//!
//! ```text
//! tokens = native_cost * price / 10^scale_decimals
//! ```
//!
//! The product is formed in 256 bits and the division truncates, so a
//! converted estimate never rounds up. Only a result beyond `u128` fails.

use feesponsor_types::{Amount, Result, SponsorError, TokenId, constants};

use crate::math::mul_div;
use crate::registry::TokenRegistry;

/// Converts native-currency costs into token amounts at a fixed scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceConverter {
    scale_decimals: u32,
    /// `10^scale_decimals`.
    scale: u128,
}

impl PriceConverter {
    /// # Errors
    /// `Configuration` if `10^scale_decimals` does not fit in a `u128`.
    pub fn new(scale_decimals: u32) -> Result<Self> {
        if scale_decimals > constants::MAX_PRICE_SCALE_DECIMALS {
            return Err(SponsorError::Configuration(format!(
                "price scale 10^{scale_decimals} exceeds u128"
            )));
        }
        Ok(Self {
            scale_decimals,
            scale: 10u128.pow(scale_decimals),
        })
    }

    #[must_use]
    pub fn scale_decimals(&self) -> u32 {
        self.scale_decimals
    }

    /// Token units equivalent to `native_cost` at `token`'s latest price.
    ///
    /// # Errors
    /// - `UnsupportedToken` if `token` has no price source
    /// - `InvalidPrice` if the source reports a price ≤ 0
    /// - `ArithmeticOverflow` if the converted amount exceeds `u128`
    pub fn convert(
        &self,
        registry: &TokenRegistry,
        native_cost: Amount,
        token: TokenId,
    ) -> Result<Amount> {
        let source = registry
            .lookup(token)
            .ok_or(SponsorError::UnsupportedToken(token))?;
        let price = source.latest_price();
        if price <= 0 {
            return Err(SponsorError::InvalidPrice { token, price });
        }

        mul_div(native_cost, price.unsigned_abs(), self.scale, "convert")
    }
}

impl Default for PriceConverter {
    fn default() -> Self {
        Self {
            scale_decimals: constants::DEFAULT_PRICE_SCALE_DECIMALS,
            scale: 10u128.pow(constants::DEFAULT_PRICE_SCALE_DECIMALS),
        }
    }
}
