//! Wide intermediates for token-amount ratios.
//!
//! Wei-scale costs multiplied by 18-decimal prices routinely exceed
//! `u128`, so every `a * b / c` is formed in 256 bits. Only a final value
//! that does not fit an [`Amount`] is an overflow.

use feesponsor_types::{Amount, Result, SponsorError};
use primitive_types::U256;

/// `a * b / denom`, truncating. `denom` must be non-zero.
///
/// # Errors
/// `ArithmeticOverflow { op }` if the quotient exceeds `u128` or `denom`
/// is zero.
pub fn mul_div(a: Amount, b: Amount, denom: Amount, op: &'static str) -> Result<Amount> {
    // Two u128 factors always fit in 256 bits.
    let product = U256::from(a) * U256::from(b);
    let quotient = product
        .checked_div(U256::from(denom))
        .ok_or(SponsorError::ArithmeticOverflow { op })?;
    narrow(quotient, op)
}

/// Checked narrowing of a 256-bit value back to an [`Amount`].
///
/// # Errors
/// `ArithmeticOverflow { op }` if `value` needs more than 128 bits.
pub fn narrow(value: U256, op: &'static str) -> Result<Amount> {
    if value.bits() > 128 {
        return Err(SponsorError::ArithmeticOverflow { op });
    }
    Ok(value.low_u128())
}
