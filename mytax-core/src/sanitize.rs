//! Boundary clean-up for amounts entering the engines.
//!
//! Engines assume every amount is finite and non-negative. Anything else is
//! treated as zero here rather than rejected.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::ClaimSet;

/// Converts a float to a non-negative decimal. NaN, infinities, negatives
/// and values too large for a [`Decimal`] become zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use mytax_core::sanitize::sanitize_amount;
///
/// assert_eq!(sanitize_amount(1234.5), dec!(1234.5));
/// assert_eq!(sanitize_amount(-1.0), dec!(0));
/// assert_eq!(sanitize_amount(f64::NAN), dec!(0));
/// ```
pub fn sanitize_amount(value: f64) -> Decimal {
    if !value.is_finite() || value < 0.0 {
        return Decimal::ZERO;
    }
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

/// Clamps a negative decimal to zero.
pub fn sanitize_decimal(value: Decimal) -> Decimal {
    if value.is_sign_negative() {
        Decimal::ZERO
    } else {
        value
    }
}

/// Applies [`sanitize_decimal`] to every claim.
pub fn sanitize_claims(claims: &ClaimSet) -> ClaimSet {
    claims
        .iter()
        .map(|(id, amount)| (id.to_string(), sanitize_decimal(amount)))
        .collect()
}
