//! Rounding, percentage and ringgit formatting helpers shared by the
//! personal, corporate and relief calculations.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to sen (two decimal places), with half a sen rounded away from
/// zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use mytax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(1170.004)), dec!(1170.00));
/// assert_eq!(round_half_up(dec!(97.505)), dec!(97.51));
/// assert_eq!(round_half_up(dec!(-97.505)), dec!(-97.51));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// The larger of `a` and `b`; used to floor amounts at zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use mytax_core::calculations::common::max;
///
/// assert_eq!(max(dec!(240) - dec!(800), dec!(0)), dec!(0));
/// assert_eq!(max(dec!(44500), dec!(0)), dec!(44500));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// `part / whole × 100`, rounded to two places. Zero when `whole` is zero or
/// negative.
///
/// ```
/// use rust_decimal_macros::dec;
/// use mytax_core::calculations::common::percent_of;
///
/// assert_eq!(percent_of(dec!(150), dec!(20000)), dec!(0.75));
/// assert_eq!(percent_of(dec!(150), dec!(0)), dec!(0));
/// ```
pub fn percent_of(
    part: Decimal,
    whole: Decimal,
) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    round_half_up(part / whole * Decimal::ONE_HUNDRED)
}

/// Formats a rate fraction as a whole-number percentage, e.g. `0.25` → `25%`.
pub fn rate_label(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

/// Formats an amount as ringgit with thousands separators, e.g. `RM 1,234.50`.
///
/// Whole amounts are printed without decimals.
pub fn format_ringgit(amount: Decimal) -> String {
    let rounded = round_half_up(amount);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let abs = rounded.abs();
    let whole = abs.trunc();
    let fraction = abs - whole;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let cents = if fraction.is_zero() {
        String::new()
    } else {
        let cents = (fraction * Decimal::ONE_HUNDRED).trunc().to_string();
        format!(".{cents:0>2}")
    };

    let sign = if negative { "-" } else { "" };
    format!("{sign}RM {grouped}{cents}")
}
