use std::sync::LazyLock;

use mytax_core::Locale;
use mytax_core::sanitize::sanitize_decimal;
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

static CURRENCY_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^rm\s*").expect("currency prefix pattern is valid"));

/// Largest amount accepted on input: RM 1 quadrillion.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Error returned when a string cannot be parsed as a ringgit amount.
#[derive(Debug, Error)]
pub enum ParseAmountError {
    #[error("invalid amount '{input}': {source}")]
    Invalid {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },

    #[error("amount '{input}' exceeds the maximum of {max}")]
    TooLarge { input: String, max: Decimal },

    #[error("percentage '{input}' must be between 0 and 100")]
    PercentOutOfRange { input: String },
}

/// Normalizes amount input: trims whitespace, drops an `RM` prefix and
/// removes commas (thousands separator).
fn normalize_amount_input(s: &str) -> String {
    CURRENCY_PREFIX.replace(s.trim(), "").replace(',', "")
}

/// Parses a string into a non-negative [`Decimal`].
///
/// Accepts `"RM 1,234.56"`, `"rm1234.56"` and `"1,234.56"`.
/// Empty or whitespace-only input is treated as 0. Negative amounts are
/// clamped to 0 with a warning. Amounts above [`MAX_AMOUNT`] are rejected.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let value: Decimal = normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid amount: {}", e);
        ParseAmountError::Invalid {
            input: s.to_string(),
            source: e,
        }
    })?;
    if value > MAX_AMOUNT {
        tracing::error!(input = %s, max = %MAX_AMOUNT, "amount too large");
        return Err(ParseAmountError::TooLarge {
            input: s.to_string(),
            max: MAX_AMOUNT,
        });
    }
    if value.is_sign_negative() {
        tracing::warn!(input = %s, "negative amount treated as zero");
    }
    Ok(sanitize_decimal(value))
}

/// Parses a percentage such as `11` or `9.5`, rejecting values above 100.
pub fn parse_percent(s: &str) -> Result<Decimal, ParseAmountError> {
    let value = parse_amount(s.trim().trim_end_matches('%'))?;
    if value > Decimal::ONE_HUNDRED {
        return Err(ParseAmountError::PercentOutOfRange {
            input: s.to_string(),
        });
    }
    Ok(value)
}

/// Parses `en` or `ms` (also `my`), case-insensitively.
pub fn parse_locale(s: &str) -> Result<Locale, String> {
    Locale::parse(s).ok_or_else(|| format!("unknown locale '{s}', expected 'en' or 'ms'"))
}
