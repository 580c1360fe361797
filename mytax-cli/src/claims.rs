//! Relief and deduction claims from the command line or a CSV file.
//!
//! ## CSV Format
//!
//! | Column   | Required | Type    | Notes                                  |
//! |----------|----------|---------|----------------------------------------|
//! | `id`     | yes      | string  | Catalog id, e.g. `lifestyle`           |
//! | `amount` | yes      | decimal | `RM` prefix and commas are accepted    |
//!
//! ```csv
//! id,amount
//! lifestyle,"RM 2,500"
//! prs,3000
//! ```
//!
//! Repeated ids are summed, so a file can list one receipt per row.

use std::path::{Path, PathBuf};

use mytax_core::ClaimSet;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::utils::{ParseAmountError, parse_amount};

#[derive(Debug, thiserror::Error)]
pub enum ClaimParseError {
    #[error("expected ID=AMOUNT, got '{0}'")]
    MissingSeparator(String),

    #[error("claim '{0}' has an empty id")]
    EmptyId(String),

    #[error("invalid amount for '{id}': {source}")]
    Amount {
        id: String,
        #[source]
        source: ParseAmountError,
    },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid amount on row {row}: {source}")]
    RowAmount {
        row: usize,
        #[source]
        source: ParseAmountError,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parses one `ID=AMOUNT` argument, e.g. `lifestyle=2500`.
pub fn parse_claim(arg: &str) -> Result<(String, Decimal), ClaimParseError> {
    let (id, amount) = arg
        .split_once('=')
        .ok_or_else(|| ClaimParseError::MissingSeparator(arg.to_string()))?;
    let id = id.trim();
    if id.is_empty() {
        return Err(ClaimParseError::EmptyId(arg.to_string()));
    }
    let amount = parse_amount(amount).map_err(|source| ClaimParseError::Amount {
        id: id.to_string(),
        source,
    })?;
    Ok((id.to_string(), amount))
}

#[derive(Debug, Deserialize)]
struct ClaimRow {
    id: String,
    amount: String,
}

/// Parse CSV text into a claim set.
pub fn load_from_str(input: &str) -> Result<ClaimSet, ClaimParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    let mut claims = ClaimSet::new();
    for (idx, result) in reader.deserialize::<ClaimRow>().enumerate() {
        let row = result?;
        let amount = parse_amount(&row.amount).map_err(|source| ClaimParseError::RowAmount {
            row: idx + 1,
            source,
        })?;
        let total = claims.amount(&row.id) + amount;
        claims.insert(row.id, total);
    }
    Ok(claims)
}

/// Read a claims CSV from disk and delegate to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<ClaimSet, ClaimParseError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ClaimParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}

/// Combines file claims with command-line claims. Command-line amounts
/// replace file amounts for the same id.
pub fn merge(
    file_claims: Option<ClaimSet>,
    arg_claims: &[(String, Decimal)],
) -> ClaimSet {
    let mut claims = file_claims.unwrap_or_default();
    for (id, amount) in arg_claims {
        claims.insert(id.clone(), *amount);
    }
    claims
}
