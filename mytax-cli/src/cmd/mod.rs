pub mod business;
pub mod catalog;
pub mod corporate;
pub mod personal;

use std::path::Path;

use anyhow::Context as _;
use mytax_core::{ClaimSet, Locale, RateTable};
use mytax_data::{RateTableLoader, builtin_ya2024};
use serde::Serialize;
use tracing::info;

use crate::claims;

/// State shared by every subcommand.
pub struct Context {
    pub table: RateTable,
    pub locale: Locale,
    pub json: bool,
}

/// Loads the rate table from `dir`, or the built-in YA 2024 table.
pub fn load_table(dir: Option<&Path>) -> anyhow::Result<RateTable> {
    match dir {
        Some(dir) => RateTableLoader::from_dir(dir)
            .with_context(|| format!("failed to load rate table from {}", dir.display())),
        None => {
            info!("using built-in rate table");
            builtin_ya2024().context("built-in rate table is invalid")
        }
    }
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Claims from an optional CSV file, overridden by `ID=AMOUNT` arguments.
pub(crate) fn collect_claims(
    file: Option<&Path>,
    args: &[(String, rust_decimal::Decimal)],
) -> anyhow::Result<ClaimSet> {
    let from_file = file
        .map(|path| {
            claims::load_from_file(path)
                .with_context(|| format!("failed to load claims from {}", path.display()))
        })
        .transpose()?;
    Ok(claims::merge(from_file, args))
}
