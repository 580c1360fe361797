use mytax_core::RateTable;
use tracing::debug;

use crate::{RateTableLoader, RateTableLoaderError, RateTableSources};

const YA2024: RateTableSources<'static> = RateTableSources {
    config: include_str!("../tables/ya2024/rate_table.toml"),
    personal_brackets: include_str!("../tables/ya2024/personal_brackets.csv"),
    sme_brackets: include_str!("../tables/ya2024/sme_brackets.csv"),
    reliefs: include_str!("../tables/ya2024/reliefs.csv"),
    deductions: include_str!("../tables/ya2024/deductions.csv"),
};

/// The YA 2024 rate table compiled into the crate.
///
/// # Errors
///
/// Only fails if the embedded files are broken, which the tests guard.
pub fn builtin_ya2024() -> Result<RateTable, RateTableLoaderError> {
    debug!("loading built-in YA 2024 rate table");
    RateTableLoader::from_sources(&YA2024)
}
