//! Rate-table loading for the Malaysian tax engines.
//!
//! A rate table is a directory holding one `rate_table.toml` manifest and
//! four CSV files. The YA 2024 table ships embedded in the crate and is
//! available through [`builtin_ya2024`].

mod builtin;
mod loader;

pub use builtin::builtin_ya2024;
pub use loader::{
    DeductionRecord, RateTableLoader, RateTableLoaderError, RateTableSources, ReliefRecord,
    TaxBracketRecord,
};
