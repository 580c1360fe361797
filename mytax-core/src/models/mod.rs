mod claims;
mod deduction_item;
mod locale;
mod rate_table;
mod relief_item;
mod tax_bracket;
mod tax_year_config;
mod taxpayer_status;

pub use claims::ClaimSet;
pub use deduction_item::{DeductionCategory, DeductionItem};
pub use locale::Locale;
pub use rate_table::{RateTable, RateTableError};
pub use relief_item::{ReliefCategory, ReliefItem};
pub use tax_bracket::TaxBracket;
pub use tax_year_config::{EpfRules, OptimizationRules, RebateRules, SmeCriteria, TaxYearConfig};
pub use taxpayer_status::{MaritalStatus, Residency};
