//! Tax engines for Malaysian individuals and companies.
//!
//! Every engine borrows a validated [`RateTable`](crate::RateTable) and is a
//! pure function of its inputs. [`FullTaxCalculator`] chains the relief,
//! personal and rebate engines for the common personal case.

pub mod common;
pub mod corporate;
pub mod employment;
pub mod full_tax;
pub mod optimization;
pub mod personal;
pub mod rebate;
pub mod reliefs;
pub mod schedule;

pub use corporate::{CorporateTax, CorporateTaxEngine, CorporateTaxRequest};
pub use employment::{AnnualIncome, EmploymentIncomeCalculator};
pub use full_tax::{FullTaxCalculator, FullTaxResult, PersonalTaxRequest};
pub use optimization::{OptimizationEngine, OptimizationSuggestion};
pub use personal::{CurrentBracket, PersonalTax, PersonalTaxEngine};
pub use rebate::{RebateEngine, final_tax};
pub use reliefs::{
    CategoryTotal, ChargeableIncome, DeductionLine, DeductionTotals, DeductionTotalsRequest,
    ReliefAggregator, ReliefLine,
};
pub use schedule::BracketShare;
