use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Scalar statutory values for one year of assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearConfig {
    pub assessment_year: i32,
    pub non_resident_rate: Decimal,
    pub corporate_rate: Decimal,
    /// Fixed relief injected by the caller for a non-working spouse.
    pub spouse_relief: Decimal,
    pub rebate: RebateRules,
    pub epf: EpfRules,
    pub sme: SmeCriteria,
    pub optimization: OptimizationRules,
}

/// Rebates credited directly against tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebateRules {
    /// Rebates apply only when chargeable income is at or below this.
    pub income_threshold: Decimal,
    pub individual: Decimal,
    pub spouse: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpfRules {
    /// Default employee contribution rate as a fraction of salary.
    pub employee_rate: Decimal,
    /// Ceiling on EPF deductible against income per year.
    pub annual_cap: Decimal,
}

/// Paid-up capital and revenue ceilings for the SME tiered corporate rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmeCriteria {
    pub max_paid_up_capital: Decimal,
    pub max_annual_revenue: Decimal,
}

impl SmeCriteria {
    pub fn is_eligible(
        &self,
        paid_up_capital: Decimal,
        annual_revenue: Decimal,
    ) -> bool {
        paid_up_capital <= self.max_paid_up_capital && annual_revenue <= self.max_annual_revenue
    }
}

/// Parameters for the unused-relief suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationRules {
    pub high_impact_reliefs: Vec<String>,
    /// Unclaimed headroom at or below this amount is not worth suggesting.
    pub materiality_threshold: Decimal,
    /// Suggestions saving this much tax or less are dropped.
    pub minimum_saving: Decimal,
}
