//! Turns raw taxpayer input into a combined tax overview.
//!
//! This is where boundary rules live: spouse relief is injected for a
//! non-working spouse, SME-only deductions are withheld from unincorporated
//! businesses, SME status is decided from paid-up capital and revenue, and
//! enterprise profit is folded into personal income.

use std::collections::BTreeMap;
use std::fmt;

use clap::ValueEnum;
use mytax_core::calculations::common::{max, round_half_up};
use mytax_core::calculations::schedule::find_bracket;
use mytax_core::calculations::{
    AnnualIncome, CorporateTax, CorporateTaxEngine, CorporateTaxRequest, DeductionTotals,
    DeductionTotalsRequest, EmploymentIncomeCalculator, FullTaxCalculator, FullTaxResult,
    OptimizationEngine, OptimizationSuggestion, PersonalTaxRequest, ReliefAggregator,
};
use mytax_core::sanitize::sanitize_claims;
use mytax_core::{ClaimSet, DeductionItem, MaritalStatus, RateTable, ReliefCategory, Residency};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Legal form of a business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BusinessType {
    #[value(name = "sole-prop")]
    SoleProprietor,
    Partnership,
    SdnBhd,
    Llp,
}

impl BusinessType {
    /// Sdn Bhd and LLP are taxed as companies.
    pub fn is_corporate(&self) -> bool {
        matches!(self, Self::SdnBhd | Self::Llp)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SoleProprietor => "Sole Proprietor",
            Self::Partnership => "Partnership",
            Self::SdnBhd => "Sdn Bhd",
            Self::Llp => "LLP",
        }
    }
}

impl fmt::Display for BusinessType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Employment income and personal circumstances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentInput {
    pub monthly_salary: Decimal,
    pub bonus_months: Decimal,
    pub other_income: Decimal,
    /// Percentage, e.g. `11`. `None` uses the statutory rate.
    pub epf_rate_percent: Option<Decimal>,
    pub residency: Residency,
    pub marital_status: MaritalStatus,
    pub spouse_working: bool,
    pub relief_claims: ClaimSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessInput {
    pub business_type: BusinessType,
    pub revenue: Decimal,
    pub paid_up_capital: Decimal,
    pub deduction_claims: ClaimSet,
    /// Overrides `revenue - allowable deductions` when set.
    pub chargeable_income: Option<Decimal>,
}

/// How income reaches the tax engines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum IncomeMode {
    /// Employment income only.
    Employee,
    /// Sole proprietor or partnership: business profit is personal income.
    Enterprise(BusinessInput),
    /// Sdn Bhd or LLP: business profit is taxed at corporate rates.
    Company(BusinessInput),
}

impl IncomeMode {
    pub fn from_business(business: Option<BusinessInput>) -> Self {
        match business {
            None => Self::Employee,
            Some(b) if b.business_type.is_corporate() => Self::Company(b),
            Some(b) => Self::Enterprise(b),
        }
    }

    pub fn business(&self) -> Option<&BusinessInput> {
        match self {
            Self::Employee => None,
            Self::Enterprise(b) | Self::Company(b) => Some(b),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxForm {
    pub employment: EmploymentInput,
    pub mode: IncomeMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "treatment", rename_all = "snake_case")]
pub enum BusinessTreatment {
    /// Profit added to the owner's personal income.
    PersonalIncome,
    Corporate { is_sme: bool, tax: CorporateTax },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessOutcome {
    pub business_type: BusinessType,
    pub revenue: Decimal,
    pub deductions: DeductionTotals,
    /// SME-only claims dropped because the business is not a company.
    pub withheld_claims: Vec<String>,
    pub chargeable_income: Decimal,
    pub treatment: BusinessTreatment,
    /// Estimated tax saved by the allowable deductions at the marginal rate.
    pub deduction_savings: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxOverview {
    pub assessment_year: i32,
    pub residency: Residency,
    pub marital_status: MaritalStatus,
    pub income: AnnualIncome,
    pub personal: FullTaxResult,
    /// Claimed relief amounts per category, before clamping.
    pub relief_categories: BTreeMap<ReliefCategory, Decimal>,
    pub business: Option<BusinessOutcome>,
    pub suggestions: Vec<OptimizationSuggestion>,
    /// Personal final tax plus corporate tax.
    pub total_tax: Decimal,
    pub monthly_tax: Decimal,
}

/// Deductions a business of `business_type` may claim.
pub fn available_deductions(
    table: &RateTable,
    business_type: BusinessType,
) -> Vec<&DeductionItem> {
    table
        .deductions()
        .iter()
        .filter(|d| business_type.is_corporate() || !d.sme_only)
        .collect()
}

/// Adds the spouse relief for a married taxpayer whose spouse has no income.
///
/// The relief is a fixed amount, so any claimed amount is replaced.
pub fn with_spouse_relief(
    table: &RateTable,
    claims: &ClaimSet,
    marital_status: MaritalStatus,
    spouse_working: bool,
) -> ClaimSet {
    let mut claims = claims.clone();
    if marital_status == MaritalStatus::Married && !spouse_working {
        claims.insert("spouse", table.config().spouse_relief);
    } else if claims.remove("spouse").is_some() {
        debug!("spouse relief claim dropped: spouse is working or taxpayer is single");
    }
    claims
}

/// Evaluates `form` against `table`.
pub fn evaluate(
    table: &RateTable,
    form: &TaxForm,
) -> TaxOverview {
    let employment = &form.employment;
    let income = EmploymentIncomeCalculator::new(table).compute_annual_income(
        employment.monthly_salary,
        employment.bonus_months,
        employment.other_income,
        employment.epf_rate_percent,
    );

    let business = form.mode.business().map(|b| business_profit(table, b));

    let mut gross_income = income.gross_income;
    if let (IncomeMode::Enterprise(_), Some((_, _, chargeable))) = (&form.mode, &business) {
        gross_income = gross_income.saturating_add(*chargeable);
    }

    let relief_claims = with_spouse_relief(
        table,
        &sanitize_claims(&employment.relief_claims),
        employment.marital_status,
        employment.spouse_working,
    );

    let personal = FullTaxCalculator::new(table).calculate(&PersonalTaxRequest {
        gross_income,
        epf_contribution: income.epf_contribution,
        relief_claims: relief_claims.clone(),
        residency: employment.residency,
        marital_status: employment.marital_status,
        spouse_working: employment.spouse_working,
    });

    let suggestions = if employment.residency.is_resident() {
        OptimizationEngine::new(table).suggest(&relief_claims, personal.chargeable_income)
    } else {
        Vec::new()
    };
    let relief_categories = ReliefAggregator::new(table).category_totals(&relief_claims);

    let business = form
        .mode
        .business()
        .zip(business)
        .map(|(input, (deductions, withheld_claims, chargeable_income))| {
            let treatment = if input.business_type.is_corporate() {
                let is_sme = table
                    .config()
                    .sme
                    .is_eligible(input.paid_up_capital, input.revenue);
                let tax = CorporateTaxEngine::new(table).compute(&CorporateTaxRequest {
                    chargeable_income,
                    is_sme,
                });
                BusinessTreatment::Corporate { is_sme, tax }
            } else {
                BusinessTreatment::PersonalIncome
            };

            let marginal_rate = match &treatment {
                BusinessTreatment::PersonalIncome => personal.bracket.rate(),
                BusinessTreatment::Corporate { is_sme: true, .. } => {
                    find_bracket(table.sme_brackets(), chargeable_income)
                        .map(|b| b.tax_rate)
                        .unwrap_or(table.config().corporate_rate)
                }
                BusinessTreatment::Corporate { is_sme: false, .. } => {
                    table.config().corporate_rate
                }
            };

            BusinessOutcome {
                business_type: input.business_type,
                revenue: input.revenue,
                deduction_savings: round_half_up(deductions.total_allowable * marginal_rate),
                deductions,
                withheld_claims,
                chargeable_income,
                treatment,
            }
        });

    let corporate_tax = match business.as_ref().map(|b| &b.treatment) {
        Some(BusinessTreatment::Corporate { tax, .. }) => tax.tax_payable,
        _ => Decimal::ZERO,
    };
    let total_tax = personal.final_tax + corporate_tax;

    TaxOverview {
        assessment_year: table.assessment_year(),
        residency: employment.residency,
        marital_status: employment.marital_status,
        income,
        personal,
        relief_categories,
        business,
        suggestions,
        total_tax,
        monthly_tax: round_half_up(total_tax / Decimal::from(12)),
    }
}

/// Deduction totals, withheld SME-only claims and chargeable business income.
fn business_profit(
    table: &RateTable,
    input: &BusinessInput,
) -> (DeductionTotals, Vec<String>, Decimal) {
    let mut claims = sanitize_claims(&input.deduction_claims);
    let mut withheld = Vec::new();

    if !input.business_type.is_corporate() {
        for item in table.deductions().iter().filter(|d| d.sme_only) {
            if claims.remove(&item.id).is_some() {
                withheld.push(item.id.clone());
            }
        }
        if !withheld.is_empty() {
            warn!(
                business_type = %input.business_type,
                ids = ?withheld,
                "SME-only deductions are not available to this business type"
            );
        }
    }

    let deductions = ReliefAggregator::new(table).compute_deduction_totals(&DeductionTotalsRequest {
        deduction_claims: claims,
    });

    let chargeable = input
        .chargeable_income
        .unwrap_or_else(|| max(input.revenue - deductions.total_allowable, Decimal::ZERO));

    (deductions, withheld, chargeable)
}
