//! End-to-end personal tax: reliefs, schedule, rebate.
//!
//! [`FullTaxCalculator`] chains the relief aggregator, the personal engine
//! and the rebate engine and merges their results into one record. Spouse
//! relief is not added here; callers put it in the claim set for a married
//! taxpayer whose spouse does not work.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::common::{max, round_half_up};
use crate::calculations::personal::{CurrentBracket, PersonalTaxEngine};
use crate::calculations::rebate::{RebateEngine, final_tax};
use crate::calculations::reliefs::{ReliefAggregator, ReliefLine};
use crate::calculations::schedule::BracketShare;
use crate::{ClaimSet, MaritalStatus, RateTable, Residency};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalTaxRequest {
    pub gross_income: Decimal,
    pub epf_contribution: Decimal,
    pub relief_claims: ClaimSet,
    pub residency: Residency,
    pub marital_status: MaritalStatus,
    pub spouse_working: bool,
}

impl PersonalTaxRequest {
    /// Married with a spouse who has no income.
    pub fn has_non_working_spouse(&self) -> bool {
        self.marital_status == MaritalStatus::Married && !self.spouse_working
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullTaxResult {
    pub gross_income: Decimal,
    pub epf_contribution: Decimal,
    pub total_reliefs: Decimal,
    pub chargeable_income: Decimal,
    pub relief_breakdown: Vec<ReliefLine>,
    pub unrecognised_claims: Vec<String>,

    pub tax_payable: Decimal,
    pub effective_rate: Decimal,
    pub bracket: CurrentBracket,
    pub breakdown: Vec<BracketShare>,

    pub rebate: Decimal,
    pub final_tax: Decimal,
    pub monthly_tax: Decimal,
    /// Tax avoided by the claimed reliefs beyond the automatic ones.
    pub relief_savings: Decimal,
}

#[derive(Debug, Clone, Copy)]
pub struct FullTaxCalculator<'a> {
    table: &'a RateTable,
}

impl<'a> FullTaxCalculator<'a> {
    pub fn new(table: &'a RateTable) -> Self {
        Self { table }
    }

    pub fn calculate(
        &self,
        request: &PersonalTaxRequest,
    ) -> FullTaxResult {
        let aggregator = ReliefAggregator::new(self.table);
        let personal = PersonalTaxEngine::new(self.table);
        let rebates = RebateEngine::new(self.table);

        let income = aggregator.compute_chargeable_income(
            request.gross_income,
            request.epf_contribution,
            &request.relief_claims,
        );
        if !income.unrecognised_claims.is_empty() {
            warn!(
                ids = ?income.unrecognised_claims,
                "relief claims ignored"
            );
        }

        let tax = personal.compute(income.chargeable_income, request.residency);
        let rebate = rebates.compute(income.chargeable_income, request.has_non_working_spouse());
        let final_tax = final_tax(tax.tax_payable, rebate);
        let monthly_tax = round_half_up(final_tax / Decimal::from(12));

        let baseline_income = max(
            request.gross_income
                - request.epf_contribution
                - self.table.automatic_relief_total(),
            Decimal::ZERO,
        );
        let baseline_tax = personal
            .compute(baseline_income, request.residency)
            .tax_payable;
        let relief_savings = max(baseline_tax - final_tax, Decimal::ZERO);

        debug!(
            chargeable_income = %income.chargeable_income,
            tax_payable = %tax.tax_payable,
            rebate = %rebate,
            final_tax = %final_tax,
            "personal tax calculated"
        );

        FullTaxResult {
            gross_income: income.gross_income,
            epf_contribution: income.epf_contribution,
            total_reliefs: income.total_reliefs,
            chargeable_income: income.chargeable_income,
            relief_breakdown: income.relief_breakdown,
            unrecognised_claims: income.unrecognised_claims,
            tax_payable: tax.tax_payable,
            effective_rate: tax.effective_rate,
            bracket: tax.bracket,
            breakdown: tax.breakdown,
            rebate,
            final_tax,
            monthly_tax,
            relief_savings,
        }
    }
}
