//! Corporate income tax for Sdn Bhd and LLP entities.
//!
//! Companies that meet the SME criteria pay the tiered SME schedule; every
//! other company pays the flat corporate rate on all chargeable income.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::RateTable;
use crate::calculations::common::{format_ringgit, max, percent_of, round_half_up};
use crate::calculations::schedule::{BracketShare, progressive_tax};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorporateTaxRequest {
    pub chargeable_income: Decimal,
    /// Whether the company qualifies for SME rates. See
    /// [`SmeCriteria::is_eligible`](crate::SmeCriteria::is_eligible).
    pub is_sme: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorporateTax {
    pub tax_payable: Decimal,
    pub effective_rate: Decimal,
    pub breakdown: Vec<BracketShare>,
    /// Standard-rate tax minus the tax actually payable. Zero for non-SMEs.
    pub sme_savings: Decimal,
}

impl CorporateTax {
    fn zero() -> Self {
        Self {
            tax_payable: Decimal::ZERO,
            effective_rate: Decimal::ZERO,
            breakdown: Vec::new(),
            sme_savings: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CorporateTaxEngine<'a> {
    table: &'a RateTable,
}

impl<'a> CorporateTaxEngine<'a> {
    pub fn new(table: &'a RateTable) -> Self {
        Self { table }
    }

    pub fn compute(
        &self,
        request: &CorporateTaxRequest,
    ) -> CorporateTax {
        let income = request.chargeable_income;
        if income <= Decimal::ZERO {
            return CorporateTax::zero();
        }

        let standard = income * self.table.config().corporate_rate;

        let (tax, breakdown) = if request.is_sme {
            progressive_tax(self.table.sme_brackets(), income)
        } else {
            let rate = self.table.config().corporate_rate;
            let share = BracketShare {
                range: format!("All income ({})", format_ringgit(income)),
                rate,
                taxable: income,
                tax: round_half_up(standard),
            };
            (standard, vec![share])
        };

        let sme_savings = round_half_up(max(standard - tax, Decimal::ZERO));

        debug!(
            chargeable_income = %income,
            is_sme = request.is_sme,
            tax = %tax,
            sme_savings = %sme_savings,
            "corporate tax computed"
        );

        CorporateTax {
            tax_payable: round_half_up(tax),
            effective_rate: percent_of(tax, income),
            breakdown,
            sme_savings,
        }
    }
}
