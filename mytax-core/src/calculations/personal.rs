//! Personal income tax on chargeable income.
//!
//! Residents are taxed progressively over the personal schedule; each
//! bracket's rate applies only to the slice of income inside it. Non-residents
//! pay a flat rate on all chargeable income.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use mytax_core::calculations::PersonalTaxEngine;
//! use mytax_core::Residency;
//! # use mytax_core::{RateTable, TaxBracket, TaxYearConfig, ReliefItem, ReliefCategory};
//! # use mytax_core::{RebateRules, EpfRules, SmeCriteria, OptimizationRules};
//! # let b = |min, max, rate, base| TaxBracket { min_income: min, max_income: max, tax_rate: rate, base_tax: base };
//! # let table = RateTable::new(
//! #     TaxYearConfig {
//! #         assessment_year: 2024,
//! #         non_resident_rate: dec!(0.30),
//! #         corporate_rate: dec!(0.24),
//! #         spouse_relief: dec!(4000),
//! #         rebate: RebateRules { income_threshold: dec!(35000), individual: dec!(400), spouse: dec!(400) },
//! #         epf: EpfRules { employee_rate: dec!(0.11), annual_cap: dec!(4000) },
//! #         sme: SmeCriteria { max_paid_up_capital: dec!(2500000), max_annual_revenue: dec!(50000000) },
//! #         optimization: OptimizationRules { high_impact_reliefs: vec![], materiality_threshold: dec!(100), minimum_saving: dec!(10) },
//! #     },
//! #     vec![
//! #         b(dec!(0), Some(dec!(5000)), dec!(0), dec!(0)),
//! #         b(dec!(5000), Some(dec!(20000)), dec!(0.01), dec!(0)),
//! #         b(dec!(20000), None, dec!(0.03), dec!(150)),
//! #     ],
//! #     vec![b(dec!(0), None, dec!(0.24), dec!(0))],
//! #     vec![ReliefItem {
//! #         id: "self".into(), category: ReliefCategory::Automatic, name: "Self".into(),
//! #         name_ms: "Individu".into(), limit: dec!(9000), per_unit: false, description: String::new(),
//! #     }],
//! #     vec![],
//! # ).unwrap();
//! let engine = PersonalTaxEngine::new(&table);
//!
//! let resident = engine.compute(dec!(20000), Residency::Resident);
//! assert_eq!(resident.tax_payable, dec!(150.00));
//! assert_eq!(resident.effective_rate, dec!(0.75));
//!
//! let non_resident = engine.compute(dec!(100000), Residency::NonResident);
//! assert_eq!(non_resident.tax_payable, dec!(30000.00));
//! assert_eq!(non_resident.effective_rate, dec!(30.00));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{percent_of, round_half_up};
use crate::calculations::schedule::{BracketShare, find_bracket, progressive_tax};
use crate::{RateTable, Residency, TaxBracket};

/// The bracket reported as the taxpayer's current band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CurrentBracket {
    /// A bracket of the resident schedule.
    Progressive(TaxBracket),
    /// The non-resident rate, which has no income range.
    Flat { rate: Decimal },
}

impl CurrentBracket {
    pub fn rate(&self) -> Decimal {
        match self {
            Self::Progressive(bracket) => bracket.tax_rate,
            Self::Flat { rate } => *rate,
        }
    }
}

/// Result of a personal tax computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalTax {
    /// Tax before rebates, rounded to cents.
    pub tax_payable: Decimal,
    /// Tax as a percentage of chargeable income, rounded to two places.
    pub effective_rate: Decimal,
    pub bracket: CurrentBracket,
    /// One entry per bracket the income reached.
    pub breakdown: Vec<BracketShare>,
}

#[derive(Debug, Clone, Copy)]
pub struct PersonalTaxEngine<'a> {
    table: &'a RateTable,
}

impl<'a> PersonalTaxEngine<'a> {
    pub fn new(table: &'a RateTable) -> Self {
        Self { table }
    }

    /// Computes tax on `chargeable_income`.
    ///
    /// Zero or negative income yields zero tax in the lowest bracket with an
    /// empty breakdown.
    pub fn compute(
        &self,
        chargeable_income: Decimal,
        residency: Residency,
    ) -> PersonalTax {
        if chargeable_income <= Decimal::ZERO {
            return PersonalTax {
                tax_payable: Decimal::ZERO,
                effective_rate: Decimal::ZERO,
                bracket: CurrentBracket::Progressive(self.table.lowest_personal_bracket().clone()),
                breakdown: Vec::new(),
            };
        }

        match residency {
            Residency::NonResident => self.flat(chargeable_income),
            Residency::Resident => self.progressive(chargeable_income),
        }
    }

    /// Tax a resident would pay on `chargeable_income`, before rebates.
    pub fn resident_tax(
        &self,
        chargeable_income: Decimal,
    ) -> Decimal {
        self.compute(chargeable_income, Residency::Resident)
            .tax_payable
    }

    fn flat(
        &self,
        chargeable_income: Decimal,
    ) -> PersonalTax {
        let rate = self.table.config().non_resident_rate;
        let tax = chargeable_income * rate;

        debug!(
            chargeable_income = %chargeable_income,
            rate = %rate,
            tax = %tax,
            "non-resident flat rate applied"
        );

        PersonalTax {
            tax_payable: round_half_up(tax),
            effective_rate: round_half_up(rate * Decimal::ONE_HUNDRED),
            bracket: CurrentBracket::Flat { rate },
            breakdown: vec![BracketShare {
                range: "All income".to_string(),
                rate,
                taxable: chargeable_income,
                tax: round_half_up(tax),
            }],
        }
    }

    fn progressive(
        &self,
        chargeable_income: Decimal,
    ) -> PersonalTax {
        let brackets = self.table.personal_brackets();
        let (total, breakdown) = progressive_tax(brackets, chargeable_income);
        let current = find_bracket(brackets, chargeable_income)
            .unwrap_or_else(|| self.table.lowest_personal_bracket());

        debug!(
            chargeable_income = %chargeable_income,
            tax = %total,
            marginal_rate = %current.tax_rate,
            "resident progressive tax computed"
        );

        PersonalTax {
            tax_payable: round_half_up(total),
            effective_rate: percent_of(total, chargeable_income),
            bracket: CurrentBracket::Progressive(current.clone()),
            breakdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::{prop_assert, proptest};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::test_support::ya2024_table;

    // =========================================================================
    // zero and boundary incomes
    // =========================================================================

    #[test]
    fn zero_income_returns_zero_tax_in_lowest_bracket() {
        let table = ya2024_table();
        let engine = PersonalTaxEngine::new(&table);

        let result = engine.compute(Decimal::ZERO, Residency::Resident);

        assert_eq!(result.tax_payable, Decimal::ZERO);
        assert_eq!(result.effective_rate, Decimal::ZERO);
        assert_eq!(
            result.bracket,
            CurrentBracket::Progressive(table.lowest_personal_bracket().clone())
        );
        assert!(result.breakdown.is_empty());
    }

    #[test]
    fn zero_income_non_resident_also_reports_lowest_bracket() {
        let table = ya2024_table();
        let engine = PersonalTaxEngine::new(&table);

        let result = engine.compute(Decimal::ZERO, Residency::NonResident);

        assert_eq!(result.tax_payable, Decimal::ZERO);
        assert_eq!(result.bracket.rate(), dec!(0));
    }

    #[test]
    fn top_of_zero_rate_bracket_pays_nothing() {
        let table = ya2024_table();
        let engine = PersonalTaxEngine::new(&table);

        let result = engine.compute(dec!(5000), Residency::Resident);

        assert_eq!(result.tax_payable, dec!(0));
        assert_eq!(result.bracket.rate(), dec!(0));
    }

    #[test]
    fn top_of_one_percent_bracket() {
        let table = ya2024_table();
        let engine = PersonalTaxEngine::new(&table);

        let result = engine.compute(dec!(20000), Residency::Resident);

        // (20000 - 5000) * 0.01
        assert_eq!(result.tax_payable, dec!(150));
        assert_eq!(result.effective_rate, dec!(0.75));
        assert_eq!(result.bracket.rate(), dec!(0.01));
    }

    #[test]
    fn first_ringgit_of_next_bracket_moves_current_bracket() {
        let table = ya2024_table();
        let engine = PersonalTaxEngine::new(&table);

        let result = engine.compute(dec!(20001), Residency::Resident);

        assert_eq!(result.tax_payable, dec!(150.03));
        assert_eq!(result.bracket.rate(), dec!(0.03));
    }

    // =========================================================================
    // resident schedule
    // =========================================================================

    #[test]
    fn resident_middle_income() {
        let table = ya2024_table();
        let engine = PersonalTaxEngine::new(&table);

        let result = engine.compute(dec!(85000), Residency::Resident);

        // 3700 + 15000 * 0.19 = 6550
        assert_eq!(result.tax_payable, dec!(6550));
        assert_eq!(result.effective_rate, dec!(7.71));
        assert_eq!(result.breakdown.len(), 6);
        assert_eq!(result.breakdown[5].taxable, dec!(15000));
        assert_eq!(result.breakdown[5].tax, dec!(2850));
    }

    #[test]
    fn resident_top_bracket() {
        let table = ya2024_table();
        let engine = PersonalTaxEngine::new(&table);

        let result = engine.compute(dec!(2500000), Residency::Resident);

        // 528400 + 500000 * 0.30
        assert_eq!(result.tax_payable, dec!(678400));
        assert_eq!(
            result.bracket,
            CurrentBracket::Progressive(table.personal_brackets()[9].clone())
        );
        assert_eq!(result.breakdown.len(), 10);
    }

    #[test]
    fn resident_fractional_income_rounds_to_cents() {
        let table = ya2024_table();
        let engine = PersonalTaxEngine::new(&table);

        let result = engine.compute(dec!(5000.5), Residency::Resident);

        // 0.5 * 0.01 = 0.005 rounds half up
        assert_eq!(result.tax_payable, dec!(0.01));
    }

    // =========================================================================
    // non-resident
    // =========================================================================

    #[test]
    fn non_resident_flat_rate() {
        let table = ya2024_table();
        let engine = PersonalTaxEngine::new(&table);

        let result = engine.compute(dec!(100000), Residency::NonResident);

        assert_eq!(result.tax_payable, dec!(30000));
        assert_eq!(result.effective_rate, dec!(30));
        assert_eq!(result.bracket, CurrentBracket::Flat { rate: dec!(0.30) });
        assert_eq!(result.breakdown.len(), 1);
        assert_eq!(result.breakdown[0].range, "All income");
        assert_eq!(result.breakdown[0].taxable, dec!(100000));
    }

    #[test]
    fn resident_tax_ignores_requested_residency() {
        let table = ya2024_table();
        let engine = PersonalTaxEngine::new(&table);

        assert_eq!(engine.resident_tax(dec!(20000)), dec!(150));
    }

    // =========================================================================
    // properties
    // =========================================================================

    proptest! {
        #[test]
        fn prop_tax_is_non_negative_and_monotonic(
            a in 0u64..300_000_000u64,
            b in 0u64..300_000_000u64,
        ) {
            let table = ya2024_table();
            let engine = PersonalTaxEngine::new(&table);
            let (low, high) = if a <= b { (a, b) } else { (b, a) };

            let low_tax = engine.compute(Decimal::new(low as i64, 2), Residency::Resident);
            let high_tax = engine.compute(Decimal::new(high as i64, 2), Residency::Resident);

            prop_assert!(low_tax.tax_payable >= Decimal::ZERO);
            prop_assert!(low_tax.tax_payable <= high_tax.tax_payable);
        }

        #[test]
        fn prop_effective_rate_never_exceeds_top_rate(cents in 1u64..1_000_000_000u64) {
            let table = ya2024_table();
            let engine = PersonalTaxEngine::new(&table);

            let result = engine.compute(Decimal::new(cents as i64, 2), Residency::Resident);

            prop_assert!(result.effective_rate <= dec!(30));
        }
    }
}
