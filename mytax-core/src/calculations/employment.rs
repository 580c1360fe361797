//! Annual employment income from a monthly salary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::RateTable;
use crate::calculations::common::round_half_up;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualIncome {
    pub annual_salary: Decimal,
    pub annual_bonus: Decimal,
    pub other_income: Decimal,
    pub gross_income: Decimal,
    /// Employee EPF contribution eligible for relief, capped by the table.
    pub epf_contribution: Decimal,
}

#[derive(Debug, Clone, Copy)]
pub struct EmploymentIncomeCalculator<'a> {
    table: &'a RateTable,
}

impl<'a> EmploymentIncomeCalculator<'a> {
    pub fn new(table: &'a RateTable) -> Self {
        Self { table }
    }

    /// Annualizes `monthly_salary` and derives the EPF contribution.
    ///
    /// `epf_rate_percent` is a percentage such as `11`; `None` uses the
    /// table's statutory employee rate. EPF is charged on salary and bonus
    /// only, never on other income. Amounts saturate at [`Decimal::MAX`].
    pub fn compute_annual_income(
        &self,
        monthly_salary: Decimal,
        bonus_months: Decimal,
        other_income: Decimal,
        epf_rate_percent: Option<Decimal>,
    ) -> AnnualIncome {
        let epf = &self.table.config().epf;
        let rate = epf_rate_percent
            .map(|p| p / Decimal::ONE_HUNDRED)
            .unwrap_or(epf.employee_rate);

        let annual_salary = monthly_salary.saturating_mul(Decimal::from(12));
        let annual_bonus = monthly_salary.saturating_mul(bonus_months);
        let employment = annual_salary.saturating_add(annual_bonus);
        let gross_income = employment.saturating_add(other_income);
        let epf_contribution = round_half_up(employment.saturating_mul(rate).min(epf.annual_cap));

        AnnualIncome {
            annual_salary,
            annual_bonus,
            other_income,
            gross_income,
            epf_contribution,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::test_support::ya2024_table;

    #[test]
    fn epf_is_capped() {
        let table = ya2024_table();
        let calculator = EmploymentIncomeCalculator::new(&table);

        let income = calculator.compute_annual_income(dec!(10000), dec!(2), dec!(0), None);

        assert_eq!(income.annual_salary, dec!(120000));
        assert_eq!(income.annual_bonus, dec!(20000));
        assert_eq!(income.gross_income, dec!(140000));
        assert_eq!(income.epf_contribution, dec!(4000));
    }

    #[test]
    fn epf_below_cap_uses_rate() {
        let table = ya2024_table();
        let calculator = EmploymentIncomeCalculator::new(&table);

        let income = calculator.compute_annual_income(dec!(2500), dec!(0), dec!(0), None);

        assert_eq!(income.epf_contribution, dec!(3300));
    }

    #[test]
    fn other_income_is_not_subject_to_epf() {
        let table = ya2024_table();
        let calculator = EmploymentIncomeCalculator::new(&table);

        let income =
            calculator.compute_annual_income(dec!(2000), dec!(1), dec!(12000), Some(dec!(9)));

        assert_eq!(income.gross_income, dec!(38000));
        // 26000 * 9%
        assert_eq!(income.epf_contribution, dec!(2340));
    }

    #[test]
    fn zero_epf_rate_contributes_nothing() {
        let table = ya2024_table();
        let calculator = EmploymentIncomeCalculator::new(&table);

        let income = calculator.compute_annual_income(dec!(5000), dec!(0), dec!(0), Some(dec!(0)));

        assert_eq!(income.epf_contribution, dec!(0));
    }

    #[test]
    fn huge_salary_saturates_instead_of_overflowing() {
        let table = ya2024_table();
        let calculator = EmploymentIncomeCalculator::new(&table);

        let income = calculator.compute_annual_income(Decimal::MAX, dec!(2), dec!(1000), None);

        assert_eq!(income.annual_salary, Decimal::MAX);
        assert_eq!(income.gross_income, Decimal::MAX);
        assert_eq!(income.epf_contribution, dec!(4000));
    }
}
