//! Individual and spouse tax rebates for low chargeable income.

use rust_decimal::Decimal;

use crate::RateTable;
use crate::calculations::common::max;

#[derive(Debug, Clone, Copy)]
pub struct RebateEngine<'a> {
    table: &'a RateTable,
}

impl<'a> RebateEngine<'a> {
    pub fn new(table: &'a RateTable) -> Self {
        Self { table }
    }

    /// Rebate for `chargeable_income`.
    ///
    /// Income at or below the threshold earns the individual rebate, plus the
    /// spouse rebate when the spouse has no income of their own.
    pub fn compute(
        &self,
        chargeable_income: Decimal,
        has_non_working_spouse: bool,
    ) -> Decimal {
        let rules = &self.table.config().rebate;
        if chargeable_income > rules.income_threshold {
            return Decimal::ZERO;
        }

        if has_non_working_spouse {
            rules.individual + rules.spouse
        } else {
            rules.individual
        }
    }
}

/// Tax after rebate, never below zero.
pub fn final_tax(
    tax_payable: Decimal,
    rebate: Decimal,
) -> Decimal {
    max(tax_payable - rebate, Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::test_support::ya2024_table;

    #[test]
    fn rebate_at_threshold() {
        let table = ya2024_table();
        let engine = RebateEngine::new(&table);

        assert_eq!(engine.compute(dec!(35000), false), dec!(400));
        assert_eq!(engine.compute(dec!(35000), true), dec!(800));
    }

    #[test]
    fn no_rebate_above_threshold() {
        let table = ya2024_table();
        let engine = RebateEngine::new(&table);

        assert_eq!(engine.compute(dec!(35001), false), dec!(0));
        assert_eq!(engine.compute(dec!(35000.01), true), dec!(0));
    }

    #[test]
    fn zero_income_still_earns_rebate() {
        let table = ya2024_table();
        let engine = RebateEngine::new(&table);

        assert_eq!(engine.compute(dec!(0), false), dec!(400));
    }

    #[test]
    fn final_tax_is_floored_at_zero() {
        assert_eq!(final_tax(dec!(150), dec!(400)), dec!(0));
        assert_eq!(final_tax(dec!(1200), dec!(400)), dec!(800));
    }
}
