use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One marginal rate band.
///
/// A bracket taxes the slice of income in `(min_income, max_income]`. The
/// topmost bracket of a schedule has `max_income == None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
    /// Total tax owed on all income up to `min_income`.
    pub base_tax: Decimal,
}

impl TaxBracket {
    /// True if `income` falls in this bracket's `(min, max]` slice.
    ///
    /// Zero income belongs to the lowest bracket.
    pub fn contains(
        &self,
        income: Decimal,
    ) -> bool {
        let above_min = income > self.min_income
            || (self.min_income == Decimal::ZERO && income == Decimal::ZERO);
        let below_max = self.max_income.is_none_or(|max| income <= max);
        above_min && below_max
    }

    /// Portion of `income` that falls inside this bracket.
    pub fn taxable_portion(
        &self,
        income: Decimal,
    ) -> Decimal {
        if income <= self.min_income {
            return Decimal::ZERO;
        }
        let top = match self.max_income {
            Some(max) if income > max => max,
            _ => income,
        };
        top - self.min_income
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::test_support::bracket;

    #[test]
    fn contains_is_exclusive_below_and_inclusive_above() {
        let band = bracket(dec!(5000), Some(dec!(20000)), dec!(0.01), dec!(0));

        assert!(!band.contains(dec!(5000)));
        assert!(band.contains(dec!(5000.01)));
        assert!(band.contains(dec!(20000)));
        assert!(!band.contains(dec!(20000.01)));
    }

    #[test]
    fn zero_income_belongs_to_lowest_bracket() {
        let lowest = bracket(dec!(0), Some(dec!(5000)), dec!(0), dec!(0));

        assert!(lowest.contains(dec!(0)));
    }

    #[test]
    fn taxable_portion_caps_at_bracket_top() {
        let band = bracket(dec!(35000), Some(dec!(50000)), dec!(0.06), dec!(600));

        assert_eq!(band.taxable_portion(dec!(30000)), dec!(0));
        assert_eq!(band.taxable_portion(dec!(44500)), dec!(9500));
        assert_eq!(band.taxable_portion(dec!(94000)), dec!(15000));
    }
}
