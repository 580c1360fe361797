//! Progressive rate schedule evaluation shared by the personal and SME
//! corporate engines.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::TaxBracket;
use crate::calculations::common::{format_ringgit, round_half_up};

/// Tax attributable to one bracket of a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketShare {
    /// Display range, e.g. `RM 5,000 - RM 20,000`.
    pub range: String,
    pub rate: Decimal,
    /// Income taxed in this bracket.
    pub taxable: Decimal,
    pub tax: Decimal,
}

/// Display label for a bracket's income range.
pub fn range_label(bracket: &TaxBracket) -> String {
    match bracket.max_income {
        Some(max) => format!(
            "{} - {}",
            format_ringgit(bracket.min_income),
            format_ringgit(max)
        ),
        None => format!("{} and above", format_ringgit(bracket.min_income)),
    }
}

/// The bracket containing `income`: the first whose upper bound is at or
/// above it.
pub fn find_bracket(
    brackets: &[TaxBracket],
    income: Decimal,
) -> Option<&TaxBracket> {
    brackets.iter().find(|b| b.contains(income))
}

/// Sums tax slice by slice over every bracket that `income` reaches.
///
/// Returns the unrounded total and one [`BracketShare`] per contributing
/// bracket. Only the last share can be a partial bracket.
pub fn progressive_tax(
    brackets: &[TaxBracket],
    income: Decimal,
) -> (Decimal, Vec<BracketShare>) {
    let mut total = Decimal::ZERO;
    let mut shares = Vec::new();

    for bracket in brackets {
        let taxable = bracket.taxable_portion(income);
        if taxable <= Decimal::ZERO {
            continue;
        }
        let tax = taxable * bracket.tax_rate;
        total += tax;
        shares.push(BracketShare {
            range: range_label(bracket),
            rate: bracket.tax_rate,
            taxable,
            tax: round_half_up(tax),
        });
    }

    (total, shares)
}

/// Tax via the bracket's precomputed `base_tax` plus the marginal slice.
///
/// Equivalent to the total from [`progressive_tax`] for any validated
/// schedule.
pub fn cumulative_tax(
    brackets: &[TaxBracket],
    income: Decimal,
) -> Decimal {
    if income <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    find_bracket(brackets, income)
        .map(|b| b.base_tax + (income - b.min_income) * b.tax_rate)
        .unwrap_or(Decimal::ZERO)
}
