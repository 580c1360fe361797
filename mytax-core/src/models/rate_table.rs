//! The complete set of statutory rules for one year of assessment.
//!
//! A [`RateTable`] is validated once when it is built and is read-only
//! afterwards. Every engine borrows it, so a table for a different year can
//! be swapped in without touching engine code.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use super::{DeductionItem, ReliefItem, TaxBracket, TaxYearConfig};

/// Reasons a rate table is rejected at construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateTableError {
    #[error("{0} schedule has no brackets")]
    NoBrackets(&'static str),

    #[error("{schedule} schedule must start at 0, starts at {min_income}")]
    FirstBracketNotZero {
        schedule: &'static str,
        min_income: Decimal,
    },

    #[error("{schedule} schedule has a gap or overlap at {min_income}")]
    NotContiguous {
        schedule: &'static str,
        min_income: Decimal,
    },

    #[error("{schedule} bracket starting at {min_income} has max not above min")]
    EmptyBracket {
        schedule: &'static str,
        min_income: Decimal,
    },

    #[error("{0} schedule must end with exactly one unbounded bracket")]
    UnboundedNotLast(&'static str),

    #[error("{name} rate must be between 0 and 1, got {rate}")]
    InvalidRate { name: String, rate: Decimal },

    #[error(
        "{schedule} bracket starting at {min_income} has base tax {actual}, expected {expected}"
    )]
    BaseTaxMismatch {
        schedule: &'static str,
        min_income: Decimal,
        expected: Decimal,
        actual: Decimal,
    },

    #[error("duplicate catalog id '{0}'")]
    DuplicateId(String),

    #[error("relief '{id}' has a negative limit {limit}")]
    NegativeLimit { id: String, limit: Decimal },

    #[error("deduction '{id}' has a negative rate {rate}")]
    NegativeDeductionRate { id: String, rate: Decimal },

    #[error("relief catalog has no automatic relief")]
    NoAutomaticRelief,

    #[error("high-impact relief '{0}' is not a claimable relief in the catalog")]
    UnknownHighImpactRelief(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateTable {
    config: TaxYearConfig,
    personal_brackets: Vec<TaxBracket>,
    sme_brackets: Vec<TaxBracket>,
    reliefs: Vec<ReliefItem>,
    deductions: Vec<DeductionItem>,
}

impl RateTable {
    /// Builds a table, rejecting any schedule or catalog that breaks the
    /// bracket and catalog invariants.
    ///
    /// # Errors
    ///
    /// Returns [`RateTableError`] describing the first problem found.
    pub fn new(
        config: TaxYearConfig,
        personal_brackets: Vec<TaxBracket>,
        sme_brackets: Vec<TaxBracket>,
        reliefs: Vec<ReliefItem>,
        deductions: Vec<DeductionItem>,
    ) -> Result<Self, RateTableError> {
        validate_schedule("personal", &personal_brackets)?;
        validate_schedule("sme", &sme_brackets)?;
        validate_rate("non-resident", config.non_resident_rate)?;
        validate_rate("corporate", config.corporate_rate)?;
        validate_rate("epf employee", config.epf.employee_rate)?;
        validate_reliefs(&reliefs)?;
        validate_deductions(&deductions)?;

        for id in &config.optimization.high_impact_reliefs {
            let claimable = reliefs.iter().any(|r| &r.id == id && !r.is_automatic());
            if !claimable {
                return Err(RateTableError::UnknownHighImpactRelief(id.clone()));
            }
        }

        Ok(Self {
            config,
            personal_brackets,
            sme_brackets,
            reliefs,
            deductions,
        })
    }

    pub fn config(&self) -> &TaxYearConfig {
        &self.config
    }

    pub fn assessment_year(&self) -> i32 {
        self.config.assessment_year
    }

    pub fn personal_brackets(&self) -> &[TaxBracket] {
        &self.personal_brackets
    }

    /// The bracket starting at zero. Always present in a constructed table.
    pub fn lowest_personal_bracket(&self) -> &TaxBracket {
        &self.personal_brackets[0]
    }

    pub fn sme_brackets(&self) -> &[TaxBracket] {
        &self.sme_brackets
    }

    pub fn reliefs(&self) -> &[ReliefItem] {
        &self.reliefs
    }

    pub fn deductions(&self) -> &[DeductionItem] {
        &self.deductions
    }

    pub fn find_relief(
        &self,
        id: &str,
    ) -> Option<&ReliefItem> {
        self.reliefs.iter().find(|r| r.id == id)
    }

    pub fn find_deduction(
        &self,
        id: &str,
    ) -> Option<&DeductionItem> {
        self.deductions.iter().find(|d| d.id == id)
    }

    /// Reliefs granted without a claim (the self relief).
    pub fn automatic_reliefs(&self) -> impl Iterator<Item = &ReliefItem> {
        self.reliefs.iter().filter(|r| r.is_automatic())
    }

    /// Sum of all automatic reliefs.
    pub fn automatic_relief_total(&self) -> Decimal {
        self.automatic_reliefs().map(|r| r.limit).sum()
    }
}

fn validate_rate(
    name: &str,
    rate: Decimal,
) -> Result<(), RateTableError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(RateTableError::InvalidRate {
            name: name.to_string(),
            rate,
        });
    }
    Ok(())
}

fn validate_schedule(
    schedule: &'static str,
    brackets: &[TaxBracket],
) -> Result<(), RateTableError> {
    let first = brackets
        .first()
        .ok_or(RateTableError::NoBrackets(schedule))?;
    if first.min_income != Decimal::ZERO {
        return Err(RateTableError::FirstBracketNotZero {
            schedule,
            min_income: first.min_income,
        });
    }

    let mut expected_base = Decimal::ZERO;
    let last_index = brackets.len() - 1;

    for (index, bracket) in brackets.iter().enumerate() {
        validate_rate(&format!("{schedule} bracket {}", bracket.min_income), bracket.tax_rate)?;

        if bracket.base_tax != expected_base {
            return Err(RateTableError::BaseTaxMismatch {
                schedule,
                min_income: bracket.min_income,
                expected: expected_base,
                actual: bracket.base_tax,
            });
        }

        match (bracket.max_income, index == last_index) {
            (None, true) => {}
            (None, false) | (Some(_), true) => {
                return Err(RateTableError::UnboundedNotLast(schedule));
            }
            (Some(max), false) => {
                if max <= bracket.min_income {
                    return Err(RateTableError::EmptyBracket {
                        schedule,
                        min_income: bracket.min_income,
                    });
                }
                let next = &brackets[index + 1];
                if next.min_income != max {
                    return Err(RateTableError::NotContiguous {
                        schedule,
                        min_income: next.min_income,
                    });
                }
                expected_base += (max - bracket.min_income) * bracket.tax_rate;
            }
        }
    }

    Ok(())
}

fn validate_reliefs(reliefs: &[ReliefItem]) -> Result<(), RateTableError> {
    let mut seen = HashSet::new();
    for relief in reliefs {
        if !seen.insert(relief.id.as_str()) {
            return Err(RateTableError::DuplicateId(relief.id.clone()));
        }
        if relief.limit < Decimal::ZERO {
            return Err(RateTableError::NegativeLimit {
                id: relief.id.clone(),
                limit: relief.limit,
            });
        }
    }
    if !reliefs.iter().any(ReliefItem::is_automatic) {
        return Err(RateTableError::NoAutomaticRelief);
    }
    Ok(())
}

fn validate_deductions(deductions: &[DeductionItem]) -> Result<(), RateTableError> {
    let mut seen = HashSet::new();
    for deduction in deductions {
        if !seen.insert(deduction.id.as_str()) {
            return Err(RateTableError::DuplicateId(deduction.id.clone()));
        }
        if deduction.deduction_rate < Decimal::ZERO {
            return Err(RateTableError::NegativeDeductionRate {
                id: deduction.id.clone(),
                rate: deduction.deduction_rate,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::ReliefCategory;
    use crate::test_support::{
        bracket, config, deductions, personal_brackets, relief, reliefs, sme_brackets,
    };

    fn build(
        personal: Vec<TaxBracket>,
        reliefs: Vec<ReliefItem>,
    ) -> Result<RateTable, RateTableError> {
        RateTable::new(config(), personal, sme_brackets(), reliefs, deductions())
    }

    #[test]
    fn ya2024_table_is_valid() {
        let table = build(personal_brackets(), reliefs()).unwrap();

        assert_eq!(table.automatic_relief_total(), dec!(9000));
        assert_eq!(table.lowest_personal_bracket().max_income, Some(dec!(5000)));
    }

    #[test]
    fn rejects_gap_between_brackets() {
        let mut brackets = personal_brackets();
        brackets[1].min_income = dec!(5001);

        let err = build(brackets, reliefs()).unwrap_err();

        assert_eq!(
            err,
            RateTableError::NotContiguous {
                schedule: "personal",
                min_income: dec!(5001),
            }
        );
    }

    #[test]
    fn rejects_wrong_base_tax() {
        let mut brackets = personal_brackets();
        brackets[3].base_tax = dec!(650);

        let err = build(brackets, reliefs()).unwrap_err();

        assert_eq!(
            err,
            RateTableError::BaseTaxMismatch {
                schedule: "personal",
                min_income: dec!(35000),
                expected: dec!(600),
                actual: dec!(650),
            }
        );
    }

    #[test]
    fn rejects_bounded_top_bracket() {
        let brackets = vec![bracket(dec!(0), Some(dec!(5000)), dec!(0), dec!(0))];

        let err = build(brackets, reliefs()).unwrap_err();

        assert_eq!(err, RateTableError::UnboundedNotLast("personal"));
    }

    #[test]
    fn rejects_rate_above_one() {
        let brackets = vec![bracket(dec!(0), None, dec!(1.5), dec!(0))];

        let err = build(brackets, reliefs()).unwrap_err();

        assert!(matches!(err, RateTableError::InvalidRate { .. }), "got: {err}");
    }

    #[test]
    fn rejects_duplicate_relief_id() {
        let mut catalog = reliefs();
        catalog.push(relief("lifestyle", ReliefCategory::Lifestyle, dec!(2500), false));

        let err = build(personal_brackets(), catalog).unwrap_err();

        assert_eq!(err, RateTableError::DuplicateId("lifestyle".to_string()));
    }

    #[test]
    fn requires_automatic_relief() {
        let catalog: Vec<_> = reliefs().into_iter().filter(|r| !r.is_automatic()).collect();

        let err = build(personal_brackets(), catalog).unwrap_err();

        assert_eq!(err, RateTableError::NoAutomaticRelief);
    }

    #[test]
    fn high_impact_ids_must_be_claimable() {
        let catalog: Vec<_> = reliefs().into_iter().filter(|r| r.id != "prs").collect();

        let err = build(personal_brackets(), catalog).unwrap_err();

        assert_eq!(err, RateTableError::UnknownHighImpactRelief("prs".to_string()));
    }
}
