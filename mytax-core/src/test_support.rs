//! YA 2024 rate table built in code for unit tests.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{
    DeductionCategory, DeductionItem, EpfRules, OptimizationRules, RateTable, RebateRules,
    ReliefCategory, ReliefItem, SmeCriteria, TaxBracket, TaxYearConfig,
};

pub(crate) fn bracket(
    min: Decimal,
    max: Option<Decimal>,
    rate: Decimal,
    base: Decimal,
) -> TaxBracket {
    TaxBracket {
        min_income: min,
        max_income: max,
        tax_rate: rate,
        base_tax: base,
    }
}

pub(crate) fn personal_brackets() -> Vec<TaxBracket> {
    vec![
        bracket(dec!(0), Some(dec!(5000)), dec!(0), dec!(0)),
        bracket(dec!(5000), Some(dec!(20000)), dec!(0.01), dec!(0)),
        bracket(dec!(20000), Some(dec!(35000)), dec!(0.03), dec!(150)),
        bracket(dec!(35000), Some(dec!(50000)), dec!(0.06), dec!(600)),
        bracket(dec!(50000), Some(dec!(70000)), dec!(0.11), dec!(1500)),
        bracket(dec!(70000), Some(dec!(100000)), dec!(0.19), dec!(3700)),
        bracket(dec!(100000), Some(dec!(400000)), dec!(0.25), dec!(9400)),
        bracket(dec!(400000), Some(dec!(600000)), dec!(0.26), dec!(84400)),
        bracket(dec!(600000), Some(dec!(2000000)), dec!(0.28), dec!(136400)),
        bracket(dec!(2000000), None, dec!(0.30), dec!(528400)),
    ]
}

pub(crate) fn sme_brackets() -> Vec<TaxBracket> {
    vec![
        bracket(dec!(0), Some(dec!(150000)), dec!(0.15), dec!(0)),
        bracket(dec!(150000), Some(dec!(600000)), dec!(0.17), dec!(22500)),
        bracket(dec!(600000), None, dec!(0.24), dec!(99000)),
    ]
}

pub(crate) fn relief(
    id: &str,
    category: ReliefCategory,
    limit: Decimal,
    per_unit: bool,
) -> ReliefItem {
    ReliefItem {
        id: id.to_string(),
        category,
        name: id.replace('_', " "),
        name_ms: format!("{id} (ms)"),
        limit,
        per_unit,
        description: String::new(),
    }
}

pub(crate) fn reliefs() -> Vec<ReliefItem> {
    use ReliefCategory::*;
    vec![
        relief("self", Automatic, dec!(9000), false),
        relief("spouse", Family, dec!(4000), false),
        relief("child_under18", Family, dec!(2000), true),
        relief("child_18plus_studying", Family, dec!(8000), true),
        relief("parents_medical", Medical, dec!(8000), false),
        relief("serious_disease", Medical, dec!(10000), false),
        relief("medical_checkup", Medical, dec!(1000), false),
        relief("education_self", Education, dec!(7000), false),
        relief("sspn", Education, dec!(8000), false),
        relief("lifestyle", Lifestyle, dec!(2500), false),
        relief("sports", Lifestyle, dec!(1000), false),
        relief("life_insurance_epf", Insurance, dec!(7000), false),
        relief("prs", Insurance, dec!(3000), false),
        relief("education_medical_insurance", Insurance, dec!(4000), false),
        relief("socso", Insurance, dec!(350), false),
    ]
}

pub(crate) fn deduction(
    id: &str,
    category: DeductionCategory,
    rate: Decimal,
    limit: Option<Decimal>,
) -> DeductionItem {
    DeductionItem {
        id: id.to_string(),
        category,
        name: id.replace('_', " "),
        name_ms: format!("{id} (ms)"),
        deduction_rate: rate,
        limit,
        limit_percent: None,
        sme_only: category == DeductionCategory::SmeOnly,
        description: String::new(),
    }
}

pub(crate) fn deductions() -> Vec<DeductionItem> {
    use DeductionCategory::*;
    vec![
        deduction("rent", Operations, dec!(1.0), None),
        deduction("salaries", Operations, dec!(1.0), None),
        deduction("entertainment", Marketing, dec!(0.5), None),
        deduction("office_equipment", Assets, dec!(0.2), None),
        deduction("motor_vehicle", Assets, dec!(0.2), Some(dec!(100000))),
        deduction("rd_expenses", Other, dec!(2.0), None),
        deduction("einvoice_system", SmeOnly, dec!(1.0), Some(dec!(50000))),
    ]
}

pub(crate) fn config() -> TaxYearConfig {
    TaxYearConfig {
        assessment_year: 2024,
        non_resident_rate: dec!(0.30),
        corporate_rate: dec!(0.24),
        spouse_relief: dec!(4000),
        rebate: RebateRules {
            income_threshold: dec!(35000),
            individual: dec!(400),
            spouse: dec!(400),
        },
        epf: EpfRules {
            employee_rate: dec!(0.11),
            annual_cap: dec!(4000),
        },
        sme: SmeCriteria {
            max_paid_up_capital: dec!(2500000),
            max_annual_revenue: dec!(50000000),
        },
        optimization: OptimizationRules {
            high_impact_reliefs: vec![
                "lifestyle".to_string(),
                "life_insurance_epf".to_string(),
                "prs".to_string(),
                "sspn".to_string(),
                "education_medical_insurance".to_string(),
                "medical_checkup".to_string(),
                "sports".to_string(),
            ],
            materiality_threshold: dec!(100),
            minimum_saving: dec!(10),
        },
    }
}

pub(crate) fn ya2024_table() -> RateTable {
    RateTable::new(
        config(),
        personal_brackets(),
        sme_brackets(),
        reliefs(),
        deductions(),
    )
    .expect("YA 2024 test table is valid")
}
