//! Plain-text rendering of results and catalogs.
//!
//! Each report is a small borrowing struct implementing [`Display`], so
//! commands `print!` it and tests call `to_string()`.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use mytax_core::calculations::common::{format_ringgit, rate_label};
use mytax_core::calculations::{BracketShare, CorporateTax, FullTaxResult};
use mytax_core::{DeductionCategory, DeductionItem, Locale, RateTable, ReliefCategory};
use rust_decimal::Decimal;

use crate::form::{BusinessOutcome, BusinessTreatment, TaxOverview};

/// Everything `mytax personal` and `mytax business` print.
pub struct OverviewReport<'a> {
    pub overview: &'a TaxOverview,
    pub table: &'a RateTable,
    pub locale: Locale,
}

impl Display for OverviewReport<'_> {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        let overview = self.overview;
        let income = &overview.income;

        writeln!(f)?;
        writeln!(f, "TAX ESTIMATE (YA {})", overview.assessment_year)?;
        writeln!(
            f,
            "  Status: {}, {}",
            overview.residency.as_str(),
            overview.marital_status.as_str()
        )?;
        writeln!(f)?;

        if !income.gross_income.is_zero() {
            writeln!(f, "EMPLOYMENT INCOME")?;
            writeln!(
                f,
                "  Salary: {} | Bonus: {} | Other: {}",
                format_ringgit(income.annual_salary),
                format_ringgit(income.annual_bonus),
                format_ringgit(income.other_income)
            )?;
            writeln!(f, "  EPF relief: {}", format_ringgit(income.epf_contribution))?;
            writeln!(f)?;
        }

        if let Some(business) = &overview.business {
            write_business(f, business, self.table, self.locale)?;
        }

        write_personal(
            f,
            &overview.personal,
            &overview.relief_categories,
            self.table,
            self.locale,
        )?;

        if !overview.suggestions.is_empty() {
            writeln!(f, "UNUSED RELIEFS")?;
            for s in &overview.suggestions {
                let name = self
                    .table
                    .find_relief(&s.relief_id)
                    .map_or(s.name.as_str(), |r| r.display_name(self.locale));
                writeln!(
                    f,
                    "  {}: claim {} more to save {}",
                    name,
                    format_ringgit(s.remaining),
                    format_ringgit(s.saving)
                )?;
            }
            writeln!(f)?;
        }

        writeln!(
            f,
            "TOTAL TAX: {} ({} / month)",
            format_ringgit(overview.total_tax),
            format_ringgit(overview.monthly_tax)
        )?;
        writeln!(f)
    }
}

fn write_personal(
    f: &mut Formatter<'_>,
    personal: &FullTaxResult,
    claimed_by_category: &BTreeMap<ReliefCategory, Decimal>,
    table: &RateTable,
    locale: Locale,
) -> fmt::Result {
    writeln!(f, "PERSONAL TAX")?;
    writeln!(
        f,
        "  Gross: {} | EPF: {} | Reliefs: {}",
        format_ringgit(personal.gross_income),
        format_ringgit(personal.epf_contribution),
        format_ringgit(personal.total_reliefs)
    )?;
    for line in &personal.relief_breakdown {
        let name = table
            .find_relief(&line.id)
            .map_or(line.name.as_str(), |r| r.display_name(locale));
        if line.was_clamped() {
            writeln!(
                f,
                "    {}: {} (claimed {}, limit {})",
                name,
                format_ringgit(line.amount),
                format_ringgit(line.claimed),
                format_ringgit(line.limit)
            )?;
        } else {
            writeln!(f, "    {}: {}", name, format_ringgit(line.amount))?;
        }
    }
    if !claimed_by_category.is_empty() {
        let parts: Vec<_> = claimed_by_category
            .iter()
            .map(|(category, amount)| format!("{} {}", category.label(), format_ringgit(*amount)))
            .collect();
        writeln!(f, "  Claimed by category: {}", parts.join(" | "))?;
    }
    if !personal.unrecognised_claims.is_empty() {
        writeln!(f, "  Ignored claims: {}", personal.unrecognised_claims.join(", "))?;
    }
    writeln!(f, "  Chargeable income: {}", format_ringgit(personal.chargeable_income))?;
    write_breakdown(f, &personal.breakdown)?;
    writeln!(
        f,
        "  Tax: {} (effective {}%, bracket {})",
        format_ringgit(personal.tax_payable),
        personal.effective_rate,
        rate_label(personal.bracket.rate())
    )?;
    if !personal.rebate.is_zero() {
        writeln!(f, "  Rebate: {}", format_ringgit(personal.rebate))?;
    }
    writeln!(
        f,
        "  Final tax: {} ({} / month)",
        format_ringgit(personal.final_tax),
        format_ringgit(personal.monthly_tax)
    )?;
    if !personal.relief_savings.is_zero() {
        writeln!(f, "  Saved by reliefs: {}", format_ringgit(personal.relief_savings))?;
    }
    writeln!(f)
}

fn write_business(
    f: &mut Formatter<'_>,
    business: &BusinessOutcome,
    table: &RateTable,
    locale: Locale,
) -> fmt::Result {
    writeln!(f, "BUSINESS ({})", business.business_type)?;
    writeln!(f, "  Revenue: {}", format_ringgit(business.revenue))?;
    for line in &business.deductions.lines {
        let name = table
            .find_deduction(&line.id)
            .map_or(line.name.as_str(), |d| d.display_name(locale));
        writeln!(
            f,
            "    {}: {} @ {} = {}",
            name,
            format_ringgit(line.claimed),
            rate_label(line.deduction_rate),
            format_ringgit(line.allowable)
        )?;
    }
    writeln!(
        f,
        "  Deductions: {} claimed, {} allowable (saves {})",
        format_ringgit(business.deductions.total_claimed),
        format_ringgit(business.deductions.total_allowable),
        format_ringgit(business.deduction_savings)
    )?;
    if business.deductions.by_category.len() > 1 {
        let parts: Vec<_> = business
            .deductions
            .by_category
            .iter()
            .map(|(category, total)| {
                format!("{} {}", category.label(), format_ringgit(total.allowable))
            })
            .collect();
        writeln!(f, "  Allowable by category: {}", parts.join(" | "))?;
    }
    if !business.withheld_claims.is_empty() {
        writeln!(
            f,
            "  Not available to {}: {}",
            business.business_type,
            business.withheld_claims.join(", ")
        )?;
    }
    if !business.deductions.unrecognised_claims.is_empty() {
        writeln!(
            f,
            "  Ignored claims: {}",
            business.deductions.unrecognised_claims.join(", ")
        )?;
    }
    writeln!(f, "  Chargeable income: {}", format_ringgit(business.chargeable_income))?;

    match &business.treatment {
        BusinessTreatment::PersonalIncome => {
            writeln!(f, "  Taxed as personal income")?;
            writeln!(f)
        }
        BusinessTreatment::Corporate { is_sme, tax } => {
            writeln!(f)?;
            write!(f, "{}", CorporateReport { tax, is_sme: *is_sme })
        }
    }
}

/// Corporate tax on its own, as printed by `mytax corporate`.
pub struct CorporateReport<'a> {
    pub tax: &'a CorporateTax,
    pub is_sme: bool,
}

impl Display for CorporateReport<'_> {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        let kind = if self.is_sme { "SME" } else { "standard rate" };
        writeln!(f, "CORPORATE TAX ({kind})")?;
        write_breakdown(f, &self.tax.breakdown)?;
        writeln!(
            f,
            "  Tax: {} (effective {}%)",
            format_ringgit(self.tax.tax_payable),
            self.tax.effective_rate
        )?;
        if !self.tax.sme_savings.is_zero() {
            writeln!(
                f,
                "  SME savings vs standard rate: {}",
                format_ringgit(self.tax.sme_savings)
            )?;
        }
        writeln!(f)
    }
}

fn write_breakdown(
    f: &mut Formatter<'_>,
    shares: &[BracketShare],
) -> fmt::Result {
    for share in shares {
        writeln!(
            f,
            "    {} @ {}: {}",
            share.range,
            rate_label(share.rate),
            format_ringgit(share.tax)
        )?;
    }
    Ok(())
}

/// Relief catalog grouped by category.
pub struct ReliefCatalog<'a> {
    pub table: &'a RateTable,
    pub locale: Locale,
}

impl Display for ReliefCatalog<'_> {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "RELIEFS (YA {})", self.table.assessment_year())?;
        for category in ReliefCategory::all() {
            let items: Vec<_> = self
                .table
                .reliefs()
                .iter()
                .filter(|r| r.category == *category)
                .collect();
            if items.is_empty() {
                continue;
            }
            writeln!(f)?;
            writeln!(f, "{}", category.label())?;
            for relief in items {
                let unit = if relief.per_unit { " each" } else { "" };
                writeln!(
                    f,
                    "  {:<28} {:<40} {}{}",
                    relief.id,
                    relief.display_name(self.locale),
                    format_ringgit(relief.limit),
                    unit
                )?;
            }
        }
        Ok(())
    }
}

/// Deduction catalog grouped by category.
pub struct DeductionCatalog<'a> {
    pub items: &'a [&'a DeductionItem],
    pub assessment_year: i32,
    pub locale: Locale,
}

impl Display for DeductionCatalog<'_> {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "DEDUCTIONS (YA {})", self.assessment_year)?;
        for category in DeductionCategory::all() {
            let items: Vec<_> = self
                .items
                .iter()
                .filter(|d| d.category == *category)
                .collect();
            if items.is_empty() {
                continue;
            }
            writeln!(f)?;
            writeln!(f, "{}", category.label())?;
            for item in items {
                let limit = match (item.limit, item.limit_percent) {
                    (Some(limit), _) => format!(", max {}", format_ringgit(limit)),
                    (None, Some(percent)) => format!(", max {} of income", rate_label(percent)),
                    (None, None) => String::new(),
                };
                writeln!(
                    f,
                    "  {:<22} {:<40} {}{}",
                    item.id,
                    item.display_name(self.locale),
                    item.rate_label(),
                    limit
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mytax_core::calculations::{CorporateTaxEngine, CorporateTaxRequest};
    use mytax_core::{ClaimSet, Residency};
    use mytax_data::builtin_ya2024;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::form::{
        BusinessInput, BusinessType, EmploymentInput, IncomeMode, TaxForm, available_deductions,
        evaluate,
    };

    fn table() -> RateTable {
        builtin_ya2024().expect("built-in table loads")
    }

    #[test]
    fn overview_lists_reliefs_and_totals() {
        let table = table();
        let form = TaxForm {
            employment: EmploymentInput {
                monthly_salary: dec!(5000),
                relief_claims: ClaimSet::new()
                    .with("lifestyle", dec!(3000))
                    .with("yacht", dec!(100)),
                ..Default::default()
            },
            mode: IncomeMode::Employee,
        };
        let overview = evaluate(&table, &form);

        let text = OverviewReport {
            overview: &overview,
            table: &table,
            locale: Locale::En,
        }
        .to_string();

        assert!(text.contains("TAX ESTIMATE (YA 2024)"), "got:\n{text}");
        assert!(text.contains("Status: resident, single"), "got:\n{text}");
        assert!(text.contains("Salary: RM 60,000"), "got:\n{text}");
        assert!(text.contains("(claimed RM 3,000, limit RM 2,500)"), "got:\n{text}");
        assert!(text.contains("Ignored claims: yacht"), "got:\n{text}");
        assert!(text.contains("TOTAL TAX: RM 1,170 (RM 97.50 / month)"), "got:\n{text}");
    }

    #[test]
    fn overview_totals_relief_claims_by_category() {
        let table = table();
        let form = TaxForm {
            employment: EmploymentInput {
                monthly_salary: dec!(8000),
                residency: Residency::NonResident,
                relief_claims: ClaimSet::new()
                    .with("lifestyle", dec!(2000))
                    .with("sports", dec!(500))
                    .with("dental", dec!(800)),
                ..Default::default()
            },
            mode: IncomeMode::Employee,
        };
        let overview = evaluate(&table, &form);

        let text = OverviewReport {
            overview: &overview,
            table: &table,
            locale: Locale::En,
        }
        .to_string();

        assert!(text.contains("Status: non-resident, single"), "got:\n{text}");
        assert!(
            text.contains("Claimed by category: Medical & Health RM 800 | Lifestyle RM 2,500"),
            "got:\n{text}"
        );
    }

    #[test]
    fn overview_uses_malay_names() {
        let table = table();
        let form = TaxForm {
            employment: EmploymentInput {
                monthly_salary: dec!(5000),
                ..Default::default()
            },
            mode: IncomeMode::Employee,
        };
        let overview = evaluate(&table, &form);

        let text = OverviewReport {
            overview: &overview,
            table: &table,
            locale: Locale::Ms,
        }
        .to_string();

        assert!(text.contains("Individu dan saudara tanggungan"), "got:\n{text}");
    }

    #[test]
    fn company_overview_includes_corporate_section() {
        let table = table();
        let form = TaxForm {
            employment: EmploymentInput::default(),
            mode: IncomeMode::from_business(Some(BusinessInput {
                business_type: BusinessType::SdnBhd,
                revenue: dec!(150000),
                paid_up_capital: dec!(100000),
                deduction_claims: ClaimSet::new(),
                chargeable_income: None,
            })),
        };
        let overview = evaluate(&table, &form);

        let text = OverviewReport {
            overview: &overview,
            table: &table,
            locale: Locale::En,
        }
        .to_string();

        assert!(text.contains("BUSINESS (Sdn Bhd)"), "got:\n{text}");
        assert!(text.contains("CORPORATE TAX (SME)"), "got:\n{text}");
        assert!(text.contains("Tax: RM 22,500 (effective 15"), "got:\n{text}");
        assert!(!text.contains("EMPLOYMENT INCOME"), "got:\n{text}");
    }

    #[test]
    fn business_overview_totals_deductions_by_category() {
        let table = table();
        let form = TaxForm {
            employment: EmploymentInput::default(),
            mode: IncomeMode::from_business(Some(BusinessInput {
                business_type: BusinessType::SoleProprietor,
                revenue: dec!(200000),
                paid_up_capital: dec!(0),
                deduction_claims: ClaimSet::new()
                    .with("rent", dec!(24000))
                    .with("rd_expenses", dec!(5000)),
                chargeable_income: None,
            })),
        };
        let overview = evaluate(&table, &form);

        let text = OverviewReport {
            overview: &overview,
            table: &table,
            locale: Locale::En,
        }
        .to_string();

        assert!(
            text.contains("Allowable by category: Operations RM 24,000 | Other Deductions RM 10,000"),
            "got:\n{text}"
        );
    }

    #[test]
    fn corporate_report_shows_sme_savings() {
        let table = table();
        let tax = CorporateTaxEngine::new(&table).compute(&CorporateTaxRequest {
            chargeable_income: dec!(700000),
            is_sme: true,
        });

        let text = CorporateReport { tax: &tax, is_sme: true }.to_string();

        assert!(text.contains("@ 15%: RM 22,500"), "got:\n{text}");
        assert!(text.contains("@ 24%: RM 24,000"), "got:\n{text}");
        assert!(text.contains("SME savings vs standard rate: RM 45,000"), "got:\n{text}");
    }

    #[test]
    fn relief_catalog_groups_by_category() {
        let table = table();

        let text = ReliefCatalog {
            table: &table,
            locale: Locale::En,
        }
        .to_string();

        let automatic = text.find("Automatic").expect("automatic heading");
        let family = text.find("Family").expect("family heading");
        assert!(automatic < family);
        assert!(text.contains("RM 2,000 each"), "got:\n{text}");
    }

    #[test]
    fn deduction_catalog_hides_sme_only_for_enterprise() {
        let table = table();
        let items = available_deductions(&table, BusinessType::SoleProprietor);

        let text = DeductionCatalog {
            items: &items,
            assessment_year: table.assessment_year(),
            locale: Locale::En,
        }
        .to_string();

        assert!(!text.contains("einvoice_system"), "got:\n{text}");
        assert!(text.contains("200% (Double)"), "got:\n{text}");
        assert!(text.contains("max 10% of income"), "got:\n{text}");
        assert!(text.contains("max RM 100,000"), "got:\n{text}");
    }
}
