//! Business command - business profit with optional employment income

use std::path::PathBuf;

use clap::Args;
use rust_decimal::Decimal;

use crate::claims::parse_claim;
use crate::cmd::personal::EmploymentArgs;
use crate::cmd::{Context, collect_claims, print_json};
use crate::form::{BusinessInput, BusinessType, IncomeMode, TaxForm, evaluate};
use crate::report::OverviewReport;
use crate::utils::parse_amount;

#[derive(Args, Debug)]
pub struct BusinessCommand {
    /// Legal form of the business
    #[arg(long = "type", value_enum)]
    business_type: BusinessType,

    /// Annual revenue
    #[arg(long, value_parser = parse_amount)]
    revenue: Decimal,

    /// Paid-up capital, used for SME eligibility
    #[arg(long, value_parser = parse_amount, default_value = "0")]
    paid_up_capital: Decimal,

    /// Deduction claim as ID=AMOUNT, e.g. rent=24000 (repeatable)
    #[arg(long = "deduction", value_name = "ID=AMOUNT", value_parser = parse_claim)]
    deductions: Vec<(String, Decimal)>,

    /// CSV file of deduction claims with `id,amount` columns
    #[arg(long)]
    deductions_file: Option<PathBuf>,

    /// Use this chargeable income instead of revenue minus deductions
    #[arg(long, value_parser = parse_amount)]
    chargeable_income: Option<Decimal>,

    #[command(flatten)]
    employment: EmploymentArgs,
}

impl BusinessCommand {
    pub fn exec(
        &self,
        ctx: &Context,
    ) -> anyhow::Result<()> {
        let business = BusinessInput {
            business_type: self.business_type,
            revenue: self.revenue,
            paid_up_capital: self.paid_up_capital,
            deduction_claims: collect_claims(self.deductions_file.as_deref(), &self.deductions)?,
            chargeable_income: self.chargeable_income,
        };
        let form = TaxForm {
            employment: self.employment.to_input()?,
            mode: IncomeMode::from_business(Some(business)),
        };
        let overview = evaluate(&ctx.table, &form);

        if ctx.json {
            print_json(&overview)
        } else {
            print!(
                "{}",
                OverviewReport {
                    overview: &overview,
                    table: &ctx.table,
                    locale: ctx.locale,
                }
            );
            Ok(())
        }
    }
}
