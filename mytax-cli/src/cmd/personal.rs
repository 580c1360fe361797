//! Personal command - employment income and personal tax

use std::path::PathBuf;

use clap::Args;
use mytax_core::{MaritalStatus, Residency};
use rust_decimal::Decimal;
use tracing::warn;

use crate::claims::parse_claim;
use crate::cmd::{Context, collect_claims, print_json};
use crate::form::{EmploymentInput, IncomeMode, TaxForm, evaluate};
use crate::report::OverviewReport;
use crate::utils::{parse_amount, parse_percent};

/// Employment income and personal circumstances, shared with `business`.
#[derive(Args, Debug, Clone)]
pub struct EmploymentArgs {
    /// Monthly salary (e.g. 5000 or "RM 5,000")
    #[arg(long, value_parser = parse_amount, default_value = "0")]
    monthly_salary: Decimal,

    /// Bonus paid during the year, in months of salary
    #[arg(long, value_parser = parse_amount, default_value = "0")]
    bonus_months: Decimal,

    /// Other annual income (rental, dividends, ...)
    #[arg(long, value_parser = parse_amount, default_value = "0")]
    other_income: Decimal,

    /// Employee EPF rate in percent; defaults to the statutory rate
    #[arg(long, value_parser = parse_percent)]
    epf_rate: Option<Decimal>,

    /// Taxed at the flat non-resident rate
    #[arg(long)]
    non_resident: bool,

    #[arg(long)]
    married: bool,

    /// Spouse has income of their own (no spouse relief or rebate)
    #[arg(long)]
    spouse_working: bool,

    /// Relief claim as ID=AMOUNT, e.g. lifestyle=2500 (repeatable)
    #[arg(long = "relief", value_name = "ID=AMOUNT", value_parser = parse_claim)]
    reliefs: Vec<(String, Decimal)>,

    /// CSV file of relief claims with `id,amount` columns
    #[arg(long)]
    reliefs_file: Option<PathBuf>,
}

impl EmploymentArgs {
    pub fn to_input(&self) -> anyhow::Result<EmploymentInput> {
        if self.spouse_working && !self.married {
            warn!("--spouse-working has no effect without --married");
        }
        Ok(EmploymentInput {
            monthly_salary: self.monthly_salary,
            bonus_months: self.bonus_months,
            other_income: self.other_income,
            epf_rate_percent: self.epf_rate,
            residency: Residency::from_resident_flag(!self.non_resident),
            marital_status: if self.married {
                MaritalStatus::Married
            } else {
                MaritalStatus::Single
            },
            spouse_working: self.spouse_working,
            relief_claims: collect_claims(self.reliefs_file.as_deref(), &self.reliefs)?,
        })
    }
}

#[derive(Args, Debug)]
pub struct PersonalCommand {
    #[command(flatten)]
    employment: EmploymentArgs,
}

impl PersonalCommand {
    pub fn exec(
        &self,
        ctx: &Context,
    ) -> anyhow::Result<()> {
        let form = TaxForm {
            employment: self.employment.to_input()?,
            mode: IncomeMode::Employee,
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
