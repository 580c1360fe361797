//! Corporate command - company tax on chargeable income

use clap::Args;
use mytax_core::calculations::{CorporateTax, CorporateTaxEngine, CorporateTaxRequest};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::cmd::{Context, print_json};
use crate::report::CorporateReport;
use crate::utils::parse_amount;

#[derive(Args, Debug)]
pub struct CorporateCommand {
    /// Chargeable income of the company
    #[arg(long, value_parser = parse_amount)]
    income: Decimal,

    /// Paid-up capital, used for SME eligibility
    #[arg(long, value_parser = parse_amount, default_value = "0")]
    paid_up_capital: Decimal,

    /// Annual revenue, used for SME eligibility; defaults to the income
    #[arg(long, value_parser = parse_amount)]
    revenue: Option<Decimal>,

    /// Tax at the standard rate even if the company qualifies as an SME
    #[arg(long)]
    standard: bool,
}

#[derive(Debug, Serialize)]
struct CorporateData<'a> {
    assessment_year: i32,
    is_sme: bool,
    #[serde(flatten)]
    tax: &'a CorporateTax,
}

impl CorporateCommand {
    fn is_sme(
        &self,
        ctx: &Context,
    ) -> bool {
        let revenue = self.revenue.unwrap_or(self.income);
        let eligible = ctx
            .table
            .config()
            .sme
            .is_eligible(self.paid_up_capital, revenue);
        debug!(paid_up_capital = %self.paid_up_capital, revenue = %revenue, eligible, "SME check");
        eligible && !self.standard
    }

    pub fn exec(
        &self,
        ctx: &Context,
    ) -> anyhow::Result<()> {
        let is_sme = self.is_sme(ctx);
        let tax = CorporateTaxEngine::new(&ctx.table).compute(&CorporateTaxRequest {
            chargeable_income: self.income,
            is_sme,
        });

        if ctx.json {
            print_json(&CorporateData {
                assessment_year: ctx.table.assessment_year(),
                is_sme,
                tax: &tax,
            })
        } else {
            println!();
            print!("{}", CorporateReport { tax: &tax, is_sme });
            Ok(())
        }
    }
}
