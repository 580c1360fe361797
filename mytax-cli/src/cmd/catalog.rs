//! Catalog commands - list reliefs and deductions

use clap::Args;

use crate::cmd::{Context, print_json};
use crate::form::{BusinessType, available_deductions};
use crate::report::{DeductionCatalog, ReliefCatalog};

#[derive(Args, Debug)]
pub struct ReliefsCommand {}

impl ReliefsCommand {
    pub fn exec(
        &self,
        ctx: &Context,
    ) -> anyhow::Result<()> {
        if ctx.json {
            return print_json(&ctx.table.reliefs());
        }
        print!(
            "{}",
            ReliefCatalog {
                table: &ctx.table,
                locale: ctx.locale,
            }
        );
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct DeductionsCommand {
    /// Only list deductions available to this business type
    #[arg(long = "type", value_enum)]
    business_type: Option<BusinessType>,
}

impl DeductionsCommand {
    pub fn exec(
        &self,
        ctx: &Context,
    ) -> anyhow::Result<()> {
        let items = match self.business_type {
            Some(business_type) => available_deductions(&ctx.table, business_type),
            None => ctx.table.deductions().iter().collect(),
        };

        if ctx.json {
            return print_json(&items);
        }
        print!(
            "{}",
            DeductionCatalog {
                items: &items,
                assessment_year: ctx.table.assessment_year(),
                locale: ctx.locale,
            }
        );
        Ok(())
    }
}
