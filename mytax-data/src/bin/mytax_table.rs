use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use mytax_core::calculations::common::rate_label;
use mytax_core::calculations::schedule::range_label;
use mytax_core::{DeductionCategory, RateTable, ReliefCategory};
use mytax_data::{RateTableLoader, builtin_ya2024};

/// Validate a rate-table directory and print a summary of its contents.
///
/// The directory must contain:
/// - rate_table.toml: scalar rates, rebate, EPF, SME criteria
/// - personal_brackets.csv / sme_brackets.csv: min_income,max_income,rate,base_tax
/// - reliefs.csv: id,category,name,name_ms,limit,per_unit,description
/// - deductions.csv: id,category,name,name_ms,deduction_rate,limit,limit_percent,sme_only,description
#[derive(Parser, Debug)]
#[command(name = "mytax-table")]
#[command(version, about, long_about = None)]
struct Args {
    /// Rate-table directory to check (defaults to the built-in YA 2024 table)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Also list every relief and deduction
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let table = match &args.dir {
        Some(dir) => {
            println!("Validating rate table in: {}", dir.display());
            RateTableLoader::from_dir(dir)
                .with_context(|| format!("Failed to load rate table from: {}", dir.display()))?
        }
        None => {
            println!("Validating built-in YA 2024 rate table");
            builtin_ya2024().context("Failed to load built-in rate table")?
        }
    };

    print_summary(&table, args.verbose);
    println!("Rate table is valid.");

    Ok(())
}

fn print_summary(
    table: &RateTable,
    verbose: bool,
) {
    let config = table.config();
    println!("Year of assessment: {}", table.assessment_year());
    println!(
        "Non-resident rate: {}  Corporate rate: {}",
        rate_label(config.non_resident_rate),
        rate_label(config.corporate_rate)
    );

    println!("Personal brackets: {}", table.personal_brackets().len());
    for bracket in table.personal_brackets() {
        println!("  {:<32} {}", range_label(bracket), rate_label(bracket.tax_rate));
    }
    println!("SME brackets: {}", table.sme_brackets().len());
    for bracket in table.sme_brackets() {
        println!("  {:<32} {}", range_label(bracket), rate_label(bracket.tax_rate));
    }

    println!("Reliefs: {}", table.reliefs().len());
    for category in ReliefCategory::all() {
        let items: Vec<_> = table
            .reliefs()
            .iter()
            .filter(|r| r.category == *category)
            .collect();
        println!("  {}: {}", category.label(), items.len());
        if verbose {
            for item in items {
                println!("    {:<28} {}", item.id, item.limit);
            }
        }
    }

    println!("Deductions: {}", table.deductions().len());
    for category in DeductionCategory::all() {
        let items: Vec<_> = table
            .deductions()
            .iter()
            .filter(|d| d.category == *category)
            .collect();
        println!("  {}: {}", category.label(), items.len());
        if verbose {
            for item in items {
                println!("    {:<28} {}", item.id, item.rate_label());
            }
        }
    }
}
