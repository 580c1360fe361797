use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use mytax_core::Locale;
use tracing::debug;

use mytax_cli::cmd::business::BusinessCommand;
use mytax_cli::cmd::catalog::{DeductionsCommand, ReliefsCommand};
use mytax_cli::cmd::corporate::CorporateCommand;
use mytax_cli::cmd::personal::PersonalCommand;
use mytax_cli::cmd::{Context, load_table};
use mytax_cli::config::CliConfig;
use mytax_cli::logging::{LoggingOptions, init_logging};
use mytax_cli::utils::parse_locale;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Malaysian personal and corporate income tax estimator.
///
/// Uses the built-in YA 2024 rate table unless `--table` or `table_dir` in
/// `mytax.toml` names another one.
#[derive(Debug, Parser)]
#[command(name = "mytax", version)]
struct Cli {
    /// Rate-table directory to use instead of the built-in table
    #[arg(long, global = true)]
    table: Option<PathBuf>,

    /// Output as JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    /// Config file (default: ./mytax.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Also append logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `mytax_core=trace`
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Language for relief and deduction names: en or ms
    #[arg(long, global = true, value_parser = parse_locale)]
    locale: Option<Locale>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Personal tax on employment income
    Personal(PersonalCommand),
    /// Company tax on chargeable income
    Corporate(CorporateCommand),
    /// Business profit plus any employment income
    Business(BusinessCommand),
    /// List personal reliefs
    Reliefs(ReliefsCommand),
    /// List business deductions
    Deductions(DeductionsCommand),
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::discover(cli.config.as_deref()).context("failed to load config")?;

    init_logging(&LoggingOptions {
        level: cli.log_level.or(config.log_level),
        file: cli.log_file.or(config.log_file),
    })?;
    debug!(command = ?cli.command, "starting");

    let table = load_table(cli.table.as_deref().or(config.table_dir.as_deref()))?;
    let ctx = Context {
        table,
        locale: cli.locale.or(config.locale).unwrap_or_default(),
        json: cli.json,
    };

    match &cli.command {
        Command::Personal(cmd) => cmd.exec(&ctx),
        Command::Corporate(cmd) => cmd.exec(&ctx),
        Command::Business(cmd) => cmd.exec(&ctx),
        Command::Reliefs(cmd) => cmd.exec(&ctx),
        Command::Deductions(cmd) => cmd.exec(&ctx),
    }
}
