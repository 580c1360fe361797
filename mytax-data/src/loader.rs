use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use mytax_core::{
    DeductionCategory, DeductionItem, RateTable, RateTableError, ReliefCategory, ReliefItem,
    TaxBracket, TaxYearConfig,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

pub const CONFIG_FILE: &str = "rate_table.toml";
pub const PERSONAL_BRACKETS_FILE: &str = "personal_brackets.csv";
pub const SME_BRACKETS_FILE: &str = "sme_brackets.csv";
pub const RELIEFS_FILE: &str = "reliefs.csv";
pub const DEDUCTIONS_FILE: &str = "deductions.csv";

/// Errors that can occur when loading a rate table.
#[derive(Debug, Error)]
pub enum RateTableLoaderError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Unknown {kind} category '{category}' for '{id}'")]
    InvalidCategory {
        kind: &'static str,
        id: String,
        category: String,
    },

    #[error("Invalid rate table: {0}")]
    InvalidTable(#[from] RateTableError),
}

impl From<csv::Error> for RateTableLoaderError {
    fn from(err: csv::Error) -> Self {
        RateTableLoaderError::CsvParse(err.to_string())
    }
}

/// A row of `personal_brackets.csv` or `sme_brackets.csv`.
///
/// - `min_income`: lower bound, exclusive except for the first bracket
/// - `max_income`: upper bound, inclusive (empty for unlimited)
/// - `rate`: marginal rate as a decimal (e.g., 0.03 for 3%)
/// - `base_tax`: tax on all income up to `min_income`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TaxBracketRecord {
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
    pub base_tax: Decimal,
}

impl From<TaxBracketRecord> for TaxBracket {
    fn from(record: TaxBracketRecord) -> Self {
        TaxBracket {
            min_income: record.min_income,
            max_income: record.max_income,
            tax_rate: record.rate,
            base_tax: record.base_tax,
        }
    }
}

/// A row of `reliefs.csv`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ReliefRecord {
    pub id: String,
    pub category: String,
    pub name: String,
    pub name_ms: String,
    pub limit: Decimal,
    #[serde(default)]
    pub per_unit: bool,
    #[serde(default)]
    pub description: String,
}

impl TryFrom<ReliefRecord> for ReliefItem {
    type Error = RateTableLoaderError;

    fn try_from(record: ReliefRecord) -> Result<Self, Self::Error> {
        let category = ReliefCategory::parse(&record.category).ok_or_else(|| {
            RateTableLoaderError::InvalidCategory {
                kind: "relief",
                id: record.id.clone(),
                category: record.category.clone(),
            }
        })?;

        Ok(ReliefItem {
            id: record.id,
            category,
            name: record.name,
            name_ms: record.name_ms,
            limit: record.limit,
            per_unit: record.per_unit,
            description: record.description,
        })
    }
}

/// A row of `deductions.csv`. Empty `limit` and `limit_percent` cells mean
/// no ceiling.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DeductionRecord {
    pub id: String,
    pub category: String,
    pub name: String,
    pub name_ms: String,
    pub deduction_rate: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub limit: Option<Decimal>,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub limit_percent: Option<Decimal>,
    #[serde(default)]
    pub sme_only: bool,
    #[serde(default)]
    pub description: String,
}

impl TryFrom<DeductionRecord> for DeductionItem {
    type Error = RateTableLoaderError;

    fn try_from(record: DeductionRecord) -> Result<Self, Self::Error> {
        let category = DeductionCategory::parse(&record.category).ok_or_else(|| {
            RateTableLoaderError::InvalidCategory {
                kind: "deduction",
                id: record.id.clone(),
                category: record.category.clone(),
            }
        })?;

        Ok(DeductionItem {
            id: record.id,
            category,
            name: record.name,
            name_ms: record.name_ms,
            deduction_rate: record.deduction_rate,
            limit: record.limit,
            limit_percent: record.limit_percent,
            sme_only: record.sme_only,
            description: record.description,
        })
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// The raw text of each file in a rate-table directory.
#[derive(Debug, Clone, Copy)]
pub struct RateTableSources<'a> {
    pub config: &'a str,
    pub personal_brackets: &'a str,
    pub sme_brackets: &'a str,
    pub reliefs: &'a str,
    pub deductions: &'a str,
}

/// Loader for rate tables from TOML and CSV files.
///
/// Every table passes through [`RateTable::new`], so a loaded table is
/// always valid.
pub struct RateTableLoader;

impl RateTableLoader {
    /// Parse a bracket schedule from a CSV reader.
    pub fn parse_brackets<R: Read>(reader: R) -> Result<Vec<TaxBracket>, RateTableLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut brackets = Vec::new();

        for result in csv_reader.deserialize() {
            let record: TaxBracketRecord = result?;
            brackets.push(record.into());
        }

        Ok(brackets)
    }

    pub fn parse_reliefs<R: Read>(reader: R) -> Result<Vec<ReliefItem>, RateTableLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut reliefs = Vec::new();

        for result in csv_reader.deserialize() {
            let record: ReliefRecord = result?;
            reliefs.push(record.try_into()?);
        }

        Ok(reliefs)
    }

    pub fn parse_deductions<R: Read>(
        reader: R
    ) -> Result<Vec<DeductionItem>, RateTableLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut deductions = Vec::new();

        for result in csv_reader.deserialize() {
            let record: DeductionRecord = result?;
            deductions.push(record.try_into()?);
        }

        Ok(deductions)
    }

    pub fn parse_config(text: &str) -> Result<TaxYearConfig, RateTableLoaderError> {
        Ok(toml::from_str(text)?)
    }

    /// Build and validate a table from in-memory file contents.
    pub fn from_sources(sources: &RateTableSources<'_>) -> Result<RateTable, RateTableLoaderError> {
        let config = Self::parse_config(sources.config)?;
        let personal = Self::parse_brackets(sources.personal_brackets.as_bytes())?;
        let sme = Self::parse_brackets(sources.sme_brackets.as_bytes())?;
        let reliefs = Self::parse_reliefs(sources.reliefs.as_bytes())?;
        let deductions = Self::parse_deductions(sources.deductions.as_bytes())?;

        let table = RateTable::new(config, personal, sme, reliefs, deductions)?;

        info!(
            assessment_year = table.assessment_year(),
            reliefs = table.reliefs().len(),
            deductions = table.deductions().len(),
            "rate table loaded"
        );

        Ok(table)
    }

    /// Load a table from a directory holding the five rate-table files.
    pub fn from_dir(dir: &Path) -> Result<RateTable, RateTableLoaderError> {
        let config = read_file(dir, CONFIG_FILE)?;
        let personal_brackets = read_file(dir, PERSONAL_BRACKETS_FILE)?;
        let sme_brackets = read_file(dir, SME_BRACKETS_FILE)?;
        let reliefs = read_file(dir, RELIEFS_FILE)?;
        let deductions = read_file(dir, DEDUCTIONS_FILE)?;

        info!(dir = %dir.display(), "loading rate table");

        Self::from_sources(&RateTableSources {
            config: &config,
            personal_brackets: &personal_brackets,
            sme_brackets: &sme_brackets,
            reliefs: &reliefs,
            deductions: &deductions,
        })
    }
}

fn read_file(
    dir: &Path,
    name: &str,
) -> Result<String, RateTableLoaderError> {
    let path = dir.join(name);
    fs::read_to_string(&path).map_err(|source| RateTableLoaderError::Io { path, source })
}
