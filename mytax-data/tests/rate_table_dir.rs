//! Integration tests for loading rate-table directories from disk.

use std::path::PathBuf;

use mytax_core::calculations::{
    CorporateTaxEngine, CorporateTaxRequest, FullTaxCalculator, PersonalTaxRequest,
};
use mytax_core::{RateTableError, Residency};
use mytax_data::{RateTableLoader, RateTableLoaderError, builtin_ya2024};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn shipped_table_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tables")
        .join("ya2024")
}

#[test]
fn test_load_minimal_directory() {
    let table = RateTableLoader::from_dir(&fixture_path("minimal")).expect("Failed to load table");

    assert_eq!(table.assessment_year(), 2030);
    assert_eq!(table.personal_brackets().len(), 3);
    assert_eq!(table.automatic_relief_total(), dec!(8000));
    assert_eq!(
        table.find_relief("lifestyle").map(|r| r.description.as_str()),
        Some("Books, gadgets")
    );
}

#[test]
fn test_engines_use_loaded_table() {
    let table = RateTableLoader::from_dir(&fixture_path("minimal")).expect("Failed to load table");
    let calculator = FullTaxCalculator::new(&table);

    let result = calculator.calculate(&PersonalTaxRequest {
        gross_income: dec!(60000),
        ..Default::default()
    });

    // 60000 - 8000 = 52000: 4000 + 2000 * 0.20
    assert_eq!(result.chargeable_income, dec!(52000));
    assert_eq!(result.tax_payable, dec!(4400));
    assert_eq!(result.rebate, dec!(0));

    let non_resident = calculator.calculate(&PersonalTaxRequest {
        gross_income: dec!(60000),
        residency: Residency::NonResident,
        ..Default::default()
    });
    assert_eq!(non_resident.tax_payable, dec!(13000));

    let corporate = CorporateTaxEngine::new(&table).compute(&CorporateTaxRequest {
        chargeable_income: dec!(150000),
        is_sme: true,
    });
    assert_eq!(corporate.tax_payable, dec!(20000));
}

#[test]
fn test_broken_schedule_is_rejected() {
    let err = RateTableLoader::from_dir(&fixture_path("broken_schedule"))
        .expect_err("Should reject a gap between brackets");

    let RateTableLoaderError::InvalidTable(inner) = err else {
        panic!("Expected InvalidTable error, got: {:?}", err);
    };
    assert_eq!(
        inner,
        RateTableError::NotContiguous {
            schedule: "personal",
            min_income: dec!(10001),
        }
    );
}

#[test]
fn test_missing_directory_reports_path() {
    let err = RateTableLoader::from_dir(&fixture_path("does_not_exist"))
        .expect_err("Should fail for missing directory");

    assert!(matches!(err, RateTableLoaderError::Io { .. }));
    assert!(err.to_string().contains("rate_table.toml"));
}

#[test]
fn test_shipped_directory_matches_builtin() {
    let from_disk = RateTableLoader::from_dir(&shipped_table_path()).expect("Failed to load table");
    let embedded = builtin_ya2024().expect("Failed to load built-in table");

    assert_eq!(from_disk, embedded);
}

#[test]
fn test_builtin_reproduces_worked_examples() {
    let table = builtin_ya2024().expect("Failed to load built-in table");
    let calculator = FullTaxCalculator::new(&table);

    let result = calculator.calculate(&PersonalTaxRequest {
        gross_income: dec!(94000),
        ..Default::default()
    });

    // 94000 - 9000 = 85000
    assert_eq!(result.tax_payable, dec!(6550));
    assert_eq!(result.effective_rate, dec!(7.71));

    let corporate = CorporateTaxEngine::new(&table).compute(&CorporateTaxRequest {
        chargeable_income: dec!(700000),
        is_sme: true,
    });
    assert_eq!(corporate.tax_payable, dec!(123000));
}
