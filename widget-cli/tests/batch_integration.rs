//! Integration tests that run the batch estimator against an on-disk fixture.
//!
//! These complement the unit tests inside batch.rs (which all use inline
//! string literals) by covering the read-from-disk path end to end.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use widget_cli::{app, batch};
use widget_core::{PeriodBasis, SeveranceHandling, TaxMode, presets};

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("sample_payroll.csv")
}

#[test]
fn test_load_fixture_file_succeeds() {
    let inputs = batch::load_from_file(&fixture_path()).expect("fixture file should load");

    assert_eq!(inputs.len(), 3);
    assert_eq!(inputs[1].severance, SeveranceHandling::IncludedInAnnual);
    assert_eq!(inputs[2].period_basis, PeriodBasis::Monthly);
    assert_eq!(inputs[2].tax_mode, TaxMode::ManualOverride(dec!(85000)));
}

#[test]
fn test_run_batch_under_annual_policy() {
    let mut output = Vec::new();

    let rows = app::run_batch(&presets::annual_2025(), &fixture_path(), &mut output)
        .expect("batch should run");

    assert_eq!(rows, 3);
    let text = String::from_utf8(output).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "gross_amount,gross_monthly,insurance_monthly,income_tax_monthly,local_income_tax_monthly,total_deduction_monthly,net_monthly",
            "50000000,4166667,385456,471250,47125,903831,3262835",
            "60000000,5416667,506923,742000,74200,1323123,4093543",
            "3000000,3000000,272087,85000,8500,365587,2634413",
        ]
    );
}

#[test]
fn test_load_nonexistent_file_returns_err() {
    let bad_path = Path::new("/this/path/does/not/exist.csv");

    assert!(matches!(
        batch::load_from_file(bad_path),
        Err(batch::BatchLoadError::Io(_))
    ));
}
