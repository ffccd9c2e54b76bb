//! CSV batch input for the `pay` command.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does **not** matter.
//!
//! | Column | Required | Type | Notes |
//! |-----------------------|----------|---------|-------------------------------------------|
//! | `gross_amount` | yes | decimal | annual salary or monthly wage |
//! | `period_basis` | no | string | `annual` (default) or `monthly` |
//! | `severance` | no | string | `separate` (default) or `included` |
//! | `non_taxable_monthly` | no | decimal | defaults to 200,000 |
//! | `dependents` | no | integer | defaults to 1, clamped to 1..=20 |
//! | `children` | no | integer | defaults to 0, clamped to 0..=20 |
//! | `manual_tax` | no | decimal | monthly income tax; empty means estimate |
//!
//! ### Minimal example
//!
//! ```csv
//! gross_amount
//! 50000000
//! ```
//!
//! ### Full example
//!
//! ```csv
//! gross_amount,period_basis,severance,non_taxable_monthly,dependents,children,manual_tax
//! 60000000,annual,included,200000,2,1,
//! 3000000,monthly,separate,0,1,0,85000
//! ```
use std::io::Write;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use widget_core::calculations::common::round_won;
use widget_core::{
    EstimateInput, EstimateResult, PeriodBasis, SeveranceHandling, TaxMode,
};

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    gross_amount: Decimal,
    period_basis: Option<String>,
    severance: Option<String>,
    non_taxable_monthly: Option<Decimal>,
    dependents: Option<u32>,
    children: Option<u32>,
    manual_tax: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or converting batch CSV data.
#[derive(Debug, thiserror::Error)]
pub enum BatchLoadError {
    /// The underlying CSV deserialisation failed.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("unrecognised period basis '{value}' on row {row}")]
    InvalidBasis { value: String, row: usize },

    #[error("unrecognised severance handling '{value}' on row {row}")]
    InvalidSeverance { value: String, row: usize },

    #[error("cannot read batch file: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn parse_basis(
    value: Option<String>,
    row: usize,
) -> Result<PeriodBasis, BatchLoadError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(PeriodBasis::default()),
        Some(v) if v.eq_ignore_ascii_case("annual") => Ok(PeriodBasis::Annual),
        Some(v) if v.eq_ignore_ascii_case("monthly") => Ok(PeriodBasis::Monthly),
        Some(v) => Err(BatchLoadError::InvalidBasis {
            value: v.to_string(),
            row,
        }),
    }
}

fn parse_severance(
    value: Option<String>,
    row: usize,
) -> Result<SeveranceHandling, BatchLoadError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(SeveranceHandling::default()),
        Some(v) if v.eq_ignore_ascii_case("separate") => Ok(SeveranceHandling::Separate),
        Some(v) if v.eq_ignore_ascii_case("included") => Ok(SeveranceHandling::IncludedInAnnual),
        Some(v) => Err(BatchLoadError::InvalidSeverance {
            value: v.to_string(),
            row,
        }),
    }
}

/// Convert a single CSV row into a sanitized [`EstimateInput`].
///
/// row_number is 1-based (for error messages).
fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<EstimateInput, BatchLoadError> {
    let defaults = EstimateInput::default();

    let input = EstimateInput {
        gross_amount: row.gross_amount,
        period_basis: parse_basis(row.period_basis, row_number)?,
        severance: parse_severance(row.severance, row_number)?,
        non_taxable_monthly: row
            .non_taxable_monthly
            .unwrap_or(defaults.non_taxable_monthly),
        dependents: row.dependents.unwrap_or(defaults.dependents),
        children: row.children.unwrap_or(defaults.children),
        tax_mode: row
            .manual_tax
            .map_or(TaxMode::BracketEstimate, TaxMode::ManualOverride),
    };

    Ok(input.sanitized())
}

/// Parse CSV text and return one sanitized input per row, in file order.
///
/// # Errors
///
/// * [BatchLoadError::Parse] – if the CSV is structurally invalid or a
///   field cannot be deserialised.
/// * [BatchLoadError::InvalidBasis] / [BatchLoadError::InvalidSeverance] –
///   if a row names an unknown option.
pub fn load_from_str(input: &str) -> Result<Vec<EstimateInput>, BatchLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

/// Read a file from disk and delegate to [load_from_str].
pub fn load_from_file(path: &Path) -> Result<Vec<EstimateInput>, BatchLoadError> {
    let contents = std::fs::read_to_string(path)?;
    load_from_str(&contents)
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct OutputRow {
    gross_amount: Decimal,
    gross_monthly: Decimal,
    insurance_monthly: Decimal,
    income_tax_monthly: Decimal,
    local_income_tax_monthly: Decimal,
    total_deduction_monthly: Decimal,
    net_monthly: Decimal,
}

/// Writes one CSV line per estimate, amounts rounded to whole won.
pub fn write_results<W: Write>(
    writer: W,
    estimates: &[(EstimateInput, EstimateResult)],
) -> Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);

    for (input, result) in estimates {
        out.serialize(OutputRow {
            gross_amount: input.gross_amount,
            gross_monthly: round_won(result.gross_monthly),
            insurance_monthly: round_won(result.insurance_monthly()),
            income_tax_monthly: round_won(result.income_tax_monthly),
            local_income_tax_monthly: round_won(result.local_income_tax_monthly),
            total_deduction_monthly: round_won(result.total_deduction_monthly),
            net_monthly: round_won(result.net_monthly),
        })?;
    }

    out.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
