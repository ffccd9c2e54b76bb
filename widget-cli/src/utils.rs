use rust_decimal::Decimal;
use thiserror::Error;
use widget_core::calculations::common::round_won;

/// Error returned when an amount has too many digits for a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseAmountError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Keeps only ASCII digits: `"5,000만원"` reads as 5000, `"-3"` as 3.
fn digits_only(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}

/// Parses a won amount the way a form field would.
///
/// Every non-digit character is dropped, so separators, currency marks and
/// signs are ignored. Empty input is 0.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let digits = digits_only(s);
    if digits.is_empty() {
        return Ok(Decimal::ZERO);
    }
    digits.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid amount: {}", e);
        ParseAmountError {
            input: s.to_string(),
            source: e,
        }
    })
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats a value as whole won with thousands separators, e.g.
/// `3,586,510원`.
pub fn format_won(value: Decimal) -> String {
    let rounded = round_won(value);
    let digits = group_thousands(&rounded.abs().trunc().to_string());
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{digits}원")
    } else {
        format!("{digits}원")
    }
}
