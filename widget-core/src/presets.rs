//! Built-in payroll policies.
//!
//! | Preset | Strategy | Bracket scale |
//! |--------|----------|---------------|
//! | [`ANNUAL_2025`] | annualized base, 1,500,000 / 1,000,000 deductions | annual national table |
//! | [`MONTHLY_SIMPLIFIED`] | monthly credits, 15,000 / 12,000 credits | simplified monthly table |

use rust_decimal_macros::dec;

use crate::calculations::TaxEstimationStrategy;
use crate::models::{PayrollPolicy, RateTable, TaxBracket, TaxBracketTable};

pub const ANNUAL_2025: &str = "annual_2025";
pub const MONTHLY_SIMPLIFIED: &str = "monthly_simplified";

/// Names accepted by [`by_name`].
pub const PRESET_NAMES: [&str; 2] = [ANNUAL_2025, MONTHLY_SIMPLIFIED];

/// 2025 employee contribution rates.
pub fn rates_2025() -> RateTable {
    RateTable {
        pension: dec!(0.0475),
        health: dec!(0.03595),
        long_term_care_on_health: dec!(0.1314),
        employment: dec!(0.009),
    }
}

/// National annual income tax brackets with cumulative deductions.
pub fn annual_brackets() -> TaxBracketTable {
    TaxBracketTable::from_trusted(vec![
        TaxBracket::bounded(dec!(14000000), dec!(0.06), dec!(0)),
        TaxBracket::bounded(dec!(50000000), dec!(0.15), dec!(1260000)),
        TaxBracket::bounded(dec!(88000000), dec!(0.24), dec!(5760000)),
        TaxBracket::bounded(dec!(150000000), dec!(0.35), dec!(15440000)),
        TaxBracket::bounded(dec!(300000000), dec!(0.38), dec!(19940000)),
        TaxBracket::bounded(dec!(500000000), dec!(0.40), dec!(25940000)),
        TaxBracket::bounded(dec!(1000000000), dec!(0.42), dec!(35940000)),
        TaxBracket::unbounded(dec!(0.45), dec!(65940000)),
    ])
}

/// Simplified brackets applied directly to a monthly taxable amount.
pub fn monthly_brackets() -> TaxBracketTable {
    TaxBracketTable::from_trusted(vec![
        TaxBracket::bounded(dec!(1500000), dec!(0), dec!(0)),
        TaxBracket::bounded(dec!(3000000), dec!(0.06), dec!(90000)),
        TaxBracket::bounded(dec!(5000000), dec!(0.09), dec!(180000)),
        TaxBracket::bounded(dec!(8000000), dec!(0.12), dec!(330000)),
        TaxBracket::bounded(dec!(12000000), dec!(0.15), dec!(570000)),
        TaxBracket::unbounded(dec!(0.19), dec!(1050000)),
    ])
}

pub fn annual_2025() -> PayrollPolicy {
    PayrollPolicy {
        name: ANNUAL_2025.to_string(),
        year: 2025,
        rates: rates_2025(),
        brackets: annual_brackets(),
        strategy: TaxEstimationStrategy::annualized_base(),
    }
}

pub fn monthly_simplified() -> PayrollPolicy {
    PayrollPolicy {
        name: MONTHLY_SIMPLIFIED.to_string(),
        year: 2025,
        rates: rates_2025(),
        brackets: monthly_brackets(),
        strategy: TaxEstimationStrategy::monthly_credits(),
    }
}

/// Looks up a preset by name.
pub fn by_name(name: &str) -> Option<PayrollPolicy> {
    match name {
        ANNUAL_2025 => Some(annual_2025()),
        MONTHLY_SIMPLIFIED => Some(monthly_simplified()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::calculations::common::round_won;
    use crate::models::EstimateInput;

    #[test]
    fn preset_tables_pass_validation() {
        for table in [annual_brackets(), monthly_brackets()] {
            let rebuilt = TaxBracketTable::new(table.brackets().to_vec()).unwrap();
            assert_eq!(rebuilt, table);
        }
        assert_eq!(rates_2025().validate(), Ok(()));
    }

    #[test]
    fn annual_brackets_are_continuous_at_bounds() {
        let table = annual_brackets();
        let brackets = table.brackets();

        for pair in brackets.windows(2) {
            let bound = pair[0].upper_bound.unwrap();
            let below = pair[0].tax_for(bound);
            let above = pair[1].tax_for(bound);
            assert_eq!(below, above, "discontinuity at {bound}");
        }
    }

    #[test]
    fn by_name_resolves_every_listed_preset() {
        for name in PRESET_NAMES {
            let policy = by_name(name).unwrap();
            assert_eq!(policy.name, name);
        }
        assert!(by_name("nope").is_none());
    }

    #[test]
    fn default_input_under_each_preset() {
        let input = EstimateInput::default();

        let annual = annual_2025().estimator().estimate(&input);
        let monthly = monthly_simplified().estimator().estimate(&input);

        assert_eq!(round_won(annual.income_tax_monthly), dec!(471250));
        assert_eq!(round_won(monthly.income_tax_monthly), dec!(177000));
        assert_eq!(annual.pension_monthly, monthly.pension_monthly);
    }
}
