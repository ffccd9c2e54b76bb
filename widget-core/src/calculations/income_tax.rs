//! Income tax estimation strategies.
//!
//! Two calculator variants estimate monthly income tax differently, and each
//! expects its bracket table at a different scale:
//!
//! | Strategy | Bracket scale | Household adjustment |
//! |----------|---------------|----------------------|
//! | [`TaxEstimationStrategy::AnnualizedBase`] | annual | per-person deductions from the annual base |
//! | [`TaxEstimationStrategy::MonthlyCredits`] | monthly | per-person credits from the computed tax |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use widget_core::calculations::TaxEstimationStrategy;
//! use widget_core::{TaxBracket, TaxBracketTable};
//!
//! let brackets = TaxBracketTable::new(vec![
//!     TaxBracket::bounded(dec!(1500000), dec!(0), dec!(0)),
//!     TaxBracket::bounded(dec!(5000000), dec!(0.09), dec!(180000)),
//!     TaxBracket::unbounded(dec!(0.19), dec!(1050000)),
//! ])
//! .unwrap();
//!
//! let strategy = TaxEstimationStrategy::monthly_credits();
//! let tax = strategy.monthly_income_tax(dec!(4000000), &brackets, 2, 1);
//!
//! // 4,000,000 × 9% − 180,000 = 180,000, less 15,000 + 12,000 in credits
//! assert_eq!(tax, dec!(153000));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{MONTHS_PER_YEAR, floor_zero};
use crate::models::TaxBracketTable;

/// How `BracketEstimate` mode turns a taxable monthly amount into tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaxEstimationStrategy {
    /// Annualize the taxable amount, subtract per-person deductions, apply an
    /// annual bracket table, then divide back by twelve.
    AnnualizedBase {
        dependent_deduction: Decimal,
        child_deduction: Decimal,
    },

    /// Apply a monthly bracket table directly, then subtract per-person
    /// credits. The first dependent earns no credit.
    MonthlyCredits {
        dependent_credit: Decimal,
        child_credit: Decimal,
    },
}

impl Default for TaxEstimationStrategy {
    fn default() -> Self {
        Self::annualized_base()
    }
}

impl TaxEstimationStrategy {
    /// Annualized strategy with 1,500,000 per dependent and 1,000,000 per
    /// child.
    pub fn annualized_base() -> Self {
        Self::AnnualizedBase {
            dependent_deduction: dec!(1500000),
            child_deduction: dec!(1000000),
        }
    }

    /// Monthly strategy with 15,000 per extra dependent and 12,000 per child.
    pub fn monthly_credits() -> Self {
        Self::MonthlyCredits {
            dependent_credit: dec!(15000),
            child_credit: dec!(12000),
        }
    }

    /// Estimated monthly income tax, never negative.
    pub fn monthly_income_tax(
        &self,
        taxable_monthly: Decimal,
        brackets: &TaxBracketTable,
        dependents: u32,
        children: u32,
    ) -> Decimal {
        match *self {
            Self::AnnualizedBase {
                dependent_deduction,
                child_deduction,
            } => {
                let annual_base = taxable_monthly * MONTHS_PER_YEAR;
                let adjusted = floor_zero(
                    annual_base
                        - Decimal::from(dependents) * dependent_deduction
                        - Decimal::from(children) * child_deduction,
                );

                let bracket = brackets.lookup(adjusted);
                let annual_tax = bracket.tax_for(adjusted);
                debug!(
                    %adjusted,
                    rate = %bracket.rate,
                    %annual_tax,
                    "annualized bracket selected"
                );

                annual_tax / MONTHS_PER_YEAR
            }
            Self::MonthlyCredits {
                dependent_credit,
                child_credit,
            } => {
                let bracket = brackets.lookup(taxable_monthly);
                let raw_tax = bracket.tax_for(taxable_monthly);
                let credits = Decimal::from(dependents.saturating_sub(1)) * dependent_credit
                    + Decimal::from(children) * child_credit;
                debug!(
                    %taxable_monthly,
                    rate = %bracket.rate,
                    %raw_tax,
                    %credits,
                    "monthly bracket selected"
                );

                floor_zero(raw_tax - credits)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::calculations::common::round_won;
    use crate::models::TaxBracket;

    fn annual_brackets() -> TaxBracketTable {
        TaxBracketTable::new(vec![
            TaxBracket::bounded(dec!(14000000), dec!(0.06), dec!(0)),
            TaxBracket::bounded(dec!(50000000), dec!(0.15), dec!(1260000)),
            TaxBracket::bounded(dec!(88000000), dec!(0.24), dec!(5760000)),
            TaxBracket::unbounded(dec!(0.35), dec!(15440000)),
        ])
        .unwrap()
    }

    fn monthly_brackets() -> TaxBracketTable {
        TaxBracketTable::new(vec![
            TaxBracket::bounded(dec!(1500000), dec!(0), dec!(0)),
            TaxBracket::bounded(dec!(3000000), dec!(0.06), dec!(90000)),
            TaxBracket::bounded(dec!(5000000), dec!(0.09), dec!(180000)),
            TaxBracket::unbounded(dec!(0.19), dec!(1050000)),
        ])
        .unwrap()
    }

    // =========================================================================
    // annualized base tests
    // =========================================================================

    #[test]
    fn annualized_subtracts_household_deductions_before_lookup() {
        let strategy = TaxEstimationStrategy::annualized_base();

        // 4,000,000 × 12 = 48,000,000 − 1,500,000 − 1,000,000 = 45,500,000
        // 45,500,000 × 15% − 1,260,000 = 5,565,000 / 12 = 463,750
        let tax = strategy.monthly_income_tax(dec!(4000000), &annual_brackets(), 1, 1);

        assert_eq!(tax, dec!(463750));
    }

    #[test]
    fn annualized_deductions_can_move_base_into_lower_bracket() {
        let strategy = TaxEstimationStrategy::annualized_base();

        // 4,250,000 × 12 = 51,000,000, above the 15% bracket before deductions
        // 51,000,000 − 3 × 1,500,000 = 46,500,000 → 15% bracket
        let tax = strategy.monthly_income_tax(dec!(4250000), &annual_brackets(), 3, 0);

        assert_eq!(tax, (dec!(46500000) * dec!(0.15) - dec!(1260000)) / dec!(12));
    }

    #[test]
    fn annualized_floors_base_at_zero() {
        let strategy = TaxEstimationStrategy::annualized_base();

        let tax = strategy.monthly_income_tax(dec!(100000), &annual_brackets(), 5, 5);

        assert_eq!(tax, dec!(0));
    }

    // =========================================================================
    // monthly credits tests
    // =========================================================================

    #[test]
    fn monthly_first_dependent_earns_no_credit() {
        let strategy = TaxEstimationStrategy::monthly_credits();

        let tax = strategy.monthly_income_tax(dec!(4000000), &monthly_brackets(), 1, 0);

        assert_eq!(tax, dec!(180000));
    }

    #[test]
    fn monthly_subtracts_credits_after_bracket_tax() {
        let strategy = TaxEstimationStrategy::monthly_credits();

        // 180,000 − 2 × 15,000 − 2 × 12,000 = 126,000
        let tax = strategy.monthly_income_tax(dec!(4000000), &monthly_brackets(), 3, 2);

        assert_eq!(tax, dec!(126000));
    }

    #[test]
    fn monthly_credits_cannot_make_tax_negative() {
        let strategy = TaxEstimationStrategy::monthly_credits();

        // 2,000,000 × 6% − 90,000 = 30,000, credits 15,000 × 4 = 60,000
        let tax = strategy.monthly_income_tax(dec!(2000000), &monthly_brackets(), 5, 0);

        assert_eq!(tax, dec!(0));
    }

    #[test]
    fn monthly_zero_rate_bracket_yields_zero() {
        let strategy = TaxEstimationStrategy::monthly_credits();

        let tax = strategy.monthly_income_tax(dec!(1200000), &monthly_brackets(), 1, 0);

        assert_eq!(tax, dec!(0));
    }

    #[test]
    fn monthly_catch_all_bracket_applies_above_bounds() {
        let strategy = TaxEstimationStrategy::monthly_credits();

        let tax = strategy.monthly_income_tax(dec!(10000000), &monthly_brackets(), 1, 0);

        assert_eq!(round_won(tax), dec!(850000));
    }

    // =========================================================================
    // default tests
    // =========================================================================

    #[test]
    fn default_is_annualized_base() {
        assert_eq!(
            TaxEstimationStrategy::default(),
            TaxEstimationStrategy::annualized_base()
        );
    }
}
