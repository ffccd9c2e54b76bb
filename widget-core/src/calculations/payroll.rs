//! Monthly paycheck estimator.
//!
//! Turns a salary into a monthly take-home breakdown: four social-insurance
//! contributions, income tax and the local surtax on it.
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Monthly gross (annual salary ÷ 12, or the monthly wage) |
//! | 2    | Severance addon: monthly gross ÷ 12, annual basis with severance included only |
//! | 3    | Taxable base: gross − non-taxable allowance (minimum 0) |
//! | 4    | Pension, health and employment: taxable × rate |
//! | 4a   | Long-term care: health contribution × long-term-care rate |
//! | 5    | Income tax: manual figure, or the configured bracket strategy |
//! | 6    | Local income tax: income tax × 10% |
//! | 7    | Total deduction: steps 4 to 6 summed |
//! | 8    | Net pay: gross − total deduction (minimum 0) |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use widget_core::calculations::{PayrollEstimator, TaxEstimationStrategy};
//! use widget_core::calculations::common::round_won;
//! use widget_core::{EstimateInput, RateTable, TaxBracket, TaxBracketTable};
//!
//! let rates = RateTable {
//!     pension: dec!(0.0475),
//!     health: dec!(0.03595),
//!     long_term_care_on_health: dec!(0.1314),
//!     employment: dec!(0.009),
//! };
//! let brackets = TaxBracketTable::new(vec![
//!     TaxBracket::bounded(dec!(1500000), dec!(0), dec!(0)),
//!     TaxBracket::bounded(dec!(3000000), dec!(0.06), dec!(90000)),
//!     TaxBracket::bounded(dec!(5000000), dec!(0.09), dec!(180000)),
//!     TaxBracket::unbounded(dec!(0.19), dec!(1050000)),
//! ])
//! .unwrap();
//!
//! let estimator =
//!     PayrollEstimator::new(&rates, &brackets, TaxEstimationStrategy::monthly_credits());
//! let result = estimator.estimate(&EstimateInput::default());
//!
//! assert_eq!(round_won(result.gross_monthly), dec!(4166667));
//! assert_eq!(round_won(result.income_tax_monthly), dec!(177000));
//! assert_eq!(round_won(result.local_income_tax_monthly), dec!(17700));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::TaxEstimationStrategy;
use crate::calculations::common::{LOCAL_INCOME_TAX_RATE, MONTHS_PER_YEAR, floor_zero};
use crate::models::{
    EstimateInput, EstimateResult, PeriodBasis, RateTable, SeveranceHandling, TaxBracketTable,
    TaxMode,
};

/// Calculator for the monthly paycheck breakdown.
///
/// Borrows its rate and bracket tables; the bracket table must be at the
/// scale `strategy` expects.
#[derive(Debug, Clone)]
pub struct PayrollEstimator<'a> {
    rates: &'a RateTable,
    brackets: &'a TaxBracketTable,
    strategy: TaxEstimationStrategy,
}

impl<'a> PayrollEstimator<'a> {
    pub fn new(
        rates: &'a RateTable,
        brackets: &'a TaxBracketTable,
        strategy: TaxEstimationStrategy,
    ) -> Self {
        Self {
            rates,
            brackets,
            strategy,
        }
    }

    pub fn strategy(&self) -> TaxEstimationStrategy {
        self.strategy
    }

    /// Calculates the full monthly breakdown.
    ///
    /// Total over sanitized input: amounts are expected to be non-negative
    /// and household counts within range (see [`EstimateInput::sanitized`]).
    pub fn estimate(
        &self,
        input: &EstimateInput,
    ) -> EstimateResult {
        let base_monthly = self.base_monthly(input.gross_amount, input.period_basis);
        let gross_monthly =
            base_monthly + self.severance_addon(base_monthly, input.period_basis, input.severance);

        let taxable_monthly = self.taxable_monthly(gross_monthly, input.non_taxable_monthly);

        let pension_monthly = taxable_monthly * self.rates.pension;
        let health_monthly = taxable_monthly * self.rates.health;
        let long_term_care_monthly = self.long_term_care(health_monthly);
        let employment_monthly = taxable_monthly * self.rates.employment;

        let income_tax_monthly = self.income_tax(taxable_monthly, input);
        let local_income_tax_monthly = income_tax_monthly * LOCAL_INCOME_TAX_RATE;

        let total_deduction_monthly = pension_monthly
            + health_monthly
            + long_term_care_monthly
            + employment_monthly
            + income_tax_monthly
            + local_income_tax_monthly;
        let net_monthly = floor_zero(gross_monthly - total_deduction_monthly);

        debug!(
            %gross_monthly,
            %taxable_monthly,
            %total_deduction_monthly,
            %net_monthly,
            "paycheck estimated"
        );

        EstimateResult {
            gross_monthly,
            taxable_monthly,
            pension_monthly,
            health_monthly,
            long_term_care_monthly,
            employment_monthly,
            income_tax_monthly,
            local_income_tax_monthly,
            total_deduction_monthly,
            net_monthly,
        }
    }

    /// Normalizes the entered amount to a monthly figure.
    fn base_monthly(
        &self,
        gross_amount: Decimal,
        basis: PeriodBasis,
    ) -> Decimal {
        match basis {
            PeriodBasis::Annual => gross_amount / MONTHS_PER_YEAR,
            PeriodBasis::Monthly => gross_amount,
        }
    }

    /// Severance reserve folded into an annual salary, as one twelfth of the
    /// monthly base.
    fn severance_addon(
        &self,
        base_monthly: Decimal,
        basis: PeriodBasis,
        severance: SeveranceHandling,
    ) -> Decimal {
        match (basis, severance) {
            (PeriodBasis::Annual, SeveranceHandling::IncludedInAnnual) => {
                base_monthly / MONTHS_PER_YEAR
            }
            _ => Decimal::ZERO,
        }
    }

    fn taxable_monthly(
        &self,
        gross_monthly: Decimal,
        non_taxable_monthly: Decimal,
    ) -> Decimal {
        floor_zero(gross_monthly - non_taxable_monthly)
    }

    /// Long-term care is levied on the health contribution.
    fn long_term_care(
        &self,
        health_monthly: Decimal,
    ) -> Decimal {
        health_monthly * self.rates.long_term_care_on_health
    }

    fn income_tax(
        &self,
        taxable_monthly: Decimal,
        input: &EstimateInput,
    ) -> Decimal {
        match input.tax_mode {
            TaxMode::ManualOverride(monthly_tax) => monthly_tax,
            TaxMode::BracketEstimate => self.strategy.monthly_income_tax(
                taxable_monthly,
                self.brackets,
                input.dependents,
                input.children,
            ),
        }
    }
}
