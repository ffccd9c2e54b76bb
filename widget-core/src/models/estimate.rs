use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Lower and upper bounds accepted for the dependent count.
pub const DEPENDENTS_RANGE: (u32, u32) = (1, 20);

/// Lower and upper bounds accepted for the child count.
pub const CHILDREN_RANGE: (u32, u32) = (0, 20);

/// Largest amount, in won, accepted for any money field of an input.
///
/// Keeps every intermediate product well inside [`Decimal`] range.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

/// Whether `gross_amount` is a monthly wage or an annual salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodBasis {
    Monthly,
    #[default]
    Annual,
}

impl PeriodBasis {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Monthly => "월급",
            Self::Annual => "연봉",
        }
    }
}

/// How an annual salary treats the severance reserve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeveranceHandling {
    #[default]
    Separate,
    IncludedInAnnual,
}

impl SeveranceHandling {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Separate => "퇴직금 별도",
            Self::IncludedInAnnual => "퇴직금 포함",
        }
    }
}

/// Source of the monthly income tax figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "monthly_tax")]
pub enum TaxMode {
    /// Estimate from the bracket table using the configured strategy.
    #[default]
    BracketEstimate,
    /// Use a caller-supplied monthly tax as is.
    ManualOverride(Decimal),
}

/// Inputs for one paycheck estimate.
///
/// The estimator treats these as already sanitized; call
/// [`EstimateInput::sanitized`] on raw user values first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateInput {
    pub gross_amount: Decimal,
    pub period_basis: PeriodBasis,
    pub severance: SeveranceHandling,
    pub non_taxable_monthly: Decimal,
    pub dependents: u32,
    pub children: u32,
    pub tax_mode: TaxMode,
}

impl Default for EstimateInput {
    fn default() -> Self {
        Self {
            gross_amount: dec!(50000000),
            period_basis: PeriodBasis::Annual,
            severance: SeveranceHandling::Separate,
            non_taxable_monthly: dec!(200000),
            dependents: 1,
            children: 0,
            tax_mode: TaxMode::BracketEstimate,
        }
    }
}

impl EstimateInput {
    /// Clamps amounts into `[0, MAX_AMOUNT]` and the household counts into
    /// their accepted ranges.
    pub fn sanitized(mut self) -> Self {
        let before = self.clone();

        self.gross_amount = clamp_amount(self.gross_amount);
        self.non_taxable_monthly = clamp_amount(self.non_taxable_monthly);
        self.dependents = clamp_count(self.dependents, DEPENDENTS_RANGE.0, DEPENDENTS_RANGE.1);
        self.children = clamp_count(self.children, CHILDREN_RANGE.0, CHILDREN_RANGE.1);
        if let TaxMode::ManualOverride(tax) = self.tax_mode {
            self.tax_mode = TaxMode::ManualOverride(clamp_amount(tax));
        }

        if self != before {
            warn!(?before, after = ?self, "estimate input adjusted into accepted ranges");
        }
        self
    }
}

fn clamp_amount(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, MAX_AMOUNT)
}

/// Clamps `value` into `[min, max]`.
pub fn clamp_count(
    value: u32,
    min: u32,
    max: u32,
) -> u32 {
    value.clamp(min, max)
}

/// Monthly paycheck breakdown produced by the estimator.
///
/// Every field keeps full precision; round only for display.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EstimateResult {
    pub gross_monthly: Decimal,
    pub taxable_monthly: Decimal,
    pub pension_monthly: Decimal,
    pub health_monthly: Decimal,
    pub long_term_care_monthly: Decimal,
    pub employment_monthly: Decimal,
    pub income_tax_monthly: Decimal,
    pub local_income_tax_monthly: Decimal,
    pub total_deduction_monthly: Decimal,
    pub net_monthly: Decimal,
}

impl EstimateResult {
    /// Sum of the four social-insurance contributions.
    pub fn insurance_monthly(&self) -> Decimal {
        self.pension_monthly
            + self.health_monthly
            + self.long_term_care_monthly
            + self.employment_monthly
    }

    /// Net pay over twelve months.
    pub fn net_annual(&self) -> Decimal {
        self.net_monthly * Decimal::from(12)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_matches_calculator_defaults() {
        let input = EstimateInput::default();

        assert_eq!(input.gross_amount, dec!(50000000));
        assert_eq!(input.period_basis, PeriodBasis::Annual);
        assert_eq!(input.severance, SeveranceHandling::Separate);
        assert_eq!(input.non_taxable_monthly, dec!(200000));
        assert_eq!(input.dependents, 1);
        assert_eq!(input.children, 0);
    }

    #[test]
    fn sanitized_floors_negative_amounts() {
        let input = EstimateInput {
            gross_amount: dec!(-100),
            non_taxable_monthly: dec!(-5),
            tax_mode: TaxMode::ManualOverride(dec!(-1)),
            ..EstimateInput::default()
        }
        .sanitized();

        assert_eq!(input.gross_amount, dec!(0));
        assert_eq!(input.non_taxable_monthly, dec!(0));
        assert_eq!(input.tax_mode, TaxMode::ManualOverride(dec!(0)));
    }

    #[test]
    fn sanitized_caps_oversized_amounts() {
        let huge = Decimal::from_str_exact("9999999999999999999999999999").unwrap();
        let input = EstimateInput {
            gross_amount: huge,
            non_taxable_monthly: huge,
            tax_mode: TaxMode::ManualOverride(Decimal::MAX),
            ..EstimateInput::default()
        }
        .sanitized();

        assert_eq!(input.gross_amount, MAX_AMOUNT);
        assert_eq!(input.non_taxable_monthly, MAX_AMOUNT);
        assert_eq!(input.tax_mode, TaxMode::ManualOverride(MAX_AMOUNT));
    }

    #[test]
    fn sanitized_clamps_household_counts() {
        let input = EstimateInput {
            dependents: 0,
            children: 45,
            ..EstimateInput::default()
        }
        .sanitized();

        assert_eq!(input.dependents, 1);
        assert_eq!(input.children, 20);
    }

    #[test]
    fn sanitized_leaves_valid_input_untouched() {
        let input = EstimateInput::default();

        assert_eq!(input.clone().sanitized(), input);
    }

    #[test]
    fn insurance_monthly_sums_contributions() {
        let result = EstimateResult {
            pension_monthly: dec!(100),
            health_monthly: dec!(50),
            long_term_care_monthly: dec!(5),
            employment_monthly: dec!(10),
            ..EstimateResult::default()
        };

        assert_eq!(result.insurance_monthly(), dec!(165));
    }
}
