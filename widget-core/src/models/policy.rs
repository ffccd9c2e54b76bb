use serde::{Deserialize, Serialize};

use crate::calculations::{PayrollEstimator, TaxEstimationStrategy};
use crate::models::{RateTable, TaxBracketTable};

/// One complete calculator variant: rates, brackets at the scale the
/// strategy expects, and the strategy itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPolicy {
    pub name: String,
    pub year: i32,
    pub rates: RateTable,
    pub brackets: TaxBracketTable,
    pub strategy: TaxEstimationStrategy,
}

impl PayrollPolicy {
    /// Borrows this policy as an estimator.
    pub fn estimator(&self) -> PayrollEstimator<'_> {
        PayrollEstimator::new(&self.rates, &self.brackets, self.strategy)
    }
}
