use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a statutory rate falls outside `[0, 1]`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateTableError {
    #[error("{name} rate must be between 0 and 1, got {value}")]
    OutOfRange { name: &'static str, value: Decimal },
}

/// Statutory social-insurance contribution rates for one policy year.
///
/// `long_term_care_on_health` is applied to the health contribution, not to
/// the taxable base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    pub pension: Decimal,
    pub health: Decimal,
    pub long_term_care_on_health: Decimal,
    pub employment: Decimal,
}

impl RateTable {
    /// Validates that every rate is a fraction in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`RateTableError::OutOfRange`] naming the first offending rate.
    pub fn validate(&self) -> Result<(), RateTableError> {
        let rates = [
            ("pension", self.pension),
            ("health", self.health),
            ("long-term care", self.long_term_care_on_health),
            ("employment", self.employment),
        ];

        for (name, value) in rates {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(RateTableError::OutOfRange { name, value });
            }
        }

        Ok(())
    }
}
