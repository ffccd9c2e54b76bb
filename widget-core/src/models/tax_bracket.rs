use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single progressive-tax tier.
///
/// `upper_bound` is inclusive. `None` marks the unbounded catch-all tier that
/// must close every table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
    pub deduction: Decimal,
}

impl TaxBracket {
    /// Creates a bounded bracket.
    pub fn bounded(
        upper_bound: Decimal,
        rate: Decimal,
        deduction: Decimal,
    ) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            rate,
            deduction,
        }
    }

    /// Creates the unbounded closing bracket.
    pub fn unbounded(
        rate: Decimal,
        deduction: Decimal,
    ) -> Self {
        Self {
            upper_bound: None,
            rate,
            deduction,
        }
    }

    /// Whether `amount` falls at or below this bracket's upper bound.
    pub fn covers(
        &self,
        amount: Decimal,
    ) -> bool {
        self.upper_bound.is_none_or(|bound| amount <= bound)
    }

    /// `amount × rate − deduction`, floored at zero.
    pub fn tax_for(
        &self,
        amount: Decimal,
    ) -> Decimal {
        (amount * self.rate - self.deduction).max(Decimal::ZERO)
    }
}

/// Errors raised when a bracket table violates its shape invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketTableError {
    #[error("bracket table is empty")]
    Empty,

    #[error("bracket {index} upper bound {bound} does not exceed the previous bound {previous}")]
    NotIncreasing {
        index: usize,
        bound: Decimal,
        previous: Decimal,
    },

    #[error("last bracket must be unbounded")]
    MissingSentinel,

    #[error("bracket {0} follows the unbounded bracket")]
    BoundAfterSentinel(usize),

    #[error("bracket {index} has a negative rate or deduction")]
    Negative { index: usize },
}

/// An ordered, validated sequence of [`TaxBracket`]s.
///
/// Bounds strictly increase and the last bracket is unbounded, so every
/// non-negative amount maps to exactly one bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxBracketTable {
    brackets: Vec<TaxBracket>,
}

impl TaxBracketTable {
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, BracketTableError> {
        if brackets.is_empty() {
            return Err(BracketTableError::Empty);
        }

        let mut previous: Option<Decimal> = None;
        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.deduction < Decimal::ZERO {
                return Err(BracketTableError::Negative { index });
            }

            match bracket.upper_bound {
                Some(bound) => {
                    if let Some(prev) = previous {
                        if bound <= prev {
                            return Err(BracketTableError::NotIncreasing {
                                index,
                                bound,
                                previous: prev,
                            });
                        }
                    }
                    previous = Some(bound);
                }
                None if index + 1 != brackets.len() => {
                    return Err(BracketTableError::BoundAfterSentinel(index + 1));
                }
                None => {}
            }
        }

        if brackets.last().is_some_and(|b| b.upper_bound.is_some()) {
            return Err(BracketTableError::MissingSentinel);
        }

        Ok(Self { brackets })
    }

    /// Wraps built-in tables whose shape is covered by tests.
    pub(crate) fn from_trusted(brackets: Vec<TaxBracket>) -> Self {
        debug_assert!(Self::new(brackets.clone()).is_ok());
        Self { brackets }
    }

    /// Returns the first bracket whose upper bound is at or above `amount`.
    pub fn lookup(
        &self,
        amount: Decimal,
    ) -> &TaxBracket {
        // The closing bracket is unbounded, so `find` only misses on an
        // impossible table; fall back to it anyway.
        self.brackets
            .iter()
            .find(|b| b.covers(amount))
            .unwrap_or_else(|| self.sentinel())
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }

    fn sentinel(&self) -> &TaxBracket {
        &self.brackets[self.brackets.len() - 1]
    }
}

impl<'de> Deserialize<'de> for TaxBracketTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let brackets = Vec::<TaxBracket>::deserialize(deserializer)?;
        TaxBracketTable::new(brackets).map_err(serde::de::Error::custom)
    }
}
