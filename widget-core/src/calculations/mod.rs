//! Paycheck calculation modules.
//!
//! This module provides the payroll deduction estimator and the income tax
//! strategies it delegates to.

pub mod common;
pub mod income_tax;
pub mod payroll;

pub use income_tax::TaxEstimationStrategy;
pub use payroll::PayrollEstimator;
