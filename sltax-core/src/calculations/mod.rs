//! Tax calculation modules for the Sierra Leone Finance Act.
//!
//! Each calculator borrows a validated [`crate::RateTable`] and is pure:
//! same table, same inputs, same result, with no shared state between calls.

pub mod common;
pub mod flat_taxes;
pub mod income_tax;
pub mod liability;
pub mod penalty_interest;

pub use flat_taxes::{FlatTaxCalculator, applicable_tax};
pub use income_tax::IncomeTaxCalculator;
pub use liability::{LiabilityCalculator, LiabilityInput};
pub use penalty_interest::PenaltyInterestCalculator;

use rust_decimal::Decimal;
use thiserror::Error;

/// Caller contract violations.
///
/// Monetary inputs originate from validated upstream data, so a negative
/// amount here is a data-integrity bug to surface, never a condition to
/// clamp away.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculationError {
    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    #[error("withholding tax requires a withholding sub-type")]
    MissingWithholdingType,
}
