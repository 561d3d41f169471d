//! Corporate and personal income tax.
//!
//! Corporate income is taxed at a single flat rate. Individual income runs
//! through the progressive bracket schedule: each bracket taxes only the
//! portion of income falling inside it, and an income exactly on a boundary
//! is taxed entirely at the bracket that boundary closes.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use sltax_core::{IncomeTaxCalculator, RateTable, TaxpayerCategory};
//!
//! let rates = RateTable::finance_act_2025();
//! let calculator = IncomeTaxCalculator::new(&rates);
//!
//! // Corporate: flat 25%.
//! let corporate = calculator
//!     .calculate(dec!(1000000), TaxpayerCategory::Large, false)
//!     .unwrap();
//! assert_eq!(corporate, dec!(250000.00));
//!
//! // Individual: 0 on the first 600,000, 15% on the next 600,000,
//! // 20% on the next 600,000.
//! let individual = calculator
//!     .calculate(dec!(1800000), TaxpayerCategory::Large, true)
//!     .unwrap();
//! assert_eq!(individual, dec!(210000.00));
//! ```

use rust_decimal::Decimal;

use crate::calculations::CalculationError;
use crate::calculations::common::round_half_up;
use crate::models::{RateTable, TaxpayerCategory};

/// Income tax over a validated rate table.
#[derive(Debug, Clone)]
pub struct IncomeTaxCalculator<'a> {
    rates: &'a RateTable,
}

impl<'a> IncomeTaxCalculator<'a> {
    pub fn new(rates: &'a RateTable) -> Self {
        Self { rates }
    }

    /// Income tax on `taxable_income`.
    ///
    /// The taxpayer category is accepted for API stability but does not
    /// differentiate the corporate rate under the current Finance Act.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::NegativeAmount`] for negative income.
    pub fn calculate(
        &self,
        taxable_income: Decimal,
        _category: TaxpayerCategory,
        is_individual: bool,
    ) -> Result<Decimal, CalculationError> {
        if taxable_income < Decimal::ZERO {
            return Err(CalculationError::NegativeAmount {
                field: "taxable_income",
                value: taxable_income,
            });
        }

        if is_individual {
            Ok(self.progressive_tax(taxable_income))
        } else {
            Ok(round_half_up(taxable_income * self.rates.corporate_rate))
        }
    }

    /// Marginal tax across the progressive bracket schedule.
    ///
    /// The table is validated at load time (contiguous, ascending, final
    /// bracket unbounded), so a plain left-to-right sweep covers all income.
    pub(crate) fn progressive_tax(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        let mut tax = Decimal::ZERO;

        for bracket in &self.rates.brackets {
            if taxable_income <= bracket.lower {
                break;
            }

            let top = match bracket.upper {
                Some(upper) => upper.min(taxable_income),
                None => taxable_income,
            };
            tax += (top - bracket.lower) * bracket.rate;
        }

        round_half_up(tax)
    }
}
