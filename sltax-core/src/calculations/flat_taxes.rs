//! Flat-rate taxes: GST, withholding at source, PAYE, minimum tax.
//!
//! PAYE is not actually flat — it shares the personal progressive bracket
//! schedule with income tax by design — but it lives here because callers
//! treat it as one more per-payment deduction.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use sltax_core::{FlatTaxCalculator, RateTable, WithholdingTaxType, applicable_tax};
//!
//! let rates = RateTable::finance_act_2025();
//! let calculator = FlatTaxCalculator::new(&rates);
//!
//! assert_eq!(calculator.calculate_gst(dec!(1000000), None).unwrap(), dec!(150000.00));
//! assert_eq!(calculator.calculate_gst(dec!(1000000), Some("exempt")).unwrap(), dec!(0));
//! assert_eq!(
//!     calculator.calculate_withholding(dec!(1000000), WithholdingTaxType::Rent).unwrap(),
//!     dec!(100000.00)
//! );
//! assert_eq!(applicable_tax(dec!(40000), dec!(50000)), dec!(50000));
//! ```

use rust_decimal::Decimal;

use crate::calculations::CalculationError;
use crate::calculations::common::{max, round_half_up};
use crate::calculations::income_tax::IncomeTaxCalculator;
use crate::models::{RateTable, WithholdingTaxType};

/// The statutory "higher of" rule: the taxpayer owes the larger of the
/// calculated income tax and the turnover-based minimum tax.
pub fn applicable_tax(
    calculated_tax: Decimal,
    minimum_tax: Decimal,
) -> Decimal {
    max(calculated_tax, minimum_tax)
}

/// GST, withholding, PAYE, excise, and minimum tax over one rate table.
#[derive(Debug, Clone)]
pub struct FlatTaxCalculator<'a> {
    rates: &'a RateTable,
}

impl<'a> FlatTaxCalculator<'a> {
    pub fn new(rates: &'a RateTable) -> Self {
        Self { rates }
    }

    /// GST on a supply amount.
    ///
    /// An `exemption_code` matching the table's configured code
    /// (case-insensitive) short-circuits to zero.
    pub fn calculate_gst(
        &self,
        amount: Decimal,
        exemption_code: Option<&str>,
    ) -> Result<Decimal, CalculationError> {
        self.require_non_negative("amount", amount)?;

        if exemption_code
            .is_some_and(|code| code.eq_ignore_ascii_case(&self.rates.gst_exemption_code))
        {
            return Ok(Decimal::ZERO);
        }

        Ok(round_half_up(amount * self.rates.gst_rate))
    }

    /// Withholding tax deducted at source for a payment category.
    pub fn calculate_withholding(
        &self,
        amount: Decimal,
        withholding_type: WithholdingTaxType,
    ) -> Result<Decimal, CalculationError> {
        self.require_non_negative("amount", amount)?;

        Ok(round_half_up(
            amount * self.rates.withholding_rate(withholding_type),
        ))
    }

    /// PAYE on a gross salary, via the personal progressive schedule.
    pub fn calculate_paye(
        &self,
        gross_salary: Decimal,
    ) -> Result<Decimal, CalculationError> {
        self.require_non_negative("gross_salary", gross_salary)?;

        Ok(IncomeTaxCalculator::new(self.rates).progressive_tax(gross_salary))
    }

    /// Excise duty on a dutiable amount.
    pub fn calculate_excise(
        &self,
        amount: Decimal,
    ) -> Result<Decimal, CalculationError> {
        self.require_non_negative("amount", amount)?;

        Ok(round_half_up(amount * self.rates.excise_rate))
    }

    /// Turnover-based minimum tax floor.
    pub fn calculate_minimum_tax(
        &self,
        annual_turnover: Decimal,
    ) -> Result<Decimal, CalculationError> {
        self.require_non_negative("annual_turnover", annual_turnover)?;

        Ok(round_half_up(annual_turnover * self.rates.minimum_tax_rate))
    }

    fn require_non_negative(
        &self,
        field: &'static str,
        value: Decimal,
    ) -> Result<(), CalculationError> {
        if value < Decimal::ZERO {
            return Err(CalculationError::NegativeAmount { field, value });
        }
        Ok(())
    }
}
