//! Total tax liability aggregation.
//!
//! The aggregator is what application services call: it picks the right base
//! calculator for the filing's tax type, applies the turnover-based minimum
//! tax floor, and adds late-payment penalty and statutory interest when the
//! filing is past its due date.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use sltax_core::{
//!     LiabilityCalculator, LiabilityInput, RateTable, TaxType, TaxpayerCategory,
//! };
//!
//! let rates = RateTable::finance_act_2025();
//! let calculator = LiabilityCalculator::new(&rates);
//!
//! let result = calculator
//!     .calculate(&LiabilityInput {
//!         taxable_amount: dec!(1000000),
//!         tax_type: TaxType::IncomeTax,
//!         withholding_type: None,
//!         category: TaxpayerCategory::Large,
//!         is_individual: false,
//!         annual_turnover: dec!(0),
//!         due_date: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
//!         evaluation_date: NaiveDate::from_ymd_opt(2025, 5, 15).unwrap(),
//!     })
//!     .unwrap();
//!
//! assert_eq!(result.base_tax, dec!(250000.00));
//! // 45 days late: 31–60 day tier, 10%.
//! assert_eq!(result.penalty, dec!(25000.00));
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::CalculationError;
use crate::calculations::flat_taxes::{FlatTaxCalculator, applicable_tax};
use crate::calculations::income_tax::IncomeTaxCalculator;
use crate::calculations::penalty_interest::PenaltyInterestCalculator;
use crate::models::{PenaltyType, RateTable, TaxLiabilityResult, TaxType, TaxpayerCategory, WithholdingTaxType};

/// Inputs for one total-liability calculation.
///
/// `evaluation_date` is explicit rather than read from a clock so the same
/// input always produces the same result; callers pass today's date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiabilityInput {
    /// Taxable income, supply amount, gross salary, or payment amount,
    /// depending on `tax_type`.
    pub taxable_amount: Decimal,

    /// Tax head the filing is under; selects the base calculator.
    pub tax_type: TaxType,

    /// Required when `tax_type` is [`TaxType::WithholdingTax`]; ignored
    /// otherwise.
    pub withholding_type: Option<WithholdingTaxType>,

    /// Taxpayer size classification.
    pub category: TaxpayerCategory,

    /// Individual vs corporate income tax path.
    pub is_individual: bool,

    /// Annual turnover; when positive, the minimum-tax floor applies.
    pub annual_turnover: Decimal,

    /// Statutory due date of the filing.
    pub due_date: NaiveDate,

    /// Date the liability is evaluated at, usually today.
    pub evaluation_date: NaiveDate,
}

/// Root calculator combining base tax, minimum-tax floor, penalty, and
/// interest into a single [`TaxLiabilityResult`].
#[derive(Debug, Clone)]
pub struct LiabilityCalculator<'a> {
    rates: &'a RateTable,
}

impl<'a> LiabilityCalculator<'a> {
    pub fn new(rates: &'a RateTable) -> Self {
        Self { rates }
    }

    /// Calculates the total liability for one filing.
    ///
    /// Steps: base tax for the tax type, minimum-tax override when a
    /// turnover is supplied, then late-payment penalty and statutory
    /// interest on the effective base when the filing is past due.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError`] on negative amounts or a missing
    /// withholding sub-type; there are no partial results.
    pub fn calculate(
        &self,
        input: &LiabilityInput,
    ) -> Result<TaxLiabilityResult, CalculationError> {
        if input.annual_turnover < Decimal::ZERO {
            return Err(CalculationError::NegativeAmount {
                field: "annual_turnover",
                value: input.annual_turnover,
            });
        }

        let base_tax = self.base_tax(input)?;

        let flat = FlatTaxCalculator::new(self.rates);
        let minimum_tax = if input.annual_turnover > Decimal::ZERO {
            Some(flat.calculate_minimum_tax(input.annual_turnover)?)
        } else {
            None
        };
        let effective_base = match minimum_tax {
            Some(minimum) => applicable_tax(base_tax, minimum),
            None => base_tax,
        };

        let days_late = days_late(input.due_date, input.evaluation_date);
        let (penalty, interest) = if days_late == 0 {
            (Decimal::ZERO, Decimal::ZERO)
        } else {
            let penalties = PenaltyInterestCalculator::new(self.rates);
            (
                penalties.calculate_penalty(effective_base, days_late, PenaltyType::LatePayment)?,
                penalties.calculate_statutory_interest(effective_base, days_late)?,
            )
        };

        Ok(TaxLiabilityResult {
            base_tax,
            minimum_tax,
            penalty,
            interest,
            total_tax_liability: effective_base + penalty + interest,
        })
    }

    fn base_tax(
        &self,
        input: &LiabilityInput,
    ) -> Result<Decimal, CalculationError> {
        let flat = FlatTaxCalculator::new(self.rates);
        match input.tax_type {
            TaxType::IncomeTax => IncomeTaxCalculator::new(self.rates).calculate(
                input.taxable_amount,
                input.category,
                input.is_individual,
            ),
            TaxType::Gst => flat.calculate_gst(input.taxable_amount, None),
            TaxType::Paye => flat.calculate_paye(input.taxable_amount),
            TaxType::WithholdingTax => {
                let withholding_type = input
                    .withholding_type
                    .ok_or(CalculationError::MissingWithholdingType)?;
                flat.calculate_withholding(input.taxable_amount, withholding_type)
            }
            TaxType::ExciseDuty => flat.calculate_excise(input.taxable_amount),
        }
    }
}

/// Whole days between due date and evaluation date, floored at zero.
fn days_late(
    due_date: NaiveDate,
    evaluation_date: NaiveDate,
) -> u32 {
    (evaluation_date - due_date).num_days().max(0) as u32
}
