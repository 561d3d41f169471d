//! Late-filing, late-payment, and under-declaration penalties, plus
//! interest accrual on overdue amounts.
//!
//! Interest is simple daily-rate interest, `principal × rate × days / 365`:
//! a full year at the statutory rate yields exactly one year's interest.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use sltax_core::{PenaltyInterestCalculator, PenaltyType, RateTable};
//!
//! let rates = RateTable::finance_act_2025();
//! let calculator = PenaltyInterestCalculator::new(&rates);
//!
//! // 45 days late falls in the 31–60 day tier: 10%.
//! let penalty = calculator
//!     .calculate_penalty(dec!(1000000), 45, PenaltyType::LatePayment)
//!     .unwrap();
//! assert_eq!(penalty, dec!(100000.00));
//!
//! // One full year of simple interest at 15%.
//! let interest = calculator
//!     .calculate_interest(dec!(1000000), 365, dec!(0.15))
//!     .unwrap();
//! assert_eq!(interest, dec!(150000.00));
//! ```

use rust_decimal::Decimal;

use crate::calculations::CalculationError;
use crate::calculations::common::{max, round_half_up};
use crate::models::{PenaltyType, RateTable};

const DAYS_PER_YEAR: Decimal = Decimal::from_parts(365, 0, 0, false, 0);

/// Penalty and interest formulas over a validated rate table.
#[derive(Debug, Clone)]
pub struct PenaltyInterestCalculator<'a> {
    rates: &'a RateTable,
}

impl<'a> PenaltyInterestCalculator<'a> {
    pub fn new(rates: &'a RateTable) -> Self {
        Self { rates }
    }

    /// Penalty on `tax_amount` for the given breach.
    ///
    /// - Late filing: nothing at zero days late; otherwise the greater of
    ///   the filing penalty rate and the flat minimum, regardless of how
    ///   late the filing is.
    /// - Late payment: tiered by days late (1–30, 31–60, above 60); nothing
    ///   at zero days late.
    /// - Under-declaration: flat rate, independent of lateness.
    pub fn calculate_penalty(
        &self,
        tax_amount: Decimal,
        days_late: u32,
        penalty_type: PenaltyType,
    ) -> Result<Decimal, CalculationError> {
        if tax_amount < Decimal::ZERO {
            return Err(CalculationError::NegativeAmount {
                field: "tax_amount",
                value: tax_amount,
            });
        }

        let penalty = match penalty_type {
            PenaltyType::LateFiling => {
                if days_late == 0 {
                    Decimal::ZERO
                } else {
                    max(
                        tax_amount * self.rates.late_filing_rate,
                        self.rates.late_filing_minimum,
                    )
                }
            }
            PenaltyType::LatePayment => {
                let rate = match days_late {
                    0 => Decimal::ZERO,
                    1..=30 => self.rates.late_payment_tier1_rate,
                    31..=60 => self.rates.late_payment_tier2_rate,
                    _ => self.rates.late_payment_tier3_rate,
                };
                tax_amount * rate
            }
            PenaltyType::UnderDeclaration => tax_amount * self.rates.under_declaration_rate,
        };

        Ok(round_half_up(penalty))
    }

    /// Simple interest accrued on `principal` over `days_late` days at an
    /// annual rate.
    pub fn calculate_interest(
        &self,
        principal: Decimal,
        days_late: u32,
        annual_rate: Decimal,
    ) -> Result<Decimal, CalculationError> {
        if principal < Decimal::ZERO {
            return Err(CalculationError::NegativeAmount {
                field: "principal",
                value: principal,
            });
        }
        if annual_rate < Decimal::ZERO {
            return Err(CalculationError::NegativeAmount {
                field: "annual_rate",
                value: annual_rate,
            });
        }

        // Multiply before dividing so exact cases (whole years) stay exact.
        let interest = principal * annual_rate * Decimal::from(days_late) / DAYS_PER_YEAR;
        Ok(round_half_up(interest))
    }

    /// Interest at the table's statutory annual rate.
    pub fn calculate_statutory_interest(
        &self,
        principal: Decimal,
        days_late: u32,
    ) -> Result<Decimal, CalculationError> {
        self.calculate_interest(principal, days_late, self.rates.annual_interest_rate)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn rates() -> RateTable {
        RateTable::finance_act_2025()
    }

    // ── late filing ──────────────────────────────────────────────────────

    #[test]
    fn late_filing_zero_days_no_penalty() {
        let rates = rates();
        let calculator = PenaltyInterestCalculator::new(&rates);

        let result = calculator.calculate_penalty(dec!(1000000), 0, PenaltyType::LateFiling);

        assert_eq!(result, Ok(dec!(0.00)));
    }

    #[test]
    fn late_filing_five_percent_when_above_floor() {
        let rates = rates();
        let calculator = PenaltyInterestCalculator::new(&rates);

        // 5% of 2,000,000 = 100,000, above the 50,000 floor.
        let result = calculator.calculate_penalty(dec!(2000000), 10, PenaltyType::LateFiling);

        assert_eq!(result, Ok(dec!(100000.00)));
    }

    #[test]
    fn late_filing_floor_applies_to_small_amounts() {
        let rates = rates();
        let calculator = PenaltyInterestCalculator::new(&rates);

        // 5% of 100,000 = 5,000; the 50,000 floor wins.
        let result = calculator.calculate_penalty(dec!(100000), 1, PenaltyType::LateFiling);

        assert_eq!(result, Ok(dec!(50000.00)));
    }

    #[test]
    fn late_filing_flat_regardless_of_days() {
        let rates = rates();
        let calculator = PenaltyInterestCalculator::new(&rates);

        let at_one_day = calculator.calculate_penalty(dec!(2000000), 1, PenaltyType::LateFiling);
        let at_one_year = calculator.calculate_penalty(dec!(2000000), 365, PenaltyType::LateFiling);

        assert_eq!(at_one_day, at_one_year);
    }

    // ── late payment ─────────────────────────────────────────────────────

    #[test]
    fn late_payment_zero_days_no_penalty() {
        let rates = rates();
        let calculator = PenaltyInterestCalculator::new(&rates);

        let result = calculator.calculate_penalty(dec!(1000000), 0, PenaltyType::LatePayment);

        assert_eq!(result, Ok(dec!(0.00)));
    }

    #[test]
    fn late_payment_tier_boundaries() {
        let rates = rates();
        let calculator = PenaltyInterestCalculator::new(&rates);
        let amount = dec!(1000000);

        let cases = [
            (1, dec!(50000.00)),
            (30, dec!(50000.00)),
            (31, dec!(100000.00)),
            (45, dec!(100000.00)),
            (60, dec!(100000.00)),
            (61, dec!(150000.00)),
            (365, dec!(150000.00)),
        ];
        for (days_late, expected) in cases {
            let result = calculator.calculate_penalty(amount, days_late, PenaltyType::LatePayment);

            assert_eq!(result, Ok(expected), "{days_late} days late");
        }
    }

    // ── under-declaration ────────────────────────────────────────────────

    #[test]
    fn under_declaration_flat_twenty_percent() {
        let rates = rates();
        let calculator = PenaltyInterestCalculator::new(&rates);

        let not_late = calculator.calculate_penalty(dec!(1000000), 0, PenaltyType::UnderDeclaration);
        let late = calculator.calculate_penalty(dec!(1000000), 90, PenaltyType::UnderDeclaration);

        assert_eq!(not_late, Ok(dec!(200000.00)));
        assert_eq!(late, Ok(dec!(200000.00)));
    }

    // ── interest ─────────────────────────────────────────────────────────

    #[test]
    fn interest_full_year_is_annual_rate() {
        let rates = rates();
        let calculator = PenaltyInterestCalculator::new(&rates);

        let result = calculator.calculate_interest(dec!(1000000), 365, dec!(0.15));

        assert_eq!(result, Ok(dec!(150000.00)));
    }

    #[test]
    fn interest_thirty_days() {
        let rates = rates();
        let calculator = PenaltyInterestCalculator::new(&rates);

        // 1,000,000 × 0.15 × 30 / 365 = 12,328.767…, rounded half-up.
        let result = calculator.calculate_interest(dec!(1000000), 30, dec!(0.15));

        assert_eq!(result, Ok(dec!(12328.77)));
    }

    #[test]
    fn interest_zero_days_is_zero() {
        let rates = rates();
        let calculator = PenaltyInterestCalculator::new(&rates);

        let result = calculator.calculate_interest(dec!(1000000), 0, dec!(0.15));

        assert_eq!(result, Ok(dec!(0.00)));
    }

    #[test]
    fn interest_is_linear_in_days() {
        // Simple, not compound: doubling the days doubles the interest.
        // 73 and 146 days divide 365 exactly, so no rounding noise.
        let rates = rates();
        let calculator = PenaltyInterestCalculator::new(&rates);

        let one = calculator
            .calculate_interest(dec!(1000000), 73, dec!(0.15))
            .unwrap();
        let two = calculator
            .calculate_interest(dec!(1000000), 146, dec!(0.15))
            .unwrap();

        assert_eq!(one, dec!(30000.00));
        assert_eq!(two, one * dec!(2));
    }

    #[test]
    fn statutory_interest_uses_table_rate() {
        let mut rates = rates();
        rates.annual_interest_rate = dec!(0.20);
        let calculator = PenaltyInterestCalculator::new(&rates);

        let result = calculator.calculate_statutory_interest(dec!(1000000), 365);

        assert_eq!(result, Ok(dec!(200000.00)));
    }

    // ── preconditions ────────────────────────────────────────────────────

    #[test]
    fn negative_inputs_rejected() {
        let rates = rates();
        let calculator = PenaltyInterestCalculator::new(&rates);

        assert_eq!(
            calculator.calculate_penalty(dec!(-1), 10, PenaltyType::LatePayment),
            Err(CalculationError::NegativeAmount {
                field: "tax_amount",
                value: dec!(-1),
            })
        );
        assert_eq!(
            calculator.calculate_interest(dec!(-1), 10, dec!(0.15)),
            Err(CalculationError::NegativeAmount {
                field: "principal",
                value: dec!(-1),
            })
        );
        assert_eq!(
            calculator.calculate_interest(dec!(100), 10, dec!(-0.15)),
            Err(CalculationError::NegativeAmount {
                field: "annual_rate",
                value: dec!(-0.15),
            })
        );
    }
}
