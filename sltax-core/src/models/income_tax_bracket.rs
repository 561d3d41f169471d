use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::rate_table::RateTableError;

/// One band of the progressive personal income tax schedule.
///
/// `upper` of `None` marks the final, unbounded band. A bracket table is
/// ordered ascending and contiguous; see [`validate_brackets`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxBracket {
    pub lower: Decimal,
    pub upper: Option<Decimal>,
    pub rate: Decimal,
}

/// Validates a progressive bracket table.
///
/// A valid table:
/// - is non-empty and starts at a lower bound of zero,
/// - is contiguous (each bracket's lower bound equals the prior upper bound),
/// - has every bounded bracket's upper bound above its lower bound,
/// - is unbounded only in its final bracket,
/// - has non-negative, non-decreasing rates (progressive).
///
/// Called when a [`crate::RateTable`] is constructed or loaded; a broken
/// table is a fatal configuration error, never a per-calculation one.
pub fn validate_brackets(brackets: &[IncomeTaxBracket]) -> Result<(), RateTableError> {
    let first = brackets.first().ok_or(RateTableError::EmptyBrackets)?;
    if first.lower != Decimal::ZERO {
        return Err(RateTableError::FirstBracketNotZero { lower: first.lower });
    }

    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.rate < Decimal::ZERO {
            return Err(RateTableError::NegativeRate {
                index,
                rate: bracket.rate,
            });
        }

        if index > 0 && bracket.rate < brackets[index - 1].rate {
            return Err(RateTableError::DecreasingRate {
                index,
                rate: bracket.rate,
            });
        }

        let is_last = index == brackets.len() - 1;
        match bracket.upper {
            Some(upper) if upper <= bracket.lower => {
                return Err(RateTableError::UpperNotAboveLower { index, upper });
            }
            Some(upper) => {
                if !is_last && brackets[index + 1].lower != upper {
                    return Err(RateTableError::NotContiguous {
                        index: index + 1,
                        expected: upper,
                        found: brackets[index + 1].lower,
                    });
                }
            }
            None if !is_last => {
                return Err(RateTableError::NonFinalUnbounded { index });
            }
            None => {}
        }
    }

    if brackets[brackets.len() - 1].upper.is_some() {
        return Err(RateTableError::BoundedFinalBracket);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn bracket(
        lower: Decimal,
        upper: Option<Decimal>,
        rate: Decimal,
    ) -> IncomeTaxBracket {
        IncomeTaxBracket { lower, upper, rate }
    }

    fn valid_table() -> Vec<IncomeTaxBracket> {
        vec![
            bracket(dec!(0), Some(dec!(600000)), dec!(0)),
            bracket(dec!(600000), Some(dec!(1200000)), dec!(0.15)),
            bracket(dec!(1200000), None, dec!(0.30)),
        ]
    }

    #[test]
    fn valid_table_passes() {
        assert_eq!(validate_brackets(&valid_table()), Ok(()));
    }

    #[test]
    fn empty_table_rejected() {
        assert_eq!(validate_brackets(&[]), Err(RateTableError::EmptyBrackets));
    }

    #[test]
    fn nonzero_first_lower_rejected() {
        let mut table = valid_table();
        table[0].lower = dec!(100);

        assert_eq!(
            validate_brackets(&table),
            Err(RateTableError::FirstBracketNotZero { lower: dec!(100) })
        );
    }

    #[test]
    fn gap_between_brackets_rejected() {
        let mut table = valid_table();
        table[1].lower = dec!(700000);

        assert_eq!(
            validate_brackets(&table),
            Err(RateTableError::NotContiguous {
                index: 1,
                expected: dec!(600000),
                found: dec!(700000),
            })
        );
    }

    #[test]
    fn bounded_final_bracket_rejected() {
        let mut table = valid_table();
        table[2].upper = Some(dec!(2000000));

        assert_eq!(
            validate_brackets(&table),
            Err(RateTableError::BoundedFinalBracket)
        );
    }

    #[test]
    fn unbounded_middle_bracket_rejected() {
        let mut table = valid_table();
        table[1].upper = None;

        assert_eq!(
            validate_brackets(&table),
            Err(RateTableError::NonFinalUnbounded { index: 1 })
        );
    }

    #[test]
    fn inverted_bracket_rejected() {
        let mut table = valid_table();
        table[1].upper = Some(dec!(500000));

        assert_eq!(
            validate_brackets(&table),
            Err(RateTableError::UpperNotAboveLower {
                index: 1,
                upper: dec!(500000),
            })
        );
    }

    #[test]
    fn regressive_rates_rejected() {
        let mut table = valid_table();
        table[2].rate = dec!(0.10);

        assert_eq!(
            validate_brackets(&table),
            Err(RateTableError::DecreasingRate {
                index: 2,
                rate: dec!(0.10),
            })
        );
    }

    #[test]
    fn negative_rate_rejected() {
        let mut table = valid_table();
        table[0].rate = dec!(-0.05);

        assert_eq!(
            validate_brackets(&table),
            Err(RateTableError::NegativeRate {
                index: 0,
                rate: dec!(-0.05),
            })
        );
    }
}
