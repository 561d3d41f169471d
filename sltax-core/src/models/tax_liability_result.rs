use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Final output of a total-liability calculation.
///
/// Invariant: `total_tax_liability == max(base_tax, minimum_tax or base_tax)
/// + penalty + interest`, and every field is non-negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxLiabilityResult {
    /// Tax computed for the filing's tax type before any floor is applied.
    pub base_tax: Decimal,

    /// Turnover-based minimum tax, when an annual turnover was supplied.
    pub minimum_tax: Option<Decimal>,

    /// Late-payment penalty; zero when the filing is not late.
    pub penalty: Decimal,

    /// Accrued simple interest; zero when the filing is not late.
    pub interest: Decimal,

    /// Effective base plus penalty and interest.
    pub total_tax_liability: Decimal,
}

impl TaxLiabilityResult {
    /// The base the penalty and interest were charged on: the higher of the
    /// calculated tax and the minimum tax.
    pub fn effective_base(&self) -> Decimal {
        match self.minimum_tax {
            Some(minimum) if minimum > self.base_tax => minimum,
            _ => self.base_tax,
        }
    }
}
