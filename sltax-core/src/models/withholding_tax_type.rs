use serde::{Deserialize, Serialize};

/// Payment category a withholding deduction at source applies to.
/// Each variant maps to its own statutory rate in the [`crate::RateTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WithholdingTaxType {
    Dividends,
    ManagementFees,
    ProfessionalFees,
    Rent,
    Commissions,
}

impl WithholdingTaxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dividends => "DIV",
            Self::ManagementFees => "MGT",
            Self::ProfessionalFees => "PRO",
            Self::Rent => "RENT",
            Self::Commissions => "COM",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "DIV" => Some(Self::Dividends),
            "MGT" => Some(Self::ManagementFees),
            "PRO" => Some(Self::ProfessionalFees),
            "RENT" => Some(Self::Rent),
            "COM" => Some(Self::Commissions),
            _ => None,
        }
    }
}
