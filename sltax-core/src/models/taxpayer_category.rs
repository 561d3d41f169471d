use serde::{Deserialize, Serialize};

/// Firm-assigned size classification of a taxpayer.
///
/// The category is threaded through the income tax and liability paths so
/// that category-specific thresholds can be applied where the Finance Act
/// differentiates them. The corporate income tax rate does not vary by
/// category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxpayerCategory {
    Large,
    Medium,
    Small,
    Micro,
}

impl TaxpayerCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Large => "L",
            Self::Medium => "M",
            Self::Small => "S",
            Self::Micro => "X",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "L" => Some(Self::Large),
            "M" => Some(Self::Medium),
            "S" => Some(Self::Small),
            "X" => Some(Self::Micro),
            _ => None,
        }
    }
}
