use serde::{Deserialize, Serialize};

/// Tax head a filing relates to. Selects which calculator applies when
/// aggregating a total liability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxType {
    IncomeTax,
    Gst,
    Paye,
    WithholdingTax,
    ExciseDuty,
}

impl TaxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IncomeTax => "IT",
            Self::Gst => "GST",
            Self::Paye => "PAYE",
            Self::WithholdingTax => "WHT",
            Self::ExciseDuty => "ED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "IT" => Some(Self::IncomeTax),
            "GST" => Some(Self::Gst),
            "PAYE" => Some(Self::Paye),
            "WHT" => Some(Self::WithholdingTax),
            "ED" => Some(Self::ExciseDuty),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn codes_round_trip() {
        for tax_type in [
            TaxType::IncomeTax,
            TaxType::Gst,
            TaxType::Paye,
            TaxType::WithholdingTax,
            TaxType::ExciseDuty,
        ] {
            assert_eq!(TaxType::parse(tax_type.as_str()), Some(tax_type));
        }
    }

    #[test]
    fn unknown_code_is_none() {
        assert_eq!(TaxType::parse("VAT"), None);
        assert_eq!(TaxType::parse("gst"), None);
    }
}
