mod income_tax_bracket;
mod penalty_type;
mod rate_table;
mod tax_liability_result;
mod tax_type;
mod taxpayer_category;
mod withholding_tax_type;

pub use income_tax_bracket::{IncomeTaxBracket, validate_brackets};
pub use penalty_type::PenaltyType;
pub use rate_table::{RateTable, RateTableError, keys};
pub use tax_liability_result::TaxLiabilityResult;
pub use tax_type::TaxType;
pub use taxpayer_category::TaxpayerCategory;
pub use withholding_tax_type::WithholdingTaxType;
