pub mod calculations;
pub mod models;
pub mod settings;

pub use calculations::{
    CalculationError, FlatTaxCalculator, IncomeTaxCalculator, LiabilityCalculator, LiabilityInput,
    PenaltyInterestCalculator, applicable_tax,
};
pub use models::*;
pub use settings::{SettingsError, SettingsProvider};
