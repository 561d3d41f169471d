//! Statutory rate table and its resolution against a settings provider.
//!
//! The [`RateTable`] is the single configuration value every calculator
//! borrows. It carries compiled-in Finance Act 2025 defaults; deployments
//! override individual figures through a [`SettingsProvider`]. A missing or
//! failing provider leaves the defaults in place, with a warning logged, so
//! a calculation can never fail because the settings store is down.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::income_tax_bracket::{IncomeTaxBracket, validate_brackets};
use super::withholding_tax_type::WithholdingTaxType;
use crate::settings::SettingsProvider;

/// Setting keys understood by [`RateTable::load`].
///
/// Bracket boundaries and rates resolve through indexed keys produced by
/// [`keys::bracket_upper`] and [`keys::bracket_rate`]; an override can move
/// a boundary or a rate but not change the number of brackets.
pub mod keys {
    pub const CORPORATE_RATE: &str = "income_tax.corporate_rate";
    pub const GST_STANDARD_RATE: &str = "gst.standard_rate";
    pub const GST_EXEMPTION_CODE: &str = "gst.exemption_code";
    pub const WITHHOLDING_DIVIDENDS: &str = "withholding.dividends_rate";
    pub const WITHHOLDING_MANAGEMENT_FEES: &str = "withholding.management_fees_rate";
    pub const WITHHOLDING_PROFESSIONAL_FEES: &str = "withholding.professional_fees_rate";
    pub const WITHHOLDING_RENT: &str = "withholding.rent_rate";
    pub const WITHHOLDING_COMMISSIONS: &str = "withholding.commissions_rate";
    pub const EXCISE_STANDARD_RATE: &str = "excise.standard_rate";
    pub const MINIMUM_TAX_RATE: &str = "minimum_tax.rate";
    pub const LATE_FILING_RATE: &str = "penalty.late_filing.rate";
    pub const LATE_FILING_MINIMUM: &str = "penalty.late_filing.minimum";
    pub const LATE_PAYMENT_TIER1: &str = "penalty.late_payment.tier1_rate";
    pub const LATE_PAYMENT_TIER2: &str = "penalty.late_payment.tier2_rate";
    pub const LATE_PAYMENT_TIER3: &str = "penalty.late_payment.tier3_rate";
    pub const UNDER_DECLARATION_RATE: &str = "penalty.under_declaration.rate";
    pub const INTEREST_ANNUAL_RATE: &str = "interest.annual_rate";

    pub fn bracket_upper(index: usize) -> String {
        format!("income_tax.bracket.{index}.upper")
    }

    pub fn bracket_rate(index: usize) -> String {
        format!("income_tax.bracket.{index}.rate")
    }
}

/// Configuration inconsistencies detected when a rate table is built.
///
/// These are fatal at load time: a broken table must block startup rather
/// than mis-tax every subsequent request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateTableError {
    #[error("income tax bracket table is empty")]
    EmptyBrackets,

    #[error("first income tax bracket must start at zero, found {lower}")]
    FirstBracketNotZero { lower: Decimal },

    #[error("bracket {index} is not contiguous: expected lower bound {expected}, found {found}")]
    NotContiguous {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    #[error("bracket {index} has upper bound {upper} not above its lower bound")]
    UpperNotAboveLower { index: usize, upper: Decimal },

    #[error("bracket {index} is unbounded but not the final bracket")]
    NonFinalUnbounded { index: usize },

    #[error("final income tax bracket must be unbounded")]
    BoundedFinalBracket,

    #[error("bracket {index} has decreasing rate {rate}; the schedule must be progressive")]
    DecreasingRate { index: usize, rate: Decimal },

    #[error("bracket {index} has negative rate {rate}")]
    NegativeRate { index: usize, rate: Decimal },

    #[error("setting '{key}' resolved to negative value {value}")]
    NegativeSetting { key: &'static str, value: Decimal },
}

/// Every statutory rate, threshold, and the progressive bracket schedule.
///
/// Passed by reference into each calculator, so a synthetic table can be
/// substituted in tests and a resolved table acts as an immutable snapshot
/// for the duration of one calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    pub corporate_rate: Decimal,
    pub brackets: Vec<IncomeTaxBracket>,
    pub gst_rate: Decimal,
    pub gst_exemption_code: String,
    pub withholding_dividends_rate: Decimal,
    pub withholding_management_fees_rate: Decimal,
    pub withholding_professional_fees_rate: Decimal,
    pub withholding_rent_rate: Decimal,
    pub withholding_commissions_rate: Decimal,
    pub excise_rate: Decimal,
    pub minimum_tax_rate: Decimal,
    pub late_filing_rate: Decimal,
    pub late_filing_minimum: Decimal,
    pub late_payment_tier1_rate: Decimal,
    pub late_payment_tier2_rate: Decimal,
    pub late_payment_tier3_rate: Decimal,
    pub under_declaration_rate: Decimal,
    pub annual_interest_rate: Decimal,
}

impl RateTable {
    /// Compiled-in statutory defaults per the Finance Act 2025.
    pub fn finance_act_2025() -> Self {
        Self {
            corporate_rate: Decimal::new(25, 2),
            brackets: vec![
                IncomeTaxBracket {
                    lower: Decimal::ZERO,
                    upper: Some(Decimal::from(600_000)),
                    rate: Decimal::ZERO,
                },
                IncomeTaxBracket {
                    lower: Decimal::from(600_000),
                    upper: Some(Decimal::from(1_200_000)),
                    rate: Decimal::new(15, 2),
                },
                IncomeTaxBracket {
                    lower: Decimal::from(1_200_000),
                    upper: Some(Decimal::from(1_800_000)),
                    rate: Decimal::new(20, 2),
                },
                IncomeTaxBracket {
                    lower: Decimal::from(1_800_000),
                    upper: Some(Decimal::from(2_400_000)),
                    rate: Decimal::new(25, 2),
                },
                IncomeTaxBracket {
                    lower: Decimal::from(2_400_000),
                    upper: None,
                    rate: Decimal::new(30, 2),
                },
            ],
            gst_rate: Decimal::new(15, 2),
            gst_exemption_code: "exempt".to_string(),
            withholding_dividends_rate: Decimal::new(15, 2),
            withholding_management_fees_rate: Decimal::new(15, 2),
            withholding_professional_fees_rate: Decimal::new(15, 2),
            withholding_rent_rate: Decimal::new(10, 2),
            withholding_commissions_rate: Decimal::new(5, 2),
            excise_rate: Decimal::new(10, 2),
            minimum_tax_rate: Decimal::new(5, 3),
            late_filing_rate: Decimal::new(5, 2),
            late_filing_minimum: Decimal::from(50_000),
            late_payment_tier1_rate: Decimal::new(5, 2),
            late_payment_tier2_rate: Decimal::new(10, 2),
            late_payment_tier3_rate: Decimal::new(15, 2),
            under_declaration_rate: Decimal::new(20, 2),
            annual_interest_rate: Decimal::new(15, 2),
        }
    }

    /// Resolves a rate table against `provider`, preferring configured
    /// overrides over the Finance Act 2025 defaults.
    ///
    /// The provider is consulted exactly once per key, so the returned table
    /// is a consistent snapshot even if settings change concurrently. A
    /// missing key or a provider failure falls back to the default for that
    /// key and is logged; the only way `load` fails is when the *resolved*
    /// table is internally inconsistent (see [`RateTableError`]).
    pub async fn load(provider: &dyn SettingsProvider) -> Result<Self, RateTableError> {
        let defaults = Self::finance_act_2025();

        let mut brackets = Vec::with_capacity(defaults.brackets.len());
        for (index, bracket) in defaults.brackets.iter().enumerate() {
            let upper = match bracket.upper {
                Some(default_upper) => Some(
                    resolve_decimal(provider, &keys::bracket_upper(index), default_upper).await,
                ),
                None => None,
            };
            let rate = resolve_decimal(provider, &keys::bracket_rate(index), bracket.rate).await;
            brackets.push(IncomeTaxBracket {
                lower: bracket.lower,
                upper,
                rate,
            });
        }
        // Re-derive lower bounds from the resolved uppers so a moved
        // boundary keeps the table contiguous.
        for index in 1..brackets.len() {
            if let Some(upper) = brackets[index - 1].upper {
                brackets[index].lower = upper;
            }
        }

        let table = Self {
            corporate_rate: resolve_decimal(
                provider,
                keys::CORPORATE_RATE,
                defaults.corporate_rate,
            )
            .await,
            brackets,
            gst_rate: resolve_decimal(provider, keys::GST_STANDARD_RATE, defaults.gst_rate).await,
            gst_exemption_code: resolve_string(
                provider,
                keys::GST_EXEMPTION_CODE,
                defaults.gst_exemption_code,
            )
            .await,
            withholding_dividends_rate: resolve_decimal(
                provider,
                keys::WITHHOLDING_DIVIDENDS,
                defaults.withholding_dividends_rate,
            )
            .await,
            withholding_management_fees_rate: resolve_decimal(
                provider,
                keys::WITHHOLDING_MANAGEMENT_FEES,
                defaults.withholding_management_fees_rate,
            )
            .await,
            withholding_professional_fees_rate: resolve_decimal(
                provider,
                keys::WITHHOLDING_PROFESSIONAL_FEES,
                defaults.withholding_professional_fees_rate,
            )
            .await,
            withholding_rent_rate: resolve_decimal(
                provider,
                keys::WITHHOLDING_RENT,
                defaults.withholding_rent_rate,
            )
            .await,
            withholding_commissions_rate: resolve_decimal(
                provider,
                keys::WITHHOLDING_COMMISSIONS,
                defaults.withholding_commissions_rate,
            )
            .await,
            excise_rate: resolve_decimal(
                provider,
                keys::EXCISE_STANDARD_RATE,
                defaults.excise_rate,
            )
            .await,
            minimum_tax_rate: resolve_decimal(
                provider,
                keys::MINIMUM_TAX_RATE,
                defaults.minimum_tax_rate,
            )
            .await,
            late_filing_rate: resolve_decimal(
                provider,
                keys::LATE_FILING_RATE,
                defaults.late_filing_rate,
            )
            .await,
            late_filing_minimum: resolve_decimal(
                provider,
                keys::LATE_FILING_MINIMUM,
                defaults.late_filing_minimum,
            )
            .await,
            late_payment_tier1_rate: resolve_decimal(
                provider,
                keys::LATE_PAYMENT_TIER1,
                defaults.late_payment_tier1_rate,
            )
            .await,
            late_payment_tier2_rate: resolve_decimal(
                provider,
                keys::LATE_PAYMENT_TIER2,
                defaults.late_payment_tier2_rate,
            )
            .await,
            late_payment_tier3_rate: resolve_decimal(
                provider,
                keys::LATE_PAYMENT_TIER3,
                defaults.late_payment_tier3_rate,
            )
            .await,
            under_declaration_rate: resolve_decimal(
                provider,
                keys::UNDER_DECLARATION_RATE,
                defaults.under_declaration_rate,
            )
            .await,
            annual_interest_rate: resolve_decimal(
                provider,
                keys::INTEREST_ANNUAL_RATE,
                defaults.annual_interest_rate,
            )
            .await,
        };

        table.validate()?;
        Ok(table)
    }

    /// Checks the table for configuration inconsistencies.
    ///
    /// [`RateTable::load`] calls this on every resolved table; call it
    /// yourself when constructing a synthetic table by hand.
    pub fn validate(&self) -> Result<(), RateTableError> {
        validate_brackets(&self.brackets)?;

        let scalars: [(&'static str, Decimal); 14] = [
            (keys::CORPORATE_RATE, self.corporate_rate),
            (keys::GST_STANDARD_RATE, self.gst_rate),
            (keys::WITHHOLDING_DIVIDENDS, self.withholding_dividends_rate),
            (
                keys::WITHHOLDING_MANAGEMENT_FEES,
                self.withholding_management_fees_rate,
            ),
            (
                keys::WITHHOLDING_PROFESSIONAL_FEES,
                self.withholding_professional_fees_rate,
            ),
            (keys::WITHHOLDING_RENT, self.withholding_rent_rate),
            (keys::WITHHOLDING_COMMISSIONS, self.withholding_commissions_rate),
            (keys::EXCISE_STANDARD_RATE, self.excise_rate),
            (keys::MINIMUM_TAX_RATE, self.minimum_tax_rate),
            (keys::LATE_FILING_RATE, self.late_filing_rate),
            (keys::LATE_FILING_MINIMUM, self.late_filing_minimum),
            (keys::LATE_PAYMENT_TIER1, self.late_payment_tier1_rate),
            (keys::LATE_PAYMENT_TIER2, self.late_payment_tier2_rate),
            (keys::LATE_PAYMENT_TIER3, self.late_payment_tier3_rate),
        ];
        for (key, value) in scalars {
            if value < Decimal::ZERO {
                return Err(RateTableError::NegativeSetting { key, value });
            }
        }
        if self.under_declaration_rate < Decimal::ZERO {
            return Err(RateTableError::NegativeSetting {
                key: keys::UNDER_DECLARATION_RATE,
                value: self.under_declaration_rate,
            });
        }
        if self.annual_interest_rate < Decimal::ZERO {
            return Err(RateTableError::NegativeSetting {
                key: keys::INTEREST_ANNUAL_RATE,
                value: self.annual_interest_rate,
            });
        }

        Ok(())
    }

    /// Statutory withholding rate for a payment category.
    pub fn withholding_rate(
        &self,
        withholding_type: WithholdingTaxType,
    ) -> Decimal {
        match withholding_type {
            WithholdingTaxType::Dividends => self.withholding_dividends_rate,
            WithholdingTaxType::ManagementFees => self.withholding_management_fees_rate,
            WithholdingTaxType::ProfessionalFees => self.withholding_professional_fees_rate,
            WithholdingTaxType::Rent => self.withholding_rent_rate,
            WithholdingTaxType::Commissions => self.withholding_commissions_rate,
        }
    }
}

async fn resolve_decimal(
    provider: &dyn SettingsProvider,
    key: &str,
    default: Decimal,
) -> Decimal {
    match provider.get_decimal(key).await {
        Ok(Some(value)) => value,
        Ok(None) => default,
        Err(error) => {
            warn!(key, %error, %default, "settings lookup failed; using statutory default");
            default
        }
    }
}

async fn resolve_string(
    provider: &dyn SettingsProvider,
    key: &str,
    default: String,
) -> String {
    match provider.get_string(key).await {
        Ok(Some(value)) => value,
        Ok(None) => default,
        Err(error) => {
            warn!(key, %error, %default, "settings lookup failed; using statutory default");
            default
        }
    }
}
