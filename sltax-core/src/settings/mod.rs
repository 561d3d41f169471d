//! Settings-provider boundary.
//!
//! The engine reads every overridable statutory figure through this trait.
//! Implementations live outside the core crate (see `sltax-settings`); the
//! core only ever consumes the abstraction, and a provider failure is always
//! recoverable by falling back to the compiled-in statutory defaults.

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// The backing store could not be reached or failed mid-read.
    #[error("settings backend error: {0}")]
    Backend(String),

    /// The stored value exists but cannot be interpreted as the requested
    /// type.
    #[error("invalid value '{value}' for setting '{key}'")]
    Invalid { key: String, value: String },
}

/// Read-only source of rate and threshold overrides.
///
/// `Ok(None)` means "no override configured" and is the normal case for a
/// deployment running on statutory defaults. Errors are reported so the
/// caller can log them, but resolution never fails on account of one.
#[async_trait]
pub trait SettingsProvider: Send + Sync {
    async fn get_decimal(&self, key: &str) -> Result<Option<Decimal>, SettingsError>;

    async fn get_string(&self, key: &str) -> Result<Option<String>, SettingsError>;
}
