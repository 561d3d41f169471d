use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use rust_decimal::Decimal;
use sltax_core::{RateTable, SettingsError, SettingsProvider, keys};
use tracing::debug;

#[derive(Debug, Default)]
struct Snapshot {
    decimals: HashMap<String, Decimal>,
    strings: HashMap<String, String>,
}

/// Process-wide settings cache with atomic snapshot refresh.
///
/// Wraps a slower inner provider (a database- or network-backed one) and
/// serves reads from an immutable in-memory snapshot. [`refresh`] rebuilds
/// the snapshot from the inner provider and publishes it with a single
/// `Arc` swap, so concurrent readers see either the old snapshot or the new
/// one in full, never a half-updated table. A failed refresh leaves the
/// previous snapshot in place.
///
/// [`refresh`]: CachedSettings::refresh
pub struct CachedSettings {
    inner: Arc<dyn SettingsProvider>,
    decimal_keys: Vec<String>,
    string_keys: Vec<String>,
    snapshot: RwLock<Arc<Snapshot>>,
}

impl CachedSettings {
    /// Caches the given keys of `inner`. The snapshot starts empty; call
    /// [`refresh`](CachedSettings::refresh) before first use.
    pub fn new(
        inner: Arc<dyn SettingsProvider>,
        decimal_keys: Vec<String>,
        string_keys: Vec<String>,
    ) -> Self {
        Self {
            inner,
            decimal_keys,
            string_keys,
            snapshot: RwLock::new(Arc::new(Snapshot::default())),
        }
    }

    /// A cache preconfigured with every key [`RateTable::load`] resolves.
    pub fn for_rate_table(inner: Arc<dyn SettingsProvider>) -> Self {
        let mut decimal_keys: Vec<String> = [
            keys::CORPORATE_RATE,
            keys::GST_STANDARD_RATE,
            keys::WITHHOLDING_DIVIDENDS,
            keys::WITHHOLDING_MANAGEMENT_FEES,
            keys::WITHHOLDING_PROFESSIONAL_FEES,
            keys::WITHHOLDING_RENT,
            keys::WITHHOLDING_COMMISSIONS,
            keys::EXCISE_STANDARD_RATE,
            keys::MINIMUM_TAX_RATE,
            keys::LATE_FILING_RATE,
            keys::LATE_FILING_MINIMUM,
            keys::LATE_PAYMENT_TIER1,
            keys::LATE_PAYMENT_TIER2,
            keys::LATE_PAYMENT_TIER3,
            keys::UNDER_DECLARATION_RATE,
            keys::INTEREST_ANNUAL_RATE,
        ]
        .into_iter()
        .map(str::to_string)
        .collect();
        for index in 0..RateTable::finance_act_2025().brackets.len() {
            decimal_keys.push(keys::bracket_upper(index));
            decimal_keys.push(keys::bracket_rate(index));
        }

        Self::new(inner, decimal_keys, vec![keys::GST_EXEMPTION_CODE.to_string()])
    }

    /// Re-reads every cached key from the inner provider and publishes the
    /// result as the new snapshot.
    ///
    /// # Errors
    ///
    /// Propagates the first inner-provider error; the previously published
    /// snapshot stays in effect when that happens.
    pub async fn refresh(&self) -> Result<(), SettingsError> {
        let mut next = Snapshot::default();

        for key in &self.decimal_keys {
            if let Some(value) = self.inner.get_decimal(key).await? {
                next.decimals.insert(key.clone(), value);
            }
        }
        for key in &self.string_keys {
            if let Some(value) = self.inner.get_string(key).await? {
                next.strings.insert(key.clone(), value);
            }
        }

        debug!(
            overrides = next.decimals.len() + next.strings.len(),
            "settings snapshot refreshed"
        );
        let mut guard = self.snapshot.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(next);
        Ok(())
    }

    fn current(&self) -> Arc<Snapshot> {
        self.snapshot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl SettingsProvider for CachedSettings {
    async fn get_decimal(&self, key: &str) -> Result<Option<Decimal>, SettingsError> {
        Ok(self.current().decimals.get(key).copied())
    }

    async fn get_string(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.current().strings.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use crate::InMemorySettings;

    use super::*;

    #[tokio::test]
    async fn empty_until_refreshed() {
        let inner = Arc::new(InMemorySettings::new().set(keys::GST_STANDARD_RATE, "0.18"));
        let cache = CachedSettings::for_rate_table(inner);

        assert_eq!(cache.get_decimal(keys::GST_STANDARD_RATE).await, Ok(None));

        cache.refresh().await.unwrap();

        assert_eq!(
            cache.get_decimal(keys::GST_STANDARD_RATE).await,
            Ok(Some(dec!(0.18)))
        );
    }

    #[tokio::test]
    async fn uncached_keys_are_not_served() {
        let inner = Arc::new(InMemorySettings::new().set("unrelated.key", "1.0"));
        let cache = CachedSettings::for_rate_table(inner);
        cache.refresh().await.unwrap();

        assert_eq!(cache.get_decimal("unrelated.key").await, Ok(None));
    }

    #[tokio::test]
    async fn string_keys_cached() {
        let inner = Arc::new(InMemorySettings::new().set(keys::GST_EXEMPTION_CODE, "zero-rated"));
        let cache = CachedSettings::for_rate_table(inner);
        cache.refresh().await.unwrap();

        assert_eq!(
            cache.get_string(keys::GST_EXEMPTION_CODE).await,
            Ok(Some("zero-rated".to_string()))
        );
    }

    /// Serves from a map until poisoned, then fails every lookup.
    struct FlakyProvider {
        inner: InMemorySettings,
        down: std::sync::atomic::AtomicBool,
    }

    #[async_trait]
    impl SettingsProvider for FlakyProvider {
        async fn get_decimal(&self, key: &str) -> Result<Option<Decimal>, SettingsError> {
            if self.down.load(std::sync::atomic::Ordering::SeqCst) {
                return Err(SettingsError::Backend("store offline".to_string()));
            }
            self.inner.get_decimal(key).await
        }

        async fn get_string(&self, key: &str) -> Result<Option<String>, SettingsError> {
            if self.down.load(std::sync::atomic::Ordering::SeqCst) {
                return Err(SettingsError::Backend("store offline".to_string()));
            }
            self.inner.get_string(key).await
        }
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_snapshot() {
        let flaky = Arc::new(FlakyProvider {
            inner: InMemorySettings::new().set(keys::GST_STANDARD_RATE, "0.18"),
            down: std::sync::atomic::AtomicBool::new(false),
        });
        let cache = CachedSettings::new(
            flaky.clone(),
            vec![keys::GST_STANDARD_RATE.to_string()],
            Vec::new(),
        );
        cache.refresh().await.unwrap();

        flaky.down.store(true, std::sync::atomic::Ordering::SeqCst);

        assert!(cache.refresh().await.is_err());
        // The old snapshot stays live.
        assert_eq!(
            cache.get_decimal(keys::GST_STANDARD_RATE).await,
            Ok(Some(dec!(0.18)))
        );
    }
}
