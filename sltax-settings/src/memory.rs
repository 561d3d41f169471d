use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sltax_core::{SettingsError, SettingsProvider};

/// String-keyed settings held in memory.
///
/// The workhorse provider for tests and for deployments whose overrides are
/// loaded once from configuration. Values are stored as strings, the way an
/// external settings table stores them; `get_decimal` parses on read and
/// reports unparsable values as [`SettingsError::Invalid`].
#[derive(Debug, Clone, Default)]
pub struct InMemorySettings {
    values: HashMap<String, String>,
}

impl InMemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an override. Builder-style so fixtures read flat.
    pub fn set(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

#[async_trait]
impl SettingsProvider for InMemorySettings {
    async fn get_decimal(&self, key: &str) -> Result<Option<Decimal>, SettingsError> {
        self.values
            .get(key)
            .map(|value| {
                value.trim().parse().map_err(|_| SettingsError::Invalid {
                    key: key.to_string(),
                    value: value.clone(),
                })
            })
            .transpose()
    }

    async fn get_string(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.values.get(key).cloned())
    }
}
