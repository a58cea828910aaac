use std::time::Duration;

use serde::Deserialize;

/// Runtime configuration shared by the resolution cache and the catalog.
///
/// - `cache_ttl_secs` is the expiry applied to every cache record (object and pointers).
/// - `system_table_prefix` marks tables that aliases may never point at.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Lifetime of cached aliases and stored queries, in seconds
    pub cache_ttl_secs: u64,
    /// Tables whose name starts with this prefix are hidden from alias creation
    pub system_table_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self { cache_ttl_secs: 3600, system_table_prefix: "__".to_string() }
    }
}

impl Config {
    /// Create default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience: default configuration with a custom cache expiry.
    pub fn with_cache_ttl(ttl: Duration) -> Self {
        Self {
            cache_ttl_secs: ttl.as_secs(),
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON; absent keys keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// True when `table` belongs to the system namespace.
    pub fn is_system_table(&self, table: &str) -> bool {
        !self.system_table_prefix.is_empty() && table.starts_with(&self.system_table_prefix)
    }
}
