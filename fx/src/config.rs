//! FX engine configuration.

use std::path::PathBuf;

use chrono::Duration;

use crate::cache::TieredCacheConfig;

/// Main engine configuration.
#[derive(Debug, Clone)]
pub struct FxEngineConfig {
    /// Cache configuration.
    pub cache: TieredCacheConfig,
    /// Rate file used by the JSON file source.
    pub rates_file: Option<PathBuf>,
    /// Log level.
    pub log_level: String,
}

impl Default for FxEngineConfig {
    fn default() -> Self {
        Self {
            cache: TieredCacheConfig::default(),
            rates_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl FxEngineConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(ttl) = lookup("RATEPATH_CURRENCY_TTL_SECS").and_then(|secs| parse_ttl(&secs)) {
            config.cache.currency_ttl = ttl;
        }

        if let Some(ttl) = lookup("RATEPATH_EXCHANGE_TTL_SECS").and_then(|secs| parse_ttl(&secs)) {
            config.cache.exchange_ttl = ttl;
        }

        if let Some(path) = lookup("RATEPATH_RATES_FILE") {
            config.rates_file = Some(PathBuf::from(path));
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            config.log_level = level;
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.cache.currency_ttl <= Duration::zero() {
            return Err("Currency cache TTL must be positive".to_string());
        }

        if self.cache.exchange_ttl <= Duration::zero() {
            return Err("Exchange cache TTL must be positive".to_string());
        }

        if self.rates_file.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
            return Err("Rates file path cannot be empty".to_string());
        }

        Ok(())
    }
}

/// Whole seconds; values chrono cannot represent are ignored like garbage.
fn parse_ttl(secs: &str) -> Option<Duration> {
    secs.trim().parse().ok().and_then(Duration::try_seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = FxEngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cache.currency_ttl, Duration::seconds(30));
        assert_eq!(config.cache.exchange_ttl, Duration::seconds(60));
    }

    #[test]
    fn test_config_from_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("RATEPATH_CURRENCY_TTL_SECS", "5"),
            ("RATEPATH_EXCHANGE_TTL_SECS", "not-a-number"),
            ("RATEPATH_RATES_FILE", "/tmp/rates.json"),
        ]);
        let config = FxEngineConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.cache.currency_ttl, Duration::seconds(5));
        assert_eq!(config.cache.exchange_ttl, Duration::seconds(60));
        assert_eq!(config.rates_file, Some(PathBuf::from("/tmp/rates.json")));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_out_of_range_ttl_keeps_default() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("RATEPATH_CURRENCY_TTL_SECS", "9223372036854775807"),
            ("RATEPATH_EXCHANGE_TTL_SECS", "-9223372036854775808"),
        ]);
        let config = FxEngineConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.cache.currency_ttl, Duration::seconds(30));
        assert_eq!(config.cache.exchange_ttl, Duration::seconds(60));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let mut config = FxEngineConfig::default();
        config.cache.exchange_ttl = Duration::zero();
        assert!(config.validate().is_err());
    }
}
