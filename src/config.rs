//! Runtime settings for the order system.

use std::time::Duration;
use tracing::warn;

pub const STORE_BUFFER_ENV: &str = "ORDERS_STORE_BUFFER";
pub const STORE_TIMEOUT_ENV: &str = "ORDERS_STORE_TIMEOUT_MS";
pub const LOG_FILTER_ENV: &str = "ORDERS_LOG";

#[derive(Debug, Clone, PartialEq)]
pub struct SystemConfig {
    /// Capacity of the store actor's request channel.
    pub store_buffer: usize,
    /// How long a caller waits for the store before giving up.
    pub store_timeout: Duration,
    /// Default `tracing` filter. `RUST_LOG` still wins when set.
    pub log_filter: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            store_buffer: 32,
            store_timeout: Duration::from_secs(5),
            log_filter: "info".to_string(),
        }
    }
}

impl SystemConfig {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Unparseable or zero values keep
    /// the default and log a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(STORE_BUFFER_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(buffer) if buffer > 0 => config.store_buffer = buffer,
                _ => warn!(key = STORE_BUFFER_ENV, value = %raw, "Ignoring invalid setting"),
            }
        }
        if let Some(raw) = lookup(STORE_TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => config.store_timeout = Duration::from_millis(ms),
                _ => warn!(key = STORE_TIMEOUT_ENV, value = %raw, "Ignoring invalid setting"),
            }
        }
        if let Some(filter) = lookup(LOG_FILTER_ENV) {
            if !filter.trim().is_empty() {
                config.log_filter = filter;
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_overrides() {
        assert_eq!(SystemConfig::from_lookup(lookup(&[])), SystemConfig::default());
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = SystemConfig::from_lookup(lookup(&[
            (STORE_BUFFER_ENV, "8"),
            (STORE_TIMEOUT_ENV, "250"),
            (LOG_FILTER_ENV, "order_placement=debug"),
        ]));
        assert_eq!(config.store_buffer, 8);
        assert_eq!(config.store_timeout, Duration::from_millis(250));
        assert_eq!(config.log_filter, "order_placement=debug");
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = SystemConfig::from_lookup(lookup(&[
            (STORE_BUFFER_ENV, "0"),
            (STORE_TIMEOUT_ENV, "soon"),
        ]));
        assert_eq!(config.store_buffer, 32);
        assert_eq!(config.store_timeout, Duration::from_secs(5));
    }
}
