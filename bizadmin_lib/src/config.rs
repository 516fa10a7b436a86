//! Environment-driven settings for the client and cache.

use std::time::Duration;

use bizadmin_api::DEFAULT_TIMEOUT;

use crate::cache::CacheConfig;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Settings needed to build an `AdminClient`.
#[derive(Clone, Debug)]
pub struct Config {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
    pub cache: CacheConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
            cache: CacheConfig::default(),
        }
    }
}

impl Config {
    /// Reads `BIZADMIN_*` variables, falling back to defaults for anything
    /// missing or unparseable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let cache = CacheConfig {
            revalidate_if_stale: parse_bool(lookup("BIZADMIN_REVALIDATE_IF_STALE"))
                .unwrap_or(defaults.cache.revalidate_if_stale),
            stale_after: parse_u64(lookup("BIZADMIN_STALE_AFTER_SECS"))
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache.stale_after),
            ..defaults.cache
        };
        Self {
            base_url: lookup("BIZADMIN_BASE_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.base_url),
            token: lookup("BIZADMIN_TOKEN").filter(|v| !v.trim().is_empty()),
            timeout: parse_u64(lookup("BIZADMIN_TIMEOUT_SECS"))
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            cache,
        }
    }
}

fn parse_u64(val: Option<String>) -> Option<u64> {
    val.and_then(|v| v.trim().parse::<u64>().ok())
}

fn parse_bool(val: Option<String>) -> Option<bool> {
    match val?.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.token.is_none());
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(!config.cache.revalidate_if_stale);
        assert_eq!(config.cache.stale_after, Duration::from_secs(300));
    }

    #[test]
    fn reads_every_variable() {
        let config = Config::from_lookup(lookup(&[
            ("BIZADMIN_BASE_URL", "https://erp.example.com"),
            ("BIZADMIN_TOKEN", "abc"),
            ("BIZADMIN_TIMEOUT_SECS", "5"),
            ("BIZADMIN_REVALIDATE_IF_STALE", "true"),
            ("BIZADMIN_STALE_AFTER_SECS", "60"),
        ]));
        assert_eq!(config.base_url, "https://erp.example.com");
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.cache.revalidate_if_stale);
        assert_eq!(config.cache.stale_after, Duration::from_secs(60));
        assert!(!config.cache.revalidate_on_focus);
    }

    #[test]
    fn bad_values_fall_back() {
        let config = Config::from_lookup(lookup(&[
            ("BIZADMIN_TOKEN", "  "),
            ("BIZADMIN_TIMEOUT_SECS", "0"),
            ("BIZADMIN_REVALIDATE_IF_STALE", "maybe"),
            ("BIZADMIN_STALE_AFTER_SECS", "-1"),
        ]));
        assert!(config.token.is_none());
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(!config.cache.revalidate_if_stale);
        assert_eq!(config.cache.stale_after, Duration::from_secs(300));
    }

    #[test]
    fn bool_spellings() {
        for v in ["1", "TRUE", "yes", "on"] {
            assert_eq!(parse_bool(Some(v.to_string())), Some(true));
        }
        for v in ["0", "false", "No", "off"] {
            assert_eq!(parse_bool(Some(v.to_string())), Some(false));
        }
        assert_eq!(parse_bool(None), None);
    }
}
