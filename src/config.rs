//! Configuration
//!
//! Adapter settings read from environment variables, with defaults suitable
//! for local runs.
//!
//! | Variable | Default |
//! |---|---|
//! | `CLIMATE_API_URL` | `https://archive-api.open-meteo.com` |
//! | `SOIL_API_URL` | `https://rest.isric.org` |
//! | `SOIL_PROVIDER_ENABLED` | `false` |
//! | `CLIMATE_HISTORY_YEARS` | `3` |
//! | `CLIMATE_RETRY_DELAY_MS` | `1500` |
//! | `HTTP_TIMEOUT_SECS` | `10` |
//! | `CLIMATE_CACHE_TTL_SECS` | `600` |
//! | `CATALOG_PATH` | embedded catalog |

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::adapters::{open_meteo, soilgrids};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub climate_api_url: String,
    pub soil_api_url: String,
    /// The soil provider is switched off unless explicitly enabled
    pub soil_provider_enabled: bool,
    pub climate_history_years: u32,
    pub climate_retry_delay: Duration,
    pub http_timeout: Duration,
    pub climate_cache_ttl: Duration,
    pub catalog_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            climate_api_url: open_meteo::DEFAULT_BASE_URL.to_string(),
            soil_api_url: soilgrids::DEFAULT_BASE_URL.to_string(),
            soil_provider_enabled: false,
            climate_history_years: 3,
            climate_retry_delay: Duration::from_millis(1500),
            http_timeout: Duration::from_secs(10),
            climate_cache_ttl: Duration::from_secs(600),
            catalog_path: None,
        }
    }
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup` (variable name -> value)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            climate_api_url: lookup("CLIMATE_API_URL").unwrap_or(defaults.climate_api_url),
            soil_api_url: lookup("SOIL_API_URL").unwrap_or(defaults.soil_api_url),
            soil_provider_enabled: match lookup("SOIL_PROVIDER_ENABLED") {
                Some(value) => parse_bool(&value)
                    .with_context(|| format!("SOIL_PROVIDER_ENABLED={}", value))?,
                None => defaults.soil_provider_enabled,
            },
            climate_history_years: parse_var(&lookup, "CLIMATE_HISTORY_YEARS")?
                .unwrap_or(defaults.climate_history_years),
            climate_retry_delay: parse_var(&lookup, "CLIMATE_RETRY_DELAY_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.climate_retry_delay),
            http_timeout: parse_var(&lookup, "HTTP_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.http_timeout),
            climate_cache_ttl: parse_var(&lookup, "CLIMATE_CACHE_TTL_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.climate_cache_ttl),
            catalog_path: lookup("CATALOG_PATH").map(PathBuf::from),
        };

        if config.climate_history_years == 0 {
            bail!("CLIMATE_HISTORY_YEARS must be at least 1");
        }

        Ok(config)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .with_context(|| format!("invalid {}={}", key, value))
        })
        .transpose()
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got '{}'", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert!(!config.soil_provider_enabled);
        assert_eq!(config.climate_cache_ttl, Duration::from_secs(600));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("SOIL_PROVIDER_ENABLED", "true"),
            ("CLIMATE_HISTORY_YEARS", "5"),
            ("CLIMATE_RETRY_DELAY_MS", "0"),
            ("CATALOG_PATH", "/tmp/crops.json"),
        ]))
        .unwrap();
        assert!(config.soil_provider_enabled);
        assert_eq!(config.climate_history_years, 5);
        assert_eq!(config.climate_retry_delay, Duration::ZERO);
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/crops.json")));
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(Config::from_lookup(lookup_from(&[("HTTP_TIMEOUT_SECS", "ten")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("SOIL_PROVIDER_ENABLED", "maybe")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("CLIMATE_HISTORY_YEARS", "0")])).is_err());
    }
}
