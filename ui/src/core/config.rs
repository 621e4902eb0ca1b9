//! Runtime configuration for the dashboard.
//!
//! Values come from `CRAGSTATS_*` variables: the process environment on
//! native targets, compile-time values on wasm where no environment exists.

use api::{ApiBase, Gender};
use thiserror::Error;
use tracing::{warn, Level};

use super::filter::{AgeBounds, FilterState};

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

const KEY_API_URL: &str = "CRAGSTATS_API_URL";
const KEY_AGE_MIN: &str = "CRAGSTATS_AGE_MIN";
const KEY_AGE_MAX: &str = "CRAGSTATS_AGE_MAX";
const KEY_TIMEOUT_MS: &str = "CRAGSTATS_TIMEOUT_MS";
const KEY_PAGE_SIZE: &str = "CRAGSTATS_PAGE_SIZE";
const KEY_LOG: &str = "CRAGSTATS_LOG";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a positive integer, got `{value}`")]
    InvalidNumber { key: &'static str, value: String },

    #[error("age bounds {min}..={max} are empty")]
    InvalidBounds { min: u32, max: u32 },

    #[error("CRAGSTATS_API_URL is not an http(s) url: `{0}`")]
    InvalidUrl(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub api_base: ApiBase,
    pub age_bounds: AgeBounds,
    pub default_gender: Gender,
    pub default_age_min: u32,
    pub default_age_max: u32,
    pub request_timeout_ms: u64,
    pub page_size: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: ApiBase::parse(DEFAULT_API_URL).expect("default api url is valid"),
            age_bounds: AgeBounds::default(),
            default_gender: Gender::Both,
            default_age_min: 18,
            default_age_max: 60,
            request_timeout_ms: 10_000,
            page_size: 10,
        }
    }
}

impl DashboardConfig {
    /// Build from a key lookup; missing keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(KEY_API_URL) {
            config.api_base = ApiBase::parse(&raw).map_err(|_| ConfigError::InvalidUrl(raw))?;
        }

        let min = age(&lookup, KEY_AGE_MIN)?.unwrap_or(config.age_bounds.min);
        let max = age(&lookup, KEY_AGE_MAX)?.unwrap_or(config.age_bounds.max);
        if min > max {
            return Err(ConfigError::InvalidBounds { min, max });
        }
        config.age_bounds = AgeBounds::new(min, max);

        if let Some(timeout) = number(&lookup, KEY_TIMEOUT_MS)? {
            config.request_timeout_ms = timeout;
        }
        if let Some(size) = number(&lookup, KEY_PAGE_SIZE)? {
            config.page_size = size.min(u32::MAX as u64) as u32;
        }

        Ok(config)
    }

    /// Load for the current platform, falling back to defaults on error.
    pub fn load() -> Self {
        Self::from_lookup(platform_lookup).unwrap_or_else(|err| {
            warn!("invalid configuration ({err}); using defaults");
            Self::default()
        })
    }

    /// Fresh filter state honouring the configured bounds and defaults.
    pub fn initial_filter(&self) -> FilterState {
        FilterState::new(
            self.age_bounds,
            self.default_gender,
            self.default_age_min,
            self.default_age_max,
        )
    }
}

/// Log level for the launchers' subscriber; unknown values fall back to INFO.
pub fn log_level() -> Level {
    level_from(platform_lookup(KEY_LOG))
}

fn level_from(raw: Option<String>) -> Level {
    raw.and_then(|raw| raw.trim().parse().ok()).unwrap_or(Level::INFO)
}

fn number<F>(lookup: &F, key: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 => Ok(Some(value)),
        _ => Err(ConfigError::InvalidNumber { key, value: raw }),
    }
}

fn age<F>(lookup: &F, key: &'static str) -> Result<Option<u32>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    number(lookup, key)?
        .map(|value| {
            u32::try_from(value).map_err(|_| ConfigError::InvalidNumber {
                key,
                value: value.to_string(),
            })
        })
        .transpose()
}

#[cfg(not(target_arch = "wasm32"))]
fn platform_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(target_arch = "wasm32")]
fn platform_lookup(key: &str) -> Option<String> {
    let value = match key {
        KEY_API_URL => option_env!("CRAGSTATS_API_URL"),
        KEY_AGE_MIN => option_env!("CRAGSTATS_AGE_MIN"),
        KEY_AGE_MAX => option_env!("CRAGSTATS_AGE_MAX"),
        KEY_TIMEOUT_MS => option_env!("CRAGSTATS_TIMEOUT_MS"),
        KEY_PAGE_SIZE => option_env!("CRAGSTATS_PAGE_SIZE"),
        KEY_LOG => option_env!("CRAGSTATS_LOG"),
        _ => None,
    };
    value.map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_lookup_gives_defaults() {
        let config = DashboardConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.api_base.as_str(), DEFAULT_API_URL);
    }

    #[test]
    fn later_variant_bounds_clamp_initial_filter() {
        let config = DashboardConfig::from_lookup(lookup(&[
            ("CRAGSTATS_AGE_MIN", "12"),
            ("CRAGSTATS_AGE_MAX", "70"),
        ]))
        .unwrap();
        let snap = config.initial_filter().snapshot();
        assert_eq!(config.age_bounds, AgeBounds::new(12, 70));
        assert_eq!((snap.age_min, snap.age_max), (18, 60));

        let narrow = DashboardConfig::from_lookup(lookup(&[("CRAGSTATS_AGE_MAX", "40")])).unwrap();
        let snap = narrow.initial_filter().snapshot();
        assert_eq!((snap.age_min, snap.age_max), (18, 40));
    }

    #[test]
    fn rejects_inverted_bounds() {
        let err = DashboardConfig::from_lookup(lookup(&[
            ("CRAGSTATS_AGE_MIN", "80"),
            ("CRAGSTATS_AGE_MAX", "20"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidBounds { min: 80, max: 20 });
    }

    #[test]
    fn rejects_garbage_numbers_and_urls() {
        let err = DashboardConfig::from_lookup(lookup(&[("CRAGSTATS_TIMEOUT_MS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { key: "CRAGSTATS_TIMEOUT_MS", .. }));

        let err = DashboardConfig::from_lookup(lookup(&[("CRAGSTATS_API_URL", "localhost")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(_)));
    }

    #[test]
    fn rejects_ages_beyond_u32() {
        let err = DashboardConfig::from_lookup(lookup(&[("CRAGSTATS_AGE_MAX", "4294967296")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                key: "CRAGSTATS_AGE_MAX",
                value: "4294967296".into(),
            }
        );
    }

    #[test]
    fn log_level_parses_or_defaults() {
        assert_eq!(level_from(Some("debug".into())), Level::DEBUG);
        assert_eq!(level_from(Some(" WARN ".into())), Level::WARN);
        assert_eq!(level_from(Some("chatty".into())), Level::INFO);
        assert_eq!(level_from(None), Level::INFO);
    }

    #[test]
    fn overrides_apply() {
        let config = DashboardConfig::from_lookup(lookup(&[
            ("CRAGSTATS_API_URL", "https://climb.example.org/"),
            ("CRAGSTATS_TIMEOUT_MS", "2500"),
            ("CRAGSTATS_PAGE_SIZE", "25"),
        ]))
        .unwrap();
        assert_eq!(config.api_base.as_str(), "https://climb.example.org");
        assert_eq!(config.request_timeout_ms, 2500);
        assert_eq!(config.page_size, 25);
    }
}
