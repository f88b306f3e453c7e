//! Loader configuration with environment overrides.
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `TICKCHART_TIMEOUT_MS` | `timeout_ms` | `10000` |
//! | `TICKCHART_YAHOO_BASE_URL` | `base_url` | `https://query1.finance.yahoo.com` |

use std::env;

use tracing::warn;

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

const TIMEOUT_ENV: &str = "TICKCHART_TIMEOUT_MS";
const BASE_URL_ENV: &str = "TICKCHART_YAHOO_BASE_URL";

/// Settings for the market-data adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    /// Scale open/high/low/close by the provider's adjusted close.
    pub adjust_prices: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            adjust_prices: true,
        }
    }
}

impl LoaderConfig {
    /// Defaults overridden by `TICKCHART_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(value) if value > 0 => config.timeout_ms = value,
                _ => warn!(variable = TIMEOUT_ENV, value = %raw, "ignoring invalid timeout"),
            }
        }

        if let Some(raw) = lookup(BASE_URL_ENV) {
            let trimmed = raw.trim().trim_end_matches('/');
            if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
                config.base_url = trimmed.to_owned();
            } else {
                warn!(variable = BASE_URL_ENV, value = %raw, "ignoring invalid base url");
            }
        }

        config
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_adjust_prices(mut self, adjust_prices: bool) -> Self {
        self.adjust_prices = adjust_prices;
        self
    }
}
