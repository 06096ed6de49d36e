//! Analytics run configuration.
//!
//! Loaded from a TOML file when one is given; every field has a default
//! matching the constants the pipeline was tuned with, so a bare run needs
//! no config at all. The price source token usually comes from the
//! environment instead of the file.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Maximum days a price lookup may drift off its target date.
    pub max_price_offset_days: u32,
    /// Delay between successive price-fetch calls.
    pub throttle_ms: u64,
    /// Fixed backoff after a rate-limit response.
    pub rate_limit_backoff_ms: u64,
    /// Bounded attempt count per ticker before it is demoted to failed.
    pub max_retries: u32,
    /// Tickers to skip entirely during price fetching.
    pub ignore_tickers: HashSet<String>,
    /// Base URL of the end-of-day price API.
    pub source_base_url: String,
    /// API token for the price source; `SENATETRADES_API_TOKEN` in the
    /// environment takes precedence at the CLI boundary.
    pub api_token: Option<String>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            max_price_offset_days: 5,
            throttle_ms: 1_000,
            rate_limit_backoff_ms: 5_000,
            max_retries: 3,
            ignore_tickers: HashSet::new(),
            source_base_url: "https://api.tiingo.com".to_string(),
            api_token: None,
        }
    }
}

impl AnalyticsConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Merge tickers from a plain-text ignore file (one ticker per line,
    /// `#` starts a comment) into the ignore set.
    pub fn load_ignore_file(&mut self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let raw = fs::read_to_string(path)?;
        for line in raw.lines() {
            let ticker = line.split('#').next().unwrap_or("").trim();
            if !ticker.is_empty() {
                self.ignore_tickers.insert(ticker.to_string());
            }
        }
        Ok(())
    }
}
