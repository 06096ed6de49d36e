//! Per-run price history lookups with bounded non-trading-day fallback.
//!
//! A `PriceBook` is built once per analytics run from the price source and is
//! read-only afterward; every stage that needs a price receives it by
//! reference. Exchange closings make exact-date lookups unreliable, so both
//! lookup directions scan day-by-day within a bounded window rather than
//! drifting without limit.

use std::collections::{BTreeMap, HashMap};

use chrono::{Duration, NaiveDate};

/// Daily closing prices for one ticker, keyed by calendar date.
pub type PriceHistory = BTreeMap<NaiveDate, f64>;

/// Read-only map of ticker to daily close series for one analytics run.
#[derive(Debug, Default)]
pub struct PriceBook {
    histories: HashMap<String, PriceHistory>,
}

/// Strip the currency-sentinel prefix some filings put on tickers ("$AAPL").
pub fn clean_ticker(ticker: &str) -> &str {
    ticker.trim_start_matches('$')
}

impl PriceBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ticker: &str, history: PriceHistory) {
        self.histories.insert(clean_ticker(ticker).to_string(), history);
    }

    pub fn contains(&self, ticker: &str) -> bool {
        self.histories.contains_key(clean_ticker(ticker))
    }

    pub fn len(&self) -> usize {
        self.histories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histories.is_empty()
    }

    /// Closing price at `target`, or the first available price up to
    /// `max_offset` days after it. `None` if the ticker is absent or no
    /// trading day falls inside the window.
    pub fn price_on_or_after(
        &self,
        ticker: &str,
        target: NaiveDate,
        max_offset: u32,
    ) -> Option<f64> {
        let history = self.histories.get(clean_ticker(ticker))?;
        (0..=i64::from(max_offset))
            .find_map(|offset| history.get(&(target + Duration::days(offset))).copied())
    }

    /// Backward-scanning variant, used when the target date must not exceed
    /// "today" (a forward scan would walk into dates that cannot exist yet).
    pub fn price_on_or_before(
        &self,
        ticker: &str,
        target: NaiveDate,
        max_offset: u32,
    ) -> Option<f64> {
        let history = self.histories.get(clean_ticker(ticker))?;
        (0..=i64::from(max_offset))
            .find_map(|offset| history.get(&(target - Duration::days(offset))).copied())
    }
}
