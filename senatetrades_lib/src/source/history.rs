//! Bulk price-history fetching with throttling and bounded rate-limit retries.

use std::time::Duration;

use chrono::NaiveDate;
use rand::Rng;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::{DailyCloseSource, SourceError};
use crate::config::AnalyticsConfig;
use crate::prices::{clean_ticker, PriceBook, PriceHistory};

/// Fetch daily close series for every ticker over `[start, end]` and build
/// the run's `PriceBook`.
///
/// Ignore-listed tickers are skipped. Rate-limit responses are retried with
/// a fixed backoff and an explicit attempt counter; once `max_retries`
/// attempts are spent, the ticker is demoted to failed. Any other source
/// error, and an empty series, also demote the ticker. One failed ticker
/// never fails the fetch -- its purchases simply end up with no resolvable
/// prices downstream.
pub async fn fetch_histories<S: DailyCloseSource>(
    source: &S,
    tickers: &[String],
    start: NaiveDate,
    end: NaiveDate,
    config: &AnalyticsConfig,
) -> PriceBook {
    let mut book = PriceBook::new();
    let mut failed: Vec<String> = Vec::new();

    for raw_ticker in tickers {
        let ticker = clean_ticker(raw_ticker);
        if config.ignore_tickers.contains(ticker) {
            info!(ticker, "ticker is on the ignore list, skipping");
            continue;
        }

        debug!(ticker, %start, %end, "fetching price history");
        match fetch_with_retry(source, ticker, start, end, config).await {
            Some(closes) if !closes.is_empty() => {
                let history: PriceHistory =
                    closes.iter().map(|c| (c.date, c.close)).collect();
                book.insert(ticker, history);
            }
            Some(_) => {
                warn!(ticker, %start, %end, "no price data in window");
                failed.push(ticker.to_string());
            }
            None => failed.push(ticker.to_string()),
        }

        throttle(config).await;
    }

    if !failed.is_empty() {
        info!(count = failed.len(), tickers = ?failed, "tickers failed to fetch");
    }
    info!(fetched = book.len(), "price history fetch complete");
    book
}

/// One ticker's fetch with a bounded retry counter for rate-limit errors.
/// Returns `None` when the ticker should be treated as failed.
async fn fetch_with_retry<S: DailyCloseSource>(
    source: &S,
    ticker: &str,
    start: NaiveDate,
    end: NaiveDate,
    config: &AnalyticsConfig,
) -> Option<Vec<super::DailyClose>> {
    let mut attempts = 0u32;
    loop {
        match source.daily_closes(ticker, start, end).await {
            Ok(closes) => return Some(closes),
            Err(SourceError::RateLimited) => {
                attempts += 1;
                if attempts >= config.max_retries {
                    warn!(ticker, attempts, "rate limited, retries exhausted");
                    return None;
                }
                warn!(
                    ticker,
                    attempts,
                    backoff_ms = config.rate_limit_backoff_ms,
                    "rate limited, backing off"
                );
                sleep(Duration::from_millis(config.rate_limit_backoff_ms)).await;
            }
            Err(err) => {
                warn!(ticker, error = %err, "failed to fetch price history");
                return None;
            }
        }
    }
}

/// Jittered delay between fetches so successive calls do not hammer the
/// source at a fixed cadence.
async fn throttle(config: &AnalyticsConfig) {
    let jitter = rand::thread_rng().gen_range(0..=config.throttle_ms / 4);
    sleep(Duration::from_millis(config.throttle_ms + jitter)).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::DailyClose;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Scripted source: each ticker yields a queue of canned responses.
    struct ScriptedSource {
        responses: Mutex<HashMap<String, Vec<Result<Vec<DailyClose>, SourceError>>>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedSource {
        fn new(responses: HashMap<String, Vec<Result<Vec<DailyClose>, SourceError>>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self, ticker: &str) -> usize {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|t| t.as_str() == ticker)
                .count()
        }
    }

    impl DailyCloseSource for ScriptedSource {
        async fn daily_closes(
            &self,
            ticker: &str,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<Vec<DailyClose>, SourceError> {
            self.calls.lock().unwrap().push(ticker.to_string());
            let mut responses = self.responses.lock().unwrap();
            let queue = responses
                .get_mut(ticker)
                .unwrap_or_else(|| panic!("unexpected ticker {}", ticker));
            queue.remove(0)
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn closes(day: u32, price: f64) -> Vec<DailyClose> {
        vec![DailyClose {
            date: date(2023, 1, day),
            close: price,
        }]
    }

    fn fast_config() -> AnalyticsConfig {
        AnalyticsConfig {
            throttle_ms: 0,
            rate_limit_backoff_ms: 0,
            ..AnalyticsConfig::default()
        }
    }

    #[tokio::test]
    async fn builds_book_from_successful_fetches() {
        let source = ScriptedSource::new(HashMap::from([
            ("AAA".to_string(), vec![Ok(closes(10, 100.0))]),
            ("BBB".to_string(), vec![Ok(closes(10, 50.0))]),
        ]));
        let tickers = vec!["AAA".to_string(), "BBB".to_string()];
        let book = fetch_histories(
            &source,
            &tickers,
            date(2023, 1, 1),
            date(2023, 2, 1),
            &fast_config(),
        )
        .await;

        assert_eq!(book.len(), 2);
        assert_eq!(book.price_on_or_after("AAA", date(2023, 1, 10), 0), Some(100.0));
    }

    #[tokio::test]
    async fn rate_limit_retried_then_succeeds() {
        let source = ScriptedSource::new(HashMap::from([(
            "AAA".to_string(),
            vec![Err(SourceError::RateLimited), Ok(closes(10, 100.0))],
        )]));
        let tickers = vec!["AAA".to_string()];
        let book = fetch_histories(
            &source,
            &tickers,
            date(2023, 1, 1),
            date(2023, 2, 1),
            &fast_config(),
        )
        .await;

        assert_eq!(source.call_count("AAA"), 2);
        assert!(book.contains("AAA"));
    }

    #[tokio::test]
    async fn retries_are_bounded() {
        let source = ScriptedSource::new(HashMap::from([(
            "AAA".to_string(),
            vec![
                Err(SourceError::RateLimited),
                Err(SourceError::RateLimited),
                Err(SourceError::RateLimited),
                // Never reached: retries exhaust at max_retries attempts.
                Ok(closes(10, 100.0)),
            ],
        )]));
        let tickers = vec!["AAA".to_string()];
        let book = fetch_histories(
            &source,
            &tickers,
            date(2023, 1, 1),
            date(2023, 2, 1),
            &fast_config(),
        )
        .await;

        assert_eq!(source.call_count("AAA"), 3);
        assert!(!book.contains("AAA"));
    }

    #[tokio::test]
    async fn failed_ticker_does_not_abort_the_rest() {
        let source = ScriptedSource::new(HashMap::from([
            (
                "AAA".to_string(),
                vec![Err(SourceError::BadResponse("boom".to_string()))],
            ),
            ("BBB".to_string(), vec![Ok(closes(10, 50.0))]),
        ]));
        let tickers = vec!["AAA".to_string(), "BBB".to_string()];
        let book = fetch_histories(
            &source,
            &tickers,
            date(2023, 1, 1),
            date(2023, 2, 1),
            &fast_config(),
        )
        .await;

        assert!(!book.contains("AAA"));
        assert!(book.contains("BBB"));
    }

    #[tokio::test]
    async fn ignore_list_skips_without_calling_source() {
        let source = ScriptedSource::new(HashMap::from([(
            "BBB".to_string(),
            vec![Ok(closes(10, 50.0))],
        )]));
        let mut config = fast_config();
        config.ignore_tickers.insert("AAA".to_string());
        let tickers = vec!["AAA".to_string(), "BBB".to_string()];
        let book = fetch_histories(
            &source,
            &tickers,
            date(2023, 1, 1),
            date(2023, 2, 1),
            &config,
        )
        .await;

        assert_eq!(source.call_count("AAA"), 0);
        assert!(book.contains("BBB"));
    }

    #[tokio::test]
    async fn empty_series_counts_as_failed() {
        let source =
            ScriptedSource::new(HashMap::from([("AAA".to_string(), vec![Ok(vec![])])]));
        let tickers = vec!["AAA".to_string()];
        let book = fetch_histories(
            &source,
            &tickers,
            date(2023, 1, 1),
            date(2023, 2, 1),
            &fast_config(),
        )
        .await;
        assert!(book.is_empty());
    }
}
