//! REST client for the end-of-day price API.

use std::time::Duration;

use chrono::NaiveDate;

use super::error::SourceError;
use super::types::{DailyClose, DailyPriceRow};
use super::DailyCloseSource;

/// Request timeout for price API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Token-authenticated client for daily closing prices.
pub struct PriceClient {
    client: reqwest::Client,
    api_token: String,
    base_url: String,
}

impl PriceClient {
    pub fn new(base_url: &str, api_token: String) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            api_token,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the daily close series for `ticker` over `[start, end]`.
    ///
    /// Returns an empty vector when the ticker is unknown (404) or has no
    /// data in the window; `SourceError::RateLimited` on a throttle
    /// response. The provider sometimes delivers rate-limit messages as
    /// HTTP 200 with a text/plain body, so the content type is checked too.
    async fn fetch_daily_closes(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyClose>, SourceError> {
        let url = format!("{}/daily/{}/prices", self.base_url, ticker);
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Token {}", self.api_token))
            .query(&[
                ("startDate", start.format("%Y-%m-%d").to_string()),
                ("endDate", end.format("%Y-%m-%d").to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(SourceError::InvalidToken);
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SourceError::RateLimited);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response body".to_string());
            return Err(SourceError::BadResponse(format!(
                "HTTP {}: {}",
                status,
                truncate(&body, 200)
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_lowercase();
        let body = response
            .text()
            .await
            .map_err(|e| SourceError::BadResponse(format!("failed to read body: {}", e)))?;

        if content_type.contains("text/plain") || content_type.contains("text/html") {
            let lower = body.to_lowercase();
            if lower.contains("rate limit") || lower.contains("too many requests") {
                return Err(SourceError::RateLimited);
            }
            return Err(SourceError::BadResponse(truncate(&body, 200).to_string()));
        }

        let rows: Vec<DailyPriceRow> = serde_json::from_str(&body).map_err(|e| {
            SourceError::BadResponse(format!(
                "failed to deserialize: {} | body: {}",
                e,
                truncate(&body, 500)
            ))
        })?;

        rows.into_iter()
            .map(|row| {
                let date_part = row.date.split('T').next().unwrap_or(&row.date);
                NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
                    .map(|date| DailyClose {
                        date,
                        close: row.adj_close,
                    })
                    .map_err(|e| {
                        SourceError::BadResponse(format!("bad date '{}': {}", row.date, e))
                    })
            })
            .collect()
    }
}

fn truncate(s: &str, max: usize) -> &str {
    if s.len() > max {
        &s[..max]
    } else {
        s
    }
}

impl DailyCloseSource for PriceClient {
    async fn daily_closes(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyClose>, SourceError> {
        self.fetch_daily_closes(ticker, start, end).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_series_json() -> serde_json::Value {
        serde_json::json!([
            {
                "date": "2023-01-10T00:00:00+00:00",
                "adjClose": 100.0,
                "close": 100.0,
                "high": 101.5,
                "low": 99.2,
                "open": 99.8,
                "volume": 1_200_000
            },
            {
                "date": "2023-01-11T00:00:00+00:00",
                "adjClose": 102.5,
                "close": 102.5,
                "high": 103.0,
                "low": 100.1,
                "open": 100.3,
                "volume": 900_000
            }
        ])
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn success_parses_dates_and_closes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/daily/XYZ/prices"))
            .and(query_param("startDate", "2023-01-01"))
            .and(query_param("endDate", "2023-02-01"))
            .and(header("Authorization", "Token test-token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(sample_series_json())
                    .insert_header("content-type", "application/json"),
            )
            .mount(&server)
            .await;

        let client = PriceClient::new(&server.uri(), "test-token".to_string()).unwrap();
        let closes = client
            .daily_closes("XYZ", date(2023, 1, 1), date(2023, 2, 1))
            .await
            .unwrap();

        assert_eq!(closes.len(), 2);
        assert_eq!(closes[0].date, date(2023, 1, 10));
        assert_eq!(closes[0].close, 100.0);
        assert_eq!(closes[1].date, date(2023, 1, 11));
        assert_eq!(closes[1].close, 102.5);
    }

    #[tokio::test]
    async fn unknown_ticker_is_empty_not_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/daily/NOSUCH/prices"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = PriceClient::new(&server.uri(), "test-token".to_string()).unwrap();
        let closes = client
            .daily_closes("NOSUCH", date(2023, 1, 1), date(2023, 2, 1))
            .await
            .unwrap();
        assert!(closes.is_empty());
    }

    #[tokio::test]
    async fn http_429_is_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/daily/XYZ/prices"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let client = PriceClient::new(&server.uri(), "test-token".to_string()).unwrap();
        let result = client
            .daily_closes("XYZ", date(2023, 1, 1), date(2023, 2, 1))
            .await;
        assert!(matches!(result, Err(SourceError::RateLimited)));
    }

    #[tokio::test]
    async fn plain_text_rate_limit_quirk() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/daily/XYZ/prices"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("Error: Rate limit exceeded. Please wait and try again.")
                    .insert_header("content-type", "text/plain"),
            )
            .mount(&server)
            .await;

        let client = PriceClient::new(&server.uri(), "test-token".to_string()).unwrap();
        let result = client
            .daily_closes("XYZ", date(2023, 1, 1), date(2023, 2, 1))
            .await;
        assert!(matches!(result, Err(SourceError::RateLimited)));
    }

    #[tokio::test]
    async fn bad_token_is_invalid_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/daily/XYZ/prices"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Authorization error"))
            .mount(&server)
            .await;

        let client = PriceClient::new(&server.uri(), "bad-token".to_string()).unwrap();
        let result = client
            .daily_closes("XYZ", date(2023, 1, 1), date(2023, 2, 1))
            .await;
        assert!(matches!(result, Err(SourceError::InvalidToken)));
    }
}
