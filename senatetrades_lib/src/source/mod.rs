//! Historical price source: REST client, fetch loop, and the trait seam
//! that lets the pipeline run against an in-memory source in tests.

mod client;
mod error;
mod history;
mod types;

pub use client::PriceClient;
pub use error::SourceError;
pub use history::fetch_histories;
pub use types::DailyClose;

use chrono::NaiveDate;
use std::future::Future;

/// A queryable source of daily closing prices.
///
/// Implementations may signal throttling with `SourceError::RateLimited`;
/// the fetch loop retries those with a bounded backoff while any other
/// error demotes the ticker to failed.
pub trait DailyCloseSource {
    fn daily_closes(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Future<Output = Result<Vec<DailyClose>, SourceError>>;
}
