use chrono::NaiveDate;
use serde::Deserialize;

/// One daily close as consumed by the rest of the crate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyClose {
    pub date: NaiveDate,
    pub close: f64,
}

/// Wire shape of one row from the end-of-day prices endpoint. Dates arrive
/// as full timestamps ("2023-01-10T00:00:00+00:00"); only the date part is
/// meaningful for daily bars.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct DailyPriceRow {
    pub date: String,
    pub adj_close: f64,
}
