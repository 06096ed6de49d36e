//! The analytics run: match, price, score, aggregate, roll up.
//!
//! Each stage hands the next a plain value (matches, a price book, scored
//! trades, analytics rows), so every stage is testable against fixtures and
//! nothing mutates shared state behind the pipeline's back. Price failures
//! degrade individual trades, never the run.

use chrono::NaiveDate;
use tracing::info;

use crate::aggregate::aggregate_senators;
use crate::config::AnalyticsConfig;
use crate::db::Db;
use crate::error::AnalyticsError;
use crate::matcher::{match_transactions, PositionStatus};
use crate::performance::compute_performance;
use crate::prices::clean_ticker;
use crate::source::{fetch_histories, DailyCloseSource};

/// Fetch-window floor when no purchase has a parseable date. Senate
/// electronic filings do not predate this.
const EARLIEST_FETCH_DATE: (i32, u32, u32) = (2010, 1, 1);

/// What a run touched, for logging and CLI summaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub purchases_matched: usize,
    pub closed: usize,
    pub open: usize,
    pub tickers_fetched: usize,
    pub senators_updated: usize,
    pub parties_updated: usize,
}

/// Run the full analytics pass against `db`, pricing trades via `source`.
///
/// Reads the disclosed transactions, rebuilds matched_trades, and upserts
/// the senator and party analytics tables. `today` anchors open-position
/// pricing and is injected so runs are reproducible under test.
pub async fn run_analytics<S: DailyCloseSource>(
    db: &mut Db,
    source: &S,
    config: &AnalyticsConfig,
    today: NaiveDate,
) -> Result<RunSummary, AnalyticsError> {
    let purchases = db.purchase_rows()?;
    let sales = db.sale_rows()?;
    info!(
        purchases = purchases.len(),
        sales = sales.len(),
        "loaded stock transactions"
    );

    let matches = match_transactions(purchases, sales);
    let closed = matches
        .iter()
        .filter(|m| m.status == PositionStatus::Closed)
        .count();

    // Price window: earliest purchase through today, one fetch per distinct
    // ticker among the matched purchases.
    let start = matches
        .iter()
        .map(|m| m.purchase_date)
        .min()
        .unwrap_or_else(|| {
            let (y, m, d) = EARLIEST_FETCH_DATE;
            NaiveDate::from_ymd_opt(y, m, d).expect("valid fetch floor date")
        });
    let mut tickers: Vec<String> = matches
        .iter()
        .map(|m| clean_ticker(&m.purchase.ticker).to_string())
        .collect();
    tickers.sort();
    tickers.dedup();
    info!(tickers = tickers.len(), %start, end = %today, "fetching price histories");

    let prices = fetch_histories(source, &tickers, start, today, config).await;

    let scored: Vec<_> = matches
        .into_iter()
        .map(|m| {
            let perf = compute_performance(&m, &prices, today, config.max_price_offset_days);
            (m, perf)
        })
        .collect();
    db.replace_matched_trades(&scored)?;

    let basic = db.basic_tx_rows()?;
    let senator_rows = aggregate_senators(&basic, &scored);
    db.upsert_senator_analytics(&senator_rows)?;

    let party_rows = db.party_rollup_rows()?;
    db.upsert_party_analytics(&party_rows)?;

    let summary = RunSummary {
        purchases_matched: scored.len(),
        closed,
        open: scored.len() - closed,
        tickers_fetched: prices.len(),
        senators_updated: senator_rows.len(),
        parties_updated: party_rows.len(),
    };
    info!(?summary, "analytics run complete");
    Ok(summary)
}
