//! End-to-end analytics run against an in-memory database and a canned
//! price source.

use std::collections::HashMap;
use std::future::Future;

use chrono::{Duration, NaiveDate};

use senatetrades_lib::{
    run_analytics, AnalyticsConfig, DailyClose, DailyCloseSource, Db, PositionStatus, Senator,
    SourceError, TransactionRecord,
};

/// Fixed price source serving one precomputed series per ticker.
struct FixedSource {
    series: HashMap<String, Vec<DailyClose>>,
}

impl DailyCloseSource for FixedSource {
    fn daily_closes(
        &self,
        ticker: &str,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> impl Future<Output = Result<Vec<DailyClose>, SourceError>> {
        let closes = self.series.get(ticker).cloned().unwrap_or_default();
        async move { Ok(closes) }
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Daily XYZ closes for Jan-Mar 2023: 100 through January, 120 from Feb 1.
fn xyz_series() -> Vec<DailyClose> {
    let mut closes = Vec::new();
    let mut day = date(2023, 1, 1);
    while day <= date(2023, 3, 31) {
        let close = if day >= date(2023, 2, 1) { 120.0 } else { 100.0 };
        closes.push(DailyClose { date: day, close });
        day += Duration::days(1);
    }
    closes
}

fn tx(
    ptr: &str,
    num: i64,
    ty: &str,
    date: &str,
    ticker: &str,
    amount: &str,
) -> TransactionRecord {
    TransactionRecord {
        ptr_id: ptr.to_string(),
        transaction_number: num,
        transaction_date: date.to_string(),
        owner: "Self".to_string(),
        ticker: ticker.to_string(),
        asset_name: Some("Example Corp".to_string()),
        asset_type: Some("Stock".to_string()),
        tx_type: ty.to_string(),
        amount: amount.to_string(),
        comment: None,
    }
}

fn seeded_db() -> Db {
    let mut db = Db::open_in_memory().unwrap();
    db.init().unwrap();
    db.upsert_senators(&[
        Senator {
            senator_id: 1,
            name: "Jane Doe".to_string(),
            state: Some("VT".to_string()),
            party: Some("D".to_string()),
        },
        Senator {
            senator_id: 2,
            name: "John Roe".to_string(),
            state: Some("OH".to_string()),
            party: Some("R".to_string()),
        },
    ])
    .unwrap();
    db.upsert_filing("f1", 1, Some("01/15/2023")).unwrap();
    db.upsert_filing("f2", 1, Some("02/05/2023")).unwrap();
    db.upsert_filing("f3", 2, Some("01/20/2023")).unwrap();
    db.upsert_transactions(&[
        // Senator 1: closed XYZ round trip, bought at 100, sold at 120.
        tx("f1", 1, "Purchase", "01/10/2023", "XYZ", "$15,001-$50,000"),
        tx("f2", 1, "Sale (Full)", "02/01/2023", "XYZ", "$15,001-$50,000"),
        // Senator 2: open position in a ticker the source cannot price.
        tx("f3", 1, "Purchase", "01/15/2023", "NOPE", "$1,001-$15,000"),
    ])
    .unwrap();
    db
}

fn fast_config() -> AnalyticsConfig {
    AnalyticsConfig {
        throttle_ms: 0,
        rate_limit_backoff_ms: 0,
        ..AnalyticsConfig::default()
    }
}

fn fixed_source() -> FixedSource {
    FixedSource {
        series: HashMap::from([("XYZ".to_string(), xyz_series())]),
    }
}

#[tokio::test]
async fn full_run_scores_and_aggregates() {
    let mut db = seeded_db();
    let summary = run_analytics(&mut db, &fixed_source(), &fast_config(), date(2023, 3, 15))
        .await
        .unwrap();

    assert_eq!(summary.purchases_matched, 2);
    assert_eq!(summary.closed, 1);
    assert_eq!(summary.open, 1);
    assert_eq!(summary.tickers_fetched, 1);
    assert_eq!(summary.senators_updated, 2);
    assert_eq!(summary.parties_updated, 2);

    // Senator 1's round trip: +20% realized on a 32,500 midpoint.
    let trades = db.matched_trades_for_senator(1).unwrap();
    assert_eq!(trades.len(), 1);
    let trade = &trades[0];
    assert_eq!(trade.status, PositionStatus::Closed.as_str());
    assert_eq!(trade.sale_ptr_id.as_deref(), Some("f2"));
    assert_eq!(trade.price_purchase, Some(100.0));
    assert_eq!(trade.price_closing, Some(120.0));
    assert_eq!(trade.percent_on_sale, Some(20.0));
    assert_eq!(trade.estimated_invested, Some(32500));
    assert_eq!(trade.net_profit, Some(6500.0));
    assert_eq!(trade.current_value, Some(39000.0));

    let jane = db.senator_analytics(1).unwrap().unwrap();
    assert_eq!(jane.total_transactions, 2);
    assert_eq!(jane.total_purchases, 1);
    assert_eq!(jane.total_sales, 1);
    assert_eq!(jane.avg_perf_current, Some(20.0));
    assert_eq!(jane.accuracy_current, 100.0);
    assert_eq!(jane.total_net_profit, 6500.0);

    // Senator 2's ticker never priced: the trade is stored but carries no
    // prices, and the analytics row keeps nulls rather than zeros.
    let trades = db.matched_trades_for_senator(2).unwrap();
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].status, PositionStatus::Open.as_str());
    assert_eq!(trades[0].price_purchase, None);
    assert_eq!(trades[0].percent_today, None);

    let john = db.senator_analytics(2).unwrap().unwrap();
    assert_eq!(john.avg_perf_current, None);
    assert_eq!(john.accuracy_current, 0.0);

    // Party rows mirror their single senators.
    let dem = db.party_analytics("D").unwrap().unwrap();
    assert_eq!(dem.total_transactions, 2);
    assert_eq!(dem.avg_perf_current, Some(20.0));
    let rep = db.party_analytics("R").unwrap().unwrap();
    assert_eq!(rep.avg_perf_current, None);
}

#[tokio::test]
async fn rerun_is_idempotent() {
    let mut db = seeded_db();
    let source = fixed_source();
    let config = fast_config();
    let today = date(2023, 3, 15);

    let first = run_analytics(&mut db, &source, &config, today).await.unwrap();
    let jane_first = db.senator_analytics(1).unwrap().unwrap();

    let second = run_analytics(&mut db, &source, &config, today).await.unwrap();
    let jane_second = db.senator_analytics(1).unwrap().unwrap();

    assert_eq!(first, second);
    assert_eq!(jane_first, jane_second);
    assert_eq!(db.matched_trade_count().unwrap(), 2);
}

#[tokio::test]
async fn empty_database_runs_clean() {
    let mut db = Db::open_in_memory().unwrap();
    db.init().unwrap();
    let summary = run_analytics(&mut db, &fixed_source(), &fast_config(), date(2023, 3, 15))
        .await
        .unwrap();
    assert_eq!(summary.purchases_matched, 0);
    assert_eq!(summary.senators_updated, 0);
    assert_eq!(db.matched_trade_count().unwrap(), 0);
}
