//! Per-trade performance at fixed horizons.
//!
//! Every matched purchase is priced at entry and at three later points:
//! seven days out, thirty days out, and "now" (the sale date for a closed
//! position, today for an open one). A missing price at either endpoint
//! leaves the corresponding percentage `None`; absent data is never coerced
//! to zero.

use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::amount::normalize_amount;
use crate::matcher::{MatchedPurchase, PositionStatus};
use crate::prices::PriceBook;

/// Resolved prices and returns for one matched purchase.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradePerformance {
    pub price_purchase: Option<f64>,
    pub price_7d: Option<f64>,
    pub price_30d: Option<f64>,
    /// Price at the claimed sale date. Closed positions only.
    pub price_closing: Option<f64>,
    /// Most recent price as of the run date. Open positions only.
    pub price_today: Option<f64>,
    pub percent_7d: Option<f64>,
    pub percent_30d: Option<f64>,
    pub percent_on_sale: Option<f64>,
    pub percent_today: Option<f64>,
    /// Midpoint of the disclosed amount range, when parseable.
    pub estimated_invested: Option<i64>,
    pub net_profit: Option<f64>,
    pub current_value: Option<f64>,
}

fn percent_change(purchase: f64, later: Option<f64>) -> Option<f64> {
    // A zero entry price makes the return undefined, not infinite.
    if purchase == 0.0 {
        return None;
    }
    later.map(|later| (later - purchase) / purchase * 100.0)
}

/// Price at a fixed horizon after purchase. Horizons that land beyond
/// `today` cannot have traded yet, so they take today's price instead of
/// scanning forward into the future.
fn horizon_price(
    prices: &PriceBook,
    ticker: &str,
    purchase_date: NaiveDate,
    days: i64,
    today: NaiveDate,
    max_offset: u32,
) -> Option<f64> {
    let target = purchase_date + Duration::days(days);
    if target > today {
        prices.price_on_or_before(ticker, today, max_offset)
    } else {
        prices.price_on_or_after(ticker, target, max_offset)
    }
}

/// Compute every price point and return for one matched purchase against
/// the run's price book.
pub fn compute_performance(
    matched: &MatchedPurchase,
    prices: &PriceBook,
    today: NaiveDate,
    max_offset: u32,
) -> TradePerformance {
    let ticker = &matched.purchase.ticker;
    let purchase_date = matched.purchase_date;

    let price_purchase = prices.price_on_or_after(ticker, purchase_date, max_offset);
    let price_7d = horizon_price(prices, ticker, purchase_date, 7, today, max_offset);
    let price_30d = horizon_price(prices, ticker, purchase_date, 30, today, max_offset);

    let (price_closing, price_today) = match matched.status {
        PositionStatus::Closed => {
            let sale_date = matched
                .sale
                .as_ref()
                .map(|s| s.date)
                .unwrap_or(purchase_date);
            (
                prices.price_on_or_after(ticker, sale_date, max_offset),
                None,
            )
        }
        PositionStatus::Open => (None, prices.price_on_or_before(ticker, today, max_offset)),
    };

    let mut perf = TradePerformance {
        price_purchase,
        price_7d,
        price_30d,
        price_closing,
        price_today,
        estimated_invested: normalize_amount(&matched.purchase.amount),
        ..TradePerformance::default()
    };

    if let Some(entry) = price_purchase {
        perf.percent_7d = percent_change(entry, price_7d);
        perf.percent_30d = percent_change(entry, price_30d);
        perf.percent_on_sale = percent_change(entry, price_closing);
        perf.percent_today = percent_change(entry, price_today);
    } else {
        debug!(
            ptr_id = %matched.purchase.ptr_id,
            transaction_number = matched.purchase.transaction_number,
            ticker = %ticker,
            %purchase_date,
            "no purchase price resolvable, returns left unset"
        );
    }

    // Realized (closed) or unrealized (open) profit against the estimated
    // invested midpoint.
    let terminal_pct = match matched.status {
        PositionStatus::Closed => perf.percent_on_sale,
        PositionStatus::Open => perf.percent_today,
    };
    if let (Some(invested), Some(pct)) = (perf.estimated_invested, terminal_pct) {
        let invested = invested as f64;
        let net = invested * pct / 100.0;
        perf.net_profit = Some(net);
        perf.current_value = Some(invested + net);
    }

    perf
}
