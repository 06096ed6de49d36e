//! Per-senator analytics rollup.
//!
//! Two passes over different inputs: a basic pass over every disclosed
//! transaction (type/asset/owner counts and dollar volume), and a
//! performance pass over matched stock purchases that resolved a purchase
//! price. Senators with no priced purchases keep zeroed accuracies and
//! `None` horizon averages rather than fabricated returns.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::info;

use crate::amount::normalize_amount;
use crate::matcher::{MatchedPurchase, PositionStatus};
use crate::performance::TradePerformance;

/// Minimal projection of one disclosed transaction for the basic pass.
#[derive(Debug, Clone)]
pub struct BasicTxRow {
    pub senator_id: i64,
    pub tx_type: String,
    pub asset_type: Option<String>,
    pub owner: String,
    pub amount: String,
}

/// One senator's full analytics row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SenatorAnalyticsRow {
    pub senator_id: i64,
    pub total_transactions: i64,
    pub total_purchases: i64,
    pub total_exchanges: i64,
    pub total_sales: i64,
    pub total_stock_transactions: i64,
    pub total_other_transactions: i64,
    pub count_ownership_child: i64,
    pub count_ownership_dependent_child: i64,
    pub count_ownership_joint: i64,
    pub count_ownership_self: i64,
    pub count_ownership_spouse: i64,
    pub total_transaction_value: i64,
    pub average_transaction_amount: f64,
    pub avg_perf_7d: Option<f64>,
    pub avg_perf_30d: Option<f64>,
    pub avg_perf_current: Option<f64>,
    pub accuracy_7d: f64,
    pub accuracy_30d: f64,
    pub accuracy_current: f64,
    pub total_net_profit: f64,
    pub total_value: f64,
}

/// Running sums for one return horizon.
#[derive(Debug, Default)]
struct HorizonAccumulator {
    sum: f64,
    count: i64,
    positive: i64,
}

impl HorizonAccumulator {
    fn add(&mut self, pct: Option<f64>) {
        if let Some(pct) = pct {
            self.sum += pct;
            self.count += 1;
            if pct > 0.0 {
                self.positive += 1;
            }
        }
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }

    /// Share of priced purchases whose return at this horizon was positive.
    /// Unresolvable horizons count against accuracy, not toward it.
    fn accuracy(&self, denominator: i64) -> f64 {
        if denominator == 0 {
            0.0
        } else {
            self.positive as f64 / denominator as f64 * 100.0
        }
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b)
}

/// Aggregate the basic and performance inputs into one row per senator.
///
/// Output is ordered by `senator_id`; running the same inputs twice yields
/// identical rows.
pub fn aggregate_senators(
    basic: &[BasicTxRow],
    perf: &[(MatchedPurchase, TradePerformance)],
) -> Vec<SenatorAnalyticsRow> {
    let mut rows: BTreeMap<i64, SenatorAnalyticsRow> = BTreeMap::new();
    // Count of amounts that actually normalized, per senator; divisor for
    // the average so unparseable amounts do not drag it toward zero.
    let mut valid_amounts: BTreeMap<i64, i64> = BTreeMap::new();

    for tx in basic {
        let row = rows.entry(tx.senator_id).or_insert_with(|| {
            SenatorAnalyticsRow {
                senator_id: tx.senator_id,
                ..SenatorAnalyticsRow::default()
            }
        });
        row.total_transactions += 1;

        let ty = tx.tx_type.to_lowercase();
        if ty.contains("purchase") {
            row.total_purchases += 1;
        } else if ty.contains("exchange") {
            row.total_exchanges += 1;
        } else if ty.contains("sale") {
            row.total_sales += 1;
        }

        match tx.asset_type.as_deref() {
            Some(asset) if eq_ignore_case(asset, "stock") => row.total_stock_transactions += 1,
            _ => row.total_other_transactions += 1,
        }

        // Exact ownership labels from the filing form. "Dependant Child"
        // is a recurring misspelling in real filings.
        let owner = tx.owner.trim();
        if eq_ignore_case(owner, "child") {
            row.count_ownership_child += 1;
        } else if eq_ignore_case(owner, "dependent child")
            || eq_ignore_case(owner, "dependant child")
        {
            row.count_ownership_dependent_child += 1;
        } else if eq_ignore_case(owner, "joint") {
            row.count_ownership_joint += 1;
        } else if eq_ignore_case(owner, "self") {
            row.count_ownership_self += 1;
        } else if eq_ignore_case(owner, "spouse") {
            row.count_ownership_spouse += 1;
        }

        if let Some(value) = normalize_amount(&tx.amount) {
            row.total_transaction_value += value;
            *valid_amounts.entry(tx.senator_id).or_insert(0) += 1;
        }
    }

    for (senator_id, row) in rows.iter_mut() {
        let divisor = valid_amounts.get(senator_id).copied().unwrap_or(0);
        row.average_transaction_amount = if divisor > 0 {
            row.total_transaction_value as f64 / divisor as f64
        } else {
            0.0
        };
    }

    // Performance pass: only matches whose purchase price resolved.
    let mut horizons: BTreeMap<i64, (HorizonAccumulator, HorizonAccumulator, HorizonAccumulator)> =
        BTreeMap::new();
    let mut priced: BTreeMap<i64, i64> = BTreeMap::new();

    for (matched, perf) in perf {
        if perf.price_purchase.is_none() {
            continue;
        }
        let senator_id = matched.purchase.senator_id;
        *priced.entry(senator_id).or_insert(0) += 1;

        let (h7, h30, hcur) = horizons.entry(senator_id).or_default();
        h7.add(perf.percent_7d);
        h30.add(perf.percent_30d);
        let current = match matched.status {
            PositionStatus::Closed => perf.percent_on_sale,
            PositionStatus::Open => perf.percent_today,
        };
        hcur.add(current);

        let row = rows.entry(senator_id).or_insert_with(|| SenatorAnalyticsRow {
            senator_id,
            ..SenatorAnalyticsRow::default()
        });
        if let Some(net) = perf.net_profit {
            row.total_net_profit += net;
        }
        if let Some(value) = perf.current_value {
            row.total_value += value;
        }
    }

    for (senator_id, (h7, h30, hcur)) in &horizons {
        let denominator = priced.get(senator_id).copied().unwrap_or(0);
        if let Some(row) = rows.get_mut(senator_id) {
            row.avg_perf_7d = h7.mean();
            row.avg_perf_30d = h30.mean();
            row.avg_perf_current = hcur.mean();
            row.accuracy_7d = h7.accuracy(denominator);
            row.accuracy_30d = h30.accuracy(denominator);
            row.accuracy_current = hcur.accuracy(denominator);
        }
    }

    let rows: Vec<SenatorAnalyticsRow> = rows.into_values().collect();
    info!(senators = rows.len(), "senator aggregation complete");
    rows
}
