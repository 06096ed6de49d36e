//! Party-level rollup of senator analytics.
//!
//! Counts and dollar totals sum across a party's senators; percentage
//! fields average the per-senator values (a mean of means, so every senator
//! weighs equally regardless of trade count). The rollup itself is a single
//! grouped query over the senator rows, see `Db::party_rollup_rows`.

use serde::Serialize;

/// One party's aggregated analytics row. Field meanings mirror
/// [`SenatorAnalyticsRow`](crate::aggregate::SenatorAnalyticsRow), rolled up
/// across the party's senators.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PartyAnalyticsRow {
    pub party: String,
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
