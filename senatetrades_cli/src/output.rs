//! Rendering helpers shared by the subcommands.
//!
//! Analytics rows render as two-column metric tables. Missing values print
//! as "n/a" here at the presentation edge; the stored rows keep them null.

use anyhow::Result;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use senatetrades_lib::{PartyAnalyticsRow, RunSummary, SenatorAnalyticsRow};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_metric_table(title: &str, rows: Vec<MetricRow>) {
    println!("{}", title);
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

fn fmt_opt_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v),
        None => "n/a".to_string(),
    }
}

fn fmt_dollars(value: f64) -> String {
    format!("${:.2}", value)
}

fn metric_rows(
    counts: [(&'static str, i64); 11],
    total_value: i64,
    average_amount: f64,
    avg_perf_7d: Option<f64>,
    avg_perf_30d: Option<f64>,
    avg_perf_current: Option<f64>,
    accuracy_7d: f64,
    accuracy_30d: f64,
    accuracy_current: f64,
    total_net_profit: f64,
    total_holdings_value: f64,
) -> Vec<MetricRow> {
    let mut rows: Vec<MetricRow> = counts
        .into_iter()
        .map(|(metric, value)| MetricRow {
            metric,
            value: value.to_string(),
        })
        .collect();
    rows.push(MetricRow {
        metric: "Total transaction value",
        value: fmt_dollars(total_value as f64),
    });
    rows.push(MetricRow {
        metric: "Average transaction amount",
        value: fmt_dollars(average_amount),
    });
    rows.push(MetricRow {
        metric: "Avg return (7d)",
        value: fmt_opt_pct(avg_perf_7d),
    });
    rows.push(MetricRow {
        metric: "Avg return (30d)",
        value: fmt_opt_pct(avg_perf_30d),
    });
    rows.push(MetricRow {
        metric: "Avg return (current)",
        value: fmt_opt_pct(avg_perf_current),
    });
    rows.push(MetricRow {
        metric: "Accuracy (7d)",
        value: fmt_opt_pct(Some(accuracy_7d)),
    });
    rows.push(MetricRow {
        metric: "Accuracy (30d)",
        value: fmt_opt_pct(Some(accuracy_30d)),
    });
    rows.push(MetricRow {
        metric: "Accuracy (current)",
        value: fmt_opt_pct(Some(accuracy_current)),
    });
    rows.push(MetricRow {
        metric: "Total net profit",
        value: fmt_dollars(total_net_profit),
    });
    rows.push(MetricRow {
        metric: "Total holdings value",
        value: fmt_dollars(total_holdings_value),
    });
    rows
}

pub fn print_senator_analytics(
    name: &str,
    row: &SenatorAnalyticsRow,
    format: &OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(row),
        OutputFormat::Table => {
            let rows = metric_rows(
                [
                    ("Total transactions", row.total_transactions),
                    ("Purchases", row.total_purchases),
                    ("Exchanges", row.total_exchanges),
                    ("Sales", row.total_sales),
                    ("Stock transactions", row.total_stock_transactions),
                    ("Other transactions", row.total_other_transactions),
                    ("Owner: child", row.count_ownership_child),
                    ("Owner: dependent child", row.count_ownership_dependent_child),
                    ("Owner: joint", row.count_ownership_joint),
                    ("Owner: self", row.count_ownership_self),
                    ("Owner: spouse", row.count_ownership_spouse),
                ],
                row.total_transaction_value,
                row.average_transaction_amount,
                row.avg_perf_7d,
                row.avg_perf_30d,
                row.avg_perf_current,
                row.accuracy_7d,
                row.accuracy_30d,
                row.accuracy_current,
                row.total_net_profit,
                row.total_value,
            );
            print_metric_table(name, rows);
            Ok(())
        }
    }
}

pub fn print_party_analytics(row: &PartyAnalyticsRow, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(row),
        OutputFormat::Table => {
            let rows = metric_rows(
                [
                    ("Total transactions", row.total_transactions),
                    ("Purchases", row.total_purchases),
                    ("Exchanges", row.total_exchanges),
                    ("Sales", row.total_sales),
                    ("Stock transactions", row.total_stock_transactions),
                    ("Other transactions", row.total_other_transactions),
                    ("Owner: child", row.count_ownership_child),
                    ("Owner: dependent child", row.count_ownership_dependent_child),
                    ("Owner: joint", row.count_ownership_joint),
                    ("Owner: self", row.count_ownership_self),
                    ("Owner: spouse", row.count_ownership_spouse),
                ],
                row.total_transaction_value,
                row.average_transaction_amount,
                row.avg_perf_7d,
                row.avg_perf_30d,
                row.avg_perf_current,
                row.accuracy_7d,
                row.accuracy_30d,
                row.accuracy_current,
                row.total_net_profit,
                row.total_value,
            );
            print_metric_table(&format!("Party: {}", row.party), rows);
            Ok(())
        }
    }
}

pub fn print_run_summary(summary: &RunSummary, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "purchases_matched": summary.purchases_matched,
                "closed": summary.closed,
                "open": summary.open,
                "tickers_fetched": summary.tickers_fetched,
                "senators_updated": summary.senators_updated,
                "parties_updated": summary.parties_updated,
            });
            print_json(&value)
        }
        OutputFormat::Table => {
            let rows = vec![
                MetricRow {
                    metric: "Purchases matched",
                    value: summary.purchases_matched.to_string(),
                },
                MetricRow {
                    metric: "Closed positions",
                    value: summary.closed.to_string(),
                },
                MetricRow {
                    metric: "Open positions",
                    value: summary.open.to_string(),
                },
                MetricRow {
                    metric: "Tickers fetched",
                    value: summary.tickers_fetched.to_string(),
                },
                MetricRow {
                    metric: "Senators updated",
                    value: summary.senators_updated.to_string(),
                },
                MetricRow {
                    metric: "Parties updated",
                    value: summary.parties_updated.to_string(),
                },
            ];
            print_metric_table("Analytics run", rows);
            Ok(())
        }
    }
}
