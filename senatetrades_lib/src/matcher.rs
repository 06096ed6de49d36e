//! Purchase/sale reconciliation.
//!
//! Pairs each qualifying purchase with the chronologically-first qualifying
//! sale of the same ticker/owner/senator that has not already been claimed
//! by an earlier purchase. Claims happen purchase-by-purchase in strict
//! chronological order, so an earlier purchase always has first pick of
//! sales -- "first lot, first exit", not true lot accounting.
//!
//! Candidate sets and chosen sales are logged at debug level; enable the
//! `senatetrades_lib::matcher` target to audit a run's matching decisions.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

/// Filing dates arrive as MM/DD/YYYY strings; everything downstream works
/// on parsed dates. `None` is a data-quality signal, not an error.
pub fn parse_tx_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%m/%d/%Y").ok()
}

/// A purchase row pulled from storage, already filtered to
/// Purchase-type/Stock/concrete-ticker and joined to its filing's senator.
#[derive(Debug, Clone)]
pub struct PurchaseTx {
    pub ptr_id: String,
    pub transaction_number: i64,
    pub senator_id: i64,
    pub transaction_date: String,
    pub ticker: String,
    pub owner: String,
    pub amount: String,
}

/// A sale-family row pulled from storage, filtered the same way.
#[derive(Debug, Clone)]
pub struct SaleTx {
    pub ptr_id: String,
    pub transaction_number: i64,
    pub senator_id: i64,
    pub transaction_date: String,
    pub ticker: String,
    pub owner: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionStatus {
    Open,
    Closed,
}

impl PositionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Closed => "Closed",
        }
    }
}

/// Reference to the sale claimed by a purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRef {
    pub ptr_id: String,
    pub transaction_number: i64,
    pub date: NaiveDate,
    pub raw_date: String,
}

/// One purchase with its terminal match outcome.
#[derive(Debug, Clone)]
pub struct MatchedPurchase {
    pub purchase: PurchaseTx,
    pub purchase_date: NaiveDate,
    pub status: PositionStatus,
    pub sale: Option<SaleRef>,
}

/// Canonical ordering for both scans: parsed date ascending, then
/// (ptr_id, transaction_number) ascending as the stable tie-break.
fn canonical_key<'a>(
    date: NaiveDate,
    ptr_id: &'a str,
    transaction_number: i64,
) -> (NaiveDate, &'a str, i64) {
    (date, ptr_id, transaction_number)
}

/// Match every purchase against the sale pool.
///
/// Purchases whose transaction date fails to parse are logged and skipped
/// entirely (absent from the results). A sale key is claimed by at most one
/// purchase per run.
pub fn match_transactions(
    purchases: Vec<PurchaseTx>,
    sales: Vec<SaleTx>,
) -> Vec<MatchedPurchase> {
    // Parse and order purchases up front; unparseable dates drop out here.
    let mut dated_purchases: Vec<(NaiveDate, PurchaseTx)> = Vec::with_capacity(purchases.len());
    for purchase in purchases {
        match parse_tx_date(&purchase.transaction_date) {
            Some(date) => dated_purchases.push((date, purchase)),
            None => warn!(
                ptr_id = %purchase.ptr_id,
                transaction_number = purchase.transaction_number,
                raw_date = %purchase.transaction_date,
                "unparseable purchase date, skipping purchase"
            ),
        }
    }
    dated_purchases.sort_by(|(da, a), (db, b)| {
        canonical_key(*da, &a.ptr_id, a.transaction_number)
            .cmp(&canonical_key(*db, &b.ptr_id, b.transaction_number))
    });

    // Group the sale pool by (senator, ticker), each group in canonical order.
    let mut sale_pool: HashMap<(i64, String), Vec<(NaiveDate, SaleTx)>> = HashMap::new();
    for sale in sales {
        match parse_tx_date(&sale.transaction_date) {
            Some(date) => sale_pool
                .entry((sale.senator_id, sale.ticker.clone()))
                .or_default()
                .push((date, sale)),
            None => warn!(
                ptr_id = %sale.ptr_id,
                transaction_number = sale.transaction_number,
                raw_date = %sale.transaction_date,
                "unparseable sale date, excluding sale from matching"
            ),
        }
    }
    for group in sale_pool.values_mut() {
        group.sort_by(|(da, a), (db, b)| {
            canonical_key(*da, &a.ptr_id, a.transaction_number)
                .cmp(&canonical_key(*db, &b.ptr_id, b.transaction_number))
        });
    }

    let mut claimed: HashSet<(String, i64)> = HashSet::new();
    let mut results = Vec::with_capacity(dated_purchases.len());

    for (purchase_date, purchase) in dated_purchases {
        debug!(
            ptr_id = %purchase.ptr_id,
            transaction_number = purchase.transaction_number,
            %purchase_date,
            ticker = %purchase.ticker,
            owner = %purchase.owner,
            "matching purchase"
        );

        let candidates = sale_pool
            .get(&(purchase.senator_id, purchase.ticker.clone()))
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        let owner = purchase.owner.trim().to_lowercase();
        let chosen = candidates.iter().find(|(sale_date, sale)| {
            *sale_date > purchase_date
                && sale.owner.trim().to_lowercase() == owner
                && !claimed.contains(&(sale.ptr_id.clone(), sale.transaction_number))
        });

        let sale = match chosen {
            Some((sale_date, sale)) => {
                claimed.insert((sale.ptr_id.clone(), sale.transaction_number));
                debug!(
                    sale_ptr_id = %sale.ptr_id,
                    sale_transaction_number = sale.transaction_number,
                    sale_date = %sale_date,
                    "claimed sale"
                );
                Some(SaleRef {
                    ptr_id: sale.ptr_id.clone(),
                    transaction_number: sale.transaction_number,
                    date: *sale_date,
                    raw_date: sale.transaction_date.clone(),
                })
            }
            None => {
                debug!(
                    ptr_id = %purchase.ptr_id,
                    transaction_number = purchase.transaction_number,
                    "no eligible sale, position stays open"
                );
                None
            }
        };

        let status = if sale.is_some() {
            PositionStatus::Closed
        } else {
            PositionStatus::Open
        };
        results.push(MatchedPurchase {
            purchase,
            purchase_date,
            status,
            sale,
        });
    }

    let closed = results
        .iter()
        .filter(|m| m.status == PositionStatus::Closed)
        .count();
    info!(
        purchases = results.len(),
        closed,
        open = results.len() - closed,
        "transaction matching complete"
    );
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn purchase(ptr: &str, num: i64, date: &str, ticker: &str, owner: &str) -> PurchaseTx {
        PurchaseTx {
            ptr_id: ptr.to_string(),
            transaction_number: num,
            senator_id: 1,
            transaction_date: date.to_string(),
            ticker: ticker.to_string(),
            owner: owner.to_string(),
            amount: "$15,001-$50,000".to_string(),
        }
    }

    fn sale(ptr: &str, num: i64, date: &str, ticker: &str, owner: &str) -> SaleTx {
        SaleTx {
            ptr_id: ptr.to_string(),
            transaction_number: num,
            senator_id: 1,
            transaction_date: date.to_string(),
            ticker: ticker.to_string(),
            owner: owner.to_string(),
        }
    }

    #[test]
    fn earliest_eligible_sale_is_claimed() {
        let matches = match_transactions(
            vec![purchase("p1", 1, "01/10/2023", "XYZ", "Self")],
            vec![
                sale("s2", 1, "03/01/2023", "XYZ", "Self"),
                sale("s1", 1, "02/01/2023", "XYZ", "Self"),
            ],
        );
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].status, PositionStatus::Closed);
        assert_eq!(matches[0].sale.as_ref().unwrap().ptr_id, "s1");
    }

    #[test]
    fn sale_claimed_at_most_once() {
        // Two purchases, one sale: the earlier purchase wins, the later stays open.
        let matches = match_transactions(
            vec![
                purchase("p2", 1, "01/20/2023", "XYZ", "Self"),
                purchase("p1", 1, "01/10/2023", "XYZ", "Self"),
            ],
            vec![sale("s1", 1, "02/01/2023", "XYZ", "Self")],
        );
        assert_eq!(matches.len(), 2);
        // Results come back in chronological purchase order.
        assert_eq!(matches[0].purchase.ptr_id, "p1");
        assert_eq!(matches[0].status, PositionStatus::Closed);
        assert_eq!(matches[1].purchase.ptr_id, "p2");
        assert_eq!(matches[1].status, PositionStatus::Open);

        let claimed: Vec<_> = matches
            .iter()
            .filter_map(|m| m.sale.as_ref())
            .map(|s| (s.ptr_id.clone(), s.transaction_number))
            .collect();
        let mut deduped = claimed.clone();
        deduped.dedup();
        assert_eq!(claimed, deduped);
    }

    #[test]
    fn sale_date_must_be_strictly_later() {
        let matches = match_transactions(
            vec![purchase("p1", 1, "02/01/2023", "XYZ", "Self")],
            vec![sale("s1", 1, "02/01/2023", "XYZ", "Self")],
        );
        assert_eq!(matches[0].status, PositionStatus::Open);
    }

    #[test]
    fn owner_match_is_case_insensitive_and_trimmed() {
        let matches = match_transactions(
            vec![purchase("p1", 1, "01/10/2023", "XYZ", "Self")],
            vec![sale("s1", 1, "02/01/2023", "XYZ", "  SELF ")],
        );
        assert_eq!(matches[0].status, PositionStatus::Closed);
    }

    #[test]
    fn different_owner_does_not_match() {
        let matches = match_transactions(
            vec![purchase("p1", 1, "01/10/2023", "XYZ", "Self")],
            vec![sale("s1", 1, "02/01/2023", "XYZ", "Spouse")],
        );
        assert_eq!(matches[0].status, PositionStatus::Open);
    }

    #[test]
    fn different_ticker_does_not_match() {
        let matches = match_transactions(
            vec![purchase("p1", 1, "01/10/2023", "XYZ", "Self")],
            vec![sale("s1", 1, "02/01/2023", "ABC", "Self")],
        );
        assert_eq!(matches[0].status, PositionStatus::Open);
    }

    #[test]
    fn unparseable_purchase_date_is_absent_from_results() {
        let matches = match_transactions(
            vec![
                purchase("p1", 1, "13/45/2023", "XYZ", "Self"),
                purchase("p2", 1, "01/10/2023", "XYZ", "Self"),
            ],
            vec![],
        );
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].purchase.ptr_id, "p2");
    }

    #[test]
    fn same_day_purchases_tie_break_on_key() {
        // Two purchases on the same day: the lower (ptr_id, number) key
        // processes first and claims the single sale.
        let matches = match_transactions(
            vec![
                purchase("p2", 1, "01/10/2023", "XYZ", "Self"),
                purchase("p1", 1, "01/10/2023", "XYZ", "Self"),
            ],
            vec![sale("s1", 1, "02/01/2023", "XYZ", "Self")],
        );
        assert_eq!(matches[0].purchase.ptr_id, "p1");
        assert_eq!(matches[0].status, PositionStatus::Closed);
        assert_eq!(matches[1].status, PositionStatus::Open);
    }

    #[test]
    fn same_day_sales_tie_break_on_key() {
        let matches = match_transactions(
            vec![purchase("p1", 1, "01/10/2023", "XYZ", "Self")],
            vec![
                sale("s1", 2, "02/01/2023", "XYZ", "Self"),
                sale("s1", 1, "02/01/2023", "XYZ", "Self"),
            ],
        );
        assert_eq!(matches[0].sale.as_ref().unwrap().transaction_number, 1);
    }

    #[test]
    fn unparseable_sale_date_is_not_a_candidate() {
        let matches = match_transactions(
            vec![purchase("p1", 1, "01/10/2023", "XYZ", "Self")],
            vec![
                sale("s1", 1, "not-a-date", "XYZ", "Self"),
                sale("s2", 1, "02/01/2023", "XYZ", "Self"),
            ],
        );
        assert_eq!(matches[0].sale.as_ref().unwrap().ptr_id, "s2");
    }
}
