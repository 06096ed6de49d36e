//! SQLite storage for Senate Trades data.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use crate::aggregate::{BasicTxRow, SenatorAnalyticsRow};
use crate::matcher::{MatchedPurchase, PurchaseTx, SaleTx};
use crate::party::PartyAnalyticsRow;
use crate::performance::TradePerformance;

#[derive(thiserror::Error, Debug)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// One senator as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Senator {
    pub senator_id: i64,
    pub name: String,
    pub state: Option<String>,
    pub party: Option<String>,
}

/// One disclosed transaction as filed, keyed by (ptr_id, transaction_number)
/// within its filing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub ptr_id: String,
    pub transaction_number: i64,
    pub transaction_date: String,
    pub owner: String,
    pub ticker: String,
    pub asset_name: Option<String>,
    pub asset_type: Option<String>,
    pub tx_type: String,
    pub amount: String,
    pub comment: Option<String>,
}

/// One matched trade as persisted, prices and returns included.
#[derive(Debug, Clone, Serialize)]
pub struct MatchedTradeRow {
    pub purchase_ptr_id: String,
    pub purchase_transaction_number: i64,
    pub senator_id: i64,
    pub purchase_date: String,
    pub ticker: String,
    pub owner: String,
    pub amount: String,
    pub status: String,
    pub sale_ptr_id: Option<String>,
    pub sale_transaction_number: Option<i64>,
    pub sale_date: Option<String>,
    pub estimated_invested: Option<i64>,
    pub price_purchase: Option<f64>,
    pub price_7d: Option<f64>,
    pub price_30d: Option<f64>,
    pub price_closing: Option<f64>,
    pub price_today: Option<f64>,
    pub percent_7d: Option<f64>,
    pub percent_30d: Option<f64>,
    pub percent_on_sale: Option<f64>,
    pub percent_today: Option<f64>,
    pub net_profit: Option<f64>,
    pub current_value: Option<f64>,
}

pub struct Db {
    conn: Connection,
}

impl Db {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;
        Ok(Self { conn })
    }

    pub fn init(&self) -> Result<(), DbError> {
        let schema = include_str!("../../schema/sqlite.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    pub fn upsert_senators(&mut self, senators: &[Senator]) -> Result<(), DbError> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO senators (senator_id, name, state, party)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(senator_id) DO UPDATE SET
                   name = excluded.name,
                   state = COALESCE(excluded.state, senators.state),
                   party = COALESCE(excluded.party, senators.party)",
            )?;
            for s in senators {
                stmt.execute(params![s.senator_id, s.name, s.state, s.party])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    pub fn upsert_filing(
        &self,
        ptr_id: &str,
        senator_id: i64,
        filing_date: Option<&str>,
    ) -> Result<(), DbError> {
        self.conn.execute(
            "INSERT INTO filings (ptr_id, senator_id, filing_date)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(ptr_id) DO UPDATE SET
               senator_id = excluded.senator_id,
               filing_date = COALESCE(excluded.filing_date, filings.filing_date)",
            params![ptr_id, senator_id, filing_date],
        )?;
        Ok(())
    }

    pub fn upsert_transactions(&mut self, records: &[TransactionRecord]) -> Result<(), DbError> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO transactions (
                   ptr_id, transaction_number, transaction_date, owner, ticker,
                   asset_name, asset_type, type, amount, comment
                 )
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                 ON CONFLICT(ptr_id, transaction_number) DO UPDATE SET
                   transaction_date = excluded.transaction_date,
                   owner = excluded.owner,
                   ticker = excluded.ticker,
                   asset_name = excluded.asset_name,
                   asset_type = excluded.asset_type,
                   type = excluded.type,
                   amount = excluded.amount,
                   comment = COALESCE(excluded.comment, transactions.comment)",
            )?;
            for r in records {
                stmt.execute(params![
                    r.ptr_id,
                    r.transaction_number,
                    r.transaction_date,
                    r.owner,
                    r.ticker,
                    r.asset_name,
                    r.asset_type,
                    r.tx_type,
                    r.amount,
                    r.comment,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    pub fn senators(&self) -> Result<Vec<Senator>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT senator_id, name, state, party FROM senators ORDER BY senator_id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Senator {
                senator_id: row.get(0)?,
                name: row.get(1)?,
                state: row.get(2)?,
                party: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Stock purchases eligible for matching: purchase-family type, Stock
    /// asset, concrete ticker.
    pub fn purchase_rows(&self) -> Result<Vec<PurchaseTx>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT t.ptr_id, t.transaction_number, f.senator_id, t.transaction_date,
                    t.ticker, t.owner, t.amount
             FROM transactions t
             JOIN filings f ON f.ptr_id = t.ptr_id
             WHERE LOWER(t.type) LIKE '%purchase%'
               AND LOWER(COALESCE(t.asset_type, '')) = 'stock'
               AND t.ticker <> '--'",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(PurchaseTx {
                ptr_id: row.get(0)?,
                transaction_number: row.get(1)?,
                senator_id: row.get(2)?,
                transaction_date: row.get(3)?,
                ticker: row.get(4)?,
                owner: row.get(5)?,
                amount: row.get(6)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Sale-family counterparts to [`purchase_rows`](Self::purchase_rows).
    pub fn sale_rows(&self) -> Result<Vec<SaleTx>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT t.ptr_id, t.transaction_number, f.senator_id, t.transaction_date,
                    t.ticker, t.owner
             FROM transactions t
             JOIN filings f ON f.ptr_id = t.ptr_id
             WHERE LOWER(t.type) LIKE '%sale%'
               AND LOWER(COALESCE(t.asset_type, '')) = 'stock'
               AND t.ticker <> '--'",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(SaleTx {
                ptr_id: row.get(0)?,
                transaction_number: row.get(1)?,
                senator_id: row.get(2)?,
                transaction_date: row.get(3)?,
                ticker: row.get(4)?,
                owner: row.get(5)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Every disclosed transaction joined to its filer, for the basic
    /// aggregation pass. No type or asset filtering here.
    pub fn basic_tx_rows(&self) -> Result<Vec<BasicTxRow>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT f.senator_id, t.type, t.asset_type, t.owner, t.amount
             FROM transactions t
             JOIN filings f ON f.ptr_id = t.ptr_id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(BasicTxRow {
                senator_id: row.get(0)?,
                tx_type: row.get(1)?,
                asset_type: row.get(2)?,
                owner: row.get(3)?,
                amount: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Replace the matched_trades table with this run's results. A full
    /// rebuild: stale matches from prior runs never linger.
    pub fn replace_matched_trades(
        &mut self,
        trades: &[(MatchedPurchase, TradePerformance)],
    ) -> Result<(), DbError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM matched_trades", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO matched_trades (
                   purchase_ptr_id, purchase_transaction_number, senator_id,
                   purchase_date, ticker, owner, amount, status,
                   sale_ptr_id, sale_transaction_number, sale_date,
                   estimated_invested,
                   price_purchase, price_7d, price_30d, price_closing, price_today,
                   percent_7d, percent_30d, percent_on_sale, percent_today,
                   net_profit, current_value
                 )
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                         ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23)",
            )?;
            for (m, p) in trades {
                stmt.execute(params![
                    m.purchase.ptr_id,
                    m.purchase.transaction_number,
                    m.purchase.senator_id,
                    m.purchase.transaction_date,
                    m.purchase.ticker,
                    m.purchase.owner,
                    m.purchase.amount,
                    m.status.as_str(),
                    m.sale.as_ref().map(|s| s.ptr_id.clone()),
                    m.sale.as_ref().map(|s| s.transaction_number),
                    m.sale.as_ref().map(|s| s.raw_date.clone()),
                    p.estimated_invested,
                    p.price_purchase,
                    p.price_7d,
                    p.price_30d,
                    p.price_closing,
                    p.price_today,
                    p.percent_7d,
                    p.percent_30d,
                    p.percent_on_sale,
                    p.percent_today,
                    p.net_profit,
                    p.current_value,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    pub fn matched_trades_for_senator(
        &self,
        senator_id: i64,
    ) -> Result<Vec<MatchedTradeRow>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT purchase_ptr_id, purchase_transaction_number, senator_id,
                    purchase_date, ticker, owner, amount, status,
                    sale_ptr_id, sale_transaction_number, sale_date,
                    estimated_invested,
                    price_purchase, price_7d, price_30d, price_closing, price_today,
                    percent_7d, percent_30d, percent_on_sale, percent_today,
                    net_profit, current_value
             FROM matched_trades
             WHERE senator_id = ?1
             ORDER BY purchase_date, purchase_ptr_id, purchase_transaction_number",
        )?;
        let rows = stmt.query_map(params![senator_id], |row| {
            Ok(MatchedTradeRow {
                purchase_ptr_id: row.get(0)?,
                purchase_transaction_number: row.get(1)?,
                senator_id: row.get(2)?,
                purchase_date: row.get(3)?,
                ticker: row.get(4)?,
                owner: row.get(5)?,
                amount: row.get(6)?,
                status: row.get(7)?,
                sale_ptr_id: row.get(8)?,
                sale_transaction_number: row.get(9)?,
                sale_date: row.get(10)?,
                estimated_invested: row.get(11)?,
                price_purchase: row.get(12)?,
                price_7d: row.get(13)?,
                price_30d: row.get(14)?,
                price_closing: row.get(15)?,
                price_today: row.get(16)?,
                percent_7d: row.get(17)?,
                percent_30d: row.get(18)?,
                percent_on_sale: row.get(19)?,
                percent_today: row.get(20)?,
                net_profit: row.get(21)?,
                current_value: row.get(22)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn matched_trade_count(&self) -> Result<i64, DbError> {
        let count =
            self.conn
                .query_row("SELECT COUNT(*) FROM matched_trades", [], |row| row.get(0))?;
        Ok(count)
    }

    pub fn upsert_senator_analytics(
        &mut self,
        rows: &[SenatorAnalyticsRow],
    ) -> Result<(), DbError> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO senator_analytics (
                   senator_id,
                   total_transaction_count, total_purchase_count,
                   total_exchange_count, total_sale_count,
                   total_stock_transactions, total_other_transactions,
                   count_ownership_child, count_ownership_dependent_child,
                   count_ownership_joint, count_ownership_self, count_ownership_spouse,
                   total_transaction_value, average_transaction_amount,
                   avg_perf_7d, avg_perf_30d, avg_perf_current,
                   accuracy_7d, accuracy_30d, accuracy_current,
                   total_net_profit, total_value
                 )
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                         ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22)
                 ON CONFLICT(senator_id) DO UPDATE SET
                   total_transaction_count = excluded.total_transaction_count,
                   total_purchase_count = excluded.total_purchase_count,
                   total_exchange_count = excluded.total_exchange_count,
                   total_sale_count = excluded.total_sale_count,
                   total_stock_transactions = excluded.total_stock_transactions,
                   total_other_transactions = excluded.total_other_transactions,
                   count_ownership_child = excluded.count_ownership_child,
                   count_ownership_dependent_child = excluded.count_ownership_dependent_child,
                   count_ownership_joint = excluded.count_ownership_joint,
                   count_ownership_self = excluded.count_ownership_self,
                   count_ownership_spouse = excluded.count_ownership_spouse,
                   total_transaction_value = excluded.total_transaction_value,
                   average_transaction_amount = excluded.average_transaction_amount,
                   avg_perf_7d = excluded.avg_perf_7d,
                   avg_perf_30d = excluded.avg_perf_30d,
                   avg_perf_current = excluded.avg_perf_current,
                   accuracy_7d = excluded.accuracy_7d,
                   accuracy_30d = excluded.accuracy_30d,
                   accuracy_current = excluded.accuracy_current,
                   total_net_profit = excluded.total_net_profit,
                   total_value = excluded.total_value",
            )?;
            for r in rows {
                stmt.execute(params![
                    r.senator_id,
                    r.total_transactions,
                    r.total_purchases,
                    r.total_exchanges,
                    r.total_sales,
                    r.total_stock_transactions,
                    r.total_other_transactions,
                    r.count_ownership_child,
                    r.count_ownership_dependent_child,
                    r.count_ownership_joint,
                    r.count_ownership_self,
                    r.count_ownership_spouse,
                    r.total_transaction_value,
                    r.average_transaction_amount,
                    r.avg_perf_7d,
                    r.avg_perf_30d,
                    r.avg_perf_current,
                    r.accuracy_7d,
                    r.accuracy_30d,
                    r.accuracy_current,
                    r.total_net_profit,
                    r.total_value,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    pub fn senator_analytics(
        &self,
        senator_id: i64,
    ) -> Result<Option<SenatorAnalyticsRow>, DbError> {
        let row = self
            .conn
            .query_row(
                "SELECT senator_id,
                        total_transaction_count, total_purchase_count,
                        total_exchange_count, total_sale_count,
                        total_stock_transactions, total_other_transactions,
                        count_ownership_child, count_ownership_dependent_child,
                        count_ownership_joint, count_ownership_self, count_ownership_spouse,
                        total_transaction_value, average_transaction_amount,
                        avg_perf_7d, avg_perf_30d, avg_perf_current,
                        accuracy_7d, accuracy_30d, accuracy_current,
                        total_net_profit, total_value
                 FROM senator_analytics WHERE senator_id = ?1",
                params![senator_id],
                |row| {
                    Ok(SenatorAnalyticsRow {
                        senator_id: row.get(0)?,
                        total_transactions: row.get(1)?,
                        total_purchases: row.get(2)?,
                        total_exchanges: row.get(3)?,
                        total_sales: row.get(4)?,
                        total_stock_transactions: row.get(5)?,
                        total_other_transactions: row.get(6)?,
                        count_ownership_child: row.get(7)?,
                        count_ownership_dependent_child: row.get(8)?,
                        count_ownership_joint: row.get(9)?,
                        count_ownership_self: row.get(10)?,
                        count_ownership_spouse: row.get(11)?,
                        total_transaction_value: row.get(12)?,
                        average_transaction_amount: row.get(13)?,
                        avg_perf_7d: row.get(14)?,
                        avg_perf_30d: row.get(15)?,
                        avg_perf_current: row.get(16)?,
                        accuracy_7d: row.get(17)?,
                        accuracy_30d: row.get(18)?,
                        accuracy_current: row.get(19)?,
                        total_net_profit: row.get(20)?,
                        total_value: row.get(21)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    /// Roll senator analytics up to party level. Counts and dollar totals
    /// sum; percentage fields average per senator, with NULL horizon means
    /// excluded from the average.
    pub fn party_rollup_rows(&self) -> Result<Vec<PartyAnalyticsRow>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT s.party,
                    SUM(a.total_transaction_count), SUM(a.total_purchase_count),
                    SUM(a.total_exchange_count), SUM(a.total_sale_count),
                    SUM(a.total_stock_transactions), SUM(a.total_other_transactions),
                    SUM(a.count_ownership_child), SUM(a.count_ownership_dependent_child),
                    SUM(a.count_ownership_joint), SUM(a.count_ownership_self),
                    SUM(a.count_ownership_spouse),
                    SUM(a.total_transaction_value), AVG(a.average_transaction_amount),
                    AVG(a.avg_perf_7d), AVG(a.avg_perf_30d), AVG(a.avg_perf_current),
                    AVG(a.accuracy_7d), AVG(a.accuracy_30d), AVG(a.accuracy_current),
                    SUM(a.total_net_profit), SUM(a.total_value)
             FROM senator_analytics a
             JOIN senators s ON s.senator_id = a.senator_id
             WHERE s.party IS NOT NULL
             GROUP BY s.party
             ORDER BY s.party",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(PartyAnalyticsRow {
                party: row.get(0)?,
                total_transactions: row.get(1)?,
                total_purchases: row.get(2)?,
                total_exchanges: row.get(3)?,
                total_sales: row.get(4)?,
                total_stock_transactions: row.get(5)?,
                total_other_transactions: row.get(6)?,
                count_ownership_child: row.get(7)?,
                count_ownership_dependent_child: row.get(8)?,
                count_ownership_joint: row.get(9)?,
                count_ownership_self: row.get(10)?,
                count_ownership_spouse: row.get(11)?,
                total_transaction_value: row.get(12)?,
                average_transaction_amount: row.get(13)?,
                avg_perf_7d: row.get(14)?,
                avg_perf_30d: row.get(15)?,
                avg_perf_current: row.get(16)?,
                accuracy_7d: row.get(17)?,
                accuracy_30d: row.get(18)?,
                accuracy_current: row.get(19)?,
                total_net_profit: row.get(20)?,
                total_value: row.get(21)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn upsert_party_analytics(&mut self, rows: &[PartyAnalyticsRow]) -> Result<(), DbError> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO party_analytics (
                   party,
                   total_transaction_count, total_purchase_count,
                   total_exchange_count, total_sale_count,
                   total_stock_transactions, total_other_transactions,
                   count_ownership_child, count_ownership_dependent_child,
                   count_ownership_joint, count_ownership_self, count_ownership_spouse,
                   total_transaction_value, average_transaction_amount,
                   avg_perf_7d, avg_perf_30d, avg_perf_current,
                   accuracy_7d, accuracy_30d, accuracy_current,
                   total_net_profit, total_value
                 )
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                         ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22)
                 ON CONFLICT(party) DO UPDATE SET
                   total_transaction_count = excluded.total_transaction_count,
                   total_purchase_count = excluded.total_purchase_count,
                   total_exchange_count = excluded.total_exchange_count,
                   total_sale_count = excluded.total_sale_count,
                   total_stock_transactions = excluded.total_stock_transactions,
                   total_other_transactions = excluded.total_other_transactions,
                   count_ownership_child = excluded.count_ownership_child,
                   count_ownership_dependent_child = excluded.count_ownership_dependent_child,
                   count_ownership_joint = excluded.count_ownership_joint,
                   count_ownership_self = excluded.count_ownership_self,
                   count_ownership_spouse = excluded.count_ownership_spouse,
                   total_transaction_value = excluded.total_transaction_value,
                   average_transaction_amount = excluded.average_transaction_amount,
                   avg_perf_7d = excluded.avg_perf_7d,
                   avg_perf_30d = excluded.avg_perf_30d,
                   avg_perf_current = excluded.avg_perf_current,
                   accuracy_7d = excluded.accuracy_7d,
                   accuracy_30d = excluded.accuracy_30d,
                   accuracy_current = excluded.accuracy_current,
                   total_net_profit = excluded.total_net_profit,
                   total_value = excluded.total_value",
            )?;
            for r in rows {
                stmt.execute(params![
                    r.party,
                    r.total_transactions,
                    r.total_purchases,
                    r.total_exchanges,
                    r.total_sales,
                    r.total_stock_transactions,
                    r.total_other_transactions,
                    r.count_ownership_child,
                    r.count_ownership_dependent_child,
                    r.count_ownership_joint,
                    r.count_ownership_self,
                    r.count_ownership_spouse,
                    r.total_transaction_value,
                    r.average_transaction_amount,
                    r.avg_perf_7d,
                    r.avg_perf_30d,
                    r.avg_perf_current,
                    r.accuracy_7d,
                    r.accuracy_30d,
                    r.accuracy_current,
                    r.total_net_profit,
                    r.total_value,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    pub fn party_analytics(&self, party: &str) -> Result<Option<PartyAnalyticsRow>, DbError> {
        let row = self
            .conn
            .query_row(
                "SELECT party,
                        total_transaction_count, total_purchase_count,
                        total_exchange_count, total_sale_count,
                        total_stock_transactions, total_other_transactions,
                        count_ownership_child, count_ownership_dependent_child,
                        count_ownership_joint, count_ownership_self, count_ownership_spouse,
                        total_transaction_value, average_transaction_amount,
                        avg_perf_7d, avg_perf_30d, avg_perf_current,
                        accuracy_7d, accuracy_30d, accuracy_current,
                        total_net_profit, total_value
                 FROM party_analytics WHERE party = ?1",
                params![party],
                |row| {
                    Ok(PartyAnalyticsRow {
                        party: row.get(0)?,
                        total_transactions: row.get(1)?,
                        total_purchases: row.get(2)?,
                        total_exchanges: row.get(3)?,
                        total_sales: row.get(4)?,
                        total_stock_transactions: row.get(5)?,
                        total_other_transactions: row.get(6)?,
                        count_ownership_child: row.get(7)?,
                        count_ownership_dependent_child: row.get(8)?,
                        count_ownership_joint: row.get(9)?,
                        count_ownership_self: row.get(10)?,
                        count_ownership_spouse: row.get(11)?,
                        total_transaction_value: row.get(12)?,
                        average_transaction_amount: row.get(13)?,
                        avg_perf_7d: row.get(14)?,
                        avg_perf_30d: row.get(15)?,
                        avg_perf_current: row.get(16)?,
                        accuracy_7d: row.get(17)?,
                        accuracy_30d: row.get(18)?,
                        accuracy_current: row.get(19)?,
                        total_net_profit: row.get(20)?,
                        total_value: row.get(21)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }
}
