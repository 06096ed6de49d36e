//! Library layer for Senate Trades: disclosure analytics over SQLite.
//!
//! Matches disclosed stock purchases to their sales, prices both ends from
//! an end-of-day price API, and rolls the results up per senator and per
//! party. The CLI crate drives [`pipeline::run_analytics`]; everything else
//! here is the pieces it is built from.

pub mod aggregate;
pub mod amount;
pub mod config;
pub mod db;
pub mod error;
pub mod matcher;
pub mod party;
pub mod performance;
pub mod pipeline;
pub mod prices;
pub mod source;

pub use aggregate::{aggregate_senators, BasicTxRow, SenatorAnalyticsRow};
pub use amount::normalize_amount;
pub use config::{AnalyticsConfig, ConfigError};
pub use db::{Db, DbError, MatchedTradeRow, Senator, TransactionRecord};
pub use error::AnalyticsError;
pub use matcher::{match_transactions, MatchedPurchase, PositionStatus, PurchaseTx, SaleTx};
pub use party::PartyAnalyticsRow;
pub use performance::{compute_performance, TradePerformance};
pub use pipeline::{run_analytics, RunSummary};
pub use prices::{clean_ticker, PriceBook, PriceHistory};
pub use source::{DailyClose, DailyCloseSource, PriceClient, SourceError};
