use thiserror::Error;

use crate::config::ConfigError;
use crate::db::DbError;

/// Top-level error for an analytics run.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
