use thiserror::Error;

/// Errors from the end-of-day price source.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("rate limited by price source")]
    RateLimited,
    #[error("price source rejected the API token")]
    InvalidToken,
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected response from price source: {0}")]
    BadResponse(String),
}
