mod client;

pub use client::{create_client, TeeTimeClient};

use thiserror::Error;

/// Failure modes of a call to the aggregation server.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(reqwest::Error),
    #[error("server returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed response body: {0}")]
    Decode(reqwest::Error),
}
