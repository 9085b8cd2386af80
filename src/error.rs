//! Error types for the rescan request path

use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong between a confirmed rescan and its outcome.
///
/// None of these reach the user verbatim; they are logged and replaced by a
/// generic failure notification.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Could not acquire access token: {0}")]
    Credential(String),

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Scan endpoint returned HTTP {0}")]
    Status(StatusCode),

    #[error("Could not parse response body: {0}")]
    Body(String),

    #[error("Scan task ended without reporting a result")]
    Interrupted,
}

pub type Result<T> = std::result::Result<T, ScanError>;
