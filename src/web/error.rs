use crate::service;
use thiserror::Error;

/// Generic result type
pub type Result<T> = std::result::Result<T, Error>;

/// Generic error type
#[derive(Debug, Error)]
pub enum Error {
    /// the request body could not be decoded
    #[error("Invalid request body: {0}")]
    Json(#[from] serde_json::Error),

    /// all errors originating from the service layer
    #[error("Service error: {0}")]
    Service(#[from] service::Error),
}
