pub mod record_service;

use crate::persistence::{self, DbContext};
use crate::util;
use record_service::{RecordService, RecordServiceApi};
use std::sync::Arc;
use thiserror::Error;

/// Generic result type
pub type Result<T> = std::result::Result<T, Error>;

/// Generic error type
#[derive(Debug, Error)]
pub enum Error {
    /// all errors originating from the persistence layer
    #[error("Persistence error: {0}")]
    Persistence(#[from] persistence::Error),

    /// errors from normalizing a submitted phone number
    #[error("Phone normalization error: {0}")]
    PhoneNormalization(#[from] util::phone::Error),
}

/// A dependency container for all services that are used by the application
#[derive(Clone)]
pub struct ServiceContext {
    pub record_service: Arc<dyn RecordServiceApi>,
}

pub fn create_service_context(db: DbContext) -> ServiceContext {
    let record_service = Arc::new(RecordService::new(db.record_store));
    ServiceContext { record_service }
}
