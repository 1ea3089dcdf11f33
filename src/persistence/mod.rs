use crate::config::Config;
use crate::data::{Record, RecordFilter};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

pub mod db;

pub use db::record::SurrealRecordStore;

/// Generic persistence result type
pub type Result<T> = std::result::Result<T, Error>;

/// Generic persistence error type
#[derive(Debug, Error)]
pub enum Error {
    #[error("SurrealDB connection error {0}")]
    SurrealConnection(#[from] surrealdb::Error),

    #[error("Failed to insert into database: {0}")]
    InsertFailed(String),

    #[error("invalid record id: {0}")]
    InvalidRecordId(String),
}

/// The API for the one table of this application, holding address book
/// records. Phone numbers are expected in canonical form by every operation.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RecordStoreApi: Send + Sync {
    /// Inserts a new record and returns its assigned integer id.
    async fn add(&self, name: &str, phone: &str) -> Result<i64>;
    /// Returns all records matching the set fields of the filter, in
    /// storage order.
    async fn get(&self, filter: &RecordFilter) -> Result<Vec<Record>>;
    /// Rewrites the record selected by id, or by phone if no id is given.
    /// Matching no rows is not an error.
    async fn update(&self, id: Option<i64>, name: &str, phone: &str) -> Result<()>;
    /// Deletes the record(s) with exactly this phone number.
    async fn delete_by_phone(&self, phone: &str) -> Result<()>;
}

/// A container for all persistence stores, injected into the service layer.
#[derive(Clone)]
pub struct DbContext {
    pub record_store: Arc<dyn RecordStoreApi>,
}

/// Connects to the configured database and sets up the stores. Called once
/// at startup - a failure here is fatal for the process.
pub async fn get_db_context(conf: &Config) -> Result<DbContext> {
    let db = db::get_surreal_db(
        &conf.surreal_db_connection,
        &conf.db_namespace,
        &conf.db_database,
    )
    .await?;
    let record_store = Arc::new(SurrealRecordStore::new(db));
    Ok(DbContext { record_store })
}
