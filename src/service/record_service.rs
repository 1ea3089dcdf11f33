use super::Result;
use crate::data::{Record, RecordFilter};
use crate::persistence::RecordStoreApi;
use crate::util::phone;
use async_trait::async_trait;
use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait RecordServiceApi: Send + Sync {
    /// Normalizes the phone number and stores a new record, returning the
    /// assigned id.
    async fn add_record(&self, name: &str, phone: &str) -> Result<i64>;

    /// Returns all records matching the filter. Filter values are matched
    /// exactly as given and are not normalized.
    async fn get_records(&self, filter: RecordFilter) -> Result<Vec<Record>>;

    /// Normalizes the phone number and rewrites the record selected by id,
    /// or by the normalized phone if no id is given.
    async fn update_record(&self, id: Option<i64>, name: &str, phone: &str) -> Result<()>;

    /// Normalizes the phone number and deletes the record(s) stored under it.
    async fn delete_record_by_phone(&self, phone: &str) -> Result<()>;
}

/// The record service is responsible for the address book records
#[derive(Clone)]
pub struct RecordService {
    store: Arc<dyn RecordStoreApi>,
}

impl RecordService {
    pub fn new(store: Arc<dyn RecordStoreApi>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RecordServiceApi for RecordService {
    async fn add_record(&self, name: &str, phone: &str) -> Result<i64> {
        let canonical = phone::normalize(phone)?;
        let id = self.store.add(name, &canonical).await?;
        Ok(id)
    }

    async fn get_records(&self, filter: RecordFilter) -> Result<Vec<Record>> {
        let records = self.store.get(&filter).await?;
        Ok(records)
    }

    async fn update_record(&self, id: Option<i64>, name: &str, phone: &str) -> Result<()> {
        let canonical = phone::normalize(phone)?;
        self.store.update(id, name, &canonical).await?;
        Ok(())
    }

    async fn delete_record_by_phone(&self, phone: &str) -> Result<()> {
        let canonical = phone::normalize(phone)?;
        self.store.delete_by_phone(&canonical).await?;
        Ok(())
    }
}
