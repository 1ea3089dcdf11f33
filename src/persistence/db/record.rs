use super::super::{Error, Result};
use crate::data::{Record, RecordFilter};
use crate::persistence::RecordStoreApi;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use surrealdb::{engine::any::Any, sql::Thing, Surreal};

#[derive(Clone)]
pub struct SurrealRecordStore {
    db: Surreal<Any>,
}

impl SurrealRecordStore {
    const TABLE: &'static str = "record";
    const SEQ_TABLE: &'static str = "record_seq";

    pub fn new(db: Surreal<Any>) -> Self {
        Self { db }
    }

    /// Advances the id sequence by one. The whole bump is a single
    /// statement, so concurrent callers always see distinct values.
    async fn next_record_id(&self) -> Result<i64> {
        let mut res = self
            .db
            .query("UPSERT ONLY type::thing($table, $key) SET value = (value ?? 0) + 1 RETURN AFTER")
            .bind(("table", Self::SEQ_TABLE))
            .bind(("key", "records"))
            .await?;
        let seq: Option<SequenceDb> = res.take(0)?;
        match seq {
            Some(s) => Ok(s.value),
            None => Err(Error::InsertFailed(String::from(
                "could not advance the record id sequence",
            ))),
        }
    }
}

#[async_trait]
impl RecordStoreApi for SurrealRecordStore {
    async fn add(&self, name: &str, phone: &str) -> Result<i64> {
        let next_id = self.next_record_id().await?;
        let entity = RecordDb {
            id: None,
            name: name.to_owned(),
            phone: phone.to_owned(),
        };
        let created: Option<RecordDb> = self
            .db
            .create((Self::TABLE, next_id))
            .content(entity)
            .await?;
        match created {
            Some(_) => Ok(next_id),
            None => Err(Error::InsertFailed(format!(
                "record {next_id} was not created"
            ))),
        }
    }

    async fn get(&self, filter: &RecordFilter) -> Result<Vec<Record>> {
        let mut conditions: Vec<&str> = Vec::new();
        if filter.id.is_some() {
            conditions.push("id = type::thing($table, $id)");
        }
        if filter.name.is_some() {
            conditions.push("name = $name");
        }
        if filter.phone.is_some() {
            conditions.push("phone = $phone");
        }

        let statement = if conditions.is_empty() {
            String::from("SELECT * FROM type::table($table)")
        } else {
            format!(
                "SELECT * FROM type::table($table) WHERE {}",
                conditions.join(" AND ")
            )
        };

        let mut query = self.db.query(statement).bind(("table", Self::TABLE));
        if let Some(id) = filter.id {
            query = query.bind(("id", id));
        }
        if let Some(ref name) = filter.name {
            query = query.bind(("name", name.clone()));
        }
        if let Some(ref phone) = filter.phone {
            query = query.bind(("phone", phone.clone()));
        }

        let rows: Vec<RecordDb> = query.await?.take(0)?;
        rows.into_iter().map(Record::try_from).collect()
    }

    async fn update(&self, id: Option<i64>, name: &str, phone: &str) -> Result<()> {
        match id {
            // with an id, the whole record is rewritten, which allows
            // changing the phone number itself
            Some(id) => {
                let _: Option<RecordDb> = self
                    .db
                    .update((Self::TABLE, id))
                    .merge(RecordDb {
                        id: None,
                        name: name.to_owned(),
                        phone: phone.to_owned(),
                    })
                    .await?;
            }
            // without one, the phone number identifies the record
            None => {
                self.db
                    .query("UPDATE type::table($table) SET name = $name WHERE phone = $phone")
                    .bind(("table", Self::TABLE))
                    .bind(("name", name.to_owned()))
                    .bind(("phone", phone.to_owned()))
                    .await?
                    .check()?;
            }
        }
        Ok(())
    }

    async fn delete_by_phone(&self, phone: &str) -> Result<()> {
        self.db
            .query("DELETE type::table($table) WHERE phone = $phone")
            .bind(("table", Self::TABLE))
            .bind(("phone", phone.to_owned()))
            .await?
            .check()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordDb {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Thing>,
    pub name: String,
    pub phone: String,
}

impl TryFrom<RecordDb> for Record {
    type Error = Error;

    fn try_from(value: RecordDb) -> Result<Record> {
        let id = match value.id {
            Some(thing) => match thing.id {
                surrealdb::sql::Id::Number(n) => n,
                other => return Err(Error::InvalidRecordId(other.to_string())),
            },
            None => return Err(Error::InvalidRecordId(String::from("missing"))),
        };
        Ok(Record {
            id,
            name: value.name,
            phone: value.phone,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
struct SequenceDb {
    value: i64,
}
