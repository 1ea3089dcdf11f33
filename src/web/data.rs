use crate::data::{Record, RecordFilter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub trait IntoWeb<T> {
    fn into_web(self) -> T;
}

pub trait FromWeb<T> {
    fn from_web(value: T) -> Self;
}

/// The record shape clients submit. The id only identifies a record on
/// update; name and phone may be left out and behave as empty.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecordPayload {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// A stored record as returned to clients
#[derive(Debug, Serialize, ToSchema)]
pub struct RecordWeb {
    pub id: i64,
    pub name: String,
    pub phone: String,
}

impl IntoWeb<RecordWeb> for Record {
    fn into_web(self) -> RecordWeb {
        RecordWeb {
            id: self.id,
            name: self.name,
            phone: self.phone,
        }
    }
}

impl FromWeb<RecordPayload> for RecordFilter {
    fn from_web(value: RecordPayload) -> Self {
        // an absent field and an empty one both mean "no filter"
        Self {
            id: value.id,
            name: value.name.filter(|name| !name.is_empty()),
            phone: value.phone.filter(|phone| !phone.is_empty()),
        }
    }
}

/// Response for a successfully added record
#[derive(Debug, Serialize, ToSchema)]
pub struct NewRecordResponse {
    pub id: i64,
}
