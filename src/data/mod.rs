use serde::{Deserialize, Serialize};

/// An address book record as it is persisted, with its server-assigned id
/// and the phone number in canonical form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Record {
    pub id: i64,
    pub name: String,
    pub phone: String,
}

/// A partially populated record used to select matching rows. `None` fields
/// add no condition, so an empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl RecordFilter {
    #[cfg(test)]
    pub fn by_phone(phone: &str) -> Self {
        Self {
            id: None,
            name: None,
            phone: Some(phone.to_owned()),
        }
    }
}
