use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
    Queryable,
    Identifiable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::subscribers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: String,
    pub identity: String,
    pub filters: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Subscriber {
    /// Decodes the JSON filter column into its set form. A column that fails
    /// to decode reads as an empty set, which skips the subscriber.
    pub fn filter_set(&self) -> BTreeSet<String> {
        serde_json::from_str(&self.filters).unwrap_or_default()
    }
}

/// Encodes a filter set back into the JSON column form.
pub fn encode_filters(filters: &BTreeSet<String>) -> String {
    serde_json::to_string(filters).unwrap_or_else(|_| "[]".to_string())
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::subscribers)]
#[serde(rename_all = "camelCase")]
pub struct NewSubscriber {
    pub id: Option<String>,
    pub identity: String,
    pub filters: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
