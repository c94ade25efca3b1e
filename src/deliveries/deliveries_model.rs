use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Persisted proof that a subscriber was (at least attempted to be) notified
/// about one external record. Existence of the row is the sole source of
/// truth for "already notified"; the success flag only records whether the
/// send went through.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::delivery_records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRecord {
    pub id: String,
    pub subscriber_id: String,
    pub external_id: String,
    pub title: String,
    pub amount: f64,
    pub currency: String,
    pub link: String,
    pub published_at: NaiveDateTime,
    pub deadline: Option<NaiveDateTime>,
    pub issuer: Option<String>,
    pub success: bool,
    pub created_at: NaiveDateTime,
    pub sent_at: Option<NaiveDateTime>,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::delivery_records)]
#[serde(rename_all = "camelCase")]
pub struct NewDeliveryRecord {
    pub id: Option<String>,
    pub subscriber_id: String,
    pub external_id: String,
    pub title: String,
    pub amount: f64,
    pub currency: String,
    pub link: String,
    pub published_at: NaiveDateTime,
    pub deadline: Option<NaiveDateTime>,
    pub issuer: Option<String>,
    pub success: bool,
    pub created_at: NaiveDateTime,
}
