use std::sync::Arc;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::SqliteConnection;
use uuid::Uuid;

use crate::db::get_connection;
use crate::deliveries::deliveries_model::{DeliveryRecord, NewDeliveryRecord};
use crate::deliveries::deliveries_traits::DeliveryRepositoryTrait;
use crate::errors::Result;
use crate::schema::delivery_records;

pub struct DeliveryRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl DeliveryRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        DeliveryRepository { pool }
    }
}

impl DeliveryRepositoryTrait for DeliveryRepository {
    fn insert_if_absent(&self, mut new_record: NewDeliveryRecord) -> Result<Option<DeliveryRecord>> {
        let mut conn = get_connection(&self.pool)?;

        new_record.id = Some(Uuid::new_v4().to_string());

        // The unique index on (subscriber_id, external_id) is the real dedup
        // guard; a conflict means a concurrent writer already recorded the pair.
        Ok(diesel::insert_into(delivery_records::table)
            .values(&new_record)
            .on_conflict((
                delivery_records::subscriber_id,
                delivery_records::external_id,
            ))
            .do_nothing()
            .returning(delivery_records::all_columns)
            .get_result(&mut conn)
            .optional()?)
    }

    fn exists(&self, for_subscriber_id: &str, for_external_id: &str) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        Ok(delivery_records::table
            .filter(delivery_records::subscriber_id.eq(for_subscriber_id))
            .filter(delivery_records::external_id.eq(for_external_id))
            .select(delivery_records::id)
            .first::<String>(&mut conn)
            .optional()?
            .is_some())
    }

    fn mark_sent(&self, record_id: &str, sent_at: NaiveDateTime) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        diesel::update(delivery_records::table.find(record_id))
            .set((
                delivery_records::success.eq(true),
                delivery_records::sent_at.eq(Some(sent_at)),
            ))
            .execute(&mut conn)?;
        Ok(())
    }

    fn latest_created_at(&self, for_subscriber_id: &str) -> Result<Option<NaiveDateTime>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(delivery_records::table
            .filter(delivery_records::subscriber_id.eq(for_subscriber_id))
            .select(diesel::dsl::max(delivery_records::created_at))
            .first::<Option<NaiveDateTime>>(&mut conn)?)
    }

    fn load_for_subscriber(&self, for_subscriber_id: &str) -> Result<Vec<DeliveryRecord>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(delivery_records::table
            .filter(delivery_records::subscriber_id.eq(for_subscriber_id))
            .order(delivery_records::created_at.asc())
            .load::<DeliveryRecord>(&mut conn)?)
    }
}
