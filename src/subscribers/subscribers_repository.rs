use std::sync::Arc;

use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::SqliteConnection;
use uuid::Uuid;

use crate::db::get_connection;
use crate::errors::Result;
use crate::schema::subscribers;
use crate::subscribers::subscribers_model::{NewSubscriber, Subscriber};
use crate::subscribers::subscribers_traits::SubscriberRepositoryTrait;

pub struct SubscriberRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl SubscriberRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        SubscriberRepository { pool }
    }
}

impl SubscriberRepositoryTrait for SubscriberRepository {
    fn get_by_identity(&self, subscriber_identity: &str) -> Result<Option<Subscriber>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(subscribers::table
            .filter(subscribers::identity.eq(subscriber_identity))
            .first::<Subscriber>(&mut conn)
            .optional()?)
    }

    fn insert_new(&self, mut new_subscriber: NewSubscriber) -> Result<Subscriber> {
        let mut conn = get_connection(&self.pool)?;

        new_subscriber.id = Some(Uuid::new_v4().to_string());

        Ok(diesel::insert_into(subscribers::table)
            .values(&new_subscriber)
            .returning(subscribers::all_columns)
            .get_result(&mut conn)?)
    }

    fn update_filters(&self, subscriber_id: &str, filters_json: &str) -> Result<Subscriber> {
        let mut conn = get_connection(&self.pool)?;

        diesel::update(subscribers::table.find(subscriber_id))
            .set((
                subscribers::filters.eq(filters_json),
                subscribers::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;

        Ok(subscribers::table
            .find(subscriber_id)
            .first::<Subscriber>(&mut conn)?)
    }

    fn load_all(&self) -> Result<Vec<Subscriber>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(subscribers::table.load::<Subscriber>(&mut conn)?)
    }
}
