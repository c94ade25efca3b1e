use chrono::NaiveDateTime;

use crate::deliveries::deliveries_model::{DeliveryRecord, NewDeliveryRecord};
use crate::errors::Result;

/// Trait for delivery-ledger operations
pub trait DeliveryRepositoryTrait: Send + Sync {
    /// Inserts the record unless one already exists for the same
    /// (subscriber, external id) pair. Returns `None` when another writer
    /// got there first.
    fn insert_if_absent(&self, new_record: NewDeliveryRecord) -> Result<Option<DeliveryRecord>>;
    fn exists(&self, subscriber_id: &str, external_id: &str) -> Result<bool>;
    fn mark_sent(&self, record_id: &str, sent_at: NaiveDateTime) -> Result<()>;
    /// Watermark: newest record creation time for the subscriber.
    fn latest_created_at(&self, subscriber_id: &str) -> Result<Option<NaiveDateTime>>;
    fn load_for_subscriber(&self, subscriber_id: &str) -> Result<Vec<DeliveryRecord>>;
}
