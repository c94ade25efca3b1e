use crate::errors::Result;
use crate::subscribers::subscribers_model::{NewSubscriber, Subscriber};

/// Trait for subscriber store operations
pub trait SubscriberRepositoryTrait: Send + Sync {
    fn get_by_identity(&self, identity: &str) -> Result<Option<Subscriber>>;
    fn insert_new(&self, new_subscriber: NewSubscriber) -> Result<Subscriber>;
    fn update_filters(&self, subscriber_id: &str, filters_json: &str) -> Result<Subscriber>;
    fn load_all(&self) -> Result<Vec<Subscriber>>;
}
