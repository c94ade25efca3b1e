use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};

use crate::deliveries::DeliveryRepositoryTrait;
use crate::errors::{Error, Result, ValidationError};
use crate::subscribers::subscribers_model::{encode_filters, NewSubscriber, Subscriber};
use crate::subscribers::subscribers_traits::SubscriberRepositoryTrait;

/// Subscriber management surface. Safe to call while a polling cycle is in
/// flight; the cycle snapshots each subscriber's filters when it starts
/// processing them.
pub struct SubscriberService {
    subscriber_repo: Arc<dyn SubscriberRepositoryTrait>,
    delivery_repo: Arc<dyn DeliveryRepositoryTrait>,
}

impl SubscriberService {
    pub fn new(
        subscriber_repo: Arc<dyn SubscriberRepositoryTrait>,
        delivery_repo: Arc<dyn DeliveryRepositoryTrait>,
    ) -> Self {
        SubscriberService {
            subscriber_repo,
            delivery_repo,
        }
    }

    pub fn get_or_create(&self, identity: &str) -> Result<Subscriber> {
        if let Some(subscriber) = self.subscriber_repo.get_by_identity(identity)? {
            return Ok(subscriber);
        }

        let now = Utc::now().naive_utc();
        self.subscriber_repo.insert_new(NewSubscriber {
            id: None,
            identity: identity.to_string(),
            filters: "[]".to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn add_filter(&self, identity: &str, value: &str) -> Result<Subscriber> {
        let value = validate_filter(value)?;
        let subscriber = self.get_or_create(identity)?;

        let mut filters = subscriber.filter_set();
        if !filters.insert(value) {
            return Ok(subscriber);
        }

        self.subscriber_repo
            .update_filters(&subscriber.id, &encode_filters(&filters))
    }

    pub fn remove_filter(&self, identity: &str, value: &str) -> Result<Subscriber> {
        let subscriber = self.get_or_create(identity)?;

        let mut filters = subscriber.filter_set();
        if !filters.remove(value.trim()) {
            return Ok(subscriber);
        }

        self.subscriber_repo
            .update_filters(&subscriber.id, &encode_filters(&filters))
    }

    pub fn list_filters(&self, identity: &str) -> Result<Vec<String>> {
        Ok(self
            .subscriber_repo
            .get_by_identity(identity)?
            .map(|subscriber| subscriber.filter_set().into_iter().collect())
            .unwrap_or_default())
    }

    /// Time of the last successful check for this subscriber, defined as the
    /// newest delivery-record creation time.
    pub fn last_check_time(&self, identity: &str) -> Result<Option<NaiveDateTime>> {
        match self.subscriber_repo.get_by_identity(identity)? {
            Some(subscriber) => self.delivery_repo.latest_created_at(&subscriber.id),
            None => Ok(None),
        }
    }
}

/// Validates an interest filter value: digits and dots only, and non-empty
/// once the dots are stripped. Returns the trimmed value.
pub fn validate_filter(value: &str) -> Result<String> {
    let value = value.trim();

    let well_formed = !value.is_empty()
        && value.chars().all(|c| c.is_ascii_digit() || c == '.')
        && value.chars().any(|c| c.is_ascii_digit());

    if !well_formed {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Filter '{}' is not a valid classification code; expected digits and dots, e.g. 62.01",
            value
        ))));
    }

    Ok(value.to_string())
}
