use chrono::Utc;
use num_traits::ToPrimitive;

use crate::deliveries::NewDeliveryRecord;
use crate::feed::Candidate;

/// A candidate that passed the watermark and dedup checks for one
/// subscriber and is queued for delivery.
#[derive(Debug, Clone)]
pub struct PendingNotification {
    pub subscriber_id: String,
    pub identity: String,
    pub filter: String,
    pub candidate: Candidate,
}

impl PendingNotification {
    pub fn to_new_record(&self) -> NewDeliveryRecord {
        let candidate = &self.candidate;
        NewDeliveryRecord {
            id: None,
            subscriber_id: self.subscriber_id.clone(),
            external_id: candidate.external_id.clone(),
            title: candidate.title.clone(),
            amount: candidate.max_price.to_f64().unwrap_or(0.0),
            currency: candidate.currency.clone(),
            link: candidate.link.clone(),
            published_at: candidate.published_at,
            deadline: candidate.deadline,
            issuer: candidate.issuer().map(str::to_string),
            success: false,
            created_at: Utc::now().naive_utc(),
        }
    }
}

/// Counters for one reconcile+dispatch cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CycleSummary {
    pub subscribers_checked: usize,
    pub filters_checked: usize,
    pub feed_failures: usize,
    pub discovered: usize,
    pub recorded: usize,
    pub sent: usize,
    pub send_failures: usize,
}
