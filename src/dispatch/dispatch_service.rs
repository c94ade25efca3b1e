use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, warn};

use crate::deliveries::DeliveryRepositoryTrait;
use crate::dispatch::notifier::Notifier;
use crate::reconciliation::reconciliation_model::PendingNotification;

const DISPLAY_TIME_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Counters for one dispatch pass.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DispatchOutcome {
    pub recorded: usize,
    pub sent: usize,
    pub send_failures: usize,
}

/// Delivers to-notify items: ledger entry first, then the send. The entry is
/// written with success=false before any network call so a crash between the
/// two never causes a re-send on the next cycle.
pub struct DispatchService {
    delivery_repo: Arc<dyn DeliveryRepositoryTrait>,
    notifier: Arc<dyn Notifier>,
}

impl DispatchService {
    pub fn new(delivery_repo: Arc<dyn DeliveryRepositoryTrait>, notifier: Arc<dyn Notifier>) -> Self {
        DispatchService {
            delivery_repo,
            notifier,
        }
    }

    pub async fn dispatch(&self, items: &[PendingNotification]) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();

        for item in items {
            let record = match self.delivery_repo.insert_if_absent(item.to_new_record()) {
                Ok(Some(record)) => record,
                Ok(None) => {
                    // Another writer recorded the pair first; already handled.
                    debug!(
                        "Tender {} already recorded for subscriber {}",
                        item.candidate.external_id, item.identity
                    );
                    continue;
                }
                Err(e) => {
                    // A storage failure aborts only this item.
                    error!(
                        "Failed to record delivery of tender {} for subscriber {}: {}",
                        item.candidate.external_id, item.identity, e
                    );
                    continue;
                }
            };
            outcome.recorded += 1;

            let text = render_notification(item);
            match self
                .notifier
                .send(&item.identity, &text, Some(&item.candidate.link))
                .await
            {
                Ok(()) => {
                    if let Err(e) = self
                        .delivery_repo
                        .mark_sent(&record.id, Utc::now().naive_utc())
                    {
                        error!(
                            "Failed to mark tender {} as sent for subscriber {}: {}",
                            item.candidate.external_id, item.identity, e
                        );
                    } else {
                        outcome.sent += 1;
                    }
                }
                Err(e) => {
                    // No retry within the cycle; the record keeps success=false
                    // so the pair is never re-sent later either.
                    warn!(
                        "Failed to send tender {} to subscriber {}: {}",
                        item.candidate.external_id, item.identity, e
                    );
                    outcome.send_failures += 1;
                }
            }
        }

        outcome
    }
}

fn render_notification(item: &PendingNotification) -> String {
    let candidate = &item.candidate;

    let mut text = format!(
        "New tender!\n\nNumber: {}\nTitle: {}\nAmount: {} {}\nPublished: {}\n",
        candidate.external_id,
        candidate.title,
        candidate.max_price.round_dp(2),
        candidate.currency,
        candidate.published_at.format(DISPLAY_TIME_FORMAT),
    );
    if let Some(deadline) = candidate.deadline {
        text.push_str(&format!(
            "Applications until: {}\n",
            deadline.format(DISPLAY_TIME_FORMAT)
        ));
    }
    if let Some(issuer) = candidate.issuer() {
        text.push_str(&format!("Issuer: {}\n", issuer));
    }
    text.push_str(&format!("Code: {}", item.filter));

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::Candidate;
    use rust_decimal::Decimal;

    #[test]
    fn renders_all_known_fields() {
        let item = PendingNotification {
            subscriber_id: "s-1".to_string(),
            identity: "100".to_string(),
            filter: "62.01".to_string(),
            candidate: Candidate {
                external_id: "TNDR-1".to_string(),
                title: "Network maintenance".to_string(),
                max_price: Decimal::new(250_000_00, 2),
                currency: "RUB".to_string(),
                link: "https://example.test/TNDR-1".to_string(),
                published_at: "2024-03-01T10:15:00".parse().unwrap(),
                deadline: Some("2024-03-15T18:00:00".parse().unwrap()),
                customers: vec!["City administration".to_string()],
            },
        };

        let text = render_notification(&item);
        assert!(text.contains("Number: TNDR-1"));
        assert!(text.contains("Title: Network maintenance"));
        assert!(text.contains("Amount: 250000.00 RUB"));
        assert!(text.contains("Published: 01.03.2024 10:15"));
        assert!(text.contains("Applications until: 15.03.2024 18:00"));
        assert!(text.contains("Issuer: City administration"));
        assert!(text.contains("Code: 62.01"));
    }

    #[test]
    fn omits_missing_optional_fields() {
        let item = PendingNotification {
            subscriber_id: "s-1".to_string(),
            identity: "100".to_string(),
            filter: "62.01".to_string(),
            candidate: Candidate {
                external_id: "TNDR-2".to_string(),
                title: "No description".to_string(),
                max_price: Decimal::ZERO,
                currency: "RUB".to_string(),
                link: "https://example.test/TNDR-2".to_string(),
                published_at: "2024-03-01T10:15:00".parse().unwrap(),
                deadline: None,
                customers: vec![],
            },
        };

        let text = render_notification(&item);
        assert!(!text.contains("Applications until"));
        assert!(!text.contains("Issuer"));
    }
}
