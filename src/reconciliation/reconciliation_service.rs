use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::deliveries::DeliveryRepositoryTrait;
use crate::dispatch::DispatchService;
use crate::errors::Result;
use crate::feed::{TenderFeed, DEFAULT_PAGE_SIZE};
use crate::reconciliation::reconciliation_model::{CycleSummary, PendingNotification};
use crate::subscribers::{Subscriber, SubscriberRepositoryTrait};

/// Decides, per subscriber and filter, which remote records are new since
/// the last delivery, and hands them to the dispatcher. One instance drives
/// one cycle at a time; the scheduler never overlaps invocations.
pub struct ReconciliationService {
    subscriber_repo: Arc<dyn SubscriberRepositoryTrait>,
    delivery_repo: Arc<dyn DeliveryRepositoryTrait>,
    feed: Arc<dyn TenderFeed>,
    dispatcher: DispatchService,
}

impl ReconciliationService {
    pub fn new(
        subscriber_repo: Arc<dyn SubscriberRepositoryTrait>,
        delivery_repo: Arc<dyn DeliveryRepositoryTrait>,
        feed: Arc<dyn TenderFeed>,
        dispatcher: DispatchService,
    ) -> Self {
        ReconciliationService {
            subscriber_repo,
            delivery_repo,
            feed,
            dispatcher,
        }
    }

    pub async fn run_cycle(&self) -> Result<CycleSummary> {
        let mut summary = CycleSummary::default();
        let subscribers = self.subscriber_repo.load_all()?;

        for subscriber in subscribers {
            // Snapshot: concurrent filter edits apply from the next cycle on.
            let filters = subscriber.filter_set();
            if filters.is_empty() {
                continue;
            }
            summary.subscribers_checked += 1;

            let pending = self
                .collect_for_subscriber(&subscriber, &filters, &mut summary)
                .await?;
            summary.discovered += pending.len();

            let outcome = self.dispatcher.dispatch(&pending).await;
            summary.recorded += outcome.recorded;
            summary.sent += outcome.sent;
            summary.send_failures += outcome.send_failures;
        }

        info!(
            "Cycle done: {} subscribers, {} filters, {} new, {} sent, {} send failures, {} feed failures",
            summary.subscribers_checked,
            summary.filters_checked,
            summary.discovered,
            summary.sent,
            summary.send_failures,
            summary.feed_failures,
        );

        Ok(summary)
    }

    async fn collect_for_subscriber(
        &self,
        subscriber: &Subscriber,
        filters: &BTreeSet<String>,
        summary: &mut CycleSummary,
    ) -> Result<Vec<PendingNotification>> {
        let watermark = self.delivery_repo.latest_created_at(&subscriber.id)?;
        debug!(
            "Checking subscriber {} (watermark {:?})",
            subscriber.identity, watermark
        );

        let mut pending = Vec::new();
        // The same record can surface through several filters in one pass,
        // before any ledger row exists for it.
        let mut seen_this_pass: HashSet<String> = HashSet::new();

        for filter in filters {
            summary.filters_checked += 1;

            let candidates = match self.feed.fetch(filter, DEFAULT_PAGE_SIZE).await {
                Ok(candidates) => candidates,
                Err(e) => {
                    // Scoped to this filter; no ledger row was written, so the
                    // same candidates come back next cycle.
                    warn!(
                        "Feed check failed for filter {} of subscriber {}: {}",
                        filter, subscriber.identity, e
                    );
                    summary.feed_failures += 1;
                    continue;
                }
            };

            for candidate in candidates {
                if let Some(watermark) = watermark {
                    if candidate.published_at <= watermark {
                        continue;
                    }
                }
                if seen_this_pass.contains(&candidate.external_id) {
                    continue;
                }
                if self
                    .delivery_repo
                    .exists(&subscriber.id, &candidate.external_id)?
                {
                    continue;
                }

                seen_this_pass.insert(candidate.external_id.clone());
                pending.push(PendingNotification {
                    subscriber_id: subscriber.id.clone(),
                    identity: subscriber.identity.clone(),
                    filter: filter.clone(),
                    candidate,
                });
            }
        }

        Ok(pending)
    }
}
