//! HTTP client for the procurement listing endpoint.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;

use crate::feed::feed_errors::FeedError;
use crate::feed::feed_model::Candidate;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Page size requested from the listing endpoint per filter.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Public notice page for a tender, keyed by its registry number.
const DETAIL_URL_PREFIX: &str =
    "https://zakupki.gov.ru/epz/order/notice/ea44/view/common-info.html?regNumber=";

/// Read-only source of candidate records for one filter, newest first.
#[async_trait]
pub trait TenderFeed: Send + Sync {
    async fn fetch(&self, filter: &str, page_size: u32) -> Result<Vec<Candidate>, FeedError>;
}

#[derive(Clone)]
pub struct HttpTenderFeed {
    client: Client,
    base_url: String,
}

impl HttpTenderFeed {
    pub fn new(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl TenderFeed for HttpTenderFeed {
    async fn fetch(&self, filter: &str, page_size: u32) -> Result<Vec<Candidate>, FeedError> {
        let url = format!("{}/purchases", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("okved2", filter),
                ("sortBy", "UPDATE_DATE"),
                ("sortDirection", "DESC"),
            ])
            .query(&[("pageSize", page_size)])
            .send()
            .await
            .map_err(|e| FeedError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FeedError::Unavailable(format!(
                "request for filter {} failed with status {}",
                filter,
                response.status()
            )));
        }

        let page: Vec<WireTender> = response
            .json()
            .await
            .map_err(|e| FeedError::Malformed(e.to_string()))?;

        Ok(parse_page(page))
    }
}

/// Wire shape of one listing entry as the remote endpoint serves it.
#[derive(Debug, Deserialize)]
struct WireTender {
    purchase_number: Option<String>,
    object_info: Option<String>,
    max_price: Option<Decimal>,
    currency_code: Option<String>,
    published_at: Option<String>,
    collecting_finished_at: Option<String>,
    customers: Option<Vec<String>>,
}

/// Converts a fetched page into candidates. A record that violates the
/// schema (missing id, unparseable timestamp) is skipped with a warning;
/// the rest of the page still goes through.
fn parse_page(page: Vec<WireTender>) -> Vec<Candidate> {
    page.into_iter()
        .filter_map(|wire| match candidate_from_wire(wire) {
            Ok(candidate) => Some(candidate),
            Err(e) => {
                warn!("Skipping malformed feed record: {}", e);
                None
            }
        })
        .collect()
}

fn candidate_from_wire(wire: WireTender) -> Result<Candidate, FeedError> {
    let external_id = wire
        .purchase_number
        .filter(|number| !number.is_empty())
        .ok_or_else(|| FeedError::Malformed("record is missing purchase_number".to_string()))?;

    let published_at = wire
        .published_at
        .as_deref()
        .ok_or_else(|| {
            FeedError::Malformed(format!("record {} is missing published_at", external_id))
        })
        .and_then(parse_remote_timestamp)?;

    let deadline = wire
        .collecting_finished_at
        .as_deref()
        .map(parse_remote_timestamp)
        .transpose()?;

    Ok(Candidate {
        link: format!("{}{}", DETAIL_URL_PREFIX, external_id),
        external_id,
        title: wire
            .object_info
            .unwrap_or_else(|| "No description".to_string()),
        max_price: wire.max_price.unwrap_or_default(),
        currency: wire.currency_code.unwrap_or_else(|| "RUB".to_string()),
        published_at,
        deadline,
        customers: wire.customers.unwrap_or_default(),
    })
}

/// The endpoint publishes ISO-8601 timestamps, with or without an offset.
/// Offset-carrying values are normalized to UTC.
fn parse_remote_timestamp(raw: &str) -> Result<NaiveDateTime, FeedError> {
    if let Ok(with_offset) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Ok(with_offset.naive_utc());
    }

    raw.parse::<NaiveDateTime>()
        .map_err(|e| FeedError::Malformed(format!("invalid timestamp '{}': {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire_page(json: &str) -> Vec<WireTender> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn parses_a_complete_record() {
        let page = wire_page(
            r#"[{
                "purchase_number": "0173200001424000001",
                "object_info": "Software development services",
                "max_price": 1500000.50,
                "currency_code": "RUB",
                "published_at": "2024-03-01T10:15:00+03:00",
                "collecting_finished_at": "2024-03-15T18:00:00+03:00",
                "customers": ["City administration"]
            }]"#,
        );

        let candidates = parse_page(page);
        assert_eq!(candidates.len(), 1);

        let candidate = &candidates[0];
        assert_eq!(candidate.external_id, "0173200001424000001");
        assert_eq!(candidate.title, "Software development services");
        assert_eq!(candidate.currency, "RUB");
        assert_eq!(candidate.issuer(), Some("City administration"));
        assert!(candidate.link.ends_with("0173200001424000001"));
        // +03:00 offset normalized to UTC
        assert_eq!(
            candidate.published_at,
            "2024-03-01T07:15:00".parse::<NaiveDateTime>().unwrap()
        );
        assert!(candidate.deadline.is_some());
    }

    #[test]
    fn skips_record_with_malformed_timestamp() {
        let page = wire_page(
            r#"[
                {"purchase_number": "A-1", "published_at": "not-a-date"},
                {"purchase_number": "A-2", "published_at": "2024-03-01T10:15:00"}
            ]"#,
        );

        let candidates = parse_page(page);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].external_id, "A-2");
    }

    #[test]
    fn skips_record_without_registry_number() {
        let page = wire_page(r#"[{"published_at": "2024-03-01T10:15:00"}]"#);
        assert!(parse_page(page).is_empty());
    }

    #[test]
    fn defaults_optional_display_fields() {
        let page = wire_page(
            r#"[{"purchase_number": "B-7", "published_at": "2024-03-01T10:15:00"}]"#,
        );

        let candidate = &parse_page(page)[0];
        assert_eq!(candidate.title, "No description");
        assert_eq!(candidate.currency, "RUB");
        assert_eq!(candidate.max_price, Decimal::ZERO);
        assert!(candidate.deadline.is_none());
        assert!(candidate.customers.is_empty());
    }
}
