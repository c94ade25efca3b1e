use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// A record fetched from the remote feed for one filter. Transient: lives
/// only within a single reconciliation pass, never persisted as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub external_id: String,
    pub title: String,
    pub max_price: Decimal,
    pub currency: String,
    pub link: String,
    pub published_at: NaiveDateTime,
    pub deadline: Option<NaiveDateTime>,
    pub customers: Vec<String>,
}

impl Candidate {
    pub fn issuer(&self) -> Option<&str> {
        self.customers.first().map(String::as_str)
    }
}
