pub mod feed_client;
pub mod feed_errors;
pub mod feed_model;

pub use feed_client::{HttpTenderFeed, TenderFeed, DEFAULT_PAGE_SIZE};
pub use feed_errors::FeedError;
pub use feed_model::Candidate;
