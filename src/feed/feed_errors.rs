use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    /// Network failure, timeout, or a non-success status from the remote
    /// listing endpoint. Transient; the next cycle retries implicitly.
    #[error("Feed unavailable: {0}")]
    Unavailable(String),

    /// The endpoint answered but the body violated the expected schema.
    #[error("Feed malformed: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for FeedError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            FeedError::Malformed(error.to_string())
        } else {
            FeedError::Unavailable(error.to_string())
        }
    }
}
