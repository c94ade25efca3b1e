use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SendError {
    /// The messaging API refused the message (recipient unreachable,
    /// permission revoked, rate limited).
    #[error("Send rejected by messaging API: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for SendError {
    fn from(error: reqwest::Error) -> Self {
        SendError::Network(error.to_string())
    }
}

/// Outbound send capability. A failure is scoped to the single recipient;
/// callers must not let it spill over to other recipients.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, recipient: &str, text: &str, link: Option<&str>)
        -> Result<(), SendError>;
}
