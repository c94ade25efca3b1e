//! Telegram Bot API implementation of the outbound send capability.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::dispatch::notifier::{Notifier, SendError};

const TELEGRAM_API_URL: &str = "https://api.telegram.org";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Clone)]
pub struct TelegramNotifier {
    client: Client,
    token: String,
}

impl TelegramNotifier {
    pub fn new(token: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, token }
    }
}

#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    description: Option<String>,
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(
        &self,
        recipient: &str,
        text: &str,
        link: Option<&str>,
    ) -> Result<(), SendError> {
        let url = format!("{}/bot{}/sendMessage", TELEGRAM_API_URL, self.token);

        let mut payload = serde_json::json!({
            "chat_id": recipient,
            "text": text,
        });
        if let Some(link) = link {
            payload["reply_markup"] = serde_json::json!({
                "inline_keyboard": [[{ "text": "Details", "url": link }]],
            });
        }

        let response = self.client.post(&url).json(&payload).send().await?;
        let status = response.status();

        let body: TelegramResponse = response
            .json()
            .await
            .map_err(|e| SendError::Api(format!("unreadable response ({}): {}", status, e)))?;

        if !body.ok {
            return Err(SendError::Api(
                body.description
                    .unwrap_or_else(|| format!("request failed with status {}", status)),
            ));
        }

        Ok(())
    }
}
