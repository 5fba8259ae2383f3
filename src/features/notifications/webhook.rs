//! HTTP webhook notification sender
//!
//! Posts delivery requests as JSON to a chat API endpoint, authenticated with
//! the bot token. The token is an opaque secret and never appears in logs or
//! error messages.

use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::debug;
use serde_json::json;

use super::Notifier;

/// Request timeout for a single delivery attempt
const DELIVERY_TIMEOUT_SECS: u64 = 15;

/// Sends notifications to a chat API over HTTP
pub struct WebhookNotifier {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl WebhookNotifier {
    /// Create a sender for the given endpoint and credential
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DELIVERY_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token: token.into(),
        })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn deliver(&self, destination: &str, message: &str) -> Result<()> {
        let payload = json!({
            "chat_id": destination,
            "text": message,
        });

        debug!("Posting notification for {destination}");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    anyhow!("delivery timed out after {DELIVERY_TIMEOUT_SECS} seconds")
                } else if e.is_connect() {
                    anyhow!("could not connect to notification endpoint")
                } else {
                    // reqwest errors keep URLs, not credentials; still strip
                    // to the error kind to be safe
                    anyhow!("delivery request failed: {}", e.without_url())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("notification endpoint returned HTTP {status}"));
        }
        Ok(())
    }
}
