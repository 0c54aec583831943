//! WhatsApp Business Cloud API transport.
//!
//! Authenticates per-request with a bearer token, so "connecting" means
//! verifying the credentials against the phone number endpoint. There is no
//! long-lived socket and no contact sync: the event stream yields `Ready`
//! immediately after verification succeeds.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::error::TransportError;
use crate::transport::{SendReceipt, Transport, TransportEvent};

/// WhatsApp Cloud API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatsAppConfig {
    /// Graph API bearer token from Meta Business Suite.
    pub access_token: String,
    /// Phone Number ID the messages are sent from.
    pub phone_number_id: String,
    /// Graph API base URL, without trailing slash.
    pub base_url: String,
}

pub struct WhatsAppTransport {
    config: WhatsAppConfig,
    client: reqwest::Client,
}

impl WhatsAppTransport {
    pub fn new(config: WhatsAppConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl Transport for WhatsAppTransport {
    fn name(&self) -> &str {
        "whatsapp"
    }

    async fn connect(&mut self) -> Result<mpsc::Receiver<TransportEvent>, TransportError> {
        if self.config.access_token.is_empty() {
            return Err(TransportError::Config(
                "transport.access_token is not set".to_string(),
            ));
        }
        if self.config.phone_number_id.is_empty() {
            return Err(TransportError::Config(
                "transport.phone_number_id is not set".to_string(),
            ));
        }

        // Credential check: fetch the phone number resource once.
        let url = format!("{}/{}", self.config.base_url, self.config.phone_number_id);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.access_token)
            .send()
            .await
            .map_err(|e| TransportError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::ConnectionFailed(format!(
                "credential check returned {status}: {body}"
            )));
        }

        info!(phone_number_id = %self.config.phone_number_id, "WhatsApp credentials verified");

        // Stateless HTTP transport: the initial sync is trivially complete.
        let (tx, rx) = mpsc::channel(8);
        let _ = tx.try_send(TransportEvent::Ready);
        Ok(rx)
    }

    async fn send(&self, address: &str, text: &str) -> Result<SendReceipt, TransportError> {
        let url = format!(
            "{}/{}/messages",
            self.config.base_url, self.config.phone_number_id
        );

        let body = serde_json::json!({
            "messaging_product": "whatsapp",
            "recipient_type": "individual",
            "to": address,
            "type": "text",
            "text": { "preview_url": false, "body": text },
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| TransportError::SendFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::SendFailed(format!(
                "API returned {status}: {body}"
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TransportError::SendFailed(format!("invalid API response: {e}")))?;

        let message_id = payload["messages"][0]["id"]
            .as_str()
            .unwrap_or("unknown")
            .to_string();
        let status = payload["messages"][0]["message_status"]
            .as_str()
            .unwrap_or("accepted")
            .to_string();

        debug!(message_id = %message_id, to = %address, "WhatsApp message accepted");
        Ok(SendReceipt { message_id, status })
    }
}
