use async_trait::async_trait;
use serde_json::json;

use autosign_domain::notification::{NotificationMessage, NotificationSender};
use autosign_domain::shared::DomainError;

/// Feishu group-bot webhook sender.
pub struct FeishuWebhookSender {
    client: reqwest::Client,
    webhook_url: String,
}

impl FeishuWebhookSender {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url: webhook_url.into(),
        }
    }

    fn build_text_message(&self, message: &NotificationMessage) -> serde_json::Value {
        json!({
            "msg_type": "text",
            "content": {
                "text": format!("{}\n\n{}", message.title, message.content)
            }
        })
    }
}

#[async_trait]
impl NotificationSender for FeishuWebhookSender {
    async fn send(&self, message: &NotificationMessage) -> Result<(), DomainError> {
        let payload = self.build_text_message(message);

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                DomainError::Notification(format!("Failed to send webhook notification: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::Notification(format!(
                "Webhook failed with status {}: {}",
                status, body
            )));
        }

        // Feishu returns {"code":0} for success
        let resp_body: serde_json::Value = response.json().await.map_err(|e| {
            DomainError::Notification(format!("Failed to parse webhook response: {}", e))
        })?;

        if let Some(code) = resp_body.get("code").and_then(|c| c.as_i64()) {
            if code != 0 {
                let msg = resp_body
                    .get("msg")
                    .and_then(|m| m.as_str())
                    .unwrap_or("unknown error");
                return Err(DomainError::Notification(format!(
                    "Webhook error code {}: {}",
                    code, msg
                )));
            }
        }

        Ok(())
    }
}
