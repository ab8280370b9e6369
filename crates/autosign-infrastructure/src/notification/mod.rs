mod feishu;
mod log_sender;

pub use feishu::FeishuWebhookSender;
pub use log_sender::LogSender;

use std::sync::Arc;

use autosign_domain::notification::NotificationSender;

/// Select the delivery channel: a Feishu-style webhook when configured,
/// otherwise the log stream.
pub fn create_sender(webhook_url: Option<String>) -> Arc<dyn NotificationSender> {
    match webhook_url {
        Some(url) if !url.trim().is_empty() => Arc::new(FeishuWebhookSender::new(url)),
        _ => Arc::new(LogSender),
    }
}
