use async_trait::async_trait;
use log::info;

use autosign_domain::notification::{NotificationMessage, NotificationSender};
use autosign_domain::shared::DomainError;

/// Fallback sender that writes the report to the log stream.
pub struct LogSender;

#[async_trait]
impl NotificationSender for LogSender {
    async fn send(&self, message: &NotificationMessage) -> Result<(), DomainError> {
        info!("{}\n{}", message.title, message.content);
        Ok(())
    }
}
