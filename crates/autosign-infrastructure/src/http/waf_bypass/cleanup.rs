use log::{info, warn};
use std::time::Duration;

use super::browser_setup::BrowserSession;
use crate::config::TimeoutConfig;

/// Tear down a browser session: abort the handler, close the browser with a
/// bounded timeout and remove the temp profile directory. Runs on success
/// and failure alike so no browser process outlives its account.
pub(super) async fn cleanup_browser(session: BrowserSession, account_name: &str) {
    let BrowserSession {
        mut browser,
        handler_task,
        temp_dir,
    } = session;

    let timeouts = TimeoutConfig::global();

    handler_task.abort();

    match tokio::time::timeout(timeouts.browser_close, browser.close()).await {
        Ok(Ok(_)) => info!("[{}] Browser closed", account_name),
        Ok(Err(e)) => warn!("[{}] Failed to close browser cleanly: {}", account_name, e),
        Err(_) => warn!("[{}] Browser close timed out", account_name),
    }

    // Give the process a moment to release its profile directory.
    tokio::time::sleep(Duration::from_secs(1)).await;

    if let Err(e) = std::fs::remove_dir_all(&temp_dir) {
        warn!(
            "[{}] Failed to remove temp profile dir on first attempt: {}",
            account_name, e
        );
        tokio::time::sleep(Duration::from_secs(2)).await;

        if let Err(e) = std::fs::remove_dir_all(&temp_dir) {
            warn!(
                "[{}] Temp profile dir left behind at {:?}: {}",
                account_name, temp_dir, e
            );
        } else {
            info!("[{}] Cleaned up temp profile directory", account_name);
        }
    } else {
        info!("[{}] Cleaned up temp profile directory", account_name);
    }
}
